use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::{Error, Result};
use crate::product::Product;
use crate::query::QueryDescriptor;
use crate::store::memory::evaluate;
use crate::store::{Page, Paginator};

/// Filesystem-based catalog store
///
/// The catalog is a single JSON array of products:
/// ```text
/// [
///   {"id": 1, "name": "...", "price": "12.50", "category": "...", ...},
///   ...
/// ]
/// ```
///
/// The file is read on every query, so edits show up without a restart.
pub struct FilesystemStore {
    path: PathBuf,
}

impl FilesystemStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_products(&self) -> Result<Vec<Product>> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            Error::StorageUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let products: Vec<Product> = serde_json::from_str(&content).map_err(|e| {
            Error::StorageUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        debug!("Loaded {} products from {}", products.len(), self.path.display());
        Ok(products)
    }
}

#[async_trait]
impl Paginator<Product> for FilesystemStore {
    async fn execute(&self, query: &QueryDescriptor) -> Result<Page<Product>> {
        let products = self.read_products().await?;
        evaluate(&products, query)
    }
}
