//! Read-only product catalog server.
//!
//! Turns flat query parameters into a validated, deterministically ordered
//! page of products and serves it as JSON.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use stockroom::{App, Catalog, FilesystemStore};
//!
//! let store = Arc::new(FilesystemStore::new(PathBuf::from("./catalog/products.json")));
//! let app = App::new(Catalog::new(store))?;
//! let response = app.handle(request).await;
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod product;
pub mod query;
pub mod store;

pub use api::App;
pub use catalog::Catalog;
pub use error::{Error, QueryError, Result, ValidationError};
pub use product::Product;
pub use query::{PageRequestSpec, QueryBuilder, QueryDescriptor, RawParams};
pub use store::fs::FilesystemStore;
pub use store::memory::MemoryStore;
pub use store::{Paginator, Record};
