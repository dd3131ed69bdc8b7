//! Product listing use cases.
//!
//! Every use case runs the same pipeline and differs only in which filters
//! it activates.

use std::sync::Arc;

use stockroom_core::{PageResponse, ProductResponse};

use crate::error::Result;
use crate::product::Product;
use crate::query::{PageRequestSpec, QueryBuilder};
use crate::store::Paginator;

pub type ProductPage = PageResponse<ProductResponse>;

#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn Paginator<Product>>,
}

impl Catalog {
    pub fn new(store: Arc<dyn Paginator<Product>>) -> Self {
        Self { store }
    }

    /// All products, sorted and paged.
    pub async fn list_all(&self, spec: &PageRequestSpec) -> Result<ProductPage> {
        self.run(QueryBuilder::new(spec)).await
    }

    /// Products in exactly `category`.
    pub async fn by_category(&self, category: &str, spec: &PageRequestSpec) -> Result<ProductPage> {
        self.run(QueryBuilder::new(spec).category(Some(category))).await
    }

    /// Products whose name contains `keyword`, ignoring case.
    pub async fn search(&self, keyword: &str, spec: &PageRequestSpec) -> Result<ProductPage> {
        self.run(QueryBuilder::new(spec).keyword(Some(keyword))).await
    }

    /// Category and keyword together; either may be absent.
    pub async fn filter(&self, spec: &PageRequestSpec) -> Result<ProductPage> {
        self.run(
            QueryBuilder::new(spec)
                .category(spec.category())
                .keyword(spec.keyword()),
        )
        .await
    }

    /// Products priced within `[minPrice, maxPrice]`.
    pub async fn price_range(&self, spec: &PageRequestSpec) -> Result<ProductPage> {
        self.run(QueryBuilder::new(spec).price_range(spec.min_price(), spec.max_price()))
            .await
    }

    async fn run(&self, builder: QueryBuilder<'_>) -> Result<ProductPage> {
        let query = builder.build::<Product>()?;
        let page = self.store.execute(&query).await?;
        Ok(PageResponse::from_page(page, ProductResponse::from))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use stockroom_core::Page;

    use super::*;
    use crate::error::{Error, QueryError};
    use crate::query::{QueryDescriptor, RawParams};
    use crate::store::memory::MemoryStore;

    fn products(n: u64) -> Vec<Product> {
        (1..=n)
            .map(|id| {
                let at = jiff::Timestamp::from_second(id as i64 * 60).unwrap();
                Product {
                    id,
                    name: format!("Item {id}"),
                    description: String::new(),
                    price: Decimal::from(id * 1000),
                    stock: 1,
                    category: if id % 2 == 0 { "even" } else { "odd" }.to_string(),
                    created_at: at,
                    updated_at: at,
                }
            })
            .collect()
    }

    fn request(pairs: &[(&str, &str)]) -> PageRequestSpec {
        PageRequestSpec::parse(&pairs.iter().copied().collect::<RawParams>()).unwrap()
    }

    /// Counts calls and always fails as unreachable.
    struct DownStore(AtomicUsize);

    #[async_trait]
    impl Paginator<Product> for DownStore {
        async fn execute(&self, _query: &QueryDescriptor) -> Result<Page<Product>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(Error::StorageUnavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn scenario_first_page() {
        let catalog = Catalog::new(Arc::new(MemoryStore::new(products(25))));
        let page = catalog.list_all(&request(&[("size", "10")])).await.unwrap();
        assert_eq!(page.content.len(), 10);
        assert_eq!(page.page_info.total_pages, 3);
        assert!(page.page_info.first);
        assert!(!page.page_info.last);
        assert!(page.page_info.has_next);
        assert!(!page.page_info.has_previous);
    }

    #[tokio::test]
    async fn scenario_last_page() {
        let catalog = Catalog::new(Arc::new(MemoryStore::new(products(25))));
        let page = catalog
            .list_all(&request(&[("page", "2"), ("size", "10")]))
            .await
            .unwrap();
        assert_eq!(page.content.len(), 5);
        assert_eq!(page.page_info.total_elements, 25);
        assert!(page.page_info.last);
        assert!(!page.page_info.has_next);
    }

    #[tokio::test]
    async fn filter_without_criteria_is_list_all() {
        let catalog = Catalog::new(Arc::new(MemoryStore::new(products(12))));
        let spec = request(&[("size", "5"), ("page", "1")]);
        assert_eq!(
            catalog.list_all(&spec).await.unwrap(),
            catalog.filter(&spec).await.unwrap()
        );
    }

    #[tokio::test]
    async fn filter_with_category_only_equals_by_category() {
        let catalog = Catalog::new(Arc::new(MemoryStore::new(products(12))));
        let spec = request(&[("category", "even")]);
        let filtered = catalog.filter(&spec).await.unwrap();
        assert_eq!(filtered, catalog.by_category("even", &spec).await.unwrap());
        assert_eq!(filtered.page_info.total_elements, 6);
    }

    #[tokio::test]
    async fn search_maps_products() {
        let catalog = Catalog::new(Arc::new(MemoryStore::new(products(12))));
        let page = catalog.search("item 1", &request(&[("sortBy", "id"), ("sortDirection", "asc")])).await.unwrap();
        let names: Vec<&str> = page.content.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Item 1", "Item 10", "Item 11", "Item 12"]);
    }

    #[tokio::test]
    async fn price_range_uses_spec_bounds() {
        let catalog = Catalog::new(Arc::new(MemoryStore::new(products(12))));
        let page = catalog
            .price_range(&request(&[("minPrice", "3000"), ("maxPrice", "5000")]))
            .await
            .unwrap();
        assert_eq!(page.page_info.total_elements, 3);
    }

    #[tokio::test]
    async fn unknown_sort_field_never_reaches_store() {
        let store = Arc::new(DownStore(AtomicUsize::new(0)));
        let catalog = Catalog::new(store.clone());
        let err = catalog
            .list_all(&request(&[("sortBy", "colour")]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Query(QueryError::UnknownSortField(_))));
        assert_eq!(store.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let store = Arc::new(DownStore(AtomicUsize::new(0)));
        let catalog = Catalog::new(store.clone());
        let err = catalog.list_all(&request(&[])).await.unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable(_)));
        assert_eq!(store.0.load(Ordering::SeqCst), 1);
    }
}
