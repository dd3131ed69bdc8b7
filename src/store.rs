use std::cmp::Ordering;

use async_trait::async_trait;
use rust_decimal::Decimal;

pub use stockroom_core::Page;

use crate::error::Result;
use crate::query::QueryDescriptor;

pub mod fs;
pub mod memory;

/// A record type the catalog stores can filter, sort and page.
pub trait Record: Clone + Send + Sync + 'static {
    /// Field names accepted in `sortBy`.
    const SORT_FIELDS: &'static [&'static str];

    /// Unique id, used as the final sort tie-breaker.
    fn id(&self) -> u64;

    fn category(&self) -> &str;

    /// Text that keyword searches match against.
    fn search_text(&self) -> &str;

    fn price(&self) -> Decimal;

    /// Ascending comparison on a named field, or `None` if the field is unknown.
    fn compare_field(&self, other: &Self, field: &str) -> Option<Ordering>;
}

/// Store trait for catalog backends
///
/// Implementations must compute `total_elements` with the same predicate
/// used to select the page content.
#[async_trait]
pub trait Paginator<R>: Send + Sync {
    /// Run a query and return the requested page
    async fn execute(&self, query: &QueryDescriptor) -> Result<Page<R>>;
}
