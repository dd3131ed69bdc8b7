//! Core types for the stockroom product catalog.
//!
//! This crate provides the shared data types used by both the stockroom
//! server and clients that read from the catalog API.
//!
//! # Overview
//!
//! The main types are:
//!
//! - [`Page`] - A raw slice of records returned by a catalog store
//! - [`PageResponse`] - The paginated response wrapper sent to clients
//! - [`PageInfo`] - Pagination metadata derived from a [`Page`]
//! - [`RecordMapper`] - Per-record transform applied while wrapping a page
//! - [`ProductResponse`] - A product as seen by API clients
//! - [`ErrorBody`] - The JSON body of every error response
//!
//! # Example
//!
//! Fetching products from a stockroom server:
//!
//! ```ignore
//! use stockroom_core::{PageResponse, ProductResponse};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = reqwest::Client::new();
//!
//! let page: PageResponse<ProductResponse> = client
//!     .get("http://localhost:8080/products/search?keyword=phone&size=5")
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//!
//! for product in &page.content {
//!     println!("{} ({}): {}", product.name, product.category, product.price);
//! }
//! # Ok(())
//! # }
//! ```

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A slice of records produced by a catalog store.
///
/// `total_elements` always counts the full filtered set, not just `content`.
///
/// # Example
///
/// ```
/// use stockroom_core::Page;
///
/// let page = Page::new(vec!["a", "b"], 12, 1, 10);
///
/// assert_eq!(page.content.len(), 2);
/// assert_eq!(page.total_elements, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records in this slice, in query order.
    pub content: Vec<T>,
    /// Number of records matching the query across all pages.
    pub total_elements: u64,
    /// Page index (0-indexed).
    pub page: u32,
    /// Requested page size.
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, page: u32, size: u32) -> Self {
        Self {
            content,
            total_elements,
            page,
            size,
        }
    }
}

/// Transforms a stored record into its client-facing form.
///
/// Any `Fn(R) -> D` is a mapper, so plain functions such as
/// `ProductResponse::from` can be passed directly.
pub trait RecordMapper<R> {
    type Output;

    fn map(&self, record: R) -> Self::Output;
}

impl<R, D, F> RecordMapper<R> for F
where
    F: Fn(R) -> D,
{
    type Output = D;

    fn map(&self, record: R) -> D {
        self(record)
    }
}

/// A paginated response wrapper.
///
/// Every list endpoint returns this shape.
///
/// # Example
///
/// ```
/// use stockroom_core::{Page, PageResponse};
///
/// let page = Page::new(vec![1, 2, 3, 4, 5], 25, 2, 10);
/// let response = PageResponse::from_page(page, |n: i32| n * 10);
///
/// assert_eq!(response.content, vec![10, 20, 30, 40, 50]);
/// assert_eq!(response.page_info.total_pages, 3);
/// assert!(response.page_info.last);
/// assert!(!response.page_info.has_next);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<D> {
    /// The items in this page, in the order the store returned them.
    pub content: Vec<D>,
    /// Pagination metadata.
    pub page_info: PageInfo,
}

impl<D> PageResponse<D> {
    /// Wraps a store page, applying `mapper` to every record.
    pub fn from_page<R, M>(page: Page<R>, mapper: M) -> Self
    where
        M: RecordMapper<R, Output = D>,
    {
        let page_info = PageInfo::new(page.page, page.size, page.total_elements);
        let content = page.content.into_iter().map(|r| mapper.map(r)).collect();
        Self { content, page_info }
    }
}

impl<D> From<Page<D>> for PageResponse<D> {
    fn from(page: Page<D>) -> Self {
        Self::from_page(page, std::convert::identity)
    }
}

/// Pagination metadata.
///
/// All flags are derived from `page`, `size` and `total_elements`:
///
/// ```
/// use stockroom_core::PageInfo;
///
/// let info = PageInfo::new(0, 10, 25);
/// assert_eq!(info.total_pages, 3);
/// assert!(info.first && !info.last);
/// assert!(info.has_next && !info.has_previous);
///
/// let empty = PageInfo::new(0, 10, 0);
/// assert_eq!(empty.total_pages, 0);
/// assert!(empty.first && empty.last);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Current page number (0-indexed).
    pub page: u32,
    /// Number of items per page.
    pub size: u32,
    /// Total number of matching items across all pages.
    pub total_elements: u64,
    /// Total number of pages.
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageInfo {
    pub fn new(page: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            u32::try_from(total_elements.div_ceil(u64::from(size))).unwrap_or(u32::MAX)
        };
        let first = page == 0;
        // Pages past the end are also "last": there is nothing after them.
        let last = u64::from(page) + 1 >= u64::from(total_pages);
        Self {
            page,
            size,
            total_elements,
            total_pages,
            first,
            last,
            has_next: !last,
            has_previous: !first,
        }
    }
}

/// A catalog product as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Unique product identifier.
    pub id: u64,
    /// Display name; keyword searches match against it.
    pub name: String,
    pub description: String,
    /// Unit price, written as a JSON number without losing precision.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    /// Units in stock.
    pub stock: u32,
    /// Category name (e.g. `"electronics"`).
    pub category: String,
    /// When the product was added to the catalog.
    pub created_at: Timestamp,
    /// When the product was last modified.
    pub updated_at: Timestamp,
}

/// A single rejected request parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Query parameter name as sent by the client (e.g. `"size"`).
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

/// JSON body of an error response.
///
/// `violations` is only present for request validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}
