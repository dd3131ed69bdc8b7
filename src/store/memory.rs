use std::cmp::Ordering;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::query::{Predicate, QueryDescriptor, SortDirection};
use crate::store::{Page, Paginator, Record};

/// In-memory store over a fixed set of records.
pub struct MemoryStore<R> {
    records: Vec<R>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl<R: Record> Paginator<R> for MemoryStore<R> {
    async fn execute(&self, query: &QueryDescriptor) -> Result<Page<R>> {
        evaluate(&self.records, query)
    }
}

/// Filter, count, sort and slice `records` according to `query`.
///
/// The count is taken over the filtered set before slicing.
pub fn evaluate<R: Record>(records: &[R], query: &QueryDescriptor) -> Result<Page<R>> {
    if let Some(unknown) = query
        .sort
        .fields
        .iter()
        .find(|f| !R::SORT_FIELDS.contains(&f.as_str()))
    {
        return Err(QueryError::UnknownSortField(unknown.clone()).into());
    }

    let predicates = query.filter.predicates();
    let mut matching: Vec<&R> = records
        .iter()
        .filter(|r| predicates.iter().all(|p| matches(p, *r)))
        .collect();
    let total = matching.len() as u64;

    matching.sort_by(|a, b| compare(*a, *b, &query.sort.fields, query.sort.direction));

    let content: Vec<R> = usize::try_from(query.offset())
        .map(|offset| {
            matching
                .into_iter()
                .skip(offset)
                .take(query.size as usize)
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    debug!(
        "Query matched {} records, returning {} (page {}, size {})",
        total,
        content.len(),
        query.page,
        query.size
    );
    Ok(Page::new(content, total, query.page, query.size))
}

fn matches<R: Record>(predicate: &Predicate, record: &R) -> bool {
    match predicate {
        Predicate::CategoryEquals(category) => record.category() == category,
        Predicate::KeywordContains(keyword) => record
            .search_text()
            .to_lowercase()
            .contains(&keyword.to_lowercase()),
        Predicate::PriceBetween { min, max } => {
            let price = record.price();
            min.map_or(true, |min| price >= min) && max.map_or(true, |max| price <= max)
        }
    }
}

fn compare<R: Record>(a: &R, b: &R, fields: &[String], direction: SortDirection) -> Ordering {
    let ordering = fields
        .iter()
        .map(|f| a.compare_field(b, f).unwrap_or(Ordering::Equal))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal);
    let ordering = match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };
    ordering.then_with(|| a.id().cmp(&b.id()))
}
