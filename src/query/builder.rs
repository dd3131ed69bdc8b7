//! Turns a validated request into a store-agnostic query descriptor.

use rust_decimal::Decimal;

use crate::error::QueryError;
use crate::query::request::{PageRequestSpec, SortDirection};
use crate::store::Record;

/// A single filter condition over a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-sensitive exact match on the record's category.
    CategoryEquals(String),
    /// Case-insensitive substring match on the record's search text.
    KeywordContains(String),
    /// Inclusive price range. A missing bound leaves that side open.
    PriceBetween {
        min: Option<Decimal>,
        max: Option<Decimal>,
    },
}

/// The active predicates of a query, combined with AND.
///
/// An empty descriptor matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDescriptor {
    predicates: Vec<Predicate>,
}

impl FilterDescriptor {
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_match_all(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Sort order. Ties on every named field are broken by ascending id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub fields: Vec<String>,
    pub direction: SortDirection,
}

/// Everything a store needs to produce one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub filter: FilterDescriptor,
    pub sort: Sort,
    pub page: u32,
    pub size: u32,
}

impl QueryDescriptor {
    /// Number of matching records that precede this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// Collects the filters a use case wants active and builds a
/// [`QueryDescriptor`] from them.
///
/// Filters that are not set, or are blank, contribute nothing.
#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    spec: &'a PageRequestSpec,
    category: Option<String>,
    keyword: Option<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(spec: &'a PageRequestSpec) -> Self {
        Self {
            spec,
            category: None,
            keyword: None,
            min_price: None,
            max_price: None,
        }
    }

    pub fn category(mut self, category: Option<&str>) -> Self {
        self.category = present(category);
        self
    }

    pub fn keyword(mut self, keyword: Option<&str>) -> Self {
        self.keyword = present(keyword);
        self
    }

    pub fn price_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Build the descriptor for record type `R`.
    ///
    /// Fails if a sort field is not one of `R::SORT_FIELDS`.
    pub fn build<R: Record>(self) -> Result<QueryDescriptor, QueryError> {
        let sort_by = self.spec.sort_by();
        if let Some(unknown) = sort_by.iter().find(|f| !R::SORT_FIELDS.contains(&f.as_str())) {
            return Err(QueryError::UnknownSortField(unknown.clone()));
        }

        let mut predicates = Vec::new();
        if let Some(category) = self.category {
            predicates.push(Predicate::CategoryEquals(category));
        }
        if let Some(keyword) = self.keyword {
            predicates.push(Predicate::KeywordContains(keyword));
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            predicates.push(Predicate::PriceBetween {
                min: self.min_price,
                max: self.max_price,
            });
        }

        Ok(QueryDescriptor {
            filter: FilterDescriptor { predicates },
            sort: Sort {
                fields: sort_by.to_vec(),
                direction: self.spec.direction(),
            },
            page: self.spec.page(),
            size: self.spec.size(),
        })
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(String::from)
}
