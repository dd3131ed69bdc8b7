//! Raw query parameters and their validated form.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ValidationError;

pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_SIZE: u32 = 10;
pub const MAX_SIZE: u32 = 100;
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

/// Query string parameters exactly as the client sent them.
#[derive(Debug, Clone, Default)]
pub struct RawParams {
    values: HashMap<String, String>,
}

impl RawParams {
    /// Decode a URL query string. Repeated keys keep the last value.
    pub fn from_query(query: Option<&str>) -> Self {
        let values = query
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for RawParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { values }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(())
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("ASC"),
            SortDirection::Desc => f.write_str("DESC"),
        }
    }
}

/// Validated pagination, sort and filter intent for one request.
///
/// Built only through [`PageRequestSpec::parse`], so every instance
/// satisfies `1 <= size <= 100`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequestSpec {
    page: u32,
    size: u32,
    sort_by: Vec<String>,
    direction: SortDirection,
    keyword: Option<String>,
    category: Option<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
}

impl Default for PageRequestSpec {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
            sort_by: vec![DEFAULT_SORT_FIELD.to_string()],
            direction: SortDirection::default(),
            keyword: None,
            category: None,
            min_price: None,
            max_price: None,
        }
    }
}

impl PageRequestSpec {
    /// Validate raw parameters, reporting every violation at once.
    ///
    /// Absent parameters take their defaults; present but malformed ones
    /// are always errors. Blank filter values count as absent.
    pub fn parse(params: &RawParams) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();
        let mut spec = Self::default();

        if let Some(raw) = params.get("page") {
            match raw.trim().parse::<i64>() {
                Ok(n) if n < 0 => errors.push("page", "must be 0 or greater"),
                Ok(n) => match u32::try_from(n) {
                    Ok(n) => spec.page = n,
                    Err(_) => errors.push("page", "is too large"),
                },
                Err(_) => errors.push("page", format!("must be an integer, got {:?}", raw)),
            }
        }

        if let Some(raw) = params.get("size") {
            match raw.trim().parse::<i64>() {
                Ok(n) if (1..=i64::from(MAX_SIZE)).contains(&n) => spec.size = n as u32,
                Ok(_) => errors.push("size", format!("must be between 1 and {}", MAX_SIZE)),
                Err(_) => errors.push("size", format!("must be an integer, got {:?}", raw)),
            }
        }

        if let Some(raw) = params.get("sortBy") {
            let fields: Vec<String> = raw.split(',').map(|f| f.trim().to_string()).collect();
            if fields.iter().any(String::is_empty) {
                errors.push("sortBy", "must be a comma-separated list of field names");
            } else {
                spec.sort_by = fields;
            }
        }

        if let Some(raw) = params.get("sortDirection") {
            match raw.trim().parse() {
                Ok(direction) => spec.direction = direction,
                Err(()) => errors.push(
                    "sortDirection",
                    format!("must be ASC or DESC, got {:?}", raw),
                ),
            }
        }

        spec.keyword = non_blank(params.get("keyword"));
        spec.category = non_blank(params.get("category"));
        spec.min_price = parse_price(params, "minPrice", &mut errors);
        spec.max_price = parse_price(params, "maxPrice", &mut errors);

        if errors.is_empty() {
            Ok(spec)
        } else {
            Err(errors)
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort_by(&self) -> &[String] {
        &self.sort_by
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn min_price(&self) -> Option<Decimal> {
        self.min_price
    }

    pub fn max_price(&self) -> Option<Decimal> {
        self.max_price
    }
}

/// Keeps the value as sent; whitespace only decides whether it is blank.
fn non_blank(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(String::from)
}

fn parse_price(params: &RawParams, field: &str, errors: &mut ValidationError) -> Option<Decimal> {
    let raw = params.get(field).map(str::trim).filter(|v| !v.is_empty())?;
    match Decimal::from_str(raw) {
        Ok(price) => Some(price),
        Err(_) => {
            errors.push(field, format!("must be a decimal number, got {:?}", raw));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RawParams {
        pairs.iter().copied().collect()
    }

    #[test]
    fn defaults_when_absent() {
        let spec = PageRequestSpec::parse(&RawParams::default()).unwrap();
        assert_eq!(spec.page(), 0);
        assert_eq!(spec.size(), 10);
        assert_eq!(spec.sort_by(), ["createdAt"]);
        assert_eq!(spec.direction(), SortDirection::Desc);
        assert!(spec.keyword().is_none());
        assert!(spec.category().is_none());
        assert!(spec.min_price().is_none());
        assert!(spec.max_price().is_none());
    }

    #[test]
    fn parses_everything() {
        let spec = PageRequestSpec::parse(&params(&[
            ("page", "3"),
            ("size", "25"),
            ("sortBy", "price, name"),
            ("sortDirection", "asc"),
            ("keyword", "  phone "),
            ("category", "electronics"),
            ("minPrice", "10000"),
            ("maxPrice", "50000.50"),
        ]))
        .unwrap();
        assert_eq!(spec.page(), 3);
        assert_eq!(spec.size(), 25);
        assert_eq!(spec.sort_by(), ["price", "name"]);
        assert_eq!(spec.direction(), SortDirection::Asc);
        assert_eq!(spec.keyword(), Some("  phone "));
        assert_eq!(spec.category(), Some("electronics"));
        assert_eq!(spec.min_price(), Some(Decimal::new(10000, 0)));
        assert_eq!(spec.max_price(), Some(Decimal::new(5000050, 2)));
    }

    #[test]
    fn size_bounds() {
        for bad in ["0", "101", "-1"] {
            let err = PageRequestSpec::parse(&params(&[("size", bad)])).unwrap_err();
            assert_eq!(err.violations.len(), 1);
            assert!(err.has_field("size"), "size={bad}");
        }
        for good in ["1", "100"] {
            assert!(PageRequestSpec::parse(&params(&[("size", good)])).is_ok());
        }
    }

    #[test]
    fn negative_page_rejected() {
        let err = PageRequestSpec::parse(&params(&[("page", "-1")])).unwrap_err();
        assert!(err.has_field("page"));
    }

    #[test]
    fn direction_is_case_insensitive() {
        for (raw, expected) in [
            ("ASC", SortDirection::Asc),
            ("Asc", SortDirection::Asc),
            ("desc", SortDirection::Desc),
            ("DeSc", SortDirection::Desc),
        ] {
            let spec = PageRequestSpec::parse(&params(&[("sortDirection", raw)])).unwrap();
            assert_eq!(spec.direction(), expected);
        }
    }

    #[test]
    fn unknown_direction_rejected() {
        let err = PageRequestSpec::parse(&params(&[("sortDirection", "sideways")])).unwrap_err();
        assert!(err.has_field("sortDirection"));
    }

    #[test]
    fn invalid_values_are_never_defaulted() {
        let err = PageRequestSpec::parse(&params(&[("page", ""), ("size", "ten")])).unwrap_err();
        assert!(err.has_field("page"));
        assert!(err.has_field("size"));
    }

    #[test]
    fn collects_every_violation() {
        let err = PageRequestSpec::parse(&params(&[
            ("page", "-2"),
            ("size", "0"),
            ("sortDirection", "up"),
            ("sortBy", "price,,name"),
            ("minPrice", "cheap"),
            ("maxPrice", "1.2.3"),
        ]))
        .unwrap_err();
        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            ["page", "size", "sortBy", "sortDirection", "minPrice", "maxPrice"]
        );
    }

    #[test]
    fn blank_filters_are_absent() {
        let spec = PageRequestSpec::parse(&params(&[
            ("keyword", "   "),
            ("category", ""),
            ("minPrice", " "),
            ("maxPrice", ""),
        ]))
        .unwrap();
        assert!(spec.keyword().is_none());
        assert!(spec.category().is_none());
        assert!(spec.min_price().is_none());
        assert!(spec.max_price().is_none());
    }

    #[test]
    fn decodes_query_string() {
        let raw = RawParams::from_query(Some("keyword=smart+phone&category=home%20%26%20garden&size=5"));
        assert_eq!(raw.get("keyword"), Some("smart phone"));
        assert_eq!(raw.get("category"), Some("home & garden"));
        assert_eq!(raw.get("size"), Some("5"));
        assert!(RawParams::from_query(None).get("size").is_none());
    }
}
