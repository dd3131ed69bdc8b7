use std::cmp::Ordering;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockroom_core::ProductResponse;

use crate::store::Record;

/// A product as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: u32,
    pub category: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for Product {
    const SORT_FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "description",
        "price",
        "stock",
        "category",
        "createdAt",
        "updatedAt",
    ];

    fn id(&self) -> u64 {
        self.id
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn search_text(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Decimal {
        self.price
    }

    fn compare_field(&self, other: &Self, field: &str) -> Option<Ordering> {
        let ordering = match field {
            "id" => self.id.cmp(&other.id),
            "name" => self.name.cmp(&other.name),
            "description" => self.description.cmp(&other.description),
            "price" => self.price.cmp(&other.price),
            "stock" => self.stock.cmp(&other.stock),
            "category" => self.category.cmp(&other.category),
            "createdAt" => self.created_at.cmp(&other.created_at),
            "updatedAt" => self.updated_at.cmp(&other.updated_at),
            _ => return None,
        };
        Some(ordering)
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category: product.category,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 7,
            name: "Desk Lamp".into(),
            description: "LED, warm white".into(),
            price: Decimal::new(2999, 2),
            stock: 12,
            category: "home".into(),
            created_at: "2024-03-01T09:00:00Z".parse().unwrap(),
            updated_at: "2024-03-05T10:30:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn every_sort_field_is_comparable() {
        let p = product();
        for field in Product::SORT_FIELDS {
            assert_eq!(p.compare_field(&p, field), Some(Ordering::Equal), "{field}");
        }
        assert_eq!(p.compare_field(&p, "colour"), None);
    }

    #[test]
    fn maps_to_camel_case_response() {
        let response = ProductResponse::from(product());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 7);
        assert!(json["price"].is_number());
        assert!(serde_json::to_string(&response).unwrap().contains(r#""price":29.99,"#));
        assert_eq!(json["createdAt"], "2024-03-01T09:00:00Z");
        assert_eq!(json["updatedAt"], "2024-03-05T10:30:00Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn price_keeps_trailing_zeros() {
        let mut product = product();
        product.price = Decimal::new(150000, 2);
        let json = serde_json::to_string(&ProductResponse::from(product)).unwrap();
        assert!(json.contains(r#""price":1500.00,"#), "{json}");
        let back: ProductResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price, Decimal::new(150000, 2));
    }

    #[test]
    fn reads_stored_json() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"name":"Pen","price":"1.50","category":"office",
                "created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(product.price, Decimal::new(150, 2));
        assert_eq!(product.stock, 0);
        assert!(product.description.is_empty());
    }
}
