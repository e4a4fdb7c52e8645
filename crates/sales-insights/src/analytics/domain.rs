use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One finite input for an engine invocation: every record, catalog entry,
/// and profile the analytics pass may reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    #[serde(default)]
    pub purchase_records: Vec<PurchaseRecord>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub sellers: Vec<Seller>,
    #[serde(default)]
    pub customers: Vec<Customer>,
}

impl Batch {
    /// Sku lookup over the product list. The first entry wins when a sku
    /// appears more than once.
    pub fn product_catalog(&self) -> HashMap<&str, &Product> {
        let mut catalog = HashMap::with_capacity(self.products.len());
        for product in &self.products {
            catalog.entry(product.sku.as_str()).or_insert(product);
        }
        catalog
    }
}

/// A single historical sale, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub seller_id: String,
    pub customer_id: String,
    pub date: NaiveDate,
    pub total_amount: f64,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl PurchaseRecord {
    /// Calendar-month bucket key, e.g. "2025-03". Sorts chronologically.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// One line of a purchase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub sku: String,
    pub quantity: u32,
    pub sale_price: f64,
    /// Percentage in the 0-100 range.
    #[serde(default)]
    pub discount: f64,
}

impl Item {
    /// Net-of-discount sale value of the line. Every revenue accumulation in
    /// the engine goes through this one formula.
    pub fn net_revenue(&self) -> f64 {
        self.sale_price * f64::from(self.quantity) * (1.0 - self.discount / 100.0)
    }
}

/// Catalog entry carrying the unit cost used for profit calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub purchase_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub name: String,
}
