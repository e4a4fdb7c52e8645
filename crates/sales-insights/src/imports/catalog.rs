use crate::analytics::domain::{Batch, Product};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read product catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid product catalog CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    sku: String,
    purchase_price: f64,
}

/// Imports a product catalog from a `sku,purchase_price` CSV export, the
/// companion file sales systems commonly hand over next to the batch JSON.
pub struct ProductCatalogImporter;

impl ProductCatalogImporter {
    pub fn from_path(path: &Path) -> Result<Vec<Product>, CatalogImportError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Product>, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut products = Vec::new();
        for row in csv_reader.deserialize::<CatalogRow>() {
            let row = row?;
            products.push(Product {
                sku: row.sku,
                purchase_price: row.purchase_price,
            });
        }

        Ok(products)
    }

    /// Adds imported products to `batch`, keeping the batch's own entry when
    /// a sku is present in both.
    pub fn merge_into(batch: &mut Batch, products: Vec<Product>) {
        for product in products {
            if !batch.products.iter().any(|known| known.sku == product.sku) {
                batch.products.push(product);
            }
        }
    }
}
