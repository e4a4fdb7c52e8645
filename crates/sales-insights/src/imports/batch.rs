use crate::analytics::domain::Batch;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum BatchImportError {
    #[error("failed to read batch file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid batch JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads a full [`Batch`] from the JSON shape the external data collaborator
/// produces: `purchase_records`, `products`, `sellers`, `customers`, all
/// optional and defaulting to empty.
pub struct BatchImporter;

impl BatchImporter {
    pub fn from_path(path: &Path) -> Result<Batch, BatchImportError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Batch, BatchImportError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_minimal_batch() {
        let json = r#"{
            "purchase_records": [
                {
                    "seller_id": "S1",
                    "customer_id": "C1",
                    "date": "2025-03-14",
                    "total_amount": 100.0,
                    "items": [
                        { "sku": "A", "quantity": 2, "sale_price": 25.0, "discount": 0.0 }
                    ]
                }
            ],
            "products": [ { "sku": "A", "purchase_price": 10.0 } ]
        }"#;

        let batch = BatchImporter::from_reader(json.as_bytes()).expect("batch parses");
        assert_eq!(batch.purchase_records.len(), 1);
        assert_eq!(batch.products.len(), 1);
        assert!(batch.sellers.is_empty(), "missing sections default to empty");
        assert_eq!(batch.purchase_records[0].items[0].quantity, 2);
    }

    #[test]
    fn rejects_malformed_json() {
        let error = BatchImporter::from_reader("{not json".as_bytes())
            .expect_err("malformed input refused");
        assert!(matches!(error, BatchImportError::Json(_)));
    }
}
