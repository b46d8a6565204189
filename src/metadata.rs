use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::domain::SkuMetadata;
use crate::error::{ProcessorError, Result};

const SKU_COLUMN: &str = "SKU";
const DESCRIPTION_COLUMN: &str = "Description";
const INK_COLOR_COLUMN: &str = "Ink Color";

/// Load the optional `SKU,Description,Ink Color` lookup file.
///
/// Lookup misses downstream are fine; a configured file that cannot be read
/// or lacks the SKU column is not.
pub fn load_sku_metadata(path: &Path) -> Result<HashMap<String, SkuMetadata>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let sku_idx = headers
        .iter()
        .position(|h| h == SKU_COLUMN)
        .ok_or_else(|| ProcessorError::MissingColumn {
            file: path.display().to_string(),
            column: SKU_COLUMN,
        })?;
    let description_idx = headers.iter().position(|h| h == DESCRIPTION_COLUMN);
    let ink_color_idx = headers.iter().position(|h| h == INK_COLOR_COLUMN);

    let cell = |record: &csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|i| record.get(i))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    let mut metadata = HashMap::new();
    for record in reader.records() {
        let record = record?;
        let sku = record.get(sku_idx).unwrap_or("").trim().to_string();
        if sku.is_empty() {
            continue;
        }
        metadata.insert(
            sku,
            SkuMetadata {
                description: cell(&record, description_idx),
                ink_color: cell(&record, ink_color_idx),
            },
        );
    }

    info!(file = %path.display(), skus = metadata.len(), "loaded sku metadata");
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loads_description_and_ink_color() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skus.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"SKU,Description,Ink Color\nTEE-101,T-Shirt V-Neck,Black\nTEE-205,,\n")
            .unwrap();

        let metadata = load_sku_metadata(&path).unwrap();
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata["TEE-101"].description, "T-Shirt V-Neck");
        assert_eq!(metadata["TEE-101"].ink_color, "Black");
        assert_eq!(metadata["TEE-205"], SkuMetadata::default());
    }

    #[test]
    fn test_sku_column_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skus.csv");
        std::fs::write(&path, "Code,Description\nTEE-101,Shirt\n").unwrap();

        let result = load_sku_metadata(&path);
        assert!(matches!(
            result,
            Err(ProcessorError::MissingColumn {
                column: SKU_COLUMN,
                ..
            })
        ));
    }
}
