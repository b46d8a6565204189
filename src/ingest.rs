use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::domain::RawOrderRow;
use crate::error::{ProcessorError, Result};

/// Required input columns, case-sensitive per the export contract.
pub const QUANTITY_COLUMN: &str = "Quantity";
pub const VENDOR_STYLE_COLUMN: &str = "Vendor Style";
pub const SIZE_COLUMN: &str = "Size";

/// Rows read from a single order export.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub rows: Vec<RawOrderRow>,
}

/// A source that could not be used, with the reason it was skipped.
#[derive(Debug)]
pub struct SkippedSource {
    pub path: PathBuf,
    pub error: ProcessorError,
}

/// Readable sources plus whatever had to be skipped. A structural problem
/// in one file never takes down the rest of the batch.
#[derive(Debug)]
pub struct IngestOutcome {
    pub sources: Vec<SourceFile>,
    pub skipped: Vec<SkippedSource>,
}

impl IngestOutcome {
    /// All rows of all readable sources, in file order.
    pub fn combined_rows(&self) -> Vec<RawOrderRow> {
        self.sources
            .iter()
            .flat_map(|source| source.rows.iter().cloned())
            .collect()
    }
}

/// All `*.csv` files directly under `dir`, sorted for a stable batch order.
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Read every listed export, skipping (and reporting) files that are
/// unreadable or missing a required column. No usable file at all is fatal.
pub fn read_sources(paths: &[PathBuf]) -> Result<IngestOutcome> {
    let mut sources = Vec::new();
    let mut skipped = Vec::new();

    for path in paths {
        match read_source(path) {
            Ok(source) => {
                info!(file = %path.display(), rows = source.rows.len(), "loaded order export");
                sources.push(source);
            }
            Err(e) => {
                error!(file = %path.display(), error = %e, "skipping unusable order export");
                skipped.push(SkippedSource {
                    path: path.clone(),
                    error: e,
                });
            }
        }
    }

    if sources.is_empty() {
        return Err(ProcessorError::NoInput);
    }
    Ok(IngestOutcome { sources, skipped })
}

fn read_source(path: &Path) -> Result<SourceFile> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ProcessorError::MissingColumn {
                file: path.display().to_string(),
                column: name,
            })
    };
    let quantity_idx = column(QUANTITY_COLUMN)?;
    let vendor_style_idx = column(VENDOR_STYLE_COLUMN)?;
    let size_idx = column(SIZE_COLUMN)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(RawOrderRow {
            quantity: parse_quantity(record.get(quantity_idx).unwrap_or("")),
            vendor_style: record.get(vendor_style_idx).unwrap_or("").trim().to_string(),
            size: record.get(size_idx).unwrap_or("").trim().to_string(),
        });
    }

    Ok(SourceFile {
        path: path.to_path_buf(),
        rows,
    })
}

/// Lenient quantity parsing: exports sometimes carry "3.0" or junk. Junk
/// reads as 0, which the validator then flags for review.
fn parse_quantity(cell: &str) -> i64 {
    let cell = cell.trim();
    if let Ok(quantity) = cell.parse::<i64>() {
        return quantity;
    }
    if let Ok(quantity) = cell.parse::<f64>() {
        return quantity.trunc() as i64;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_reads_rows_from_well_formed_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "orders.csv",
            "Quantity,Vendor Style,Size\n2,TEE-101,M\n1,TEE-101-XL,\n",
        );

        let outcome = read_sources(&[path]).unwrap();
        assert_eq!(outcome.sources.len(), 1);
        assert!(outcome.skipped.is_empty());

        let rows = outcome.combined_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].quantity, 2);
        assert_eq!(rows[0].vendor_style, "TEE-101");
        assert_eq!(rows[1].size, "");
    }

    #[test]
    fn test_missing_column_skips_file_but_others_continue() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_file(dir.path(), "bad.csv", "Qty,Style\n1,TEE-101\n");
        let good = write_file(
            dir.path(),
            "good.csv",
            "Quantity,Vendor Style,Size\n3,TEE-205,S\n",
        );

        let outcome = read_sources(&[bad, good]).unwrap();
        assert_eq!(outcome.sources.len(), 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert!(matches!(
            outcome.skipped[0].error,
            ProcessorError::MissingColumn {
                column: QUANTITY_COLUMN,
                ..
            }
        ));
        assert_eq!(outcome.combined_rows().len(), 1);
    }

    #[test]
    fn test_no_usable_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_file(dir.path(), "bad.csv", "Qty,Style\n1,TEE-101\n");

        let result = read_sources(&[bad]);
        assert!(matches!(result, Err(ProcessorError::NoInput)));
        assert!(matches!(read_sources(&[]), Err(ProcessorError::NoInput)));
    }

    #[test]
    fn test_quantity_parsing_is_lenient() {
        assert_eq!(parse_quantity("4"), 4);
        assert_eq!(parse_quantity(" 4 "), 4);
        assert_eq!(parse_quantity("3.0"), 3);
        assert_eq!(parse_quantity("-2"), -2);
        assert_eq!(parse_quantity("n/a"), 0);
        assert_eq!(parse_quantity(""), 0);
    }

    #[test]
    fn test_discover_only_picks_csv_files() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.csv", "x\n");
        write_file(dir.path(), "a.CSV", "x\n");
        write_file(dir.path(), "notes.txt", "x\n");

        let files = discover_csv_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }
}
