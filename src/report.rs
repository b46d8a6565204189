use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::domain::{CanonicalSize, UNRESOLVED_LABEL};
use crate::error::Result;
use crate::pipeline::PipelineRun;

/// Column contract for the validated table. Downstream printing tools key
/// on these names, so they are reproduced exactly.
const VALIDATED_HEADERS: [&str; 6] = [
    "Final SKU",
    "Final Size",
    "Quantity",
    "Validation_Status",
    "Original_Vendor_Style",
    "Original_Size",
];

/// Column contract for the aggregated table.
const AGGREGATED_HEADERS: [&str; 4] = [
    "Full SKU (SKU-Size)",
    "Total Quantity",
    "Size",
    "Validation_Status",
];

/// Writes the three report tables to the output directory with a shared
/// run timestamp in each filename.
pub struct ReportWriter {
    output_dir: PathBuf,
    prefix: String,
    include_unresolved: bool,
}

/// Paths of the tables a run produced.
#[derive(Debug)]
pub struct WrittenReports {
    pub validated: PathBuf,
    pub aggregated: PathBuf,
    pub final_table: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: &Path, prefix: &str, include_unresolved: bool) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            prefix: prefix.to_string(),
            include_unresolved,
        }
    }

    pub fn write_all(&self, run: &PipelineRun) -> Result<WrittenReports> {
        std::fs::create_dir_all(&self.output_dir)?;
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

        let validated = self.table_path("validated", &timestamp);
        self.write_validated(run, &validated)?;

        let aggregated = self.table_path("aggregated", &timestamp);
        self.write_aggregated(run, &aggregated)?;

        let final_table = self
            .output_dir
            .join(format!("{}_{}.csv", self.prefix, timestamp));
        self.write_final(run, &final_table)?;

        info!(file = %final_table.display(), "saved final printer-ready file");
        Ok(WrittenReports {
            validated,
            aggregated,
            final_table,
        })
    }

    fn table_path(&self, table: &str, timestamp: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}_{}.csv", self.prefix, table, timestamp))
    }

    fn write_validated(&self, run: &PipelineRun, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(VALIDATED_HEADERS)?;
        for record in &run.validated {
            let size = match record.final_size {
                Some(size) => size.label(),
                None => UNRESOLVED_LABEL,
            };
            writer.write_record([
                record.final_sku.clone(),
                size.to_string(),
                record.quantity.to_string(),
                record.status.label().to_string(),
                record.original_vendor_style.clone(),
                record.original_size.clone(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_aggregated(&self, run: &PipelineRun, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(AGGREGATED_HEADERS)?;
        for group in &run.aggregated {
            writer.write_record([
                group.full_sku(),
                group.total_quantity.to_string(),
                group.size_label().to_string(),
                group.status.label().to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_final(&self, run: &PipelineRun, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        let mut headers = vec!["SKU", "Description", "Ink Color"];
        headers.extend(CanonicalSize::ALL.iter().map(|size| size.label()));
        if self.include_unresolved {
            headers.push("REVIEW");
        }
        writer.write_record(&headers)?;

        for row in &run.final_rows {
            let mut record = vec![
                row.sku.clone(),
                row.description.clone(),
                row.ink_color.clone(),
            ];
            for size in CanonicalSize::ALL {
                record.push(row.quantity(size).to_string());
            }
            if self.include_unresolved {
                record.push(row.review_quantity.to_string());
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
