// Order processing pipeline: validation, aggregation, and pivoting

pub mod aggregate;
pub mod normalize;
pub mod pivot;
pub mod validate;

use std::collections::HashMap;

use tracing::{info, warn};

use crate::domain::{
    AggregateRecord, FinalRow, RawOrderRow, SkuMetadata, ValidatedRecord, ValidationStatus,
};
use crate::error::Result;

/// Everything one pipeline run produces, in stage order.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub validated: Vec<ValidatedRecord>,
    pub aggregated: Vec<AggregateRecord>,
    pub final_rows: Vec<FinalRow>,
}

impl PipelineRun {
    pub fn review_count(&self) -> usize {
        self.validated
            .iter()
            .filter(|r| r.status == ValidationStatus::Review)
            .count()
    }

    pub fn ok_count(&self) -> usize {
        self.validated.len() - self.review_count()
    }
}

/// Run the full batch transform over the combined rows of all sources.
///
/// Each stage consumes the previous stage's output and produces a fresh
/// collection; no row is dropped anywhere along the way.
pub fn run(
    rows: &[RawOrderRow],
    metadata: &HashMap<String, SkuMetadata>,
    include_unresolved: bool,
) -> Result<PipelineRun> {
    info!(rows = rows.len(), "validating order rows");
    let validated: Vec<ValidatedRecord> = rows.iter().map(validate::validate).collect();

    let review_count = validated
        .iter()
        .filter(|r| r.status == ValidationStatus::Review)
        .count();
    info!(
        ok = validated.len() - review_count,
        review = review_count,
        "validation complete"
    );
    if review_count > 0 {
        warn!(
            review = review_count,
            "rows require manual review; check the validated output"
        );
    }

    let aggregated = aggregate::aggregate(&validated)?;
    info!(groups = aggregated.len(), "aggregated to unique sku-size combinations");

    let final_rows = pivot::pivot(&aggregated, metadata, include_unresolved);
    info!(skus = final_rows.len(), "final format created");

    Ok(PipelineRun {
        validated,
        aggregated,
        final_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CanonicalSize;

    fn row(quantity: i64, vendor_style: &str, size: &str) -> RawOrderRow {
        RawOrderRow {
            quantity,
            vendor_style: vendor_style.to_string(),
            size: size.to_string(),
        }
    }

    #[test]
    fn test_full_run_matches_expected_shape() {
        let rows = vec![
            row(2, "TEE-101", "M"),
            row(1, "TEE-101", "L"),
            row(3, "TEE-205", "S"),
        ];
        let run = run(&rows, &HashMap::new(), true).unwrap();

        assert_eq!(run.validated.len(), 3);
        assert_eq!(run.review_count(), 0);

        let keys: Vec<String> = run.aggregated.iter().map(|g| g.full_sku()).collect();
        assert_eq!(keys, vec!["TEE-101-M", "TEE-101-L", "TEE-205-S"]);

        assert_eq!(run.final_rows.len(), 2);
        assert_eq!(run.final_rows[0].quantity(CanonicalSize::M), 2);
        assert_eq!(run.final_rows[0].quantity(CanonicalSize::L), 1);
        assert_eq!(run.final_rows[0].quantity(CanonicalSize::Xs), 0);
        assert_eq!(run.final_rows[1].quantity(CanonicalSize::S), 3);
    }

    #[test]
    fn test_unresolvable_row_survives_to_every_stage() {
        let rows = vec![row(1, "WIDGET", "banana")];
        let run = run(&rows, &HashMap::new(), true).unwrap();

        assert_eq!(run.review_count(), 1);
        assert_eq!(run.aggregated.len(), 1);
        assert_eq!(run.aggregated[0].full_sku(), "WIDGET-UNRESOLVED");
        assert_eq!(run.final_rows.len(), 1);
        assert_eq!(run.final_rows[0].review_quantity, 1);
    }
}
