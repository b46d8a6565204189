use std::collections::HashMap;

use crate::domain::{AggregateRecord, CanonicalSize, ValidatedRecord, ValidationStatus};
use crate::error::{ProcessorError, Result};

/// Group validated records by `(sku, size)` and sum quantities.
///
/// Grouping is order-independent; emission is sorted by sku, then canonical
/// size index, with the unresolved bucket after all real sizes. A group is
/// REVIEW as soon as any contributor is. Total quantity in must equal total
/// quantity out; a mismatch is an internal defect and surfaces as an error.
pub fn aggregate(records: &[ValidatedRecord]) -> Result<Vec<AggregateRecord>> {
    let mut groups: HashMap<(String, Option<CanonicalSize>), AggregateRecord> = HashMap::new();

    for record in records {
        let key = (record.final_sku.clone(), record.final_size);
        let group = groups.entry(key).or_insert_with(|| AggregateRecord {
            final_sku: record.final_sku.clone(),
            final_size: record.final_size,
            total_quantity: 0,
            status: ValidationStatus::Ok,
        });
        group.total_quantity += record.quantity;
        if record.status == ValidationStatus::Review {
            group.status = ValidationStatus::Review;
        }
    }

    let input: i64 = records.iter().map(|r| r.quantity).sum();
    let output: i64 = groups.values().map(|g| g.total_quantity).sum();
    if input != output {
        return Err(ProcessorError::Conservation { input, output });
    }

    let mut aggregated: Vec<AggregateRecord> = groups.into_values().collect();
    aggregated.sort_by(|a, b| {
        a.final_sku
            .cmp(&b.final_sku)
            .then_with(|| size_sort_key(a.final_size).cmp(&size_sort_key(b.final_size)))
    });
    Ok(aggregated)
}

/// Unresolved sizes sort after every canonical size.
fn size_sort_key(size: Option<CanonicalSize>) -> usize {
    match size {
        Some(size) => size.index(),
        None => CanonicalSize::ALL.len(),
    }
}
