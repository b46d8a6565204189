use std::collections::{BTreeMap, HashMap};

use crate::domain::{AggregateRecord, FinalRow, SkuMetadata};

/// Reshape aggregates into one row per sku with a column per canonical size.
///
/// Unresolved buckets land in the row's review quantity when
/// `include_unresolved` is set; otherwise they are left to the aggregated
/// table and contribute nothing here. Metadata lookups that miss fall back
/// to empty strings, never to an error. Output is sorted by sku.
pub fn pivot(
    aggregates: &[AggregateRecord],
    metadata: &HashMap<String, SkuMetadata>,
    include_unresolved: bool,
) -> Vec<FinalRow> {
    let mut rows: BTreeMap<String, FinalRow> = BTreeMap::new();

    for aggregate in aggregates {
        match aggregate.final_size {
            Some(size) => {
                rows.entry(aggregate.final_sku.clone())
                    .or_insert_with(|| FinalRow::new(&aggregate.final_sku))
                    .add_quantity(size, aggregate.total_quantity);
            }
            None if include_unresolved => {
                rows.entry(aggregate.final_sku.clone())
                    .or_insert_with(|| FinalRow::new(&aggregate.final_sku))
                    .review_quantity += aggregate.total_quantity;
            }
            None => {}
        }
    }

    let mut final_rows: Vec<FinalRow> = rows.into_values().collect();
    for row in &mut final_rows {
        if let Some(info) = metadata.get(&row.sku) {
            row.description = info.description.clone();
            row.ink_color = info.ink_color.clone();
        }
    }
    final_rows
}
