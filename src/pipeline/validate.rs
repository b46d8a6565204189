use tracing::{info, warn};

use crate::domain::{CanonicalSize, RawOrderRow, ValidatedRecord, ValidationStatus};
use crate::pipeline::normalize::normalize;

/// Validate one raw row into a complete record.
///
/// Resolution order: the size cell itself, then a trailing hyphen suffix of
/// the vendor style (the standardized `VendorStyle-Size` concatenation).
/// Rows that resolve neither way keep the vendor style untouched and come
/// back flagged; nothing is dropped or raised.
pub fn validate(row: &RawOrderRow) -> ValidatedRecord {
    let (final_sku, final_size) = resolve(row);

    // A non-positive quantity always needs review, resolvable size or not.
    let status = if final_size.is_some() && row.quantity > 0 {
        ValidationStatus::Ok
    } else {
        ValidationStatus::Review
    };

    ValidatedRecord {
        final_sku,
        final_size,
        quantity: row.quantity,
        status,
        original_vendor_style: row.vendor_style.clone(),
        original_size: row.size.clone(),
    }
}

fn resolve(row: &RawOrderRow) -> (String, Option<CanonicalSize>) {
    if let Some(size) = normalize(&row.size) {
        return (row.vendor_style.clone(), Some(size));
    }

    // Size cell empty or unusable: try the trailing vendor-style segment.
    // Only the final hyphen segment is a candidate; a style that is nothing
    // but a size token has no separator and stays unresolved.
    if let Some((prefix, suffix)) = row.vendor_style.rsplit_once('-') {
        if !prefix.is_empty() {
            if let Some(size) = normalize(suffix) {
                info!(
                    vendor_style = %row.vendor_style,
                    size = %size,
                    "recovered size from vendor style suffix"
                );
                return (prefix.to_string(), Some(size));
            }
        }
    }

    warn!(
        vendor_style = %row.vendor_style,
        original_size = %row.size,
        "could not determine size"
    );
    (row.vendor_style.clone(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(quantity: i64, vendor_style: &str, size: &str) -> RawOrderRow {
        RawOrderRow {
            quantity,
            vendor_style: vendor_style.to_string(),
            size: size.to_string(),
        }
    }

    #[test]
    fn test_clean_row_is_ok() {
        let record = validate(&row(2, "TEE-101", "M"));
        assert_eq!(record.final_sku, "TEE-101");
        assert_eq!(record.final_size, Some(CanonicalSize::M));
        assert_eq!(record.status, ValidationStatus::Ok);
        assert_eq!(record.original_size, "M");
    }

    #[test]
    fn test_suffix_extraction_when_size_missing() {
        let record = validate(&row(1, "TEE-101-XL", ""));
        assert_eq!(record.final_sku, "TEE-101");
        assert_eq!(record.final_size, Some(CanonicalSize::Xl));
        assert_eq!(record.status, ValidationStatus::Ok);
        assert_eq!(record.original_vendor_style, "TEE-101-XL");
    }

    #[test]
    fn test_suffix_extraction_when_size_is_garbage() {
        let record = validate(&row(1, "TEE-101-2XL", "??"));
        assert_eq!(record.final_sku, "TEE-101");
        assert_eq!(record.final_size, Some(CanonicalSize::Xl2));
    }

    #[test]
    fn test_only_the_final_segment_is_tested() {
        // Size token in a non-trailing position is not extraction material
        let record = validate(&row(1, "XL-TEE-101", ""));
        assert_eq!(record.final_sku, "XL-TEE-101");
        assert_eq!(record.final_size, None);
        assert_eq!(record.status, ValidationStatus::Review);
    }

    #[test]
    fn test_bare_size_token_style_stays_unresolved() {
        let record = validate(&row(1, "M", ""));
        assert_eq!(record.final_sku, "M");
        assert_eq!(record.final_size, None);
        assert_eq!(record.status, ValidationStatus::Review);
    }

    #[test]
    fn test_unresolvable_row_keeps_quantity() {
        let record = validate(&row(1, "WIDGET", "banana"));
        assert_eq!(record.final_sku, "WIDGET");
        assert_eq!(record.final_size, None);
        assert_eq!(record.status, ValidationStatus::Review);
        assert_eq!(record.quantity, 1);
    }

    #[test]
    fn test_zero_quantity_is_review_despite_valid_size() {
        let record = validate(&row(0, "TEE-101", "M"));
        assert_eq!(record.final_size, Some(CanonicalSize::M));
        assert_eq!(record.status, ValidationStatus::Review);
    }

    #[test]
    fn test_negative_quantity_is_review() {
        let record = validate(&row(-3, "TEE-101", "L"));
        assert_eq!(record.status, ValidationStatus::Review);
        assert_eq!(record.quantity, -3);
    }
}
