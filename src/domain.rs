use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The fixed size vocabulary, in the order the printing layout expects.
///
/// Declaration order is significant: it drives both the aggregate sort key
/// and the column order of the final pivot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalSize {
    #[serde(rename = "XS")]
    Xs,
    S,
    M,
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "2XL")]
    Xl2,
    #[serde(rename = "3XL")]
    Xl3,
    #[serde(rename = "4XL")]
    Xl4,
}

impl CanonicalSize {
    pub const ALL: [CanonicalSize; 8] = [
        CanonicalSize::Xs,
        CanonicalSize::S,
        CanonicalSize::M,
        CanonicalSize::L,
        CanonicalSize::Xl,
        CanonicalSize::Xl2,
        CanonicalSize::Xl3,
        CanonicalSize::Xl4,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CanonicalSize::Xs => "XS",
            CanonicalSize::S => "S",
            CanonicalSize::M => "M",
            CanonicalSize::L => "L",
            CanonicalSize::Xl => "XL",
            CanonicalSize::Xl2 => "2XL",
            CanonicalSize::Xl3 => "3XL",
            CanonicalSize::Xl4 => "4XL",
        }
    }

    /// Position within the fixed column layout.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for CanonicalSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One line from a source order export, exactly as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOrderRow {
    pub quantity: i64,
    pub vendor_style: String,
    pub size: String,
}

/// Whether a record resolved cleanly or needs a human look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    Ok,
    Review,
}

impl ValidationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ValidationStatus::Ok => "OK",
            ValidationStatus::Review => "REVIEW",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A raw row after validation: final sku/size plus the untouched originals
/// for audit. Every input row yields exactly one of these, flagged rather
/// than dropped when it cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedRecord {
    pub final_sku: String,
    /// `None` when no canonical size could be determined.
    pub final_size: Option<CanonicalSize>,
    pub quantity: i64,
    pub status: ValidationStatus,
    pub original_vendor_style: String,
    pub original_size: String,
}

/// Label used wherever an unresolved size needs a printable name.
pub const UNRESOLVED_LABEL: &str = "UNRESOLVED";

/// Summed quantities for one `(sku, size)` group. Unresolved sizes keep
/// their own group per sku so no quantity is silently lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub final_sku: String,
    pub final_size: Option<CanonicalSize>,
    pub total_quantity: i64,
    pub status: ValidationStatus,
}

impl AggregateRecord {
    /// Human-readable `VendorStyle-Size` key for the aggregated table.
    pub fn full_sku(&self) -> String {
        match self.final_size {
            Some(size) => format!("{}-{}", self.final_sku, size),
            None => format!("{}-{}", self.final_sku, UNRESOLVED_LABEL),
        }
    }

    pub fn size_label(&self) -> &'static str {
        match self.final_size {
            Some(size) => size.label(),
            None => UNRESOLVED_LABEL,
        }
    }
}

/// Description and ink color looked up per sku for the final table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuMetadata {
    pub description: String,
    pub ink_color: String,
}

/// One line of the printer-ready table: a sku with its quantity spread
/// across the fixed size columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalRow {
    pub sku: String,
    pub description: String,
    pub ink_color: String,
    quantities: BTreeMap<CanonicalSize, i64>,
    /// Quantity whose size never resolved, reported in the REVIEW column.
    pub review_quantity: i64,
}

impl FinalRow {
    pub fn new(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            description: String::new(),
            ink_color: String::new(),
            quantities: BTreeMap::new(),
            review_quantity: 0,
        }
    }

    pub fn add_quantity(&mut self, size: CanonicalSize, quantity: i64) {
        *self.quantities.entry(size).or_insert(0) += quantity;
    }

    /// Quantity for a size column; absent sizes read as 0.
    pub fn quantity(&self, size: CanonicalSize) -> i64 {
        self.quantities.get(&size).copied().unwrap_or(0)
    }
}
