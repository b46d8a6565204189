use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::CanonicalSize;

/// Alias variants per canonical size, as they appear in vendor exports.
/// Keys are folded (uppercased, non-alphanumerics stripped) before lookup,
/// so "extra-small", "Extra Small" and "EXTRASMALL" all land on XS.
const SIZE_ALIASES: [(CanonicalSize, &[&str]); 8] = [
    (
        CanonicalSize::Xs,
        &["xs", "extra small", "extra-small", "x-small"],
    ),
    (CanonicalSize::S, &["s", "small"]),
    (CanonicalSize::M, &["m", "medium", "med"]),
    (CanonicalSize::L, &["l", "large"]),
    (
        CanonicalSize::Xl,
        &["xl", "extra large", "extra-large", "x-large"],
    ),
    (
        CanonicalSize::Xl2,
        &["2xl", "xxl", "2x", "xx-large", "double xl"],
    ),
    (CanonicalSize::Xl3, &["3xl", "xxxl", "3x", "triple xl"]),
    (CanonicalSize::Xl4, &["4xl", "xxxxl", "4x"]),
];

static ALIAS_LOOKUP: Lazy<HashMap<String, CanonicalSize>> = Lazy::new(|| {
    let mut lookup = HashMap::new();
    for (size, variants) in SIZE_ALIASES {
        lookup.insert(fold(size.label()), size);
        for variant in variants {
            lookup.insert(fold(variant), size);
        }
    }
    lookup
});

/// Numeric-prefix pattern like "2XL", "3 XL" after folding.
static NUMERIC_XL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)XL$").unwrap());

/// Repeated-X pattern like "XXL", "XXXXL".
static REPEATED_XL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(X+)L$").unwrap());

/// Uppercase and strip everything that is not a letter or digit.
fn fold(token: &str) -> String {
    token
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Map a raw size token onto the canonical vocabulary.
///
/// Direct alias lookup first, then a tolerant fallback for numeric-prefix
/// and repeated-letter spellings. Returns `None` when nothing matches;
/// flagging is the caller's job.
pub fn normalize(raw: &str) -> Option<CanonicalSize> {
    let folded = fold(raw);
    if folded.is_empty() {
        return None;
    }

    if let Some(size) = ALIAS_LOOKUP.get(&folded) {
        return Some(*size);
    }

    if let Some(caps) = NUMERIC_XL.captures(&folded) {
        return match &caps[1] {
            "2" => Some(CanonicalSize::Xl2),
            "3" => Some(CanonicalSize::Xl3),
            "4" => Some(CanonicalSize::Xl4),
            _ => None,
        };
    }

    // Collapse "XXXL"-style repetition into its numeric-prefix form
    if let Some(caps) = REPEATED_XL.captures(&folded) {
        return match caps[1].len() {
            2 => Some(CanonicalSize::Xl2),
            3 => Some(CanonicalSize::Xl3),
            4 => Some(CanonicalSize::Xl4),
            _ => None,
        };
    }

    None
}
