//! Dynamic weight and acceptance threshold from the request's category mix.

use placerec_core::error::{Error, Result};
use placerec_core::types::Category;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightPolicy {
    /// Multiplier applied to primary-category similarity scores.
    pub keyword_weight: f32,
    /// Minimum aggregate score for an entity to be recommended (inclusive).
    pub threshold: f32,
}

/// The primary category is more discriminative than peripheral attributes:
/// the fewer primary keywords a request carries, the harder each one is
/// scaled, and the threshold rises with the scaled total.
///
/// With `total` entries and `c` of them primary:
/// `weight = total - c + 1`, `threshold = (c * weight + (total - c)) * 0.7`.
pub fn derive(categories: &[Category]) -> Result<WeightPolicy> {
    if categories.is_empty() {
        return Err(Error::InvalidRequest(
            "cannot derive a weight from an empty category list".to_string(),
        ));
    }
    let total = categories.len();
    let primary = categories
        .iter()
        .filter(|&&c| c == Category::PRIMARY)
        .count();

    let keyword_weight = (total - primary + 1) as f32;
    let threshold = (primary as f32 * keyword_weight + (total - primary) as f32) * 0.7;

    Ok(WeightPolicy { keyword_weight, threshold })
}
