//! Jaccard similarity over encoded label vectors.

use crate::encoder::EncodedVector;

/// `|A ∩ B| / |A ∪ B|`, defined as 0 when both vectors are all-false.
///
/// Vectors of different widths are compared as if the shorter one were
/// padded with false columns.
pub fn jaccard(a: &EncodedVector, b: &EncodedVector) -> f32 {
    let (a, b) = (a.words(), b.words());
    let width = a.len().max(b.len());

    let mut intersection = 0u32;
    let mut union = 0u32;
    for i in 0..width {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        intersection += (x & y).count_ones();
        union += (x | y).count_ones();
    }

    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}
