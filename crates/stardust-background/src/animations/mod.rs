//! Individual background layers.

use std::ops::Range;

use rand::Rng;

pub mod nebula;
pub mod shooting_star;
pub mod starfield;

/// Uniform sample from the half-open `range`.
///
/// Float sampling can round up onto `range.end`; such samples are pulled
/// back to the largest value below it. An empty range yields `range.start`.
pub(crate) fn uniform<R: Rng>(rng: &mut R, range: Range<f32>) -> f32 {
    if range.is_empty() {
        return range.start;
    }
    let value = rng.random_range(range.clone());
    if value < range.end {
        value
    } else {
        range.end.next_down().max(range.start)
    }
}
