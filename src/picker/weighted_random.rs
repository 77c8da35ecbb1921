use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Draws one item with probability proportional to its weight.
///
/// Returns `None` when there is nothing to draw from or the weights do not
/// describe a distribution (negative, NaN, infinite, or all zero).
pub fn weighted_random<T, R: Rng + ?Sized>(items: Vec<(T, f64)>, rng: &mut R) -> Option<T> {
    // Scaled so the largest weight is 1 and the total can never overflow
    let largest = items
        .iter()
        .map(|(_, weight)| *weight)
        .fold(f64::NAN, f64::max);
    if !largest.is_finite() || largest <= 0.0 {
        return None;
    }
    let distribution: WeightedIndex<f64> =
        WeightedIndex::new(items.iter().map(|(_, weight)| *weight / largest)).ok()?;
    let index = distribution.sample(rng);
    items.into_iter().nth(index).map(|(item, _)| item)
}
