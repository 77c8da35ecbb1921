use super::error::{PickError, PickResult};
use super::item::Item;
use super::weighted_random::weighted_random;
use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

pub fn pick_one<R: Rng + ?Sized>(items: &[Item], rng: &mut R) -> PickResult<String> {
    let index = draw(items.iter(), rng)?;
    Ok(items[index].name.clone())
}

///
/// Weighted sampling without replacement.
///
/// Each round draws from whatever is left of the pool, weights unchanged, and
/// takes the winner out before the next round. Weight therefore matters for
/// every position in the result, not just the first.
///
pub fn pick_many<R: Rng + ?Sized>(items: &[Item], k: i64, rng: &mut R) -> PickResult<Vec<String>> {
    if items.is_empty() {
        return Err(PickError::NoItems);
    }
    if k <= 0 {
        return Err(PickError::input("k must be > 0."));
    }
    if k as usize > items.len() {
        return Err(PickError::input("k is larger than the number of items."));
    }

    let mut pool: Vec<&Item> = items.iter().collect();
    let mut picks = Vec::with_capacity(k as usize);
    while picks.len() < k as usize {
        let index = draw(pool.iter().copied(), rng)?;
        let chosen = pool.remove(index);
        trace!("Drew {} with {} left in the pool", chosen.name, pool.len());
        picks.push(chosen.name.clone());
    }
    Ok(picks)
}

/// Every name once, uniformly shuffled. Weights play no part.
pub fn shuffle<R: Rng + ?Sized>(items: &[Item], rng: &mut R) -> PickResult<Vec<String>> {
    if items.is_empty() {
        return Err(PickError::NoItems);
    }
    let mut names: Vec<String> = items.iter().map(|item| item.name.clone()).collect();
    names.shuffle(rng);
    Ok(names)
}

fn draw<'a, R: Rng + ?Sized>(
    items: impl Iterator<Item = &'a Item>,
    rng: &mut R,
) -> PickResult<usize> {
    let weighted: Vec<(usize, f64)> = items
        .enumerate()
        .map(|(index, item)| (index, item.weight))
        .collect();
    if weighted.is_empty() {
        return Err(PickError::NoItems);
    }
    // Registry weights are always positive, so this only fails on hand-built input
    weighted_random(weighted, rng).ok_or_else(|| PickError::input("Weights must be > 0."))
}
