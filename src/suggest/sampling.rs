use rand::Rng;
use rand::seq::SliceRandom;

/// Uniform pick, None on an empty slice
pub fn uniform_pick<'a, T, R: Rng>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

/// Group-weighted pick: each item weighs `1 / sqrt(|its group|)`, so a
/// crowded group's total pull grows with the square root of its size instead
/// of linearly. Builds a cumulative distribution and draws proportionally.
pub fn weighted_pick<'a, T, K, F, R>(items: &'a [T], group_key: F, rng: &mut R) -> Option<&'a T>
where
    K: PartialEq,
    F: Fn(&T) -> K,
    R: Rng,
{
    if items.is_empty() {
        return None;
    }

    let keys: Vec<K> = items.iter().map(|item| group_key(item)).collect();
    let weights: Vec<f64> = keys
        .iter()
        .map(|key| {
            let size = keys.iter().filter(|k| *k == key).count();
            1.0 / (size as f64).sqrt()
        })
        .collect();

    let total: f64 = weights.iter().sum();
    let draw = rng.gen_range(0.0..total);

    let mut cumulative = 0.0;
    for (item, weight) in items.iter().zip(&weights) {
        cumulative += weight;
        if draw < cumulative {
            return Some(item);
        }
    }
    // Rounding can leave the draw a hair past the last boundary
    items.last()
}
