use rand::Rng;

/// Number of points needed to span a plane.
pub const PLANE_SAMPLE_SIZE: usize = 3;

/// Draws `k` items uniformly at random without replacement in a single pass.
///
/// This is reservoir sampling ("Algorithm R"): the reservoir is seeded with the
/// first `k` items, then item `i` (0-based, `i >= k`) replaces slot `j` when a
/// uniform draw `j` in `[0, i]` lands below `k`. Every `k`-subset is equally
/// likely. Uses O(k) memory regardless of the input length.
///
/// When the input yields `k` items or fewer they are returned as-is, in input
/// order, and no randomness is consumed.
pub fn reservoir_sample<T, I, R>(items: I, k: usize, rng: &mut R) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    R: Rng + ?Sized,
{
    let mut reservoir = Vec::with_capacity(k);
    if k == 0 {
        return reservoir;
    }

    for (i, item) in items.into_iter().enumerate() {
        if i < k {
            reservoir.push(item);
            continue;
        }
        let j = rng.gen_range(0..=i);
        if j < k {
            reservoir[j] = item;
        }
    }

    reservoir
}

/// Samples the three points a candidate plane is fitted to.
///
/// Returns fewer than three points only when `points` itself has fewer.
pub fn sample_three<R: Rng + ?Sized>(points: &[[f32; 3]], rng: &mut R) -> Vec<[f32; 3]> {
    reservoir_sample(points.iter().copied(), PLANE_SAMPLE_SIZE, rng)
}
