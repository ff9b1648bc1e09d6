use crate::{AdaptiveMutation, stats::DescriptiveStats};

/// Spread of fitness across an evaluated pool: the population standard deviation.
///
/// An empty pool has diversity 0.
#[must_use]
pub fn fitness_diversity<I>(fitness: I) -> f32
where
    I: IntoIterator<Item = f32>,
{
    DescriptiveStats::new(fitness).map_or(0.0, |stats| stats.std_dev)
}

/// Mutation rate for crossover children given the pool's diversity.
///
/// `base + (1 - diversity) * (max - base)`, clamped to `[min, max]`. A converged
/// pool (diversity near 0) mutates near `max_rate`; a spread-out one stays near
/// `base_rate`.
#[must_use]
pub fn adaptive_rate(diversity: f32, params: &AdaptiveMutation) -> f32 {
    let AdaptiveMutation {
        base_rate,
        min_rate,
        max_rate,
        ..
    } = *params;
    let rate = base_rate + (1.0 - diversity) * (max_rate - base_rate);
    // max/min rather than clamp: never panics on a misconfigured range
    rate.max(min_rate).min(max_rate)
}
