use rand::Rng;

use crate::Individual;

/// Draws a pool index biased toward the front: `floor(U² * len)`, `U` uniform in `[0, 1)`.
///
/// # Panics
///
/// Panics if `len` is zero.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn biased_rank<R>(len: usize, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    assert!(len > 0, "cannot draw from an empty pool");
    let u: f64 = rng.random();
    let rank = (u * u * len as f64).floor() as usize;
    rank.min(len - 1)
}

/// Selects a parent by tournament.
///
/// Draws `tournament_size` candidates with [`biased_rank`] from a pool sorted by
/// fitness descending and returns the fittest; on ties the better-ranked one.
///
/// # Panics
///
/// Panics if the pool is empty or `tournament_size` is zero.
pub fn tournament_select<'a, R>(
    pool: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0, "tournament needs at least one candidate");
    debug_assert!(pool.is_sorted_by(|a, b| a.fitness >= b.fitness));
    let winner = (0..tournament_size)
        .map(|_| biased_rank(pool.len(), rng))
        .min_by(|&a, &b| pool[b].fitness.total_cmp(&pool[a].fitness).then(a.cmp(&b)))
        .unwrap_or(0);
    &pool[winner]
}

#[cfg(test)]
mod tests {
    use neuroplat_engine::AgentId;
    use neuroplat_network::{NetworkShape, NeuralNetwork};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn pool(fitness: &[f32]) -> Vec<Individual> {
        let mut rng = Pcg32::seed_from_u64(5);
        fitness
            .iter()
            .enumerate()
            .map(|(i, &fitness)| Individual {
                agent: AgentId(i),
                genome: NeuralNetwork::new(NetworkShape::new(1, 1, 4), &mut rng),
                score: fitness,
                fitness,
            })
            .collect()
    }

    #[test]
    fn test_biased_rank_favors_front() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut counts = [0_usize; 10];
        for _ in 0..20_000 {
            counts[biased_rank(10, &mut rng)] += 1;
        }
        // P(rank 0) = sqrt(0.1) ~ 0.316, P(rank 9) = 1 - sqrt(0.9) ~ 0.051
        assert!(counts[0] > 5_800 && counts[0] < 6_900, "{counts:?}");
        assert!(counts[9] > 800 && counts[9] < 1_300, "{counts:?}");
        assert!(counts[0] > counts[4] && counts[4] > counts[9], "{counts:?}");
    }

    #[test]
    fn test_single_candidate_pool() {
        let pool = pool(&[0.0]);
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..10 {
            assert_eq!(tournament_select(&pool, 3, &mut rng).agent(), AgentId(0));
        }
    }

    #[test]
    fn test_larger_tournaments_pick_fitter_parents() {
        let pool = pool(&[1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1]);
        let mut rng = Pcg32::seed_from_u64(3);
        let mean_fitness = |k: usize, rng: &mut Pcg32| {
            (0..5_000)
                .map(|_| tournament_select(&pool, k, rng).fitness())
                .sum::<f32>()
                / 5_000.0
        };
        let k1 = mean_fitness(1, &mut rng);
        let k3 = mean_fitness(3, &mut rng);
        assert!(k3 > k1 + 0.05, "k1={k1} k3={k3}");
        assert!(k3 <= 1.0);
    }
}
