//! Building the next generation from an evaluated pool.

use neuroplat_network::NeuralNetwork;
use rand::Rng;

use crate::{Individual, TrainingParams, diversity, selection::tournament_select};

/// How one generation was bred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreedingReport {
    pub elite_count: usize,
    /// Fitness standard deviation of the parent pool.
    pub diversity: f32,
    /// Mutation rate applied to crossover children.
    pub mutation_rate: f32,
    pub crossovers: usize,
    pub clones: usize,
}

/// Number of genomes carried over unchanged: `max(1, ceil(n * fraction))`, at most `n`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn elite_count(population_size: usize, fraction: f32) -> usize {
    if population_size == 0 {
        return 0;
    }
    let fraction = if fraction > 0.0 { fraction.min(1.0) } else { 0.0 };
    let count = (population_size as f32 * fraction).ceil() as usize;
    count.clamp(1, population_size)
}

/// Produces exactly `pool.len()` genomes for the next generation.
///
/// The pool must be sorted by fitness descending, as returned by
/// [`crate::fitness::evaluate`]. Elites are cloned unchanged at the front. Each
/// remaining slot is either a crossover of two tournament-selected parents,
/// mutated at the diversity-adaptive rate, or (with probability
/// `1 - crossover_probability`) a clone of one tournament-selected parent
/// mutated with the fixed exploration parameters.
///
/// Parents are never modified; every child owns fresh arrays.
///
/// # Panics
///
/// Panics if the pool is empty.
pub fn breed<R>(
    pool: &[Individual],
    params: &TrainingParams,
    rng: &mut R,
) -> (Vec<NeuralNetwork>, BreedingReport)
where
    R: Rng + ?Sized,
{
    assert!(!pool.is_empty(), "cannot breed from an empty pool");
    assert!(
        pool.is_sorted_by(|a, b| a.fitness >= b.fitness),
        "pool must be sorted by fitness descending"
    );

    let n = pool.len();
    let elites = elite_count(n, params.elite_fraction);
    let diversity = diversity::fitness_diversity(pool.iter().map(Individual::fitness));
    let mutation_rate = diversity::adaptive_rate(diversity, &params.adaptive);
    let crossover_probability = if params.crossover_probability > 0.0 {
        f64::from(params.crossover_probability.min(1.0))
    } else {
        0.0
    };
    let tournament_size = params.tournament_size.max(1);

    let mut next = Vec::with_capacity(n);
    // elite selection
    next.extend(pool[..elites].iter().map(|ind| ind.genome.clone()));

    let mut report = BreedingReport {
        elite_count: elites,
        diversity,
        mutation_rate,
        crossovers: 0,
        clones: 0,
    };
    while next.len() < n {
        let child = if rng.random_bool(crossover_probability) {
            let p1 = tournament_select(pool, tournament_size, rng);
            let p2 = tournament_select(pool, tournament_size, rng);
            let mut child = p1.genome.crossover(&p2.genome, rng);
            child.mutate(mutation_rate, params.adaptive.strength, rng);
            report.crossovers += 1;
            child
        } else {
            let parent = tournament_select(pool, tournament_size, rng);
            let mut child = parent.genome.clone();
            child.mutate(
                params.exploration.rate,
                params.exploration.strength,
                rng,
            );
            report.clones += 1;
            child
        };
        next.push(child);
    }

    (next, report)
}

#[cfg(test)]
mod tests {
    use neuroplat_engine::AgentId;
    use neuroplat_network::NetworkShape;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn pool(fitness: &[f32], rng: &mut Pcg32) -> Vec<Individual> {
        fitness
            .iter()
            .enumerate()
            .map(|(i, &fitness)| Individual {
                agent: AgentId(i),
                genome: NeuralNetwork::new(NetworkShape::new(5, 4, 4), rng),
                score: fitness * 100.0,
                fitness,
            })
            .collect()
    }

    #[test]
    fn test_elite_count_formula() {
        assert_eq!(elite_count(10, 0.1), 1);
        assert_eq!(elite_count(11, 0.1), 2);
        assert_eq!(elite_count(30, 0.1), 3);
        assert_eq!(elite_count(3, 0.0), 1);
        assert_eq!(elite_count(3, f32::NAN), 1);
        assert_eq!(elite_count(3, 5.0), 3);
        assert_eq!(elite_count(0, 0.1), 0);
    }

    #[test]
    fn test_breeds_exactly_n_with_elites_first() {
        let mut rng = Pcg32::seed_from_u64(21);
        for n in [1, 2, 10, 11, 25] {
            let fitness = (0..n)
                .map(|i| 1.0 - i as f32 / n as f32)
                .collect::<Vec<_>>();
            let pool = pool(&fitness, &mut rng);
            let params = TrainingParams {
                population_size: n,
                ..TrainingParams::default()
            };
            let (next, report) = breed(&pool, &params, &mut rng);
            assert_eq!(next.len(), n);
            assert_eq!(report.elite_count, elite_count(n, 0.1));
            assert_eq!(report.elite_count + report.crossovers + report.clones, n);
            for (child, parent) in next.iter().zip(&pool).take(report.elite_count) {
                assert_eq!(child, &parent.genome);
            }
        }
    }

    #[test]
    fn test_parents_are_untouched() {
        let mut rng = Pcg32::seed_from_u64(22);
        let pool = pool(&[1.0, 0.5, 0.25, 0.0], &mut rng);
        let before = pool.iter().map(|ind| ind.genome.clone()).collect::<Vec<_>>();
        let params = TrainingParams {
            exploration: crate::MutationParams {
                rate: 1.0,
                strength: 1.0,
            },
            ..TrainingParams::default()
        };
        for _ in 0..20 {
            let _ = breed(&pool, &params, &mut rng);
        }
        for (ind, genome) in pool.iter().zip(&before) {
            assert_eq!(&ind.genome, genome);
        }
    }

    #[test]
    fn test_all_zero_pool_still_breeds() {
        let mut rng = Pcg32::seed_from_u64(23);
        let pool = pool(&[0.0; 10], &mut rng);
        let (next, report) = breed(&pool, &TrainingParams::default(), &mut rng);
        assert_eq!(next.len(), 10);
        assert_eq!(report.elite_count, 1);
        assert_eq!(report.diversity, 0.0);
        assert_eq!(report.mutation_rate, 0.5);
        assert_eq!(next[0], pool[0].genome);
    }

    #[test]
    fn test_crossover_probability_splits_branches() {
        let mut rng = Pcg32::seed_from_u64(24);
        let pool = pool(&[1.0, 0.8, 0.6, 0.4, 0.2], &mut rng);
        let always = TrainingParams {
            crossover_probability: 1.0,
            ..TrainingParams::default()
        };
        let (_, report) = breed(&pool, &always, &mut rng);
        assert_eq!(report.clones, 0);
        let never = TrainingParams {
            crossover_probability: 0.0,
            ..TrainingParams::default()
        };
        let (_, report) = breed(&pool, &never, &mut rng);
        assert_eq!(report.crossovers, 0);
        assert_eq!(report.clones, 4);
    }
}
