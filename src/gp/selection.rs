//! Tournament selection and elitist generational replacement.
//!
//! All rankings assume **maximization**: higher fitness wins.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"
//! - De Jong (1975), elitist replacement in generational GAs

use super::types::{sort_population, Individual};
use crate::error::{GpError, Result};
use rand::seq::index;
use rand::Rng;
use std::cmp::Ordering;

/// Runs one tournament and returns the winner's index.
///
/// Draws `k` distinct individuals uniformly from `population` and returns
/// the one with the highest fitness (first drawn on ties). With `k == 1`
/// this is a uniform random choice.
///
/// # Complexity
/// O(k) per tournament
pub fn tournament<R: Rng>(population: &[Individual], k: usize, rng: &mut R) -> Result<usize> {
    let n = population.len();
    if k == 0 || k > n {
        return Err(GpError::InvalidTournamentSize {
            size: k,
            population: n,
        });
    }

    let mut competitors = index::sample(rng, n, k).into_iter();
    // k >= 1, so the first draw always exists.
    let mut best = competitors.next().unwrap_or(0);
    for idx in competitors {
        if population[idx].fitness.rank_cmp(population[best].fitness) == Ordering::Greater {
            best = idx;
        }
    }
    Ok(best)
}

/// Runs `num_winners` independent tournaments of size `k` and returns
/// copies of the winners in draw order.
///
/// Individuals may win more than one tournament.
pub fn tournament_selection<R: Rng>(
    population: &[Individual],
    k: usize,
    num_winners: usize,
    rng: &mut R,
) -> Result<Vec<Individual>> {
    (0..num_winners)
        .map(|_| tournament(population, k, rng).map(|i| population[i].clone()))
        .collect()
}

/// Generational replacement with elitism.
///
/// The best `elite_size` individuals of `old_population` are copied into
/// `new_population`; the combined set is ranked best-first and truncated
/// to `population_size`.
pub fn generational_replacement(
    mut new_population: Vec<Individual>,
    old_population: &[Individual],
    elite_size: usize,
    population_size: usize,
) -> Vec<Individual> {
    let mut old_ranked = old_population.to_vec();
    sort_population(&mut old_ranked);
    old_ranked.truncate(elite_size);

    new_population.extend(old_ranked);
    sort_population(&mut new_population);
    new_population.truncate(population_size);
    new_population
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gp::tree::Node;
    use crate::gp::types::Fitness;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Vec<Individual> {
        fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| Individual {
                genome: Node::leaf(i.to_string()),
                fitness: Fitness::Evaluated(f),
            })
            .collect()
    }

    #[test]
    fn test_tournament_full_size_picks_best() {
        // Without replacement inside a draw, k = n always includes the best.
        let pop = make_population(&[-10.0, -5.0, -1.0, -8.0]);
        let mut rng = create_rng(42);
        for _ in 0..100 {
            assert_eq!(tournament(&pop, 4, &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[-10.0, -5.0, -1.0, -8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, 1, &mut rng).unwrap()] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_never_picks_worst_with_k2() {
        let pop = make_population(&[-10.0, -5.0, -1.0, -8.0]);
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            assert_ne!(tournament(&pop, 2, &mut rng).unwrap(), 0);
        }
    }

    #[test]
    fn test_tournament_winner_beats_competitors() {
        let pop = make_population(&[-3.0, -7.0, -0.5, -2.0, -9.0, -1.0]);
        let mut rng = create_rng(17);
        for _ in 0..500 {
            let mut probe = rng.clone();
            let drawn: Vec<usize> = index::sample(&mut probe, pop.len(), 3).into_iter().collect();
            let winner = tournament(&pop, 3, &mut rng).unwrap();
            assert!(drawn.contains(&winner));
            for &c in &drawn {
                assert!(pop[winner].fitness.value() >= pop[c].fitness.value());
            }
        }
    }

    #[test]
    fn test_invalid_tournament_size() {
        let pop = make_population(&[-1.0, -2.0]);
        let mut rng = create_rng(1);
        assert_eq!(
            tournament(&pop, 0, &mut rng),
            Err(GpError::InvalidTournamentSize {
                size: 0,
                population: 2
            })
        );
        assert_eq!(
            tournament(&pop, 3, &mut rng),
            Err(GpError::InvalidTournamentSize {
                size: 3,
                population: 2
            })
        );
        assert!(tournament(&[], 1, &mut rng).is_err());
    }

    #[test]
    fn test_tournament_selection_count() {
        let pop = make_population(&[-4.0, -3.0, -2.0, -1.0]);
        let mut rng = create_rng(3);
        let winners = tournament_selection(&pop, 2, 10, &mut rng).unwrap();
        assert_eq!(winners.len(), 10);
        assert!(winners.iter().all(|w| w.fitness.value() > -4.0));
    }

    #[test]
    fn test_replacement_without_elites() {
        let old = make_population(&[0.0, -0.1]);
        let new = make_population(&[-5.0, -2.0, -3.0]);
        let next = generational_replacement(new, &old, 0, 3);
        let values: Vec<f64> = next.iter().map(|i| i.fitness.value()).collect();
        assert_eq!(values, [-2.0, -3.0, -5.0]);
    }

    #[test]
    fn test_replacement_keeps_elites() {
        let old = make_population(&[-1.0, 0.0, -4.0]);
        let new = make_population(&[-5.0, -2.0, -3.0]);
        let next = generational_replacement(new, &old, 2, 3);
        let values: Vec<f64> = next.iter().map(|i| i.fitness.value()).collect();
        assert_eq!(values, [0.0, -1.0, -2.0]);
    }

    #[test]
    fn test_replacement_elites_compete() {
        // Elites only survive if they rank within the population size.
        let old = make_population(&[-9.0]);
        let new = make_population(&[-1.0, -2.0]);
        let next = generational_replacement(new, &old, 1, 2);
        let values: Vec<f64> = next.iter().map(|i| i.fitness.value()).collect();
        assert_eq!(values, [-1.0, -2.0]);
    }
}
