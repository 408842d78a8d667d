//! GP evolutionary loop execution.
//!
//! [`GpRunner`] orchestrates the complete search:
//! initialization → evaluation → {selection → crossover → mutation →
//! evaluation → replacement} × generations → best individual.
//!
//! The loop is sequential and draws every random decision from one
//! generator, in a fixed order, so a seed reproduces a run exactly.

use super::config::GpConfig;
use super::eval::{evaluate_individual, evaluate_population, FitnessCases};
use super::init::ramped_half_and_half;
use super::operators::{crossover, mutate};
use super::selection::{generational_replacement, tournament_selection};
use super::stats::GenerationStats;
use super::symbols::SymbolTable;
use super::types::{find_best, sort_population, Fitness, Individual};
use crate::error::{GpError, Result};
use crate::random::create_rng;
use rand::seq::index;
use rand::Rng;
use tracing::{debug, info};

/// Result of a GP run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpResult {
    /// The best individual of the final population.
    pub best: Individual,

    /// Number of generations executed.
    pub generations: usize,

    /// Seed the run's generator was created from.
    pub seed: u64,

    /// Statistics of the initial population followed by every generation.
    pub history: Vec<GenerationStats>,

    /// Fitness of `best` on the held-out cases, when a holdout was used and
    /// is non-empty.
    pub test_fitness: Option<Fitness>,
}

/// Snapshot handed to observers after each generation.
#[derive(Debug)]
pub struct GenerationReport<'a> {
    /// Aggregate statistics.
    pub stats: &'a GenerationStats,
    /// The population ranked best-first.
    pub population: &'a [Individual],
}

/// Executes the GP evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_symreg::gp::{FitnessCases, GpConfig, GpRunner, SymbolTable};
///
/// // y = x0 * x0 + 1
/// let rows = (-5..=5)
///     .map(|i| {
///         let x = i as f64;
///         vec![x, x * x + 1.0]
///     })
///     .collect();
/// let cases = FitnessCases::from_rows(rows).unwrap();
/// let symbols = SymbolTable::arithmetic(1);
/// let config = GpConfig::default().with_elite_size(1).with_seed(42);
///
/// let result = GpRunner::run(&cases, &symbols, &config).unwrap();
/// assert_eq!(result.history.len(), config.generations + 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GpRunner;

impl GpRunner {
    /// Runs the search on `cases`.
    pub fn run(cases: &FitnessCases, symbols: &SymbolTable, config: &GpConfig) -> Result<GpResult> {
        Self::run_with_observer(cases, symbols, config, |_| {})
    }

    /// Runs the search, calling `observer` with the ranked population after
    /// the initial evaluation (generation 0) and after every generation.
    pub fn run_with_observer<F>(
        cases: &FitnessCases,
        symbols: &SymbolTable,
        config: &GpConfig,
        mut observer: F,
    ) -> Result<GpResult>
    where
        F: FnMut(&GenerationReport<'_>),
    {
        config.validate()?;
        if cases.is_empty() {
            return Err(GpError::EmptyFitnessCaseSet);
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        info!(
            seed,
            population_size = config.population_size,
            max_depth = config.max_depth,
            generations = config.generations,
            cases = cases.len(),
            "starting GP run"
        );

        // 1. Initialize and evaluate
        let mut population =
            ramped_half_and_half(config.population_size, config.max_depth, symbols, &mut rng)?;
        evaluate_population(&mut population, cases)?;
        sort_population(&mut population);

        let mut history = Vec::with_capacity(config.generations + 1);
        record(0, &population, &mut history, &mut observer);

        // 2. Evolutionary loop
        for generation in 1..=config.generations {
            let parents = tournament_selection(
                &population,
                config.tournament_size,
                config.population_size,
                &mut rng,
            )?;

            // Crossover on random pairs until the population is full
            let mut offspring = Vec::with_capacity(config.population_size + 1);
            while offspring.len() < config.population_size {
                let (a, b) = random_pair(parents.len(), &mut rng);
                let (child_a, child_b) = crossover(
                    &parents[a],
                    &parents[b],
                    config.crossover_probability,
                    symbols,
                    &mut rng,
                )?;
                offspring.push(child_a);
                offspring.push(child_b);
            }
            offspring.truncate(config.population_size);

            // Mutation
            let mut new_population = offspring
                .iter()
                .map(|child| {
                    mutate(
                        child,
                        config.mutation_probability,
                        config.max_depth,
                        symbols,
                        &mut rng,
                    )
                })
                .collect::<Result<Vec<_>>>()?;

            evaluate_population(&mut new_population, cases)?;
            debug!(
                generation,
                parents = parents.len(),
                offspring = new_population.len(),
                elites = config.elite_size,
                "generation varied"
            );

            // Replacement (returns the population ranked best-first)
            population = generational_replacement(
                new_population,
                &population,
                config.elite_size,
                config.population_size,
            );

            record(generation, &population, &mut history, &mut observer);
        }

        let best = find_best(&population)
            .cloned()
            .ok_or_else(|| GpError::InvalidConfiguration("population is empty".into()))?;
        info!(
            fitness = best.fitness.value(),
            genome = %best.genome,
            "GP run finished"
        );

        Ok(GpResult {
            best,
            generations: config.generations,
            seed,
            history,
            test_fitness: None,
        })
    }

    /// Splits `cases` by `config.test_train_split`, runs on the training
    /// part, and evaluates the best individual on the held-out part.
    pub fn run_with_holdout(
        cases: &FitnessCases,
        symbols: &SymbolTable,
        config: &GpConfig,
    ) -> Result<GpResult> {
        let (train, test) = cases.split(config.test_train_split)?;
        let mut result = Self::run(&train, symbols, config)?;

        if !test.is_empty() {
            let mut held_out = result.best.clone();
            evaluate_individual(&mut held_out, &test)?;
            info!(
                train = result.best.fitness.value(),
                test = held_out.fitness.value(),
                "out-of-sample evaluation"
            );
            result.test_fitness = Some(held_out.fitness);
        }
        Ok(result)
    }
}

/// Two distinct positions in `0..n`, or `(0, 0)` when `n < 2`.
fn random_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    if n < 2 {
        return (0, 0);
    }
    let pair = index::sample(rng, n, 2);
    (pair.index(0), pair.index(1))
}

fn record<F>(
    generation: usize,
    population: &[Individual],
    history: &mut Vec<GenerationStats>,
    observer: &mut F,
) where
    F: FnMut(&GenerationReport<'_>),
{
    let stats = GenerationStats::from_population(generation, population);
    info!(
        generation,
        best = stats.best_fitness,
        fit_ave = stats.fitness.mean,
        fit_std = stats.fitness.std,
        size_ave = stats.size.mean,
        size_std = stats.size.std,
        depth_ave = stats.depth.mean,
        depth_std = stats.depth.std,
        "generation"
    );
    observer(&GenerationReport {
        stats: &stats,
        population,
    });
    history.push(stats);
}

// ============================================================================
// Tests
// ============================================================================
