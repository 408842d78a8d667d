//! GP run configuration.
//!
//! [`GpConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{GpError, Result};

/// Configuration for a GP run.
///
/// # Defaults
///
/// ```
/// use u_symreg::gp::GpConfig;
///
/// let config = GpConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.max_depth, 3);
/// assert_eq!(config.generations, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_symreg::gp::GpConfig;
///
/// let config = GpConfig::default()
///     .with_population_size(200)
///     .with_max_depth(5)
///     .with_tournament_size(4)
///     .with_elite_size(2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GpConfig {
    /// Number of individuals in the population. Fixed for the whole run.
    pub population_size: usize,

    /// Maximum tree depth for initialization and mutation (root = depth 0).
    pub max_depth: usize,

    /// Number of generations to run. 0 evaluates the initial population only.
    pub generations: usize,

    /// Competitors per tournament, in `[1, population_size]`.
    ///
    /// - 1: uniform random selection
    /// - 2–3: light to moderate pressure
    /// - larger: strong pressure (risk of premature convergence)
    pub tournament_size: usize,

    /// Best individuals of the previous generation ranked together with the
    /// offspring, in `[0, population_size]`.
    ///
    /// With at least one elite the best fitness never decreases.
    pub elite_size: usize,

    /// Probability of attempting subtree crossover on a pair (0.0–1.0).
    pub crossover_probability: f64,

    /// Probability of applying subtree mutation to an offspring (0.0–1.0).
    pub mutation_probability: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed; the seed actually used is reported in
    /// the result.
    pub seed: Option<u64>,

    /// Fraction of the cases used for training, in `(0, 1)`. The remainder
    /// is held out for out-of-sample evaluation.
    pub test_train_split: f64,
}

impl Default for GpConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            max_depth: 3,
            generations: 10,
            tournament_size: 2,
            elite_size: 0,
            crossover_probability: 1.0,
            mutation_probability: 1.0,
            seed: None,
            test_train_split: 0.7,
        }
    }
}

impl GpConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum tree depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the elite size.
    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the training fraction.
    pub fn with_test_train_split(mut self, split: f64) -> Self {
        self.test_train_split = split;
        self
    }

    /// Validates the configuration.
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(invalid("population_size must be at least 1"));
        }
        if self.max_depth == 0 {
            return Err(invalid("max_depth must be at least 1"));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(invalid(format!(
                "tournament_size must be in [1, {}], got {}",
                self.population_size, self.tournament_size
            )));
        }
        if self.elite_size > self.population_size {
            return Err(invalid(format!(
                "elite_size must be in [0, {}], got {}",
                self.population_size, self.elite_size
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return Err(invalid(format!(
                "crossover_probability must be in [0, 1], got {}",
                self.crossover_probability
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(invalid(format!(
                "mutation_probability must be in [0, 1], got {}",
                self.mutation_probability
            )));
        }
        if !(self.test_train_split > 0.0 && self.test_train_split < 1.0) {
            return Err(invalid(format!(
                "test_train_split must be in (0, 1), got {}",
                self.test_train_split
            )));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> GpError {
    GpError::InvalidConfiguration(msg.into())
}
