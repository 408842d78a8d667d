//! Individuals and their fitness.
//!
//! Fitness is the negated mean squared error over the training cases:
//! higher is better and `0.0` is a perfect fit. An individual that has not
//! been evaluated yet carries [`Fitness::Unevaluated`] rather than a magic
//! number, so no computed error can ever be mistaken for "not evaluated".

use super::tree::Node;
use std::cmp::Ordering;

/// Fitness of an individual.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fitness {
    /// Not yet evaluated. Ranks below every evaluated value.
    #[default]
    Unevaluated,
    /// Negated mean squared error.
    Evaluated(f64),
}

impl Fitness {
    /// Value used for ranking and statistics.
    ///
    /// `Unevaluated` and NaN both map to negative infinity.
    pub fn value(self) -> f64 {
        match self {
            Fitness::Evaluated(v) if !v.is_nan() => v,
            _ => f64::NEG_INFINITY,
        }
    }

    /// Whether a value has been assigned.
    pub fn is_evaluated(self) -> bool {
        matches!(self, Fitness::Evaluated(_))
    }

    /// Total order used for ranking: higher is better.
    pub fn rank_cmp(self, other: Self) -> Ordering {
        match (self, other) {
            (Fitness::Unevaluated, Fitness::Unevaluated) => Ordering::Equal,
            (Fitness::Unevaluated, _) => Ordering::Less,
            (_, Fitness::Unevaluated) => Ordering::Greater,
            (a, b) => a.value().total_cmp(&b.value()),
        }
    }
}

/// A candidate solution: an owned expression tree and its fitness.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    /// The expression tree.
    pub genome: Node,
    /// Fitness of `genome` on the active case set.
    pub fitness: Fitness,
}

impl Individual {
    /// Wraps a genome as an unevaluated individual.
    pub fn new(genome: Node) -> Self {
        Self {
            genome,
            fitness: Fitness::Unevaluated,
        }
    }

    /// Independent copy of the genome with fitness reset.
    pub fn offspring(&self) -> Self {
        Self::new(self.genome.clone())
    }
}

/// Sorts best-first (descending fitness). The sort is stable, so equal
/// fitness keeps insertion order.
pub fn sort_population(population: &mut [Individual]) {
    population.sort_by(|a, b| b.fitness.rank_cmp(a.fitness));
}

/// Returns the individual with the highest fitness, first one on ties.
pub fn find_best(population: &[Individual]) -> Option<&Individual> {
    population.iter().reduce(|best, ind| {
        if ind.fitness.rank_cmp(best.fitness) == Ordering::Greater {
            ind
        } else {
            best
        }
    })
}
