//! Per-generation population statistics.

use super::types::Individual;

/// Mean and population standard deviation of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation (divides by `n`).
    pub std: f64,
}

impl Summary {
    /// Summarizes `values`; an empty sample yields zeros.
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            std: variance.sqrt(),
        }
    }
}

/// Aggregate statistics of one generation's population.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation number; 0 is the evaluated initial population.
    pub generation: usize,
    /// Highest fitness in the population.
    pub best_fitness: f64,
    /// Fitness across the population.
    pub fitness: Summary,
    /// Node count across the population.
    pub size: Summary,
    /// Tree depth across the population.
    pub depth: Summary,
}

impl GenerationStats {
    /// Computes statistics for `population`.
    pub fn from_population(generation: usize, population: &[Individual]) -> Self {
        let fitness: Vec<f64> = population.iter().map(|i| i.fitness.value()).collect();
        let size: Vec<f64> = population
            .iter()
            .map(|i| i.genome.count_nodes() as f64)
            .collect();
        let depth: Vec<f64> = population
            .iter()
            .map(|i| i.genome.max_depth() as f64)
            .collect();

        Self {
            generation,
            best_fitness: fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            fitness: Summary::of(&fitness),
            size: Summary::of(&size),
            depth: Summary::of(&depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gp::tree::Node;
    use crate::gp::types::Fitness;

    #[test]
    fn test_summary() {
        let s = Summary::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.std - 2.0).abs() < 1e-12);
        assert_eq!(Summary::of(&[]), Summary::default());
    }

    #[test]
    fn test_generation_stats() {
        let pop = vec![
            Individual {
                genome: Node::leaf("x0"),
                fitness: Fitness::Evaluated(-1.0),
            },
            Individual {
                genome: Node::new("+", vec![Node::leaf("x0"), Node::leaf("1")]),
                fitness: Fitness::Evaluated(-3.0),
            },
        ];
        let stats = GenerationStats::from_population(4, &pop);
        assert_eq!(stats.generation, 4);
        assert!((stats.best_fitness + 1.0).abs() < 1e-12);
        assert!((stats.fitness.mean + 2.0).abs() < 1e-12);
        assert!((stats.fitness.std - 1.0).abs() < 1e-12);
        assert!((stats.size.mean - 2.0).abs() < 1e-12);
        assert!((stats.depth.mean - 0.5).abs() < 1e-12);
    }
}
