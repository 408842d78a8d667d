//! Expression evaluation and fitness assignment.
//!
//! # Evaluation rules
//!
//! - `+ - *` apply to the values of the two children.
//! - `/` is protected: a denominator with magnitude below
//!   [`PROTECTED_DIV_EPSILON`] is replaced by `1.0`, so the numerator is
//!   returned unchanged.
//! - `x<i>` reads component `i` of the input vector.
//! - Any other terminal is parsed as an `f64` literal.

use super::symbols::VARIABLE_PREFIX;
use super::tree::Node;
use super::types::{Fitness, Individual};
use crate::error::{GpError, Result};

/// Denominators with smaller magnitude are treated as `1.0`.
pub const PROTECTED_DIV_EPSILON: f64 = 1e-5;

/// Evaluates `node` against one input vector.
///
/// Pure and deterministic: identical trees and inputs give bit-identical
/// results.
pub fn evaluate(node: &Node, case: &[f64]) -> Result<f64> {
    match (node.symbol(), node.children()) {
        ("+", [a, b]) => Ok(evaluate(a, case)? + evaluate(b, case)?),
        ("-", [a, b]) => Ok(evaluate(a, case)? - evaluate(b, case)?),
        ("*", [a, b]) => Ok(evaluate(a, case)? * evaluate(b, case)?),
        ("/", [a, b]) => {
            let numerator = evaluate(a, case)?;
            let mut denominator = evaluate(b, case)?;
            if denominator.abs() < PROTECTED_DIV_EPSILON {
                denominator = 1.0;
            }
            Ok(numerator / denominator)
        }
        (symbol, []) => evaluate_terminal(symbol, case),
        (symbol, _) => Err(GpError::UnknownSymbol(symbol.to_string())),
    }
}

fn evaluate_terminal(symbol: &str, case: &[f64]) -> Result<f64> {
    if let Some(index) = variable_index(symbol) {
        return case.get(index).copied().ok_or(GpError::IndexOutOfRange {
            index,
            len: case.len(),
        });
    }
    symbol
        .parse::<f64>()
        .map_err(|_| GpError::MalformedConstant(symbol.to_string()))
}

/// Input index encoded in a variable symbol, if `symbol` is one.
fn variable_index(symbol: &str) -> Option<usize> {
    symbol.strip_prefix(VARIABLE_PREFIX)?.parse().ok()
}

/// A table of fitness cases: input vectors with matching target values.
///
/// Immutable once built; training and held-out sets come from
/// [`split`](Self::split) and never overlap.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessCases {
    inputs: Vec<Vec<f64>>,
    targets: Vec<f64>,
}

impl FitnessCases {
    /// Pairs `inputs[i]` with `targets[i]`.
    ///
    /// Fails with [`GpError::InvalidConfiguration`] when the lengths differ
    /// or the input vectors do not all have the same width.
    pub fn new(inputs: Vec<Vec<f64>>, targets: Vec<f64>) -> Result<Self> {
        if inputs.len() != targets.len() {
            return Err(GpError::InvalidConfiguration(format!(
                "{} input rows but {} targets",
                inputs.len(),
                targets.len()
            )));
        }
        if let Some(first) = inputs.first() {
            let width = first.len();
            if let Some(row) = inputs.iter().position(|r| r.len() != width) {
                return Err(GpError::InvalidConfiguration(format!(
                    "row {row} has {} inputs, expected {width}",
                    inputs[row].len()
                )));
            }
        }
        Ok(Self { inputs, targets })
    }

    /// Builds cases from table rows whose last column is the target.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let mut inputs = Vec::with_capacity(rows.len());
        let mut targets = Vec::with_capacity(rows.len());
        for (i, mut row) in rows.into_iter().enumerate() {
            let target = row.pop().ok_or_else(|| {
                GpError::InvalidConfiguration(format!("row {i} has no target column"))
            })?;
            inputs.push(row);
            targets.push(target);
        }
        Self::new(inputs, targets)
    }

    /// Number of cases.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether there are no cases.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of explanatory variables per case.
    pub fn num_variables(&self) -> usize {
        self.inputs.first().map_or(0, Vec::len)
    }

    /// Input vectors.
    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    /// Target values.
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Splits into `(train, test)`: the first `floor(len * ratio)` cases
    /// train, the rest are held out.
    pub fn split(&self, ratio: f64) -> Result<(FitnessCases, FitnessCases)> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(GpError::InvalidConfiguration(format!(
                "split ratio must be in (0, 1), got {ratio}"
            )));
        }
        let at = (self.len() as f64 * ratio).floor() as usize;
        let train = FitnessCases {
            inputs: self.inputs[..at].to_vec(),
            targets: self.targets[..at].to_vec(),
        };
        let test = FitnessCases {
            inputs: self.inputs[at..].to_vec(),
            targets: self.targets[at..].to_vec(),
        };
        Ok((train, test))
    }
}

/// Mean squared error of `genome` over `cases`.
pub fn mean_squared_error(genome: &Node, cases: &FitnessCases) -> Result<f64> {
    if cases.is_empty() {
        return Err(GpError::EmptyFitnessCaseSet);
    }
    let mut sum = 0.0;
    for (case, &target) in cases.inputs.iter().zip(&cases.targets) {
        let error = evaluate(genome, case)? - target;
        sum += error * error;
    }
    Ok(sum / cases.len() as f64)
}

/// Assigns the negated mean squared error to `individual`.
///
/// On error the fitness is left untouched; no partial value is stored.
pub fn evaluate_individual(individual: &mut Individual, cases: &FitnessCases) -> Result<()> {
    let mse = mean_squared_error(&individual.genome, cases)?;
    individual.fitness = Fitness::Evaluated(-mse);
    Ok(())
}

/// Evaluates every individual in order, stopping at the first failure.
pub fn evaluate_population(population: &mut [Individual], cases: &FitnessCases) -> Result<()> {
    for individual in population.iter_mut() {
        evaluate_individual(individual, cases)?;
        tracing::trace!(genome = %individual.genome, fitness = individual.fitness.value(), "evaluated");
    }
    Ok(())
}
