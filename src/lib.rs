//! Genetic programming engine for symbolic regression.
//!
//! Searches for an arithmetic expression that reproduces a table of
//! input/output examples by evolving a population of expression trees:
//!
//! - **Representation**: Arity-checked expression trees with one canonical
//!   pre-order node index shared by every operator.
//! - **Variation**: Subtree crossover (arity-matched exchange) and subtree
//!   mutation (regrowth under a depth bound).
//! - **Selection**: Tournament selection with elitist generational
//!   replacement.
//! - **Evaluation**: Recursive interpretation with protected division;
//!   fitness is the negated mean squared error.
//!
//! # Architecture
//!
//! The engine is single-threaded and draws all randomness from one seeded
//! generator. Input parsing and presentation are left to callers: they
//! supply a [`gp::FitnessCases`] table, a [`gp::SymbolTable`], and a
//! [`gp::GpConfig`], and receive ranked populations and statistics back.
//! Progress is reported through `tracing` events.

pub mod error;
pub mod gp;
pub mod random;

pub use error::{GpError, Result};
