//! Tree-based Genetic Programming for symbolic regression.
//!
//! Evolves a population of expression trees to minimize the squared error
//! between their outputs and a table of target values.
//!
//! # Core Types
//!
//! - [`SymbolTable`]: Declared terminals and functions with their arities
//! - [`Node`]: Expression tree with pre-order node addressing
//! - [`Individual`]: A genome and its [`Fitness`]
//! - [`FitnessCases`]: Input vectors with matching targets
//!
//! # Running
//!
//! - [`GpConfig`]: Run parameters (population, depth, operator rates)
//! - [`GpRunner`]: Executes the evolutionary loop
//! - [`GpResult`]: Best individual plus per-generation [`GenerationStats`]
//!
//! # Submodules
//!
//! - [`init`]: Full/grow tree growth and ramped half-and-half initialization
//! - [`operators`]: Subtree crossover and subtree mutation
//! - [`selection`]: Tournament selection and elitist replacement
//! - [`eval`]: Expression evaluation and fitness assignment
//!
//! # References
//!
//! - Koza (1992), *Genetic Programming: On the Programming of Computers by
//!   Means of Natural Selection*
//! - Poli, Langdon & McPhee (2008), *A Field Guide to Genetic Programming*

mod config;
pub mod eval;
pub mod init;
pub mod operators;
mod runner;
pub mod selection;
mod stats;
mod symbols;
mod tree;
mod types;

pub use config::GpConfig;
pub use eval::{evaluate, evaluate_individual, FitnessCases};
pub use runner::{GenerationReport, GpResult, GpRunner};
pub use stats::{GenerationStats, Summary};
pub use symbols::{Method, SymbolTable, VARIABLE_PREFIX};
pub use tree::{Node, Preorder};
pub use types::{find_best, sort_population, Fitness, Individual};
