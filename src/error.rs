//! Error taxonomy for the GP engine.
//!
//! Every variant is unrecoverable for a run: the search loop stops and the
//! error surfaces to the caller. The only numeric recovery the engine
//! performs (protected division) is not an error at all.

use thiserror::Error;

/// Errors raised by symbol lookup, tree addressing, evaluation, and
/// configuration checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GpError {
    /// A symbol was looked up that the [`SymbolTable`](crate::gp::SymbolTable)
    /// does not declare, or a function symbol the evaluator cannot interpret.
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),

    /// A terminal that is neither a variable nor a parseable float literal.
    #[error("malformed constant `{0}`")]
    MalformedConstant(String),

    /// A node index or variable index past the end of its collection.
    #[error("index {index} out of range (length {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of addressable elements.
        len: usize,
    },

    /// Tournament size is zero or larger than the population.
    #[error("invalid tournament size {size} for population of {population}")]
    InvalidTournamentSize {
        /// The requested tournament size.
        size: usize,
        /// The population size drawn from.
        population: usize,
    },

    /// Fitness was requested over zero cases.
    #[error("fitness case set is empty")]
    EmptyFitnessCaseSet,

    /// A run parameter, symbol declaration, or case table is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GpError>;
