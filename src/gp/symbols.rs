//! Symbol table: terminals, functions, and their arities.
//!
//! Every tree operation consults the table to know how many children a
//! symbol requires. Terminals (arity 0) are either variable references,
//! written with the [`VARIABLE_PREFIX`] followed by an input index
//! (`x0`, `x1`, ...), or numeric constants parsed when evaluated.

use super::tree::Node;
use crate::error::{GpError, Result};
use rand::Rng;
use std::collections::HashMap;

/// Prefix marking a terminal as a reference into the input vector.
pub const VARIABLE_PREFIX: &str = "x";

/// Tree construction method used by the growth algorithm.
///
/// - `Full`: every branch reaches the depth bound (functions until the bound).
/// - `Grow`: each position is a terminal or a function with equal odds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Pick functions until the depth bound forces terminals.
    Full,
    /// Pick terminals or functions with probability 0.5 each.
    Grow,
}

impl Method {
    /// Picks `Full` or `Grow` uniformly.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Method::Full
        } else {
            Method::Grow
        }
    }
}

/// Declared symbols with their arities.
///
/// Declaration order is preserved in [`terminals`](Self::terminals) and
/// [`functions`](Self::functions) so random draws are reproducible for a
/// given seed.
///
/// # Examples
///
/// ```
/// use u_symreg::gp::SymbolTable;
///
/// let table = SymbolTable::arithmetic(2);
/// assert_eq!(table.arity("+").unwrap(), 2);
/// assert_eq!(table.arity("x1").unwrap(), 0);
/// assert!(table.arity("sin").is_err());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolTable {
    arities: HashMap<String, usize>,
    terminals: Vec<String>,
    functions: Vec<String>,
}

impl SymbolTable {
    /// Builds a table from `(symbol, arity)` declarations.
    ///
    /// Fails with [`GpError::InvalidConfiguration`] on an empty or duplicate
    /// name, or when no terminal is declared (growth could never terminate).
    pub fn new<I, S>(declarations: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut arities = HashMap::new();
        let mut terminals = Vec::new();
        let mut functions = Vec::new();

        for (symbol, arity) in declarations {
            let symbol = symbol.into();
            if symbol.is_empty() {
                return Err(GpError::InvalidConfiguration(
                    "symbol names must not be empty".into(),
                ));
            }
            if arities.insert(symbol.clone(), arity).is_some() {
                return Err(GpError::InvalidConfiguration(format!(
                    "symbol `{symbol}` declared twice"
                )));
            }
            if arity == 0 {
                terminals.push(symbol);
            } else {
                functions.push(symbol);
            }
        }

        if terminals.is_empty() {
            return Err(GpError::InvalidConfiguration(
                "at least one terminal symbol is required".into(),
            ));
        }

        Ok(Self {
            arities,
            terminals,
            functions,
        })
    }

    /// The arithmetic table: constant `1`, variables `x0..x{n-1}`, and the
    /// binary functions `+ - * /`.
    pub fn arithmetic(num_variables: usize) -> Self {
        let mut terminals = vec!["1".to_string()];
        terminals.extend((0..num_variables).map(|i| format!("{VARIABLE_PREFIX}{i}")));
        let functions = ["+", "-", "*", "/"].map(String::from).to_vec();

        let arities = terminals
            .iter()
            .map(|t| (t.clone(), 0))
            .chain(functions.iter().map(|f| (f.clone(), 2)))
            .collect();

        Self {
            arities,
            terminals,
            functions,
        }
    }

    /// Returns the arity of `symbol`.
    pub fn arity(&self, symbol: &str) -> Result<usize> {
        self.arities
            .get(symbol)
            .copied()
            .ok_or_else(|| GpError::UnknownSymbol(symbol.to_string()))
    }

    /// Arity-0 symbols in declaration order.
    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }

    /// Arity>0 symbols in declaration order.
    pub fn functions(&self) -> &[String] {
        &self.functions
    }

    /// Whether `symbol` is a declared function.
    pub fn is_function(&self, symbol: &str) -> bool {
        self.arities.get(symbol).is_some_and(|&a| a > 0)
    }

    /// Checks the arity invariant transitively: every node has exactly as
    /// many children as its symbol's arity.
    ///
    /// Fails with [`GpError::UnknownSymbol`] if any node's symbol is
    /// undeclared.
    pub fn is_well_formed(&self, node: &Node) -> Result<bool> {
        if self.arity(node.symbol())? != node.children().len() {
            return Ok(false);
        }
        for child in node.children() {
            if !self.is_well_formed(child)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Picks a symbol for a position at `depth` under the bound `max_depth`.
    ///
    /// - `depth >= max_depth`: a uniform terminal (forces termination).
    /// - `Full`: a uniform function.
    /// - `Grow`: a uniform terminal with probability 0.5, else a uniform
    ///   function.
    ///
    /// A table without functions always yields a terminal.
    pub fn pick_symbol<R: Rng>(
        &self,
        depth: usize,
        max_depth: usize,
        method: Method,
        rng: &mut R,
    ) -> &str {
        let pick_terminal = depth >= max_depth
            || match method {
                Method::Full => false,
                Method::Grow => rng.random_bool(0.5),
            };

        let pool = if pick_terminal || self.functions.is_empty() {
            &self.terminals
        } else {
            &self.functions
        };
        &pool[rng.random_range(0..pool.len())]
    }
}
