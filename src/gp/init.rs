//! Tree growth and population initialization.
//!
//! [`grow`] builds a subtree one level at a time, asking the symbol table
//! for each child. Positions at or beyond the depth bound always receive
//! terminals, so a tree grown from depth `d` never extends past
//! `max_depth`.
//!
//! # References
//!
//! - Koza (1992), *Genetic Programming*, ch. 6 (full, grow, ramped half-and-half)

use super::symbols::{Method, SymbolTable};
use super::tree::Node;
use super::types::Individual;
use crate::error::Result;
use rand::Rng;

/// Grows a subtree rooted at `symbol`, where the root sits at `depth`.
///
/// Each of the root's `arity(symbol)` children is chosen with
/// [`SymbolTable::pick_symbol`] at `depth + 1` and grown recursively,
/// left to right.
///
/// Fails with [`GpError::UnknownSymbol`](crate::GpError::UnknownSymbol) if
/// `symbol` is not declared.
pub fn grow<R: Rng>(
    symbol: &str,
    depth: usize,
    max_depth: usize,
    method: Method,
    symbols: &SymbolTable,
    rng: &mut R,
) -> Result<Node> {
    let arity = symbols.arity(symbol)?;
    let mut children = Vec::with_capacity(arity);
    for _ in 0..arity {
        let child = symbols.pick_symbol(depth + 1, max_depth, method, rng);
        children.push(grow(child, depth + 1, max_depth, method, symbols, rng)?);
    }
    Ok(Node::new(symbol, children))
}

/// Picks a root with `pick_symbol(1, max_depth, method)` and grows it.
///
/// Depth bound 1 (or less) yields a single terminal.
pub fn random_tree<R: Rng>(
    max_depth: usize,
    method: Method,
    symbols: &SymbolTable,
    rng: &mut R,
) -> Result<Node> {
    let root = symbols.pick_symbol(1, max_depth, method, rng);
    grow(root, 0, max_depth, method, symbols, rng)
}

/// Ramped half-and-half initialization.
///
/// Individual `i` uses a uniformly chosen method and the depth bound
/// `(i % max_depth) + 1`, spreading shapes and sizes across the population.
pub fn ramped_half_and_half<R: Rng>(
    population_size: usize,
    max_depth: usize,
    symbols: &SymbolTable,
    rng: &mut R,
) -> Result<Vec<Individual>> {
    (0..population_size)
        .map(|i| {
            let method = Method::random(rng);
            let depth_bound = (i % max_depth.max(1)) + 1;
            let genome = random_tree(depth_bound, method, symbols, rng)?;
            tracing::trace!(index = i, ?method, depth_bound, %genome, "initial tree");
            Ok(Individual::new(genome))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GpError;
    use crate::random::create_rng;

    #[test]
    fn test_grow_respects_bound() {
        let symbols = SymbolTable::arithmetic(2);
        let mut rng = create_rng(42);
        for max_depth in 1..6 {
            for method in [Method::Full, Method::Grow] {
                for _ in 0..50 {
                    let tree = random_tree(max_depth, method, &symbols, &mut rng).unwrap();
                    assert!(
                        tree.max_depth() <= max_depth,
                        "depth {} exceeds bound {max_depth}: {tree}",
                        tree.max_depth()
                    );
                    assert!(symbols.is_well_formed(&tree).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_full_reaches_bound() {
        let symbols = SymbolTable::arithmetic(1);
        let mut rng = create_rng(7);
        for max_depth in 2..5 {
            let tree = random_tree(max_depth, Method::Full, &symbols, &mut rng).unwrap();
            // Root picked at depth 1, so leaves sit at max_depth.
            assert_eq!(tree.max_depth(), max_depth);
            // Binary functions only: a perfect tree.
            assert_eq!(tree.count_nodes(), (1 << (max_depth + 1)) - 1);
        }
    }

    #[test]
    fn test_depth_one_is_terminal() {
        let symbols = SymbolTable::arithmetic(1);
        let mut rng = create_rng(3);
        for _ in 0..20 {
            let tree = random_tree(1, Method::Full, &symbols, &mut rng).unwrap();
            assert!(tree.is_leaf());
        }
    }

    #[test]
    fn test_grow_from_terminal() {
        let symbols = SymbolTable::arithmetic(1);
        let mut rng = create_rng(3);
        let tree = grow("x0", 0, 5, Method::Full, &symbols, &mut rng).unwrap();
        assert_eq!(tree, Node::leaf("x0"));
    }

    #[test]
    fn test_grow_unknown_root() {
        let symbols = SymbolTable::arithmetic(1);
        let mut rng = create_rng(3);
        assert_eq!(
            grow("sin", 0, 3, Method::Grow, &symbols, &mut rng),
            Err(GpError::UnknownSymbol("sin".into()))
        );
    }

    #[test]
    fn test_unary_function_table() {
        let symbols = SymbolTable::new([("neg", 1), ("+", 2), ("x0", 0)]).unwrap();
        let mut rng = create_rng(11);
        for _ in 0..100 {
            let tree = random_tree(4, Method::Grow, &symbols, &mut rng).unwrap();
            assert!(symbols.is_well_formed(&tree).unwrap());
            assert!(tree.max_depth() <= 4);
        }
    }

    #[test]
    fn test_ramped_half_and_half() {
        let symbols = SymbolTable::arithmetic(2);
        let mut rng = create_rng(42);
        let max_depth = 4;
        let pop = ramped_half_and_half(40, max_depth, &symbols, &mut rng).unwrap();
        assert_eq!(pop.len(), 40);
        for (i, ind) in pop.iter().enumerate() {
            assert!(ind.genome.max_depth() <= (i % max_depth) + 1);
            assert!(!ind.fitness.is_evaluated());
        }
        // Every (i % max_depth) == 0 slot has bound 1: a single terminal.
        assert!(pop.iter().step_by(max_depth).all(|ind| ind.genome.is_leaf()));
        // The ramp yields a spread of depths.
        let deepest = pop.iter().map(|i| i.genome.max_depth()).max().unwrap();
        assert!(deepest >= 2, "expected some deep trees, deepest = {deepest}");
    }

    #[test]
    fn test_same_seed_same_population() {
        let symbols = SymbolTable::arithmetic(2);
        let a = ramped_half_and_half(20, 3, &symbols, &mut create_rng(9)).unwrap();
        let b = ramped_half_and_half(20, 3, &symbols, &mut create_rng(9)).unwrap();
        assert_eq!(a, b);
    }
}
