//! Subtree crossover and subtree mutation.
//!
//! Both operators work on independent copies of their inputs and address
//! nodes through the pre-order index of [`Node`]. Offspring always satisfy
//! the arity invariant:
//!
//! - crossover swaps only subtrees whose roots have the **same arity**, so
//!   each swapped subtree fits the slot it lands in;
//! - mutation replaces a subtree with one grown from the symbol table.
//!
//! # Random draws
//!
//! Draw order is fixed for reproducibility:
//!
//! - crossover: apply-probability draw, point in parent A, point among the
//!   arity-matching nodes of parent B;
//! - mutation: apply-probability draw, point, root symbol, method (only when
//!   the root is a function), then the growth draws.
//!
//! # References
//!
//! - Koza (1992), *Genetic Programming*, ch. 6.4 (crossover) and 6.5.1 (mutation)
//! - Poli, Langdon & McPhee (2008), *A Field Guide to Genetic Programming*, §2.4

use super::init::grow;
use super::symbols::{Method, SymbolTable};
use super::types::Individual;
use crate::error::Result;
use rand::Rng;

/// Subtree crossover.
///
/// Returns deep copies of both parents (fitness reset). With probability
/// `crossover_probability`, and when the copy of `parent_a` has at least
/// two nodes, a uniformly random point is chosen in it. If that point is a
/// function, one node of the copy of `parent_b` with the same arity is
/// chosen uniformly and the two subtrees are exchanged by value. A terminal
/// point, or no arity match, leaves both copies unchanged.
pub fn crossover<R: Rng>(
    parent_a: &Individual,
    parent_b: &Individual,
    crossover_probability: f64,
    symbols: &SymbolTable,
    rng: &mut R,
) -> Result<(Individual, Individual)> {
    let mut child_a = parent_a.offspring();
    let mut child_b = parent_b.offspring();

    let apply = rng.random::<f64>() < crossover_probability;
    let size_a = child_a.genome.count_nodes();
    if !apply || size_a < 2 {
        return Ok((child_a, child_b));
    }

    let point_a = rng.random_range(0..size_a);
    let arity = symbols.arity(child_a.genome.node_at(point_a)?.symbol())?;
    if arity == 0 {
        return Ok((child_a, child_b));
    }

    let mut candidates = Vec::new();
    for (index, _, node) in child_b.genome.preorder() {
        if symbols.arity(node.symbol())? == arity {
            candidates.push(index);
        }
    }
    if candidates.is_empty() {
        return Ok((child_a, child_b));
    }
    let point_b = candidates[rng.random_range(0..candidates.len())];

    let subtree_b = child_b.genome.node_at(point_b)?.clone();
    let subtree_a = child_a.genome.replace_at(point_a, subtree_b)?;
    child_b.genome.replace_at(point_b, subtree_a)?;

    Ok((child_a, child_b))
}

/// Subtree mutation.
///
/// Returns a deep copy of `individual` (fitness reset). With probability
/// `mutation_probability`, a uniformly random node at depth `d` is replaced
/// by a new subtree: its root is picked with
/// `pick_symbol(d, max_depth, Grow)` and, if it is a function, grown with a
/// uniformly chosen method under the same bound. The new subtree therefore
/// never reaches below `max_depth`.
pub fn mutate<R: Rng>(
    individual: &Individual,
    mutation_probability: f64,
    max_depth: usize,
    symbols: &SymbolTable,
    rng: &mut R,
) -> Result<Individual> {
    let mut child = individual.offspring();
    if rng.random::<f64>() >= mutation_probability {
        return Ok(child);
    }

    let point = rng.random_range(0..child.genome.count_nodes());
    let depth = child.genome.depth_at(point)?;
    let root = symbols.pick_symbol(depth, max_depth, Method::Grow, rng);
    let method = if symbols.is_function(root) {
        Method::random(rng)
    } else {
        Method::Grow
    };
    let subtree = grow(root, depth, max_depth, method, symbols, rng)?;
    child.genome.replace_at(point, subtree)?;

    Ok(child)
}
