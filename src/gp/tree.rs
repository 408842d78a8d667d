//! Expression trees and canonical node addressing.
//!
//! A [`Node`] owns its children directly, so every genome is an independent
//! value: cloning deep-copies, and no subtree is ever shared between two
//! individuals.
//!
//! # Addressing
//!
//! All index-based operations use one scheme: a **pre-order, depth-first,
//! left-to-right** index starting at 0 for the root. The root has depth 0.
//! [`Node::node_at`], [`Node::depth_at`], [`Node::replace_at`], and
//! [`Node::preorder`] all resolve indices through the same path lookup, so
//! they always agree.

use crate::error::{GpError, Result};
use std::fmt;

/// A labeled tree node: a symbol plus its ordered children.
///
/// The number of children must equal the symbol's arity; see
/// [`SymbolTable::is_well_formed`](super::SymbolTable::is_well_formed).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    symbol: String,
    children: Vec<Node>,
}

impl Node {
    /// Creates a node with the given children.
    pub fn new(symbol: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            symbol: symbol.into(),
            children,
        }
    }

    /// Creates a childless node.
    pub fn leaf(symbol: impl Into<String>) -> Self {
        Self::new(symbol, Vec::new())
    }

    /// The node's symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The node's children, left to right.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in the tree rooted here.
    pub fn count_nodes(&self) -> usize {
        1 + self.children.iter().map(Node::count_nodes).sum::<usize>()
    }

    /// Depth of the deepest leaf; a single node has depth 0.
    pub fn max_depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.max_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns the node at pre-order position `index`.
    pub fn node_at(&self, index: usize) -> Result<&Node> {
        let path = self.path_to(index)?;
        Ok(path
            .iter()
            .fold(self, |node, &child| &node.children[child]))
    }

    /// Mutable access to the node at pre-order position `index`.
    pub fn node_at_mut(&mut self, index: usize) -> Result<&mut Node> {
        let path = self.path_to(index)?;
        let mut node = self;
        for child in path {
            node = &mut node.children[child];
        }
        Ok(node)
    }

    /// Depth of the node at pre-order position `index` (root = 0).
    pub fn depth_at(&self, index: usize) -> Result<usize> {
        Ok(self.path_to(index)?.len())
    }

    /// Replaces the subtree at pre-order position `index` with `subtree`,
    /// returning the displaced subtree.
    ///
    /// The position within its parent is unchanged; only the symbol and
    /// descendants at that position change.
    pub fn replace_at(&mut self, index: usize, subtree: Node) -> Result<Node> {
        let slot = self.node_at_mut(index)?;
        Ok(std::mem::replace(slot, subtree))
    }

    /// Iterates over `(index, depth, node)` in pre-order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![(0, self)],
            next_index: 0,
        }
    }

    /// Child positions leading from the root to pre-order `index`.
    ///
    /// Walks down one level at a time, skipping whole sibling subtrees
    /// whose node counts lie before the target.
    fn path_to(&self, index: usize) -> Result<Vec<usize>> {
        let len = self.count_nodes();
        if index >= len {
            return Err(GpError::IndexOutOfRange { index, len });
        }

        let mut path = Vec::new();
        let mut node = self;
        let mut remaining = index;
        while remaining > 0 {
            // Step past the current node itself.
            remaining -= 1;
            let mut descended = false;
            for (pos, child) in node.children.iter().enumerate() {
                let size = child.count_nodes();
                if remaining < size {
                    path.push(pos);
                    node = child;
                    descended = true;
                    break;
                }
                remaining -= size;
            }
            if !descended {
                return Err(GpError::IndexOutOfRange { index, len });
            }
        }
        Ok(path)
    }
}

/// S-expression rendering: `(+ x0 (* 1 x1))`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.children.is_empty() {
            return write!(f, "{}", self.symbol);
        }
        write!(f, "({}", self.symbol)?;
        for child in &self.children {
            write!(f, " {child}")?;
        }
        write!(f, ")")
    }
}

/// Pre-order iterator returned by [`Node::preorder`].
#[derive(Debug)]
pub struct Preorder<'a> {
    stack: Vec<(usize, &'a Node)>,
    next_index: usize,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (usize, usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Push right to left so the leftmost child is visited first.
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        let index = self.next_index;
        self.next_index += 1;
        Some((index, depth, node))
    }
}
