//! Lexicographic reverse search over the feasible bases of an
//! H-representation.
//!
//! A basis is a set of `d` tight inequality rows; the feasible bases form a
//! graph under single pivots, and the lex-smallest-neighbour parent rule
//! turns that graph into a spanning arborescence. [`Traversal`] walks the
//! arborescence depth-first and emits every vertex and extreme ray exactly
//! once.

mod dictionary;
mod enumerator;
mod phase1;

pub use dictionary::{Basis, Dictionary};
pub use enumerator::{Enumeration, Traversal};
pub use phase1::feasible_basis;

/// Traversal configuration supplied by the driver.
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Children deeper than this are not pushed; `None` means unlimited.
    pub max_depth: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComputationStatus {
    AllFound,
    RegionEmpty,
}
