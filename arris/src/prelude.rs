pub use crate::error::{Error, Result};
pub use crate::hull::{Hull, facets};
pub use crate::lrs::{
    Basis, ComputationStatus, Dictionary, Enumeration, Options, Traversal, feasible_basis,
};
pub use crate::matrix::Matrix;
pub use crate::num::Rat;
pub use crate::polyhedron::{Polyhedron, RepresentationKind};
pub use crate::stats::EnumStats;
