//! The LSSS engine: policy compilation, share generation and reconstruction.
//!
//! - [`compile`] turns an [`AccessTree`](crate::AccessTree) into an [`LsssMatrix`].
//! - [`LsssMatrix::compute_vector`] and friends produce per-row shares.
//! - [`evaluate`] picks the requester's rows and asks [`solve`] for weights.

mod compiler;
pub use compiler::{ShareVector, compile};

mod matrix;
pub use matrix::LsssMatrix;

mod solver;
pub use solver::{Combination, solve};

mod evaluator;
pub use evaluator::{Reconstruction, evaluate};
