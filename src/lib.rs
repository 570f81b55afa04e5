//! # LSSS: access policies as linear secret-sharing schemes
//!
//! This crate is the policy engine behind attribute-based encryption schemes.
//! It compiles a monotone Boolean access policy into a share-generating
//! matrix and decides, with exact arithmetic over the scalar field of a
//! pairing-friendly curve, whether a set of attributes can reconstruct the
//! shared secret.
//!
//! ## Architecture
//!
//! - **[`arith`]**: the [`FieldElement`] abstraction over the scalar field of the
//!   selected backend, re-exported as [`Fr`], plus [`hash_to_field`].
//!
//! - **[`policy`]**: [`Attribute`], the [`AccessTree`] of AND/OR gates and the
//!   text syntax accepted by [`parse_policy`].
//!
//! - **[`lsss`]**: the Lewko–Waters [`compile`] step producing an [`LsssMatrix`],
//!   the Gaussian-elimination [`solve`] routine and the [`evaluate`] entry point
//!   used at decryption time.
//!
//! - **[`config`]**: [`BackendConfig`] and [`PolicyLimits`].
//!
//! - **[`errors`]**: [`Error`] and [`BackendError`].
//!
//! ## Quick Example
//!
//! ```rust
//! use std::collections::HashSet;
//!
//! use lsss::{Attribute, FieldElement, Fr, compile, parse_policy};
//! use rand::thread_rng;
//!
//! # fn main() -> Result<(), lsss::Error> {
//! let mut rng = thread_rng();
//!
//! // Encryptor: compile the policy and share a secret over its rows.
//! let policy = parse_policy::<Fr>("(doctor and cardiology) or admin")?;
//! let matrix = compile(&policy);
//! let secret = Fr::random(&mut rng);
//! let shares = matrix.share_secret(secret, &mut rng);
//!
//! // Decryptor: find the rows and weights their attributes unlock.
//! let held: HashSet<_> = ["doctor", "cardiology"]
//!     .into_iter()
//!     .map(Attribute::from_name)
//!     .collect();
//! let reconstruction = matrix.evaluate(&held)?.expect("policy satisfied");
//! assert_eq!(reconstruction.combine(&shares)?, secret);
//!
//! // Insufficient attributes are an ordinary `None`, not an error.
//! let held: HashSet<_> = [Attribute::from_name("doctor")].into_iter().collect();
//! assert!(matrix.evaluate(&held)?.is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! Exactly one scalar-field backend must be enabled:
//!
//! - **`blst`** (default): blstrs backend for BLS12-381
//! - **`ark_bls12381`**: Arkworks backend for BLS12-381
//! - **`ark_bn254`**: Arkworks backend for BN254
//!
//! ## Error Model
//!
//! Malformed input (empty gates, out-of-range rows, ragged matrices, policy
//! syntax errors) is reported as [`Error`]. A policy that the held attributes
//! do not satisfy is the expected negative outcome and is returned as
//! `Ok(None)` from [`evaluate`] and [`solve`].

pub mod arith;
pub mod config;
pub mod errors;
pub mod lsss;
pub mod policy;
mod serde_impl;

pub use arith::*;
pub use config::*;
pub use errors::*;
pub use lsss::*;
pub use policy::*;
