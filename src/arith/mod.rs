//! Arithmetic backend abstraction.
//!
//! The access-structure engine only needs the scalar field of a pairing-friendly
//! curve. This module exposes that field behind the [`FieldElement`] trait so the
//! compiler and solver stay independent of the pairing library in use.
//!
//! # Backend Support
//!
//! | Feature | Backend | Curve |
//! |---------|---------|-------|
//! | `blst` (default) | blstrs | BLS12-381 |
//! | `ark_bls12381` | Arkworks | BLS12-381 |
//! | `ark_bn254` | Arkworks | BN254 |
//!
//! Exactly one of these features must be enabled; the selected scalar type is
//! re-exported as [`Fr`].
//!
//! # Example
//!
//! ```rust
//! use lsss::{FieldElement, Fr, hash_to_field};
//!
//! let attr: Fr = hash_to_field("example", b"department:finance");
//! let neg = -attr;
//! assert!((attr + neg).is_zero());
//! ```

mod field;
pub use field::*;

#[cfg(not(any(feature = "blst", feature = "ark_bls12381", feature = "ark_bn254")))]
compile_error!("enable one of the `blst`, `ark_bls12381` or `ark_bn254` features");

#[cfg(any(
    all(feature = "blst", feature = "ark_bls12381"),
    all(feature = "blst", feature = "ark_bn254"),
    all(feature = "ark_bls12381", feature = "ark_bn254"),
))]
compile_error!("backend features are mutually exclusive; disable default features to pick an Arkworks backend");
