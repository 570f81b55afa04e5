//! Scalar field abstraction.
//!
//! Every policy attribute, matrix entry and solver weight is an element of the
//! scalar field `Fr` of the selected pairing curve. The concrete type is picked
//! at compile time by exactly one backend feature and re-exported as [`Fr`].

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand_core::RngCore;

use crate::BackendError;

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::Fr;

#[cfg(feature = "ark_bls12381")]
mod ark_bls12_381;
#[cfg(feature = "ark_bls12381")]
pub use ark_bls12_381::Fr;

#[cfg(feature = "ark_bn254")]
mod ark_bn254;
#[cfg(feature = "ark_bn254")]
pub use ark_bn254::Fr;

/// Field element abstraction for scalar field operations.
///
/// This trait abstracts over the scalar field Fr of the elliptic curve, providing
/// the operations the access-structure engine needs: construction, the ring
/// operators, additive and multiplicative inverses, exact equality and a byte
/// representation for serialization.
///
/// # Example
///
/// ```rust
/// use rand::thread_rng;
/// use lsss::{FieldElement, Fr};
///
/// let mut rng = thread_rng();
/// let a = Fr::random(&mut rng);
///
/// let inv = a.invert().expect("non-zero element");
/// assert_eq!(a * inv, Fr::one());
/// assert!((a - a).is_zero());
///
/// let bytes = a.to_repr();
/// let recovered = Fr::from_repr(&bytes).expect("valid repr");
/// assert_eq!(a, recovered);
/// ```
pub trait FieldElement:
    Clone
    + Copy
    + Send
    + Sync
    + Debug
    + PartialEq
    + Eq
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Returns the additive identity (zero) element.
    fn zero() -> Self;

    /// Returns the multiplicative identity (one) element.
    fn one() -> Self;

    /// Returns `true` for the additive identity.
    fn is_zero(&self) -> bool;

    /// Generates a random field element using the provided RNG.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self;

    /// Computes the multiplicative inverse, returning `None` for zero.
    fn invert(&self) -> Option<Self>;

    /// Serializes this field element to its canonical byte representation
    /// (32 bytes for the supported curves).
    fn to_repr(&self) -> Vec<u8>;

    /// Deserializes a field element from its byte representation.
    ///
    /// Returns an error if the representation is invalid (e.g., not reduced modulo the field order).
    fn from_repr(repr: &[u8]) -> Result<Self, BackendError>;

    /// Convert u64 to self.
    fn from_u64(n: u64) -> Self;

    /// Reduces 64 uniformly random bytes modulo the field order.
    fn from_uniform_bytes(bytes: &[u8; 64]) -> Self;
}

/// Hashes `msg` to a field element.
///
/// BLAKE3 runs in key-derivation mode with `context` as the domain separator,
/// and 64 bytes of extended output are reduced into the field with
/// [`FieldElement::from_uniform_bytes`]. The bias of the reduction is below
/// 2^-128 for every supported curve.
pub fn hash_to_field<F: FieldElement>(context: &str, msg: &[u8]) -> F {
    let mut hasher = blake3::Hasher::new_derive_key(context);
    hasher.update(msg);
    let mut wide = [0u8; 64];
    hasher.finalize_xof().fill(&mut wide);
    F::from_uniform_bytes(&wide)
}
