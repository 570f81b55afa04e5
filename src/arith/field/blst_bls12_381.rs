//! blstrs-backed scalar field for BLS12-381.
//!
//! Compiled when the Cargo feature `blst` is enabled.

use blstrs::Scalar;
use ff::{Field, FromUniformBytes};
use rand_core::RngCore;

use crate::{BackendError, FieldElement};

pub type Fr = Scalar;

impl FieldElement for Scalar {
    fn zero() -> Self {
        Scalar::ZERO
    }

    fn one() -> Self {
        Scalar::ONE
    }

    fn is_zero(&self) -> bool {
        bool::from(Field::is_zero(self))
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        <Scalar as Field>::random(rng)
    }

    fn invert(&self) -> Option<Self> {
        Field::invert(self).into()
    }

    fn to_repr(&self) -> Vec<u8> {
        self.to_bytes_be().to_vec()
    }

    fn from_repr(repr: &[u8]) -> Result<Self, BackendError> {
        let mut bytes = [0u8; 32];
        if repr.len() != 32 {
            return Err(BackendError::Serialization("invalid scalar length"));
        }
        bytes.copy_from_slice(repr);
        Option::<Scalar>::from(Scalar::from_bytes_be(&bytes))
            .ok_or(BackendError::Serialization("invalid scalar bytes"))
    }

    fn from_u64(n: u64) -> Self {
        Scalar::from(n)
    }

    fn from_uniform_bytes(bytes: &[u8; 64]) -> Self {
        <Scalar as FromUniformBytes<64>>::from_uniform_bytes(bytes)
    }
}
