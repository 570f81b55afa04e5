use ark_bn254::Fr as ArkFr;
use ark_ff::{Field, One, PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::UniformRand;
use rand_core::RngCore;

use crate::{BackendError, FieldElement};

pub type Fr = ArkFr;

impl FieldElement for Fr {
    fn zero() -> Self {
        Zero::zero()
    }

    fn one() -> Self {
        One::one()
    }

    fn is_zero(&self) -> bool {
        Zero::is_zero(self)
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Fr::rand(rng)
    }

    fn invert(&self) -> Option<Self> {
        self.inverse()
    }

    fn to_repr(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.compressed_size());
        self.serialize_compressed(&mut bytes)
            .expect("scalar serialization");
        bytes
    }

    fn from_repr(repr: &[u8]) -> Result<Self, BackendError> {
        if repr.len() != Fr::default().compressed_size() {
            return Err(BackendError::Serialization("invalid scalar length"));
        }
        Self::deserialize_compressed(repr)
            .map_err(|_| BackendError::Serialization("invalid scalar bytes"))
    }

    fn from_u64(n: u64) -> Self {
        Fr::from(n)
    }

    fn from_uniform_bytes(bytes: &[u8; 64]) -> Self {
        Fr::from_le_bytes_mod_order(bytes)
    }
}
