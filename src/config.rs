//! Configuration types for the access-structure engine.
//!
//! Two concerns are configurable: which scalar-field backend the crate was
//! built against ([`BackendConfig`]), and how large a policy the text parser
//! accepts before rejecting it ([`PolicyLimits`]).
//!
//! # Example
//!
//! ```rust
//! use lsss::{BackendConfig, PolicyLimits};
//!
//! let backend = BackendConfig::active();
//! backend.ensure_supported().expect("compiled-in backend");
//!
//! let limits = PolicyLimits { max_depth: 16, max_leaves: 128 };
//! limits.validate().expect("valid limits");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{BackendError, Error};

/// Supported pairing-friendly elliptic curves.
///
/// - **BLS12-381**: ~128-bit security. Supported by both Arkworks and blstrs.
/// - **BN254**: ~100-bit security. Supported only by Arkworks.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CurveId {
    /// BN254 curve (~100-bit security)
    Bn254,
    /// BLS12-381 curve (~128-bit security, recommended)
    Bls12_381,
}

/// Scalar-field backend implementations.
///
/// Backend support is controlled via Cargo features:
/// - `ark_bls12381`: Arkworks with BLS12-381
/// - `ark_bn254`: Arkworks with BN254
/// - `blst` (default): blstrs with BLS12-381
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BackendId {
    /// Arkworks backend (pure Rust, supports BLS12-381 and BN254)
    Arkworks,
    /// blstrs backend (optimized assembly, BLS12-381 only)
    Blst,
}

/// Backend and curve configuration.
///
/// Matrices and attributes serialized under one configuration only decode
/// under the same one, so callers persisting policies should store this next
/// to them and check it with [`ensure_supported`](BackendConfig::ensure_supported)
/// on load.
///
/// | Backend    | BLS12-381 | BN254 |
/// |------------|-----------|-------|
/// | Arkworks   | ✓         | ✓     |
/// | blst       | ✓         | ✗     |
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// The scalar-field backend
    pub backend: BackendId,
    /// The pairing-friendly curve
    pub curve: CurveId,
}

impl BackendConfig {
    /// Creates a new backend configuration.
    pub fn new(backend: BackendId, curve: CurveId) -> Self {
        Self { backend, curve }
    }

    /// The configuration matching the backend feature this crate was built with.
    pub fn active() -> Self {
        if cfg!(feature = "ark_bn254") {
            Self::new(BackendId::Arkworks, CurveId::Bn254)
        } else if cfg!(feature = "ark_bls12381") {
            Self::new(BackendId::Arkworks, CurveId::Bls12_381)
        } else {
            Self::new(BackendId::Blst, CurveId::Bls12_381)
        }
    }

    /// Validates that this backend/curve combination is supported.
    ///
    /// This checks both that the combination is valid (e.g., blst only supports
    /// BLS12-381) and that the required feature flag is enabled at compile time.
    ///
    /// ```rust
    /// use lsss::{BackendConfig, BackendId, CurveId};
    ///
    /// let config = BackendConfig::new(BackendId::Blst, CurveId::Bn254);
    /// assert!(config.ensure_supported().is_err());
    /// ```
    pub fn ensure_supported(&self) -> Result<(), BackendError> {
        match (self.backend, self.curve) {
            (BackendId::Arkworks, CurveId::Bls12_381) => {
                if cfg!(feature = "ark_bls12381") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with `ark_bls12381` feature to use Arkworks BLS12-381",
                    ))
                }
            }
            (BackendId::Arkworks, CurveId::Bn254) => {
                if cfg!(feature = "ark_bn254") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with `ark_bn254` feature to use Arkworks BN254",
                    ))
                }
            }
            (BackendId::Blst, CurveId::Bls12_381) => {
                if cfg!(feature = "blst") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with `blst` feature to use the blstrs backend",
                    ))
                }
            }
            (BackendId::Blst, CurveId::Bn254) => Err(BackendError::UnsupportedCurve(
                "bn254 is not supported by the blstrs backend",
            )),
        }
    }
}

/// Bounds applied when parsing a textual policy.
///
/// The parser recurses once per parenthesis level, so `max_depth` bounds its
/// stack usage. `max_leaves` bounds the number of matrix rows (and, through AND gates,
/// columns) a single policy can produce.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PolicyLimits {
    /// Maximum parenthesis nesting depth
    pub max_depth: usize,
    /// Maximum number of attribute occurrences
    pub max_leaves: usize,
}

impl Default for PolicyLimits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_leaves: 1024,
        }
    }
}

impl PolicyLimits {
    /// Validates the limits.
    ///
    /// Both bounds must admit at least a single-attribute policy.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig(
                "max_depth must allow at least one level".into(),
            ));
        }
        if self.max_leaves == 0 {
            return Err(Error::InvalidConfig(
                "max_leaves must allow at least one attribute".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_backend_is_supported() {
        BackendConfig::active()
            .ensure_supported()
            .expect("active backend");
    }

    #[test]
    fn blst_rejects_bn254() {
        let config = BackendConfig::new(BackendId::Blst, CurveId::Bn254);
        assert!(matches!(
            config.ensure_supported(),
            Err(BackendError::UnsupportedCurve(_))
        ));
    }

    #[test]
    fn limits_validation() {
        assert!(PolicyLimits::default().validate().is_ok());
        let zero_depth = PolicyLimits {
            max_depth: 0,
            ..PolicyLimits::default()
        };
        assert!(matches!(zero_depth.validate(), Err(Error::InvalidConfig(_))));
        let zero_leaves = PolicyLimits {
            max_leaves: 0,
            ..PolicyLimits::default()
        };
        assert!(matches!(zero_leaves.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn limits_serde_roundtrip() {
        let limits = PolicyLimits {
            max_depth: 8,
            max_leaves: 32,
        };
        let json = serde_json::to_string(&limits).expect("serialize");
        let decoded: PolicyLimits = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, limits);
    }
}
