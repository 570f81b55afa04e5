use core::hash::{Hash, Hasher};

use crate::{FieldElement, hash_to_field};

/// Domain separator for deriving attribute identities from names.
pub const ATTRIBUTE_CONTEXT: &str = "lsss 2026-10-14 policy attribute name";

/// A policy attribute, identified by a field element.
///
/// Schemes usually refer to attributes by human-readable names; the field
/// identity is obtained with [`Attribute::from_name`]. Two attributes are the
/// same attribute exactly when their field elements are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attribute<F: FieldElement>(F);

impl<F: FieldElement> Attribute<F> {
    /// Wraps an already derived field element.
    pub fn new(value: F) -> Self {
        Self(value)
    }

    /// Derives the attribute identity of `name`.
    pub fn from_name(name: &str) -> Self {
        Self(hash_to_field(ATTRIBUTE_CONTEXT, name.as_bytes()))
    }

    /// The field element identifying this attribute.
    pub fn value(&self) -> &F {
        &self.0
    }
}

impl<F: FieldElement> From<F> for Attribute<F> {
    fn from(value: F) -> Self {
        Self(value)
    }
}

impl<F: FieldElement> From<&str> for Attribute<F> {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl<F: FieldElement> Hash for Attribute<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.0.to_repr().as_ref());
    }
}
