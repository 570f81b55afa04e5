//! Serde serialization support for policy types.
//!
//! # Serialization Strategy
//!
//! - **Attributes**: the canonical bytes of the field element via `to_repr()`
//! - **Access trees**: externally tagged enum (`{"and": [left, right]}`, `{"leaf": bytes}`)
//! - **Matrices**: `columns`, `rows` (one byte string per entry) and `rho`;
//!   decoding re-validates the shape through [`LsssMatrix::from_rows`]
//!
//! Field bytes are backend specific, so data encoded under one
//! [`BackendConfig`](crate::BackendConfig) only decodes under the same one.
//!
//! # Example
//!
//! ```rust
//! use lsss::{Fr, LsssMatrix, compile, parse_policy};
//!
//! let matrix = compile(&parse_policy::<Fr>("a and (b or c)")?);
//! let json = serde_json::to_string(&matrix).unwrap();
//! let decoded: LsssMatrix<Fr> = serde_json::from_str(&json).unwrap();
//! assert_eq!(decoded, matrix);
//! # Ok::<(), lsss::Error>(())
//! ```

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Attribute, FieldElement, LsssMatrix};

fn field_from_bytes<F, E>(bytes: &[u8]) -> Result<F, E>
where
    F: FieldElement,
    E: de::Error,
{
    F::from_repr(bytes).map_err(E::custom)
}

impl<F: FieldElement> Serialize for Attribute<F> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value().to_repr().serialize(serializer)
    }
}

impl<'de, F: FieldElement> Deserialize<'de> for Attribute<F> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        field_from_bytes::<F, D::Error>(&bytes).map(Attribute::new)
    }
}

impl<F: FieldElement> Serialize for LsssMatrix<F> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let rows: Vec<Vec<Vec<u8>>> = self
            .rows()
            .iter()
            .map(|row| row.iter().map(FieldElement::to_repr).collect())
            .collect();
        let mut state = serializer.serialize_struct("LsssMatrix", 3)?;
        state.serialize_field("columns", &self.column_number())?;
        state.serialize_field("rows", &rows)?;
        state.serialize_field("rho", self.attributes())?;
        state.end()
    }
}

impl<'de, F: FieldElement> Deserialize<'de> for LsssMatrix<F> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(bound = "")]
        struct LsssMatrixHelper<F: FieldElement> {
            columns: usize,
            rows: Vec<Vec<Vec<u8>>>,
            rho: Vec<Attribute<F>>,
        }

        let helper = LsssMatrixHelper::<F>::deserialize(deserializer)?;
        let rows = helper
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|bytes| field_from_bytes::<F, D::Error>(bytes))
                    .collect::<Result<Vec<F>, D::Error>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let matrix = LsssMatrix::from_rows(rows, helper.rho).map_err(de::Error::custom)?;
        if matrix.column_number() != helper.columns {
            return Err(de::Error::custom(format!(
                "declared {} columns but rows have {}",
                helper.columns,
                matrix.column_number()
            )));
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AccessTree, Fr, compile, parse_policy};

    #[test]
    fn attribute_roundtrip() {
        let attribute = Attribute::<Fr>::from_name("clearance:secret");
        let json = serde_json::to_string(&attribute).unwrap();
        let decoded: Attribute<Fr> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, attribute);
    }

    #[test]
    fn tree_roundtrip() {
        let tree = parse_policy::<Fr>("a and (b or c)").unwrap();
        let json = serde_json::to_string(&tree).unwrap();
        assert!(json.starts_with("{\"and\":"));
        let decoded: AccessTree<Fr> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, tree);
    }

    #[test]
    fn matrix_roundtrip() {
        let matrix = compile(&parse_policy::<Fr>("(a and b) or (c and d)").unwrap());
        let json = serde_json::to_string(&matrix).unwrap();
        let decoded: LsssMatrix<Fr> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, matrix);
    }

    #[test]
    fn malformed_matrices_are_rejected() {
        let matrix = compile(&parse_policy::<Fr>("a and b").unwrap());
        let mut value = serde_json::to_value(&matrix).unwrap();

        let mut wrong_columns = value.clone();
        wrong_columns["columns"] = serde_json::json!(3);
        assert!(serde_json::from_value::<LsssMatrix<Fr>>(wrong_columns).is_err());

        let mut ragged = value.clone();
        ragged["rows"][1].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<LsssMatrix<Fr>>(ragged).is_err());

        value["rho"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<LsssMatrix<Fr>>(value).is_err());
    }

    #[test]
    fn invalid_field_bytes_are_rejected() {
        let json = serde_json::to_string(&vec![0xffu8; 32]).unwrap();
        assert!(serde_json::from_str::<Attribute<Fr>>(&json).is_err());
    }
}
