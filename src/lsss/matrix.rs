use std::collections::HashSet;

use rand_core::RngCore;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::instrument;

use crate::{Attribute, Error, FieldElement, Reconstruction, evaluate};

/// A compiled share-generating matrix `M` together with its row labelling `ρ`.
///
/// Every row has exactly [`column_number`](Self::column_number) entries and
/// `ρ(i)` names the attribute that owns row `i`. The matrix is immutable once
/// built.
///
/// At encryption time a scheme picks a random vector `v` whose first entry is
/// the secret and hands out the shares `λ_i = M_i · v`
/// ([`compute_vector`](Self::compute_vector), [`compute_shares`](Self::compute_shares)).
/// At decryption time [`evaluate`](Self::evaluate) finds weights `w_i` over
/// the requester's rows with `Σ w_i · M_i = (1, 0, …, 0)`, so that
/// `Σ w_i · λ_i` is the secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LsssMatrix<F: FieldElement> {
    rows: Vec<Vec<F>>,
    columns: usize,
    rho: Vec<Attribute<F>>,
}

impl<F: FieldElement> LsssMatrix<F> {
    pub(crate) fn from_parts(rows: Vec<Vec<F>>, columns: usize, rho: Vec<Attribute<F>>) -> Self {
        debug_assert_eq!(rows.len(), rho.len());
        debug_assert!(rows.iter().all(|row| row.len() == columns));
        Self { rows, columns, rho }
    }

    /// Builds a matrix from explicit rows, e.g. one produced by another
    /// compiler.
    ///
    /// Fails if there are no rows, if the rows are empty or of unequal width,
    /// or if `rho` does not label every row exactly once.
    pub fn from_rows(rows: Vec<Vec<F>>, rho: Vec<Attribute<F>>) -> Result<Self, Error> {
        let columns = rows
            .first()
            .map(Vec::len)
            .ok_or_else(|| Error::MalformedTree("matrix needs at least one row".into()))?;
        if columns == 0 {
            return Err(Error::MalformedTree(
                "matrix needs at least one column".into(),
            ));
        }
        if let Some(bad) = rows.iter().find(|row| row.len() != columns) {
            return Err(Error::DimensionMismatch {
                expected: columns,
                actual: bad.len(),
            });
        }
        if rho.len() != rows.len() {
            return Err(Error::DimensionMismatch {
                expected: rows.len(),
                actual: rho.len(),
            });
        }
        Ok(Self::from_parts(rows, columns, rho))
    }

    pub fn row_number(&self) -> usize {
        self.rows.len()
    }

    pub fn column_number(&self) -> usize {
        self.columns
    }

    fn check_row(&self, row: usize) -> Result<(), Error> {
        if row < self.rows.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: row,
                len: self.rows.len(),
            })
        }
    }

    /// The attribute owning `row`.
    pub fn rho(&self, row: usize) -> Result<&Attribute<F>, Error> {
        self.check_row(row)?;
        Ok(&self.rho[row])
    }

    /// Row attributes in row order. Repeated attributes appear once per row.
    pub fn attributes(&self) -> &[Attribute<F>] {
        &self.rho
    }

    pub fn row(&self, row: usize) -> Result<&[F], Error> {
        self.check_row(row)?;
        Ok(&self.rows[row])
    }

    pub(crate) fn rows(&self) -> &[Vec<F>] {
        &self.rows
    }

    /// Inner product `M_row · vector`.
    pub fn compute_vector(&self, row: usize, vector: &[F]) -> Result<F, Error> {
        self.check_row(row)?;
        self.check_width(vector)?;
        Ok(inner_product(&self.rows[row], vector))
    }

    /// All shares `M · vector`, one per row, computed in parallel.
    #[instrument(level = "debug", skip_all, fields(rows = self.rows.len(), columns = self.columns))]
    pub fn compute_shares(&self, vector: &[F]) -> Result<Vec<F>, Error> {
        self.check_width(vector)?;
        Ok(self
            .rows
            .par_iter()
            .map(|row| inner_product(row, vector))
            .collect())
    }

    /// Shares `secret` under this matrix.
    ///
    /// Draws `v = (secret, r_2, …, r_n)` with uniformly random `r_i` and returns
    /// `M · v`.
    pub fn share_secret<R: RngCore + ?Sized>(&self, secret: F, rng: &mut R) -> Vec<F> {
        let mut vector = Vec::with_capacity(self.columns);
        vector.push(secret);
        vector.extend((1..self.columns).map(|_| F::random(rng)));
        self.rows
            .par_iter()
            .map(|row| inner_product(row, &vector))
            .collect()
    }

    /// Indices of the rows whose attribute is in `held`.
    pub fn candidate_rows(&self, held: &HashSet<Attribute<F>>) -> Vec<usize> {
        self.rho
            .iter()
            .enumerate()
            .filter(|(_, attribute)| held.contains(attribute))
            .map(|(row, _)| row)
            .collect()
    }

    /// Finds rows and weights reconstructing the secret from `held`, or `None`
    /// when `held` does not satisfy the policy. See [`evaluate`](crate::evaluate).
    pub fn evaluate(
        &self,
        held: &HashSet<Attribute<F>>,
    ) -> Result<Option<Reconstruction<F>>, Error> {
        evaluate(self, held)
    }

    fn check_width(&self, vector: &[F]) -> Result<(), Error> {
        if vector.len() == self.columns {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.columns,
                actual: vector.len(),
            })
        }
    }
}

pub(crate) fn inner_product<F: FieldElement>(lhs: &[F], rhs: &[F]) -> F {
    lhs.iter()
        .zip(rhs)
        .fold(F::zero(), |acc, (a, b)| acc + *a * *b)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::lsss::test_utils::ints;
    use crate::{AccessTree, Fr, compile};

    fn vandermonde() -> LsssMatrix<Fr> {
        let rows = (1..=4).map(|x| ints(&[1, x])).collect();
        let rho = ["A", "B", "C", "D"]
            .iter()
            .map(|n| Attribute::from_name(n))
            .collect();
        LsssMatrix::from_rows(rows, rho).unwrap()
    }

    #[test]
    fn from_rows_validates_shape() {
        let rho = vec![Attribute::<Fr>::from_name("a"), Attribute::from_name("b")];
        assert!(matches!(
            LsssMatrix::from_rows(vec![ints(&[1, 2]), ints(&[1])], rho.clone()),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(matches!(
            LsssMatrix::from_rows(vec![ints(&[1, 2])], rho.clone()),
            Err(Error::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        ));
        assert!(matches!(
            LsssMatrix::<Fr>::from_rows(Vec::new(), Vec::new()),
            Err(Error::MalformedTree(_))
        ));
        assert!(matches!(
            LsssMatrix::from_rows(vec![Vec::new(), Vec::new()], rho),
            Err(Error::MalformedTree(_))
        ));
    }

    #[test]
    fn compute_vector_is_inner_product() {
        let matrix = vandermonde();
        let v = ints(&[5, 7]);
        assert_eq!(matrix.compute_vector(2, &v).unwrap(), Fr::from_u64(26));
        assert_eq!(
            matrix.compute_shares(&v).unwrap(),
            ints(&[12, 19, 26, 33])
        );
    }

    #[test]
    fn compute_vector_rejects_bad_input() {
        let matrix = vandermonde();
        assert!(matches!(
            matrix.compute_vector(4, &ints(&[1, 1])),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        ));
        assert!(matches!(
            matrix.compute_vector(0, &ints(&[1])),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(matches!(
            matrix.compute_shares(&ints(&[1, 2, 3])),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(matches!(matrix.rho(9), Err(Error::IndexOutOfRange { .. })));
    }

    #[test]
    fn candidate_rows_include_duplicates() {
        let tree = AccessTree::<Fr>::or([
            AccessTree::and([AccessTree::leaf("a"), AccessTree::leaf("b")]).unwrap(),
            AccessTree::leaf("a"),
        ])
        .unwrap();
        let matrix = compile(&tree);
        let held: HashSet<_> = [Attribute::from_name("a")].into_iter().collect();
        assert_eq!(matrix.candidate_rows(&held), vec![0, 2]);
    }

    #[test]
    fn shares_start_from_the_secret() {
        let mut rng = StdRng::seed_from_u64(5);
        let matrix = compile(&AccessTree::<Fr>::leaf("a"));
        let secret = Fr::random(&mut rng);
        assert_eq!(matrix.share_secret(secret, &mut rng), vec![secret]);
    }
}
