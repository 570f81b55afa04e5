use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::{Attribute, Error, FieldElement, LsssMatrix, solve};

/// Rows of a matrix and the weights that combine them into `(1, 0, …, 0)`.
///
/// `rows()` are indices into the evaluated [`LsssMatrix`] in increasing order
/// and every weight is nonzero. A decryptor raises the ciphertext component of
/// `rows()[k]` to `weights()[k]` and multiplies the results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconstruction<F: FieldElement> {
    rows: Vec<usize>,
    weights: Vec<F>,
}

impl<F: FieldElement> Reconstruction<F> {
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn weights(&self) -> &[F] {
        &self.weights
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &F)> + '_ {
        self.rows.iter().copied().zip(self.weights.iter())
    }

    /// `Σ w_k · shares[rows[k]]`: recovers the secret from the full share
    /// list produced by [`LsssMatrix::share_secret`] or
    /// [`LsssMatrix::compute_shares`].
    pub fn combine(&self, shares: &[F]) -> Result<F, Error> {
        self.iter().try_fold(F::zero(), |acc, (row, weight)| {
            let share = shares.get(row).ok_or(Error::IndexOutOfRange {
                index: row,
                len: shares.len(),
            })?;
            Ok(acc + *weight * *share)
        })
    }
}

/// Decides whether `held` satisfies the policy compiled into `matrix`.
///
/// Returns `Ok(Some(_))` with the rows to combine and their weights, or
/// `Ok(None)` if the attributes are insufficient. Every row whose attribute is
/// held is a candidate, including repeated attributes.
///
/// ```rust
/// use std::collections::HashSet;
/// use lsss::{Attribute, Fr, compile, evaluate, parse_policy};
///
/// let matrix = compile(&parse_policy::<Fr>("a and (b or c)")?);
/// let held: HashSet<_> = ["a", "c"].into_iter().map(Attribute::from_name).collect();
/// let reconstruction = evaluate(&matrix, &held)?.expect("policy satisfied");
/// assert_eq!(reconstruction.rows(), &[0, 2]);
///
/// let held: HashSet<_> = ["b", "c"].into_iter().map(Attribute::from_name).collect();
/// assert!(evaluate(&matrix, &held)?.is_none());
/// # Ok::<(), lsss::Error>(())
/// ```
#[instrument(level = "debug", skip_all, fields(rows = matrix.row_number(), held = held.len()))]
pub fn evaluate<F: FieldElement>(
    matrix: &LsssMatrix<F>,
    held: &HashSet<Attribute<F>>,
) -> Result<Option<Reconstruction<F>>, Error> {
    let candidates = matrix.candidate_rows(held);
    if candidates.is_empty() {
        debug!("no row belongs to a held attribute");
        return Ok(None);
    }

    let rows = matrix.rows();
    let vectors: Vec<&[F]> = candidates.iter().map(|&r| rows[r].as_slice()).collect();
    let Some(combination) = solve(&vectors, matrix.column_number())? else {
        return Ok(None);
    };

    let (indices, weights) = combination.into_parts();
    let rows = indices.into_iter().map(|k| candidates[k]).collect();
    Ok(Some(Reconstruction { rows, weights }))
}
