//! Exact linear solver over the scalar field.
//!
//! Given row vectors `x_1 … x_m` of width `n`, [`solve`] looks for weights with
//! `Σ w_j · x_j = e1 = (1, 0, …, 0)`. The vectors become the columns of an
//! augmented `n × (m + 1)` system whose last column is `e1`, which is reduced
//! to row echelon form by Gaussian elimination with first-nonzero pivoting.
//!
//! Columns without a pivot are free variables and are fixed to zero, so an
//! underdetermined system yields one particular solution. Every candidate is
//! checked against `e1` before it is returned and zero weights are dropped.

use tracing::{debug, instrument, trace};

use crate::{BackendError, Error, FieldElement};

/// Weights over a subset of the solver's input vectors.
///
/// `indices[k]` is a position in the input slice and `weights[k]` its nonzero
/// weight; indices are strictly increasing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combination<F: FieldElement> {
    indices: Vec<usize>,
    weights: Vec<F>,
}

impl<F: FieldElement> Combination<F> {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn weights(&self) -> &[F] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &F)> + '_ {
        self.indices.iter().copied().zip(self.weights.iter())
    }

    pub(crate) fn into_parts(self) -> (Vec<usize>, Vec<F>) {
        (self.indices, self.weights)
    }
}

/// Solves `Σ w_j · vectors[j] = (1, 0, …, 0)` over width `width`.
///
/// Returns `Ok(None)` when no combination exists, including for an empty input
/// or zero width. Fails only if some vector is not `width` entries long.
///
/// ```rust
/// use lsss::{FieldElement, Fr, solve};
///
/// let one = Fr::one();
/// let two = Fr::from_u64(2);
/// let vectors = vec![vec![one, one], vec![one, two]];
/// let combination = solve(&vectors, 2)?.expect("independent rows");
/// assert_eq!(combination.weights(), &[two, -one][..]);
/// # Ok::<(), lsss::Error>(())
/// ```
#[instrument(level = "debug", skip_all, fields(vectors = vectors.len(), width = width))]
pub fn solve<F, V>(vectors: &[V], width: usize) -> Result<Option<Combination<F>>, Error>
where
    F: FieldElement,
    V: AsRef<[F]>,
{
    if let Some(bad) = vectors.iter().find(|v| v.as_ref().len() != width) {
        return Err(Error::DimensionMismatch {
            expected: width,
            actual: bad.as_ref().len(),
        });
    }
    if vectors.is_empty() || width == 0 {
        return Ok(None);
    }

    let m = vectors.len();
    let weights = match eliminate(vectors, width)? {
        Some(weights) => weights,
        None => return Ok(None),
    };

    if !reaches_target(vectors, &weights, width) {
        debug!("back-substituted weights do not reconstruct the target");
        return Ok(None);
    }

    let (indices, weights): (Vec<usize>, Vec<F>) = (0..m)
        .zip(weights)
        .filter(|(_, w)| !w.is_zero())
        .unzip();
    if indices.is_empty() {
        debug!("all weights vanished");
        return Ok(None);
    }
    Ok(Some(Combination { indices, weights }))
}

/// Row reduction followed by back-substitution. Returns one weight per input
/// vector, or `None` if the system is inconsistent.
fn eliminate<F, V>(vectors: &[V], width: usize) -> Result<Option<Vec<F>>, Error>
where
    F: FieldElement,
    V: AsRef<[F]>,
{
    let m = vectors.len();
    let n = width;

    let mut system: Vec<Vec<F>> = (0..n)
        .map(|i| {
            let mut row: Vec<F> = vectors.iter().map(|v| v.as_ref()[i]).collect();
            row.push(if i == 0 { F::one() } else { F::zero() });
            row
        })
        .collect();

    // pivot_columns[r] is the column whose pivot sits in row r.
    let mut pivot_columns: Vec<usize> = Vec::with_capacity(n.min(m));
    for col in 0..m {
        let row = pivot_columns.len();
        if row == n {
            break;
        }
        let Some(found) = (row..n).find(|&r| !system[r][col].is_zero()) else {
            trace!(col, "no pivot, free variable");
            continue;
        };
        system.swap(row, found);

        let inverse = system[row][col]
            .invert()
            .ok_or(BackendError::Math("nonzero pivot without inverse"))?;
        let (upper, lower) = system.split_at_mut(row + 1);
        let pivot_row = &upper[row];
        for target in lower.iter_mut() {
            let factor = target[col] * inverse;
            if factor.is_zero() {
                continue;
            }
            for (entry, pivot_entry) in target[col..].iter_mut().zip(&pivot_row[col..]) {
                *entry -= factor * *pivot_entry;
            }
        }
        pivot_columns.push(col);
    }

    let inconsistent = system
        .iter()
        .any(|row| row[..m].iter().all(F::is_zero) && !row[m].is_zero());
    if inconsistent {
        debug!(pivots = pivot_columns.len(), "inconsistent system");
        return Ok(None);
    }

    let mut weights = vec![F::zero(); m];
    for (row, &col) in pivot_columns.iter().enumerate().rev() {
        let equation = &system[row];
        let mut value = equation[m];
        for later in (col + 1)..m {
            value -= equation[later] * weights[later];
        }
        let inverse = equation[col]
            .invert()
            .ok_or(BackendError::Math("nonzero pivot without inverse"))?;
        weights[col] = value * inverse;
    }
    Ok(Some(weights))
}

fn reaches_target<F, V>(vectors: &[V], weights: &[F], width: usize) -> bool
where
    F: FieldElement,
    V: AsRef<[F]>,
{
    (0..width).all(|i| {
        let sum = vectors
            .iter()
            .zip(weights)
            .fold(F::zero(), |acc, (v, w)| acc + *w * v.as_ref()[i]);
        if i == 0 { sum == F::one() } else { sum.is_zero() }
    })
}
