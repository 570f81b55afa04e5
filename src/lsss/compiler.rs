//! Monotone formula to LSSS matrix compilation (Lewko–Waters).
//!
//! Share vectors travel on the walk's work stack instead of being stored on
//! tree nodes, so the tree is only borrowed.
//!
//! Starting from `[1]` at the root with a column counter `c = 1`:
//!
//! - an OR node hands its vector unchanged to both children;
//! - an AND node pads its vector to `c` entries and hands `(v, -1)` to the
//!   left child and `(v, +1)` to the right child, then bumps `c`;
//! - a leaf emits its vector as the next matrix row.
//!
//! Rows emitted before later AND gates are shorter and get zero-padded to the
//! final `c` at the end. The two children of an AND node therefore differ only
//! in the sign of the gate's own column: either child alone is blocked by it,
//! while their sum is twice the parent's vector with a zero in that column.

use tracing::instrument;

use crate::{AccessTree, Attribute, FieldElement, LsssMatrix};

/// A share vector under construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareVector<F: FieldElement>(Vec<F>);

impl<F: FieldElement> ShareVector<F> {
    /// The vector assigned to the root of a policy, `[1]`.
    pub fn root() -> Self {
        Self(vec![F::one()])
    }

    /// Appends zeros until the vector has `len` entries. No-op if already at
    /// least that long.
    pub fn pad_to(&mut self, len: usize) {
        if self.0.len() < len {
            self.0.resize(len, F::zero());
        }
    }

    /// A copy padded to `len` entries with `last` appended.
    fn extended(&self, len: usize, last: F) -> Self {
        let mut next = self.clone();
        next.pad_to(len);
        next.0.push(last);
        next
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[F] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<F> {
        self.0
    }
}

struct Compiler<F: FieldElement> {
    columns: usize,
    rows: Vec<ShareVector<F>>,
    rho: Vec<Attribute<F>>,
}

impl<F: FieldElement> Compiler<F> {
    /// Depth-first, left child first. The pending stack stands in for
    /// recursion so chain length is not limited by the thread stack.
    fn walk(&mut self, root: &AccessTree<F>) {
        let mut pending = vec![(root, ShareVector::root())];
        while let Some((node, vector)) = pending.pop() {
            match node {
                AccessTree::Leaf(attribute) => {
                    self.rows.push(vector);
                    self.rho.push(*attribute);
                }
                AccessTree::Or(left, right) => {
                    pending.push((&**right, vector.clone()));
                    pending.push((&**left, vector));
                }
                AccessTree::And(left, right) => {
                    let left_vector = vector.extended(self.columns, -F::one());
                    let right_vector = vector.extended(self.columns, F::one());
                    self.columns += 1;
                    pending.push((&**right, right_vector));
                    pending.push((&**left, left_vector));
                }
            }
        }
    }
}

/// Compiles `tree` into its share-generating matrix.
///
/// Row `i` belongs to the `i`-th leaf in depth-first, left-to-right order. The
/// matrix has `tree.and_gate_count() + 1` columns.
///
/// ```rust
/// use lsss::{AccessTree, FieldElement, Fr, compile};
///
/// let tree = AccessTree::<Fr>::and([AccessTree::leaf("a"), AccessTree::leaf("b")])?;
/// let matrix = compile(&tree);
/// assert_eq!(matrix.row(0)?, &[Fr::one(), -Fr::one()][..]);
/// assert_eq!(matrix.row(1)?, &[Fr::one(), Fr::one()][..]);
/// # Ok::<(), lsss::Error>(())
/// ```
#[instrument(level = "debug", skip_all, fields(leaves = tree.leaf_count(), and_gates = tree.and_gate_count()))]
pub fn compile<F: FieldElement>(tree: &AccessTree<F>) -> LsssMatrix<F> {
    let leaves = tree.leaf_count();
    let mut compiler = Compiler {
        columns: 1,
        rows: Vec::with_capacity(leaves),
        rho: Vec::with_capacity(leaves),
    };
    compiler.walk(tree);

    let columns = compiler.columns;
    let rows = compiler
        .rows
        .into_iter()
        .map(|mut row| {
            row.pad_to(columns);
            row.into_inner()
        })
        .collect();
    LsssMatrix::from_parts(rows, columns, compiler.rho)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::Fr;
    use crate::lsss::test_utils::{ints, random_tree};

    fn leaf(name: &str) -> AccessTree<Fr> {
        AccessTree::leaf(name)
    }

    #[test]
    fn pad_to_only_grows() {
        let mut vector = ShareVector::<Fr>::root();
        vector.pad_to(3);
        assert_eq!(vector.as_slice(), ints(&[1, 0, 0]).as_slice());
        vector.pad_to(2);
        assert_eq!(vector.len(), 3);
    }

    #[test]
    fn single_leaf_is_unit_matrix() {
        let matrix = compile(&leaf("a"));
        assert_eq!(matrix.row_number(), 1);
        assert_eq!(matrix.column_number(), 1);
        assert_eq!(matrix.row(0).unwrap(), ints(&[1]).as_slice());
        assert_eq!(*matrix.rho(0).unwrap(), Attribute::from_name("a"));
    }

    #[test]
    fn or_copies_parent_vector() {
        let matrix = compile(&AccessTree::or([leaf("a"), leaf("b")]).unwrap());
        assert_eq!(matrix.column_number(), 1);
        assert_eq!(matrix.row(0).unwrap(), ints(&[1]).as_slice());
        assert_eq!(matrix.row(1).unwrap(), ints(&[1]).as_slice());
    }

    #[test]
    fn nested_gates_pad_early_rows() {
        // (a and b) and (c or d)
        let tree = AccessTree::and([
            AccessTree::and([leaf("a"), leaf("b")]).unwrap(),
            AccessTree::or([leaf("c"), leaf("d")]).unwrap(),
        ])
        .unwrap();
        let matrix = compile(&tree);
        assert_eq!(matrix.column_number(), 3);
        assert_eq!(matrix.row(0).unwrap(), ints(&[1, -1, -1]).as_slice());
        assert_eq!(matrix.row(1).unwrap(), ints(&[1, -1, 1]).as_slice());
        assert_eq!(matrix.row(2).unwrap(), ints(&[1, 1, 0]).as_slice());
        assert_eq!(matrix.row(3).unwrap(), ints(&[1, 1, 0]).as_slice());
        let expected: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|n| Attribute::from_name(n))
            .collect();
        assert_eq!(matrix.attributes(), expected.as_slice());
    }

    #[test]
    fn and_children_cancel_in_gate_column() {
        let matrix = compile(&AccessTree::and([leaf("a"), leaf("b")]).unwrap());
        let sum: Vec<Fr> = matrix
            .row(0)
            .unwrap()
            .iter()
            .zip(matrix.row(1).unwrap())
            .map(|(x, y)| *x + *y)
            .collect();
        assert_eq!(sum, ints(&[2, 0]));
    }

    #[test]
    fn dimensions_follow_tree_shape() {
        let mut rng = StdRng::seed_from_u64(2024);
        let names = ["a", "b", "c", "d", "e"];
        for _ in 0..50 {
            let tree = random_tree(&mut rng, &names, 5);
            let matrix = compile(&tree);
            assert_eq!(matrix.row_number(), tree.leaf_count());
            assert_eq!(matrix.column_number(), tree.and_gate_count() + 1);
            assert_eq!(matrix.attributes(), tree.attributes().as_slice());
        }
    }

    #[test]
    fn long_or_chain_compiles_and_evaluates() {
        let tree = AccessTree::or((0..10_000u64).map(|i| AccessTree::leaf(Fr::from_u64(i)))).unwrap();
        let matrix = compile(&tree);
        assert_eq!(matrix.row_number(), 10_000);
        assert_eq!(matrix.column_number(), 1);

        let held: std::collections::HashSet<_> =
            [Attribute::new(Fr::from_u64(9_876))].into_iter().collect();
        let reconstruction = matrix.evaluate(&held).unwrap().unwrap();
        assert_eq!(reconstruction.rows(), &[9_876]);
        assert_eq!(reconstruction.weights(), &[Fr::one()]);
    }

    #[test]
    fn compilation_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(99);
        let names = ["a", "b", "c"];
        for _ in 0..20 {
            let tree = random_tree(&mut rng, &names, 4);
            assert_eq!(compile(&tree), compile(&tree.copy()));
        }
    }

    #[test]
    fn concurrent_compilation_of_shared_tree() {
        let tree = AccessTree::and([
            leaf("a"),
            AccessTree::or([leaf("b"), leaf("c")]).unwrap(),
        ])
        .unwrap();
        let reference = compile(&tree);
        let matrices: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| compile(&tree))).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for matrix in matrices {
            assert_eq!(matrix, reference);
        }
    }
}
