use std::collections::HashSet;
use std::mem;

use serde::{Deserialize, Serialize};

use crate::{Attribute, Error, FieldElement};

/// A monotone Boolean formula over attributes.
///
/// Every internal node is binary and owns its children, so a tree can never
/// share a subtree with itself or with another tree. The tree carries no
/// compilation state, which makes compiling the same tree repeatedly or from
/// several threads safe.
///
/// Long `and`/`or` chains fold into trees as deep as they are long. Traversals,
/// `Clone`, `PartialEq` and `Drop` use an explicit stack so depth is bounded
/// by memory only. `Debug` and serde still recurse per level.
///
/// ```rust
/// use lsss::{AccessTree, Fr};
///
/// let tree = AccessTree::<Fr>::or([
///     AccessTree::leaf("admin"),
///     AccessTree::and([AccessTree::leaf("staff"), AccessTree::leaf("on-call")])?,
/// ])?;
/// assert_eq!(tree.leaf_count(), 3);
/// assert_eq!(tree.and_gate_count(), 1);
/// # Ok::<(), lsss::Error>(())
/// ```
#[derive(Debug, Eq, Serialize, Deserialize)]
#[serde(bound = "", rename_all = "snake_case")]
pub enum AccessTree<F: FieldElement> {
    Leaf(Attribute<F>),
    And(Box<AccessTree<F>>, Box<AccessTree<F>>),
    Or(Box<AccessTree<F>>, Box<AccessTree<F>>),
}

impl<F: FieldElement> AccessTree<F> {
    pub fn leaf(attribute: impl Into<Attribute<F>>) -> Self {
        Self::Leaf(attribute.into())
    }

    /// Conjunction of `children`, folded left-associatively into binary nodes.
    ///
    /// A single child is returned as is. Zero children is an error.
    pub fn and<I: IntoIterator<Item = Self>>(children: I) -> Result<Self, Error> {
        Self::fold(children, Self::And, "and")
    }

    /// Disjunction of `children`, folded left-associatively into binary nodes.
    ///
    /// A single child is returned as is. Zero children is an error.
    pub fn or<I: IntoIterator<Item = Self>>(children: I) -> Result<Self, Error> {
        Self::fold(children, Self::Or, "or")
    }

    fn fold<I: IntoIterator<Item = Self>>(
        children: I,
        join: fn(Box<Self>, Box<Self>) -> Self,
        gate: &str,
    ) -> Result<Self, Error> {
        let mut children = children.into_iter();
        let first = children
            .next()
            .ok_or_else(|| Error::MalformedTree(format!("`{gate}` gate needs at least one child")))?;
        Ok(children.fold(first, |acc, next| join(Box::new(acc), Box::new(next))))
    }

    /// Deep copy of the tree.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Nodes in depth-first, left-to-right preorder.
    fn preorder(&self) -> impl Iterator<Item = &Self> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let Self::And(left, right) | Self::Or(left, right) = node {
                stack.push(right);
                stack.push(left);
            }
            Some(node)
        })
    }

    /// Evaluates the formula directly against `held`.
    pub fn is_satisfied_by(&self, held: &HashSet<Attribute<F>>) -> bool {
        let mut values = Vec::new();
        self.postorder(|node| {
            let value = match node {
                Self::Leaf(attribute) => held.contains(attribute),
                Self::And(..) | Self::Or(..) => {
                    let right = values.pop().unwrap_or_default();
                    let left = values.pop().unwrap_or_default();
                    if matches!(node, Self::And(..)) {
                        left && right
                    } else {
                        left || right
                    }
                }
            };
            values.push(value);
        });
        values.pop().unwrap_or_default()
    }

    /// Calls `visit` on every node after both of its children.
    fn postorder<'a>(&'a self, mut visit: impl FnMut(&'a Self)) {
        let mut stack = vec![(self, false)];
        while let Some((node, expanded)) = stack.pop() {
            match node {
                Self::And(left, right) | Self::Or(left, right) if !expanded => {
                    stack.push((node, true));
                    stack.push((&**right, false));
                    stack.push((&**left, false));
                }
                _ => visit(node),
            }
        }
    }

    /// Number of leaves, i.e. rows of the compiled matrix.
    pub fn leaf_count(&self) -> usize {
        self.preorder()
            .filter(|node| matches!(node, Self::Leaf(_)))
            .count()
    }

    /// Number of AND gates; the compiled matrix has one more column than this.
    pub fn and_gate_count(&self) -> usize {
        self.preorder()
            .filter(|node| matches!(node, Self::And(..)))
            .count()
    }

    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            if let Self::And(left, right) | Self::Or(left, right) = node {
                stack.push((&**right, level + 1));
                stack.push((&**left, level + 1));
            }
        }
        deepest
    }

    /// Leaf attributes in depth-first, left-to-right order.
    pub fn attributes(&self) -> Vec<Attribute<F>> {
        self.preorder()
            .filter_map(|node| match node {
                Self::Leaf(attribute) => Some(*attribute),
                _ => None,
            })
            .collect()
    }

    /// Moves both children out, leaving leaves behind.
    fn take_children(&mut self, out: &mut Vec<Self>) {
        if let Self::And(left, right) | Self::Or(left, right) = self {
            out.push(mem::replace(left.as_mut(), Self::placeholder()));
            out.push(mem::replace(right.as_mut(), Self::placeholder()));
        }
    }

    fn placeholder() -> Self {
        Self::Leaf(Attribute::new(F::zero()))
    }
}

impl<F: FieldElement> Clone for AccessTree<F> {
    fn clone(&self) -> Self {
        let mut built: Vec<Self> = Vec::new();
        self.postorder(|node| {
            let copy = match node {
                Self::Leaf(attribute) => Self::Leaf(*attribute),
                Self::And(..) | Self::Or(..) => {
                    let right = Box::new(built.pop().unwrap_or_else(Self::placeholder));
                    let left = Box::new(built.pop().unwrap_or_else(Self::placeholder));
                    if matches!(node, Self::And(..)) {
                        Self::And(left, right)
                    } else {
                        Self::Or(left, right)
                    }
                }
            };
            built.push(copy);
        });
        built.pop().unwrap_or_else(Self::placeholder)
    }
}

impl<F: FieldElement> PartialEq for AccessTree<F> {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some(pair) = pairs.pop() {
            match pair {
                (Self::Leaf(a), Self::Leaf(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Self::And(a_left, a_right), Self::And(b_left, b_right))
                | (Self::Or(a_left, a_right), Self::Or(b_left, b_right)) => {
                    pairs.push((&**a_right, &**b_right));
                    pairs.push((&**a_left, &**b_left));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<F: FieldElement> Drop for AccessTree<F> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fr;

    fn leaf(name: &str) -> AccessTree<Fr> {
        AccessTree::leaf(name)
    }

    fn held(names: &[&str]) -> HashSet<Attribute<Fr>> {
        names.iter().map(|n| Attribute::from_name(n)).collect()
    }

    #[test]
    fn empty_gates_are_rejected() {
        let and = AccessTree::<Fr>::and(Vec::new());
        assert!(matches!(and, Err(Error::MalformedTree(_))));
        let or = AccessTree::<Fr>::or(Vec::new());
        assert!(matches!(or, Err(Error::MalformedTree(_))));
    }

    #[test]
    fn single_child_is_unwrapped() {
        let tree = AccessTree::and([leaf("a")]).unwrap();
        assert_eq!(tree, leaf("a"));
    }

    #[test]
    fn variadic_gates_fold_left() {
        let tree = AccessTree::and([leaf("a"), leaf("b"), leaf("c")]).unwrap();
        let expected = AccessTree::And(
            Box::new(AccessTree::And(Box::new(leaf("a")), Box::new(leaf("b")))),
            Box::new(leaf("c")),
        );
        assert_eq!(tree, expected);
        assert_eq!(tree.and_gate_count(), 2);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn boolean_evaluation() {
        let tree = AccessTree::or([
            AccessTree::and([leaf("a"), leaf("b")]).unwrap(),
            leaf("c"),
        ])
        .unwrap();
        assert!(tree.is_satisfied_by(&held(&["a", "b"])));
        assert!(tree.is_satisfied_by(&held(&["c"])));
        assert!(!tree.is_satisfied_by(&held(&["a"])));
        assert!(!tree.is_satisfied_by(&held(&[])));
    }

    #[test]
    fn copy_is_independent_and_equal() {
        let tree = AccessTree::or([leaf("a"), leaf("b")]).unwrap();
        let copy = tree.copy();
        assert_eq!(copy, tree);
        assert_eq!(
            copy.attributes(),
            vec![Attribute::from_name("a"), Attribute::from_name("b")]
        );
    }

    #[test]
    fn long_chains_do_not_exhaust_the_stack() {
        let tree = AccessTree::or((0..20_000u64).map(|i| AccessTree::leaf(Fr::from_u64(i)))).unwrap();
        assert_eq!(tree.leaf_count(), 20_000);
        assert_eq!(tree.and_gate_count(), 0);
        assert_eq!(tree.depth(), 20_000);
        assert_eq!(tree.attributes().len(), 20_000);
        assert_eq!(*tree.attributes().last().unwrap(), Attribute::new(Fr::from_u64(19_999)));

        let mut attrs = HashSet::new();
        assert!(!tree.is_satisfied_by(&attrs));
        attrs.insert(Attribute::new(Fr::from_u64(12_345)));
        assert!(tree.is_satisfied_by(&attrs));

        let copy = tree.copy();
        assert_eq!(copy, tree);
        drop(copy);

        let conjunction =
            AccessTree::and((0..20_000u64).map(|i| AccessTree::leaf(Fr::from_u64(i)))).unwrap();
        assert_ne!(conjunction, tree);
        assert!(!conjunction.is_satisfied_by(&attrs));
    }

    #[test]
    fn clone_and_eq_follow_structure() {
        let tree = AccessTree::and([
            AccessTree::or([leaf("a"), leaf("b")]).unwrap(),
            leaf("c"),
        ])
        .unwrap();
        let swapped = AccessTree::and([
            AccessTree::or([leaf("b"), leaf("a")]).unwrap(),
            leaf("c"),
        ])
        .unwrap();
        let regated = AccessTree::or([
            AccessTree::or([leaf("a"), leaf("b")]).unwrap(),
            leaf("c"),
        ])
        .unwrap();
        assert_eq!(tree.clone(), tree);
        assert_ne!(tree, swapped);
        assert_ne!(tree, regated);
        assert_ne!(tree, leaf("c"));
    }
}
