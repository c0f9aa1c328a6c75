use crate::formula::Shape;
use crate::node::NodeId;
use crate::symbol::{Op, Quantifier};
use crate::{Formula, ProofTree, Term};
use alloc::vec::Vec;

/// Branches produced by decomposing a formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expansion {
    /// one new branch
    Linear(Vec<Formula>),
    /// two alternative branches
    Split(Vec<Formula>, Vec<Formula>),
}

impl Expansion {
    pub fn branches(&self) -> impl Iterator<Item = &[Formula]> {
        let (l, r) = match self {
            Self::Linear(l) => (l, None),
            Self::Split(l, r) => (l, Some(r)),
        };
        core::iter::once(l.as_slice()).chain(r.map(|r| r.as_slice()))
    }
}

/// Kind of rule that decomposes a formula.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    /// literal, nothing to decompose
    Atomic,
    /// ¬∀ or ¬∃
    QuantNeg,
    /// sentential, one branch
    Linear,
    /// sentential, two branches
    Split,
    Exists,
    Forall,
}

impl Kind {
    pub fn of(fm: &Formula) -> Self {
        match fm.shape() {
            Shape::Atom => Self::Atomic,
            Shape::Bin(Op::Conj, _, _) => Self::Linear,
            Shape::Bin(_, _, _) => Self::Split,
            Shape::Quant(Quantifier::Forall, _, _) => Self::Forall,
            Shape::Quant(Quantifier::Exists, _, _) => Self::Exists,
            Shape::Neg(fm) => match fm.shape() {
                Shape::Atom => Self::Atomic,
                Shape::Neg(_) => Self::Linear,
                Shape::Bin(Op::Disj, _, _) | Shape::Bin(Op::Impl, _, _) => Self::Linear,
                Shape::Bin(_, _, _) => Self::Split,
                Shape::Quant(_, _, _) => Self::QuantNeg,
            },
        }
    }
}

/// Result of applying a rule to a formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Application {
    pub expansion: Expansion,
    /// whether the formula is done with afterwards
    pub tick: bool,
}

impl From<Expansion> for Application {
    fn from(expansion: Expansion) -> Self {
        let tick = true;
        Self { expansion, tick }
    }
}

fn linear(fms: impl IntoIterator<Item = Formula>) -> Application {
    Expansion::Linear(fms.into_iter().collect()).into()
}

fn split(l: impl IntoIterator<Item = Formula>, r: impl IntoIterator<Item = Formula>) -> Application {
    Expansion::Split(l.into_iter().collect(), r.into_iter().collect()).into()
}

/// Terms visible on any open branch through `id`.
fn visible(tree: &ProofTree, id: NodeId) -> Vec<Term> {
    let mut result = tree.constants_from(id);
    for leaf in tree.leaves_below(id) {
        crate::extend_unique(&mut result, tree.constants_from(leaf))
    }
    result
}

/// Instantiate the body of a universal formula with every term
/// visible on the open leaves below `id`, or with a fresh term if there is none.
fn universal(tree: &ProofTree, id: NodeId, v: Term, body: &Formula) -> Vec<Formula> {
    let mut result = Vec::new();
    for leaf in tree.leaves_below(id) {
        let insts = tree.constants_from(leaf).into_iter();
        crate::extend_unique(&mut result, insts.map(|c| body.substitute(v, c)))
    }
    if result.is_empty() {
        result.push(body.substitute(v, Term::fresh(&[])))
    }
    result
}

/// Decompose the formula found at node `id`.
///
/// Return `None` for atoms, which cannot be decomposed.
/// This does not modify the tree.
pub fn apply(tree: &ProofTree, id: NodeId, fm: &Formula) -> Option<Application> {
    use Op::*;
    Some(match fm.shape() {
        Shape::Atom => return None,
        Shape::Bin(Disj, l, r) => split([l], [r]),
        Shape::Bin(Conj, l, r) => linear([l, r]),
        Shape::Bin(Impl, l, r) => split([-l], [r]),
        Shape::Bin(EqFm, l, r) => split([l.clone(), r.clone()], [-l, -r]),
        Shape::Quant(Quantifier::Forall, v, body) => Application {
            expansion: Expansion::Linear(universal(tree, id, v, &body)),
            tick: false,
        },
        Shape::Quant(Quantifier::Exists, v, body) => {
            let c = Term::fresh(&visible(tree, id));
            linear([body.substitute(v, c)])
        }
        Shape::Neg(neg) => match neg.shape() {
            Shape::Atom => return None,
            Shape::Neg(fm) => linear([fm]),
            Shape::Bin(Disj, l, r) => linear([-l, -r]),
            Shape::Bin(Conj, l, r) => split([-l], [-r]),
            Shape::Bin(Impl, l, r) => linear([l, -r]),
            Shape::Bin(EqFm, l, r) => split([l.clone(), -r.clone()], [-l, r]),
            Shape::Quant(q, v, body) => linear([Formula::quantified(-q, v, -body)]),
        },
    })
}
