use crate::Term;
use alloc::{vec, vec::Vec};
use core::fmt::{self, Display};

/// Run of terms that a predicate is applied to.
///
/// Terms are written next to each other without separators,
/// so `Rab` applies `R` to the arguments `a` and `b`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Args(Vec<Term>);

impl Args {
    /// Replace every occurrence of `from` by `to`.
    pub fn replace(&self, from: Term, to: Term) -> Self {
        self.iter().map(|&t| if t == from { to } else { t }).collect()
    }
}

impl Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|arg| arg.fmt(f))
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a Term;
    type IntoIter = core::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Args {
    type Item = Term;
    type IntoIter = vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl core::iter::FromIterator<Term> for Args {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl core::ops::Deref for Args {
    type Target = Vec<Term>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
