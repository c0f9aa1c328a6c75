use core::fmt::{self, Display};

/// A constant or variable: a lowercase letter with an optional index.
///
/// The index is zero for all terms given by the user,
/// unless they write one explicitly (`a1`).
/// Fresh terms with nonzero indices only appear once
/// all plain letters are taken.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term {
    letter: char,
    index: u32,
}

impl Term {
    /// Create a term from a lowercase letter and an index.
    pub fn new(letter: char, index: u32) -> Self {
        debug_assert!(letter.is_ascii_lowercase());
        Self { letter, index }
    }

    /// Create a plain (unindexed) term.
    pub fn letter(letter: char) -> Self {
        Self::new(letter, 0)
    }

    /// All terms, in the order in which fresh terms are chosen.
    ///
    /// ~~~
    /// # use tableau::Term;
    /// let mut terms = Term::candidates();
    /// assert_eq!(terms.next(), Some(Term::letter('a')));
    /// assert_eq!(terms.nth(25), Some(Term::new('a', 1)));
    /// ~~~
    pub fn candidates() -> impl Iterator<Item = Self> {
        (0..).flat_map(|index| ('a'..='z').map(move |letter| Self { letter, index }))
    }

    /// Return the first term that is not contained in `visible`.
    ///
    /// This never runs out of terms:
    /// after `z` follow `a1`, `b1`, ..., `z1`, `a2` and so on.
    ///
    /// ~~~
    /// # use tableau::Term;
    /// let visible = [Term::letter('a'), Term::letter('c')];
    /// assert_eq!(Term::fresh(&visible), Term::letter('b'));
    /// ~~~
    pub fn fresh(visible: &[Self]) -> Self {
        let mut candidates = Self::candidates().filter(|t| !visible.contains(t));
        // there are only finitely many visible terms
        candidates.next().unwrap_or(Self::new('a', u32::MAX))
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.index == 0 {
            write!(f, "{}", self.letter)
        } else {
            write!(f, "{}{}", self.letter, self.index)
        }
    }
}
