use core::fmt::{self, Display};
use core::ops::Neg;

/// Binary connective.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Disj,
    Conj,
    Impl,
    EqFm,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Forall,
    Exists,
}

pub const NEGATION: char = '~';

impl Op {
    /// Surface symbol of the connective.
    pub fn symbol(self) -> char {
        match self {
            Self::Disj => '+',
            Self::Conj => '&',
            Self::Impl => '>',
            Self::EqFm => ':',
        }
    }

    /// Binding strength: the smaller, the tighter.
    pub fn priority(self) -> u8 {
        match self {
            Self::Conj => 3,
            Self::Disj => 4,
            Self::Impl => 5,
            Self::EqFm => 6,
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' | '∨' => Some(Self::Disj),
            '&' | '∧' => Some(Self::Conj),
            '>' | '→' => Some(Self::Impl),
            ':' | '↔' => Some(Self::EqFm),
            _ => None,
        }
    }

    /// Symbol used when printing formulae in infix notation.
    pub fn pretty(self) -> char {
        match self {
            Self::Disj => '∨',
            Self::Conj => '∧',
            Self::Impl => '→',
            Self::EqFm => '↔',
        }
    }
}

impl Quantifier {
    pub fn symbol(self) -> char {
        match self {
            Self::Forall => '@',
            Self::Exists => '#',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '@' | '∀' => Some(Self::Forall),
            '#' | '∃' => Some(Self::Exists),
            _ => None,
        }
    }

    pub fn pretty(self) -> char {
        match self {
            Self::Forall => '∀',
            Self::Exists => '∃',
        }
    }
}

pub fn is_negation(c: char) -> bool {
    c == NEGATION || c == '¬'
}

impl Neg for Quantifier {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Forall => Self::Exists,
            Self::Exists => Self::Forall,
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
