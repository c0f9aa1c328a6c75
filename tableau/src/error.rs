use alloc::string::String;
use core::fmt::{self, Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The input does not reduce to a single well-formed formula.
    Formation(String),
    /// A tree operation was used in violation of its contract.
    InvalidOperation(&'static str),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formation(s) => write!(f, "{} is not a well formed formula", s),
            Self::InvalidOperation(s) => write!(f, "invalid operation: {}", s),
        }
    }
}
