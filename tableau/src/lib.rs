//! Proof trees (analytic tableaux) for first-order logic.
//!
//! An argument is valid if assuming its premises and
//! the negation of its conclusion leads to a contradiction on every branch:
//!
//! ~~~
//! let premises = vec![">PQ".parse().unwrap(), "P".parse().unwrap()];
//! let tree = tableau::prove(premises, "Q".parse().unwrap());
//! assert!(tree.closes());
//! ~~~
#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

mod args;
mod error;
mod formula;
pub mod generator;
pub mod heuristic;
mod node;
pub mod rule;
pub mod symbol;
pub mod token;
mod term;
mod tree;

pub use args::Args;
pub use error::Error;
pub use formula::{Formula, Infix, Shape};
pub use generator::{Generator, Stats};
pub use node::{Node, NodeId};
pub use rule::Expansion;
pub use term::Term;
pub use tree::{ProofTree, Render};

use alloc::vec::Vec;

/// Build the proof tree for the argument from `premises` to `conclusion`.
///
/// This might not terminate for first-order arguments,
/// because quantifier instantiation may go on forever.
/// To bound the search, use [`Generator::step`] instead.
pub fn prove(premises: Vec<Formula>, conclusion: Formula) -> ProofTree {
    let mut generator = Generator::new(premises, conclusion);
    generator.run();
    generator.into_tree()
}

/// Append the elements of `iter` to `v` that `v` does not contain yet.
///
/// ~~~
/// let mut v = vec![1, 2];
/// tableau::extend_unique(&mut v, vec![2, 3, 1, 3]);
/// assert_eq!(v, vec![1, 2, 3]);
/// ~~~
pub fn extend_unique<T: Eq>(v: &mut Vec<T>, iter: impl IntoIterator<Item = T>) {
    for x in iter {
        if !v.contains(&x) {
            v.push(x)
        }
    }
}
