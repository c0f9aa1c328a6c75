//! Preferences that decide which formula to decompose next.
//!
//! The generator always applies a rule satisfying the
//! most preferred preference that any rule currently satisfies.

use crate::node::{Node, NodeId};
use crate::rule::{self, Kind};
use crate::{Formula, ProofTree};
use alloc::vec::Vec;
use log::trace;

/// Decide whether decomposing a formula at a node is preferred.
pub type Heuristic = fn(&ProofTree, NodeId, &Formula) -> bool;

pub struct Preference {
    pub name: &'static str,
    pub holds: Heuristic,
}

/// Number of preferences.
pub const COUNT: usize = 7;

/// All preferences, most preferred first.
pub static PREFERENCES: [Preference; COUNT] = [
    Preference {
        name: "contradiction",
        holds: closes_every_branch,
    },
    Preference {
        name: "quantifier negation",
        holds: |_, _, fm| Kind::of(fm) == Kind::QuantNeg,
    },
    Preference {
        name: "non-branching",
        holds: |_, _, fm| Kind::of(fm) == Kind::Linear,
    },
    Preference {
        name: "existential",
        holds: |_, _, fm| Kind::of(fm) == Kind::Exists,
    },
    Preference {
        name: "universal",
        holds: |_, _, fm| Kind::of(fm) == Kind::Forall,
    },
    Preference {
        name: "branching",
        holds: |_, _, fm| Kind::of(fm) == Kind::Split,
    },
    Preference {
        name: "wildcard",
        holds: |_, _, fm| !fm.is_atom(),
    },
];

/// Return true if decomposing the formula closes every branch it creates.
///
/// The new branches are built as scratch nodes and
/// checked against the open leaves they would be attached to;
/// the tree itself is left untouched.
/// Leaves where the decomposition would be redundant do not count,
/// but at least one branch must be created.
pub fn closes_every_branch(tree: &ProofTree, id: NodeId, fm: &Formula) -> bool {
    let app = match rule::apply(tree, id, fm) {
        Some(app) => app,
        None => return false,
    };
    let scratch: Vec<_> = app.expansion.branches().map(|br| Node::new(br.to_vec())).collect();
    let mut created = 0;
    for leaf in tree.leaves_below(id) {
        if tree.is_redundant(leaf, &app.expansion) {
            continue;
        }
        if !scratch.iter().all(|node| tree.contradiction_below(leaf, node)) {
            trace!("{} at {} leaves {} open", fm, id, leaf);
            return false;
        }
        created += scratch.len();
    }
    created > 0
}
