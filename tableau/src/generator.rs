use crate::heuristic::{self, Preference, PREFERENCES};
use crate::{rule, Formula, ProofTree};
use alloc::vec::Vec;
use log::{debug, info, trace};
#[cfg(feature = "serde")]
use serde::Serialize;

/// Proof generation statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Stats {
    /// successful rule applications per preference, most preferred first
    pub applications: [usize; heuristic::COUNT],
    /// rule applications that did not add anything to the tree
    pub redundant: usize,
    /// evaluations of the speculative contradiction check
    pub speculations: usize,
}

impl Stats {
    /// Total number of successful rule applications.
    pub fn steps(&self) -> usize {
        self.applications.iter().sum()
    }
}

/// Builds a proof tree for an argument.
///
/// The root holds the premises and the negated conclusion.
/// Every step applies one rule, namely the first one (scanning open nodes
/// from the top down and their untried formulae in order)
/// that satisfies the most preferred preference any rule satisfies.
/// Generation ends when no rule changes the tree any longer,
/// which might never happen for first-order arguments.
pub struct Generator {
    tree: ProofTree,
    stats: Stats,
}

impl Generator {
    pub fn new(premises: Vec<Formula>, conclusion: Formula) -> Self {
        let mut formulae = premises;
        formulae.push(-conclusion);
        let mut tree = ProofTree::new(formulae);
        info!("root: {}", tree.node(tree.root()));

        let root = tree.root();
        if tree.contradiction_from(root) {
            info!("root contradicts itself");
            tree.close(root)
        }
        let stats = Stats::default();
        Self { tree, stats }
    }

    pub fn tree(&self) -> &ProofTree {
        &self.tree
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn into_tree(self) -> ProofTree {
        self.tree
    }

    /// Apply one rule, returning false if no rule changes the tree.
    pub fn step(&mut self) -> bool {
        for (i, pref) in PREFERENCES.iter().enumerate() {
            if self.apply_where(i, pref) {
                self.stats.applications[i] += 1;
                return true;
            }
        }
        false
    }

    /// Apply rules until no rule changes the tree.
    pub fn run(&mut self) {
        while self.step() {}
        info!(
            "generation finished after {} steps with {} nodes",
            self.stats.steps(),
            self.tree.size()
        );
    }

    fn apply_where(&mut self, i: usize, pref: &Preference) -> bool {
        for id in self.tree.open_nodes() {
            let formulae = self.tree.node(id).shared_formulae();
            for fm in formulae.iter() {
                if self.tree.node(id).is_tried(fm) {
                    continue;
                }
                if i == 0 {
                    self.stats.speculations += 1
                }
                if !(pref.holds)(&self.tree, id, fm) {
                    continue;
                }
                let app = match rule::apply(&self.tree, id, fm) {
                    Some(app) => app,
                    None => continue,
                };
                if app.tick {
                    self.tree.node_mut(id).tick(fm)
                }
                if self.tree.graft_below(id, &app.expansion) {
                    debug!("{}: {} at {}", pref.name, fm, id);
                    return true;
                }
                trace!("{}: {} at {} is redundant", pref.name, fm, id);
                self.stats.redundant += 1;
            }
        }
        false
    }
}
