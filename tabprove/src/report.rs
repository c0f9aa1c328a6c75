use crate::parse::Argument;
use core::fmt::{self, Display};
use log::{info, warn};
use serde::Serialize;
use std::time::Instant;
use tableau::{Generator, ProofTree, Stats};

/// Argument type, as determined by a proof tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// every branch of the tree is closed
    Valid,
    /// the tree is complete and some branch is open
    Invalid,
    /// generation was stopped with some branch open
    Unknown,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid => write!(f, "invalid"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Summary of a proof tree generation.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    /// time spent on generating the tree
    pub seconds: f64,
    /// number of nodes in the tree
    pub size: usize,
    pub verdict: Verdict,
    pub stats: Stats,
}

impl Report {
    /// Generate the proof tree for an argument.
    ///
    /// If `limit` is given, generation stops as soon as
    /// the tree has at least `limit` nodes.
    pub fn generate(arg: Argument, limit: Option<usize>) -> (ProofTree, Self) {
        let start = Instant::now();
        let mut generator = Generator::new(arg.premises, arg.conclusion);
        let complete = loop {
            if limit.map_or(false, |lim| generator.tree().size() >= lim) {
                break false;
            }
            if !generator.step() {
                break true;
            }
        };
        let seconds = start.elapsed().as_secs_f64();

        let tree = generator.tree();
        let verdict = if tree.closes() {
            Verdict::Valid
        } else if complete {
            Verdict::Invalid
        } else {
            warn!("node limit reached with open branches");
            Verdict::Unknown
        };
        info!("{} after {} steps", verdict, generator.stats().steps());

        let size = tree.size();
        let stats = generator.stats().clone();
        let report = Self {
            seconds,
            size,
            verdict,
            stats,
        };
        (generator.into_tree(), report)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tree build time: {} seconds", self.seconds)?;
        writeln!(f, "Tree size      : {}", self.size)?;
        writeln!(f, "Argument type  : {}", self.verdict)
    }
}
