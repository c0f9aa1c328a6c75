use crate::{Formula, Term};
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt::{self, Display};
use hashbrown::HashSet;

/// Index of a node in its proof tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node of a proof tree.
///
/// A node holds a fixed sequence of formulae, which may be shared
/// with other nodes grafted from the same rule application.
/// Formulae are marked as tried ("ticked") once their rule was applied;
/// a node is closed once it contradicts its branch.
#[derive(Clone, Debug)]
pub struct Node {
    formulae: Rc<[Formula]>,
    tried: HashSet<Formula>,
    closed: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: [Option<NodeId>; 2],
}

impl Node {
    pub fn new(formulae: Vec<Formula>) -> Self {
        Self::shared(Rc::from(formulae))
    }

    fn shared(formulae: Rc<[Formula]>) -> Self {
        Self {
            formulae,
            tried: HashSet::new(),
            closed: false,
            parent: None,
            children: [None, None],
        }
    }

    /// Return a node with the same formulae that is untried, open and detached.
    pub fn fresh(&self) -> Self {
        Self::shared(self.formulae.clone())
    }

    pub fn formulae(&self) -> &[Formula] {
        &self.formulae
    }

    pub(crate) fn shared_formulae(&self) -> Rc<[Formula]> {
        self.formulae.clone()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().flatten().copied()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Return true if any formula of this node contradicts any formula of `other`.
    pub fn contradicts(&self, other: &Self) -> bool {
        let mut fms = self.formulae.iter();
        fms.any(|fm| other.formulae.iter().any(|o| fm.contradicts(o)))
    }

    /// Free terms of all formulae of the node, without duplicates.
    pub fn constants(&self) -> Vec<Term> {
        let mut result = Vec::new();
        crate::extend_unique(&mut result, self.formulae.iter().flat_map(|fm| fm.constants()));
        result
    }

    pub fn contains(&self, fm: &Formula) -> bool {
        self.formulae.contains(fm)
    }

    /// Mark the formula as tried.
    ///
    /// Formulae are identified by structural equality,
    /// so duplicates within a node share their mark.
    pub fn tick(&mut self, fm: &Formula) {
        if self.contains(fm) {
            self.tried.insert(fm.clone());
        }
    }

    pub fn untick(&mut self, fm: &Formula) {
        self.tried.remove(fm);
    }

    pub fn is_tried(&self, fm: &Formula) -> bool {
        self.tried.contains(fm)
    }

    pub fn close(&mut self) {
        self.closed = true
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.formulae.iter();
        if let Some(fm) = iter.next() {
            write!(f, "{}", fm)?;
            iter.try_for_each(|fm| write!(f, ", {}", fm))?;
        }
        if self.closed {
            write!(f, " [X]")?;
        }
        Ok(())
    }
}
