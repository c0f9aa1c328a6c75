use crate::node::{Node, NodeId};
use crate::rule::Expansion;
use crate::{Error, Formula, Term};
use alloc::vec::Vec;
use core::fmt::{self, Display};
use log::trace;

/// Proof tree (tableau), storing its nodes in an arena.
///
/// The tree is binary: every node has at most two children.
/// Nodes are only added below open leaves and never removed
/// during proof generation; once a node is closed, it stays closed,
/// and nothing below it is considered any longer.
#[derive(Clone, Debug)]
pub struct ProofTree {
    nodes: Vec<Node>,
}

impl ProofTree {
    /// Create a tree consisting of a single root node.
    pub fn new(formulae: Vec<Formula>) -> Self {
        Self {
            nodes: Vec::from([Node::new(formulae)]),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn close(&mut self, id: NodeId) {
        self.node_mut(id).close()
    }

    /// Attach `child` to `parent`, in the left slot if it is free, else in the right one.
    ///
    /// The child is attached without any children of its own.
    /// Fails if both slots of `parent` are occupied.
    pub fn add_child(&mut self, parent: NodeId, child: Node) -> Result<NodeId, Error> {
        let slots = &self.node(parent).children;
        let slot = slots.iter().position(Option::is_none);
        let slot = slot.ok_or(Error::InvalidOperation("too many children"))?;
        Ok(self.attach(parent, slot, child))
    }

    fn attach(&mut self, parent: NodeId, slot: usize, mut child: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        child.parent = Some(parent);
        child.children = [None, None];
        self.nodes.push(child);
        self.node_mut(parent).children[slot] = Some(id);
        id
    }

    /// Detach `child` from `parent` if it is currently one of its children.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let slots = &mut self.node_mut(parent).children;
        match slots.iter().position(|c| *c == Some(child)) {
            Some(slot) => {
                slots[slot] = None;
                self.node_mut(child).parent = None;
                true
            }
            None => false,
        }
    }

    /// Nodes below `id` (inclusive) in depth-first, left-to-right order,
    /// not descending into nodes for which `skip` holds.
    fn descendants(&self, id: NodeId, skip: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = Vec::from([id]);
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if skip(node) {
                continue;
            }
            result.push(id);
            stack.extend(node.children.iter().rev().flatten());
        }
        result
    }

    /// All open nodes reachable from the root without passing a closed node,
    /// from the top down.
    pub fn open_nodes(&self) -> Vec<NodeId> {
        self.descendants(self.root(), Node::is_closed)
    }

    /// Open leaves below `id` (including `id` itself).
    pub fn leaves_below(&self, id: NodeId) -> Vec<NodeId> {
        let open = self.descendants(id, Node::is_closed).into_iter();
        open.filter(|id| self.node(*id).is_leaf()).collect()
    }

    /// The node itself and all its ancestors, up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(Some(id), move |id| self.node(*id).parent)
    }

    /// The node and its ancestors, up to the first closed one.
    fn open_ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.ancestors(id).take_while(move |id| !self.node(*id).is_closed())
    }

    /// Free terms of the node and its open ancestors, without duplicates.
    pub fn constants_from(&self, id: NodeId) -> Vec<Term> {
        let mut result = Vec::new();
        for a in self.open_ancestors(id) {
            crate::extend_unique(&mut result, self.node(a).constants())
        }
        result
    }

    /// Return true if the node or one of its open ancestors contains `fm`.
    pub fn contains_formula_from(&self, id: NodeId, fm: &Formula) -> bool {
        self.open_ancestors(id).any(|a| self.node(a).contains(fm))
    }

    /// Return true if the node contradicts itself or any of its ancestors.
    pub fn contradiction_from(&self, id: NodeId) -> bool {
        let node = self.node(id);
        self.ancestors(id).any(|a| node.contradicts(self.node(a)))
    }

    /// Return true if `scratch` would be closed right away if attached below `leaf`.
    pub fn contradiction_below(&self, leaf: NodeId, scratch: &Node) -> bool {
        scratch.contradicts(scratch) || self.ancestors(leaf).any(|a| scratch.contradicts(self.node(a)))
    }

    /// Return true if some branch of the expansion adds nothing new at `leaf`.
    ///
    /// In that case, the branch from the root to `leaf` already is
    /// (a superset of) the branch that the expansion would create,
    /// so the expansion does not need to be carried out at `leaf`.
    pub fn is_redundant(&self, leaf: NodeId, expansion: &Expansion) -> bool {
        let mut branches = expansion.branches();
        branches.any(|br| br.iter().all(|fm| self.contains_formula_from(leaf, fm)))
    }

    /// Attach the branches of the expansion to every open leaf below `id`.
    ///
    /// Leaves where the expansion is redundant are skipped.
    /// Every new node is closed immediately if it contradicts its branch.
    /// Return true if any node was attached.
    pub fn graft_below(&mut self, id: NodeId, expansion: &Expansion) -> bool {
        let templates: Vec<_> = expansion.branches().map(|br| Node::new(br.to_vec())).collect();
        let mut changed = false;
        for leaf in self.leaves_below(id) {
            if self.is_redundant(leaf, expansion) {
                trace!("redundant at {}", leaf);
                continue;
            }
            for (slot, template) in templates.iter().enumerate() {
                let child = self.attach(leaf, slot, template.fresh());
                if self.contradiction_from(child) {
                    trace!("close {}", child);
                    self.close(child)
                }
                changed = true;
            }
        }
        changed
    }

    /// Return true if every branch of the tree is closed.
    pub fn closes(&self) -> bool {
        self.closes_from(self.root())
    }

    /// Return true if every branch through `id` is closed.
    pub fn closes_from(&self, id: NodeId) -> bool {
        self.leaves_below(id).is_empty()
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        self.descendants(self.root(), |_| false).len()
    }

    /// Display the tree, with formulae in infix or prefix notation.
    pub fn render(&self, infix: bool) -> Render<'_> {
        Render { tree: self, infix }
    }
}

/// Tree rendering, one line per node, indented by depth.
pub struct Render<'a> {
    tree: &'a ProofTree,
    infix: bool,
}

impl<'a> Render<'a> {
    fn node(&self, node: &Node, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.infix {
            return node.fmt(f);
        }
        let mut iter = node.formulae().iter();
        if let Some(fm) = iter.next() {
            write!(f, "{}", fm.infix())?;
            iter.try_for_each(|fm| write!(f, ", {}", fm.infix()))?;
        }
        if node.is_closed() {
            write!(f, " [X]")?;
        }
        Ok(())
    }
}

impl<'a> Display for Render<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = Vec::from([(self.tree.root(), 0)]);
        while let Some((id, depth)) = stack.pop() {
            (0..depth).try_for_each(|_| write!(f, "|   "))?;
            let node = self.tree.node(id);
            self.node(node, f)?;
            writeln!(f)?;
            stack.extend(node.children.iter().rev().flatten().map(|c| (*c, depth + 1)));
        }
        Ok(())
    }
}

impl Display for ProofTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(false).fmt(f)
    }
}
