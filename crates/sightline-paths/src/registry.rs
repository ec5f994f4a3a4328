//! Per-search node storage.
//!
//! A [`Registry`] is an arena of [`SearchNode`]s plus a map from cell to
//! arena slot. Parent links are [`NodeId`] indices into the same arena, so
//! the registry alone owns every node and the links can never form an
//! owning cycle. A registry lives for exactly one search call.

use std::cmp::Ordering;
use std::collections::HashMap;

use sightline_core::Cell;

/// Index of a node inside a [`Registry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0
    }
}

/// Best known search state for one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchNode {
    pub cell: Cell,
    pub g: f64,
    pub h: f64,
    pub f: f64,
    pub parent: Option<NodeId>,
    pub closed: bool,
}

impl SearchNode {
    fn undiscovered(cell: Cell) -> Self {
        Self {
            cell,
            g: f64::INFINITY,
            h: 0.0,
            f: f64::INFINITY,
            parent: None,
            closed: false,
        }
    }
}

/// Snapshot of a node pushed onto the open set.
///
/// Ordered by `f`, then `h`, then cell (row-major), so that equal-cost
/// frontiers expand in a reproducible order.
#[derive(Copy, Clone, Debug)]
pub struct OpenEntry {
    pub f: f64,
    pub h: f64,
    pub cell: Cell,
    pub id: NodeId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then(self.h.total_cmp(&other.h))
            .then(self.cell.cmp(&other.cell))
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// Identity map from cell to its single live [`SearchNode`].
#[derive(Debug, Default)]
pub struct Registry {
    nodes: Vec<SearchNode>,
    index: HashMap<Cell, NodeId>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of discovered cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no cell has been discovered yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Id of the node for `cell`, if it was discovered.
    #[inline]
    pub fn lookup(&self, cell: Cell) -> Option<NodeId> {
        self.index.get(&cell).copied()
    }

    /// Id of the node for `cell`, creating an undiscovered node
    /// (`g = +∞`) on first sight.
    pub fn get_or_insert(&mut self, cell: Cell) -> NodeId {
        if let Some(id) = self.index.get(&cell) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode::undiscovered(cell));
        self.index.insert(cell, id);
        id
    }

    /// Create the root node of a search.
    pub fn insert_root(&mut self, cell: Cell, h: f64) -> NodeId {
        let id = self.get_or_insert(cell);
        let n = &mut self.nodes[id.index()];
        n.g = 0.0;
        n.h = h;
        n.f = h;
        n.parent = None;
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    /// Lower the cost of `id` and re-parent it.
    ///
    /// Returns `false` and leaves the node untouched unless `g` strictly
    /// improves and the node is still open. Returning `true` means the
    /// caller must push a fresh [`OpenEntry`].
    pub fn relax(&mut self, id: NodeId, g: f64, h: f64, parent: NodeId) -> bool {
        debug_assert_ne!(id, parent, "a node cannot parent itself");
        let n = &mut self.nodes[id.index()];
        if n.closed || g >= n.g {
            return false;
        }
        n.g = g;
        n.h = h;
        n.f = g + h;
        n.parent = Some(parent);
        true
    }

    /// Mark `id` as expanded. Its parent link is frozen from now on.
    #[inline]
    pub fn close(&mut self, id: NodeId) {
        self.nodes[id.index()].closed = true;
    }

    /// Open-set entry reflecting the current state of `id`.
    #[inline]
    pub fn entry(&self, id: NodeId) -> OpenEntry {
        let n = self.node(id);
        OpenEntry {
            f: n.f,
            h: n.h,
            cell: n.cell,
            id,
        }
    }

    /// Whether a popped entry no longer describes its node: the node has
    /// been expanded already or its cost improved after the push.
    #[inline]
    pub fn is_stale(&self, e: &OpenEntry) -> bool {
        let n = self.node(e.id);
        n.closed || n.f != e.f
    }

    /// Walk parent links from `terminal` to the root and return the cells
    /// in root → terminal order.
    pub fn reconstruct(&self, terminal: NodeId) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut cur = Some(terminal);
        while let Some(id) = cur {
            let n = self.node(id);
            path.push(n.cell);
            cur = n.parent;
        }
        path.reverse();
        path
    }

    /// Sum of Euclidean hop lengths along `terminal`'s parent chain.
    pub fn cost(&self, terminal: NodeId) -> f64 {
        self.node(terminal).g
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::MinHeap;

    #[test]
    fn one_node_per_cell() {
        let mut reg = Registry::new();
        let a = reg.get_or_insert(Cell::new(1, 2));
        let b = reg.get_or_insert(Cell::new(1, 2));
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.lookup(Cell::new(1, 2)), Some(a));
        assert_eq!(reg.lookup(Cell::new(2, 1)), None);
        assert_eq!(reg.node(a).g, f64::INFINITY);
    }

    #[test]
    fn ids_are_arena_slots() {
        let mut reg = Registry::new();
        let cells = [Cell::new(5, 5), Cell::new(0, 0), Cell::new(2, 9)];
        let ids: Vec<NodeId> = cells.iter().map(|&c| reg.get_or_insert(c)).collect();
        for (slot, (&id, &c)) in ids.iter().zip(&cells).enumerate() {
            assert_eq!(id.index(), slot);
            assert_eq!(reg.node(id).cell, c);
        }
    }

    #[test]
    fn relax_only_on_strict_improvement() {
        let mut reg = Registry::new();
        let root = reg.insert_root(Cell::new(0, 0), 3.0);
        let n = reg.get_or_insert(Cell::new(0, 1));
        assert!(reg.relax(n, 1.0, 2.0, root));
        assert_eq!(reg.node(n).f, 3.0);
        assert!(!reg.relax(n, 1.0, 2.0, root));
        assert!(!reg.relax(n, 1.5, 2.0, root));
        assert_eq!(reg.node(n).g, 1.0);
    }

    #[test]
    fn closed_nodes_are_frozen() {
        let mut reg = Registry::new();
        let root = reg.insert_root(Cell::new(0, 0), 0.0);
        let a = reg.get_or_insert(Cell::new(0, 1));
        let b = reg.get_or_insert(Cell::new(0, 2));
        assert!(reg.relax(b, 5.0, 0.0, a));
        reg.close(b);
        assert!(!reg.relax(b, 1.0, 0.0, root));
        assert_eq!(reg.node(b).parent, Some(a));
    }

    #[test]
    fn stale_entries_detected() {
        let mut reg = Registry::new();
        let root = reg.insert_root(Cell::new(0, 0), 0.0);
        let n = reg.get_or_insert(Cell::new(3, 3));
        reg.relax(n, 9.0, 1.0, root);
        let old = reg.entry(n);
        reg.relax(n, 4.0, 1.0, root);
        let fresh = reg.entry(n);
        assert!(reg.is_stale(&old));
        assert!(!reg.is_stale(&fresh));
        reg.close(n);
        assert!(reg.is_stale(&fresh));
    }

    #[test]
    fn entry_order_breaks_ties_by_h_then_cell() {
        let mut reg = Registry::new();
        let root = reg.insert_root(Cell::new(0, 0), 0.0);
        let a = reg.get_or_insert(Cell::new(2, 0));
        let b = reg.get_or_insert(Cell::new(1, 5));
        let c = reg.get_or_insert(Cell::new(0, 9));
        reg.relax(a, 2.0, 2.0, root);
        reg.relax(b, 2.0, 2.0, root);
        reg.relax(c, 3.0, 1.0, root);
        let mut heap: MinHeap<OpenEntry> = [a, b, c].iter().map(|&id| reg.entry(id)).collect();
        let order: Vec<Cell> = std::iter::from_fn(|| heap.extract_min().ok())
            .map(|e| e.cell)
            .collect();
        assert_eq!(order, vec![Cell::new(0, 9), Cell::new(1, 5), Cell::new(2, 0)]);
    }

    #[test]
    fn reconstruct_follows_parents() {
        let mut reg = Registry::new();
        let root = reg.insert_root(Cell::new(0, 0), 0.0);
        let mid = reg.get_or_insert(Cell::new(2, 2));
        let end = reg.get_or_insert(Cell::new(2, 5));
        reg.relax(mid, 8f64.sqrt(), 0.0, root);
        reg.relax(end, 8f64.sqrt() + 3.0, 0.0, mid);
        assert_eq!(
            reg.reconstruct(end),
            vec![Cell::new(0, 0), Cell::new(2, 2), Cell::new(2, 5)]
        );
        assert_eq!(reg.reconstruct(root), vec![Cell::new(0, 0)]);
        assert_eq!(reg.cost(end), 8f64.sqrt() + 3.0);
    }
}
