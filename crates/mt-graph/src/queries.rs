//! Instantaneous topology queries.
//!
//! These look at a single instant rather than a window.  With `at = Some(t)`
//! an edge is only traversable while its ledger has free capacity at `t`
//! ([`Ledger::remaining_at`](mt_ledger::Ledger::remaining_at) `> 0`); with
//! `None` the bare topology is walked.  Traversal follows adjacency
//! direction, so one-way edges are honoured.
//!
//! Depth-first search uses an explicit stack: facility graphs can be deep
//! enough to overflow the call stack with recursion.

use mt_core::{EdgeId, MtResult, NodeId, Stamp};

use crate::TaskGraph;

impl TaskGraph {
    fn traversable(&self, edge: EdgeId, at: Option<Stamp>) -> bool {
        match at {
            None => true,
            Some(t) => self
                .edges()
                .get(edge.index())
                .is_some_and(|e| e.ledger().remaining_at(t) > 0),
        }
    }

    /// Mark every node reachable from `root` with `label`.
    fn explore(&self, root: NodeId, label: usize, at: Option<Stamp>, marks: &mut [Option<usize>]) {
        let mut stack = vec![root];
        marks[root.index()] = Some(label);
        while let Some(node) = stack.pop() {
            for &(next, edge) in self.neighbors(node) {
                if marks[next.index()].is_none() && self.traversable(edge, at) {
                    marks[next.index()] = Some(label);
                    stack.push(next);
                }
            }
        }
    }

    /// Is `to` reachable from `from`, optionally only over edges with free
    /// capacity at instant `at`?
    pub fn reachable(&self, from: NodeId, to: NodeId, at: Option<Stamp>) -> MtResult<bool> {
        self.node(from)?;
        self.node(to)?;
        let mut marks = vec![None; self.node_count()];
        self.explore(from, 0, at, &mut marks);
        Ok(marks[to.index()].is_some())
    }

    /// Component label per node, assigned by sweeping nodes in id order and
    /// exploring from each one not yet labelled.
    pub fn component_labels(&self, at: Option<Stamp>) -> Vec<usize> {
        let mut marks = vec![None; self.node_count()];
        let mut next_label = 0;
        for node in self.nodes() {
            if marks[node.id().index()].is_none() {
                self.explore(node.id(), next_label, at, &mut marks);
                next_label += 1;
            }
        }
        marks.into_iter().map(|m| m.unwrap_or(usize::MAX)).collect()
    }

    /// Number of components found by [`component_labels`](Self::component_labels).
    pub fn connected_components(&self, at: Option<Stamp>) -> usize {
        self.component_labels(at)
            .iter()
            .max()
            .map_or(0, |&m| m + 1)
    }
}
