//! Nodes and edges: static attributes plus one reservation ledger each.

use mt_core::{AgentId, EdgeId, NodeId, PassDuration, Priority, TimeWindow};
use mt_ledger::Ledger;

// ── Node ──────────────────────────────────────────────────────────────────────

/// A stay point.
#[derive(Clone, Debug)]
pub struct Node {
    id:       NodeId,
    name:     String,
    stayable: bool,
    ledger:   Ledger,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String, stayable: bool, capacity: u32) -> Self {
        Self { id, name, stayable, ledger: Ledger::new(capacity) }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// May an agent wait here indefinitely without blocking traffic?
    pub fn is_stayable(&self) -> bool {
        self.stayable
    }

    pub fn capacity(&self) -> u32 {
        self.ledger.capacity()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }
}

// ── Edge ──────────────────────────────────────────────────────────────────────

/// Construction parameters for an edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EdgeSpec {
    pub bidirectional: bool,
    pub capacity:      u32,
    pub duration:      PassDuration,
}

impl EdgeSpec {
    /// Bidirectional edge with the given capacity and duration.
    pub fn new(capacity: u32, duration: PassDuration) -> Self {
        Self { bidirectional: true, capacity, duration }
    }

    /// Restrict travel to `from → to`.
    pub fn one_way(mut self) -> Self {
        self.bidirectional = false;
        self
    }
}

/// A path segment between two nodes.
#[derive(Clone, Debug)]
pub struct Edge {
    id:            EdgeId,
    from:          NodeId,
    to:            NodeId,
    bidirectional: bool,
    duration:      PassDuration,
    ledger:        Ledger,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, from: NodeId, to: NodeId, spec: EdgeSpec) -> Self {
        Self {
            id,
            from,
            to,
            bidirectional: spec.bidirectional,
            duration:      spec.duration,
            ledger:        Ledger::new(spec.capacity),
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    pub fn capacity(&self) -> u32 {
        self.ledger.capacity()
    }

    pub fn duration(&self) -> PassDuration {
        self.duration
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    // ── Window algebra bound to this edge's duration ──────────────────────

    #[inline]
    pub fn occupied_window_from_start(&self, start: &TimeWindow) -> TimeWindow {
        self.duration.occupied_window_from_start(start)
    }

    #[inline]
    pub fn window_end_from_start(&self, start: &TimeWindow) -> TimeWindow {
        self.duration.window_end_from_start(start)
    }

    #[inline]
    pub fn occupied_window_from_end(&self, end: &TimeWindow) -> TimeWindow {
        self.duration.occupied_window_from_end(end)
    }

    #[inline]
    pub fn window_start_from_end(&self, end: &TimeWindow) -> Option<TimeWindow> {
        self.duration.window_start_from_end(end)
    }

    /// Can an agent departing within `start` traverse this edge without
    /// exceeding capacity?
    pub fn is_possible_to_pass(&self, start: &TimeWindow, priority: Priority, agent: Option<AgentId>) -> bool {
        self.ledger
            .is_available(&self.occupied_window_from_start(start), priority, agent)
    }

    /// Backward counterpart of [`is_possible_to_pass`](Self::is_possible_to_pass)
    /// for an arrival within `end`.
    pub fn is_possible_to_arrive(&self, end: &TimeWindow, priority: Priority, agent: Option<AgentId>) -> bool {
        self.ledger
            .is_available(&self.occupied_window_from_end(end), priority, agent)
    }
}
