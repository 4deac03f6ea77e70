//! Routing trait and the default time-window Dijkstra.
//!
//! # Metric
//!
//! The quantity minimised at each node is the *latest* plausible arrival
//! time: the upper bound of the arrival window obtained by propagating the
//! departure window along the path.  Edge "weights" are therefore not fixed
//! scalars; whether an edge may be relaxed at all depends on the ledger state
//! for the window the agent would occupy it in.
//!
//! Durations are non-negative, so a node's latest arrival never decreases
//! along a path and the usual Dijkstra finality argument holds: once popped
//! with its current key a node is settled.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use mt_core::{AgentId, Bound, EdgeId, MtError, MtResult, NodeId, Priority, TimeWindow};
use mt_graph::TaskGraph;

// ── Path ──────────────────────────────────────────────────────────────────────

/// A route through the topology with its propagated time windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Visited nodes, `from` first and `to` last.
    pub nodes:   Vec<NodeId>,
    /// `edges[i]` joins `nodes[i]` and `nodes[i + 1]`.
    pub edges:   Vec<EdgeId>,
    /// `windows[i]` is the window in which the agent is at `nodes[i]`;
    /// `windows[0]` is the departure window.
    pub windows: Vec<TimeWindow>,
}

impl Path {
    /// Zero-hop path at `node`.
    pub fn trivial(node: NodeId, window: TimeWindow) -> Self {
        Self { nodes: vec![node], edges: vec![], windows: vec![window] }
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn end(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn departure(&self) -> TimeWindow {
        self.windows[0]
    }

    pub fn arrival(&self) -> TimeWindow {
        self.windows[self.windows.len() - 1]
    }

    /// `true` if start and end coincide.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes strictly between start and end.
    pub fn intermediate_nodes(&self) -> &[NodeId] {
        match self.nodes.len() {
            0..=2 => &[],
            n => &self.nodes[1..n - 1],
        }
    }

    /// The leading part of the path up to and including `nodes[last]`.
    /// Used to release the portion an agent has already travelled.
    pub fn prefix(&self, last: usize) -> Path {
        let last = last.min(self.nodes.len() - 1);
        Path {
            nodes:   self.nodes[..=last].to_vec(),
            edges:   self.edges[..last].to_vec(),
            windows: self.windows[..=last].to_vec(),
        }
    }
}

// ── SearchQuery ───────────────────────────────────────────────────────────────

/// Parameters of one constrained search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery {
    /// Departure window at `from`.
    pub window:         TimeWindow,
    pub from:           NodeId,
    pub to:             NodeId,
    pub priority:       Priority,
    /// Agent on whose behalf the search runs; its own equal-priority
    /// reservations are not counted against it.  `None` counts everything.
    pub agent:          Option<AgentId>,
    /// Also skip every edge whose untimed blocking claims already fill its
    /// capacity.
    pub hard_admission: bool,
}

impl SearchQuery {
    pub fn new(window: TimeWindow, from: NodeId, to: NodeId) -> Self {
        Self { window, from, to, priority: 0, agent: None, hard_admission: false }
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn agent(mut self, agent: AgentId) -> Self {
        self.agent = Some(agent);
        self
    }

    pub fn hard_admission(mut self, on: bool) -> Self {
        self.hard_admission = on;
        self
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable search engine.
///
/// Implementations must never mutate reservations; they only read ledgers.
/// `Send + Sync` so a manager can be shared behind a lock across threads.
pub trait Router: Send + Sync {
    /// Find a feasible path for `query`.
    ///
    /// `Ok(None)` means no feasible path exists, a normal outcome.  Errors
    /// are reserved for unknown endpoints and internal consistency faults.
    fn route(&self, graph: &TaskGraph, query: &SearchQuery) -> MtResult<Option<Path>>;
}

// ── WindowedDijkstra ──────────────────────────────────────────────────────────

/// Dijkstra over latest-arrival time with ledger-gated relaxation.
///
/// An edge `u → v` is relaxed only if
///
/// - with `hard_admission`, the edge is not saturated by untimed claims;
/// - the edge is available for its occupied window given `best[u]`;
/// - when `v` is neither endpoint of the query, node `v` is available for
///   the candidate arrival window (nodes are reserved on booking too);
/// - the candidate's latest arrival strictly improves on `best[v]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowedDijkstra;

impl Router for WindowedDijkstra {
    fn route(&self, graph: &TaskGraph, query: &SearchQuery) -> MtResult<Option<Path>> {
        windowed_dijkstra(graph, query)
    }
}

fn windowed_dijkstra(graph: &TaskGraph, q: &SearchQuery) -> MtResult<Option<Path>> {
    graph.node(q.from)?;
    graph.node(q.to)?;
    if q.from == q.to {
        return Ok(Some(Path::trivial(q.from, q.window)));
    }

    let n = graph.node_count();
    // best[v] = arrival window with the smallest known latest arrival.
    let mut best: Vec<Option<TimeWindow>> = vec![None; n];
    // pred[v] = (previous node, edge used) on the best path to v.
    let mut pred: Vec<Option<(NodeId, EdgeId)>> = vec![None; n];

    best[q.from.index()] = Some(q.window);

    // Min-heap on (latest arrival, node); NodeId breaks ties deterministically.
    let mut heap: BinaryHeap<Reverse<(Bound, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((q.window.max, q.from)));

    while let Some(Reverse((key, u))) = heap.pop() {
        let Some(wu) = best[u.index()] else { continue };
        // Skip stale heap entries.
        if key != wu.max {
            continue;
        }

        for &(v, e) in graph.neighbors(u) {
            let edge = graph.edge(e)?;
            if q.hard_admission && edge.ledger().is_saturated(q.priority, q.agent) {
                continue;
            }
            if !edge.is_possible_to_pass(&wu, q.priority, q.agent) {
                continue;
            }

            let candidate = edge.window_end_from_start(&wu);
            let improves = best[v.index()].is_none_or(|b| candidate.max < b.max);
            if !improves {
                continue;
            }
            if v != q.to
                && v != q.from
                && !graph.node(v)?.ledger().is_available(&candidate, q.priority, q.agent)
            {
                continue;
            }

            best[v.index()] = Some(candidate);
            pred[v.index()] = Some((u, e));
            heap.push(Reverse((candidate.max, v)));
        }
    }

    if best[q.to.index()].is_none() {
        tracing::debug!(from = %q.from, to = %q.to, window = %q.window, "no feasible path");
        return Ok(None);
    }
    reconstruct(q, &best, &pred).map(Some)
}

pub(crate) fn reconstruct(
    q:    &SearchQuery,
    best: &[Option<TimeWindow>],
    pred: &[Option<(NodeId, EdgeId)>],
) -> MtResult<Path> {
    let mut nodes = vec![q.to];
    let mut edges = Vec::new();
    let mut cur = q.to;
    while let Some((prev, edge)) = pred[cur.index()] {
        nodes.push(prev);
        edges.push(edge);
        cur = prev;
        if nodes.len() > best.len() {
            debug_assert!(false, "predecessor links form a cycle");
            tracing::error!(from = %q.from, to = %q.to, "predecessor links form a cycle");
            return Err(MtError::Consistency("predecessor links form a cycle".into()));
        }
    }
    nodes.reverse();
    edges.reverse();

    if nodes[0] != q.from {
        debug_assert!(false, "path starts at {} instead of {}", nodes[0], q.from);
        tracing::error!(expected = %q.from, found = %nodes[0], "path does not start at origin");
        return Err(MtError::Consistency(format!(
            "reconstructed path starts at {} instead of {}",
            nodes[0], q.from
        )));
    }

    let windows = nodes
        .iter()
        .map(|n| {
            best[n.index()]
                .ok_or_else(|| MtError::Consistency(format!("node {n} on path was never reached")))
        })
        .collect::<MtResult<Vec<_>>>()?;

    Ok(Path { nodes, edges, windows })
}
