//! The `TaskGraph` topology store.
//!
//! # Data layout
//!
//! Nodes and edges live in `Vec`s indexed by their ids.  Adjacency is one
//! `Vec<(NodeId, EdgeId)>` per node listing every neighbour reachable by one
//! hop; a bidirectional edge appears in both endpoints' lists.  A side map
//! keyed by the unordered endpoint pair rejects parallel edges in O(1) and
//! answers [`TaskGraph::edge_between`].

use rustc_hash::FxHashMap;

use mt_core::{
    AgentId, EdgeId, GraphConfig, LedgerError, MtError, MtResult, NodeId, Priority, TaskId,
    TimeWindow,
};

use crate::{Edge, EdgeSpec, Node};

/// Nodes, edges and adjacency for one facility, plus their reservations.
///
/// # Example
///
/// ```
/// use mt_core::PassDuration;
/// use mt_graph::{EdgeSpec, TaskGraph};
///
/// let mut g = TaskGraph::new();
/// let a = g.add_node("A").unwrap();
/// let b = g.add_node("B").unwrap();
/// g.add_edge(a, b, EdgeSpec::new(2, PassDuration::between(1, 5).unwrap())).unwrap();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.edge_count(), 1);
/// assert_eq!(g.neighbors(b).len(), 1); // bidirectional
/// ```
#[derive(Clone, Debug, Default)]
pub struct TaskGraph {
    config: GraphConfig,
    nodes:  Vec<Node>,
    edges:  Vec<Edge>,
    adj:    Vec<Vec<(NodeId, EdgeId)>>,
    names:  FxHashMap<String, NodeId>,
    pairs:  FxHashMap<(NodeId, NodeId), EdgeId>,
}

/// Order-independent key for an endpoint pair.
#[inline]
fn pair_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // ── Building ──────────────────────────────────────────────────────────

    /// Add a node with the configured default capacity and stayable flag.
    pub fn add_node(&mut self, name: &str) -> MtResult<NodeId> {
        self.add_node_with(name, self.config.node_stayable, self.config.node_capacity)
    }

    pub fn add_node_with(&mut self, name: &str, stayable: bool, capacity: u32) -> MtResult<NodeId> {
        if self.names.contains_key(name) {
            return Err(MtError::DuplicateNodeName(name.to_owned()));
        }
        if capacity == 0 {
            return Err(MtError::ZeroCapacity);
        }
        let id = NodeId::try_from(self.nodes.len())
            .ok()
            .filter(|&id| id != NodeId::INVALID)
            .ok_or(MtError::IdSpaceExhausted("nodes"))?;
        self.nodes.push(Node::new(id, name.to_owned(), stayable, capacity));
        self.adj.push(Vec::new());
        self.names.insert(name.to_owned(), id);
        tracing::debug!(%id, name, capacity, "node added");
        Ok(id)
    }

    /// Add an edge `from → to` (and `to → from` if bidirectional).
    ///
    /// # Errors
    ///
    /// `UnknownNode` for a missing endpoint, `SelfLoop`, `ZeroCapacity`, or
    /// `DuplicateEdge` if the two nodes are already joined in either
    /// direction.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, spec: EdgeSpec) -> MtResult<EdgeId> {
        self.node(from)?;
        self.node(to)?;
        if from == to {
            return Err(MtError::SelfLoop(from));
        }
        if spec.capacity == 0 {
            return Err(MtError::ZeroCapacity);
        }
        let key = pair_key(from, to);
        if self.pairs.contains_key(&key) {
            return Err(MtError::DuplicateEdge { a: from, b: to });
        }

        let id = EdgeId::try_from(self.edges.len())
            .ok()
            .filter(|&id| id != EdgeId::INVALID)
            .ok_or(MtError::IdSpaceExhausted("edges"))?;
        self.edges.push(Edge::new(id, from, to, spec));
        self.adj[from.index()].push((to, id));
        if spec.bidirectional {
            self.adj[to.index()].push((from, id));
        }
        self.pairs.insert(key, id);
        tracing::debug!(%id, %from, %to, capacity = spec.capacity, "edge added");
        Ok(id)
    }

    /// Bidirectional edge with the configured default capacity and duration.
    pub fn add_road(&mut self, a: NodeId, b: NodeId) -> MtResult<EdgeId> {
        let spec = EdgeSpec::new(self.config.edge_capacity, self.config.edge_duration);
        self.add_edge(a, b, spec)
    }

    /// Name-keyed [`add_edge`](Self::add_edge).
    pub fn add_edge_by_name(&mut self, from: &str, to: &str, spec: EdgeSpec) -> MtResult<EdgeId> {
        let from = self.node_id(from)?;
        let to = self.node_id(to)?;
        self.add_edge(from, to, spec)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_id(&self, name: &str) -> MtResult<NodeId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| MtError::UnknownNodeName(name.to_owned()))
    }

    pub fn node(&self, id: NodeId) -> MtResult<&Node> {
        self.nodes.get(id.index()).ok_or(MtError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> MtResult<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(MtError::UnknownNode(id))
    }

    pub fn edge(&self, id: EdgeId) -> MtResult<&Edge> {
        self.edges.get(id.index()).ok_or(MtError::UnknownEdge(id))
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> MtResult<&mut Edge> {
        self.edges.get_mut(id.index()).ok_or(MtError::UnknownEdge(id))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// `(neighbour, edge)` pairs leaving `node`.  Empty for an unknown id.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[(NodeId, EdgeId)] {
        self.adj.get(node.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The edge joining `a` and `b` in either direction, if any.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.pairs.get(&pair_key(a, b)).copied()
    }

    /// Display name of a node, or its id when unknown.
    pub fn node_label(&self, id: NodeId) -> String {
        self.nodes
            .get(id.index())
            .map_or_else(|| id.to_string(), |n| n.name().to_owned())
    }

    fn edge_label(&self, id: EdgeId) -> String {
        match self.edges.get(id.index()) {
            Some(e) => format!("{id} ({}-{})", self.node_label(e.from()), self.node_label(e.to())),
            None => id.to_string(),
        }
    }

    // ── Reservations ──────────────────────────────────────────────────────

    pub fn put_on_node(
        &mut self,
        node:     NodeId,
        task:     TaskId,
        agent:    AgentId,
        priority: Priority,
        window:   TimeWindow,
    ) -> MtResult<()> {
        let label = self.node_label(node);
        self.node_mut(node)?
            .ledger_mut()
            .put(task, agent, priority, window)
            .map_err(|e| MtError::ledger(format!("node {label}"), e))
    }

    pub fn put_on_edge(
        &mut self,
        edge:     EdgeId,
        task:     TaskId,
        agent:    AgentId,
        priority: Priority,
        window:   TimeWindow,
    ) -> MtResult<()> {
        let label = self.edge_label(edge);
        self.edge_mut(edge)?
            .ledger_mut()
            .put(task, agent, priority, window)
            .map_err(|e| MtError::ledger(format!("edge {label}"), e))
    }

    pub fn remove_from_node(&mut self, node: NodeId, task: TaskId) -> MtResult<()> {
        let label = self.node_label(node);
        self.node_mut(node)?
            .ledger_mut()
            .remove(task)
            .map(|_| ())
            .map_err(|e: LedgerError| MtError::ledger(format!("node {label}"), e))
    }

    pub fn remove_from_edge(&mut self, edge: EdgeId, task: TaskId) -> MtResult<()> {
        let label = self.edge_label(edge);
        self.edge_mut(edge)?
            .ledger_mut()
            .remove(task)
            .map(|_| ())
            .map_err(|e: LedgerError| MtError::ledger(format!("edge {label}"), e))
    }

    /// Remove all reservations of `agent` on every node and edge.
    /// Returns how many were removed.
    pub fn release_agent(&mut self, agent: AgentId) -> usize {
        let on_nodes: usize = self.nodes.iter_mut().map(|n| n.ledger_mut().remove_agent(agent)).sum();
        let on_edges: usize = self.edges.iter_mut().map(|e| e.ledger_mut().remove_agent(agent)).sum();
        tracing::debug!(%agent, on_nodes, on_edges, "released agent");
        on_nodes + on_edges
    }

    /// Remove every reservation with priority `<= priority` everywhere.
    pub fn remove_below_priority(&mut self, priority: Priority) -> usize {
        let on_nodes: usize = self.nodes.iter_mut().map(|n| n.ledger_mut().remove_below_priority(priority)).sum();
        let on_edges: usize = self.edges.iter_mut().map(|e| e.ledger_mut().remove_below_priority(priority)).sum();
        on_nodes + on_edges
    }

    /// Re-prioritise `task` wherever it holds a reservation.  Returns the
    /// number of nodes and edges updated.
    pub fn update_task_priority(&mut self, task: TaskId, priority: Priority) -> usize {
        let on_nodes = self.nodes.iter_mut().filter_map(|n| n.ledger_mut().update_priority(task, priority).then_some(())).count();
        let on_edges = self.edges.iter_mut().filter_map(|e| e.ledger_mut().update_priority(task, priority).then_some(())).count();
        on_nodes + on_edges
    }

    /// Does `agent` hold any reservation anywhere?
    pub fn has_agent(&self, agent: AgentId) -> bool {
        self.nodes.iter().any(|n| n.ledger().has_agent(agent))
            || self.edges.iter().any(|e| e.ledger().has_agent(agent))
    }

    // ── Consistency ───────────────────────────────────────────────────────

    /// Every ledger's cached counters agree with its reservation set.
    pub fn validate(&self) -> bool {
        let mut ok = true;
        for n in &self.nodes {
            if !n.ledger().validate() {
                tracing::error!(node = n.name(), "node ledger counters inconsistent");
                ok = false;
            }
        }
        for e in &self.edges {
            if !e.ledger().validate() {
                tracing::error!(edge = %e.id(), "edge ledger counters inconsistent");
                ok = false;
            }
        }
        ok
    }

    /// Recompute every ledger's counters.  Returns `true` if nothing needed
    /// fixing.
    pub fn resync(&mut self) -> bool {
        let nodes_ok = self.nodes.iter_mut().fold(true, |ok, n| n.ledger_mut().resync() && ok);
        let edges_ok = self.edges.iter_mut().fold(true, |ok, e| e.ledger_mut().resync() && ok);
        nodes_ok && edges_ok
    }
}
