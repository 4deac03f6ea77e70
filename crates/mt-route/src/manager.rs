//! Query, book and release paths over a [`TaskGraph`].

use mt_core::{AgentId, EdgeId, MtResult, NodeId, Priority, TaskId, TimeWindow};
use mt_graph::TaskGraph;

use crate::{Path, Router, SearchQuery, WindowedDijkstra};

/// A node or edge touched by a booking, remembered for rollback.
#[derive(Debug, Clone, Copy)]
enum Element {
    Node(NodeId),
    Edge(EdgeId),
}

/// Owns a [`TaskGraph`] and a [`Router`]; every reservation-changing
/// operation goes through here.
///
/// # Type parameter
///
/// `R` picks the search algorithm at compile time.  [`WindowedDijkstra`] is
/// the default.
pub struct TaskManager<R: Router = WindowedDijkstra> {
    pub router: R,
    graph:      TaskGraph,
}

impl TaskManager<WindowedDijkstra> {
    pub fn new(graph: TaskGraph) -> Self {
        Self::with_router(graph, WindowedDijkstra)
    }
}

impl<R: Router> TaskManager<R> {
    pub fn with_router(graph: TaskGraph, router: R) -> Self {
        Self { router, graph }
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Direct access for topology edits and manual reservations.  Bookings
    /// made through here bypass rollback.
    pub fn graph_mut(&mut self) -> &mut TaskGraph {
        &mut self.graph
    }

    pub fn into_graph(self) -> TaskGraph {
        self.graph
    }

    // ── Search ────────────────────────────────────────────────────────────

    /// Run the router without touching any ledger.
    pub fn search(&self, query: &SearchQuery) -> MtResult<Option<Path>> {
        self.router.route(&self.graph, query)
    }

    /// Could *any* agent at the default priority get from `from` to `to`
    /// departing within `window`?  No agent exemption applies.
    pub fn query_path_exists(
        &self,
        window:         TimeWindow,
        from:           NodeId,
        to:             NodeId,
        hard_admission: bool,
    ) -> MtResult<bool> {
        let query = SearchQuery::new(window, from, to)
            .priority(self.graph.config().default_priority)
            .hard_admission(hard_admission);
        Ok(self.search(&query)?.is_some())
    }

    // ── Booking ───────────────────────────────────────────────────────────

    /// Find and reserve a path at the default priority.
    ///
    /// Returns `Ok(None)` when no feasible path exists; nothing is reserved
    /// in that case.
    pub fn book_path(
        &mut self,
        window: TimeWindow,
        from:   NodeId,
        to:     NodeId,
        agent:  AgentId,
        task:   TaskId,
    ) -> MtResult<Option<Path>> {
        let priority = self.graph.config().default_priority;
        self.book_path_with_priority(window, from, to, agent, task, priority)
    }

    /// Find and reserve a path for `agent` under `task`.
    ///
    /// Every edge receives its occupied window and every intermediate node
    /// its propagated arrival window.  Start and end nodes are not reserved.
    ///
    /// # Errors
    ///
    /// Unknown endpoints, or a put rejected while committing (for example a
    /// `DuplicateTask`).  Any reservation already placed for this booking is
    /// removed before the error is returned.
    pub fn book_path_with_priority(
        &mut self,
        window:   TimeWindow,
        from:     NodeId,
        to:       NodeId,
        agent:    AgentId,
        task:     TaskId,
        priority: Priority,
    ) -> MtResult<Option<Path>> {
        let query = SearchQuery::new(window, from, to).priority(priority).agent(agent);
        let Some(path) = self.search(&query)? else {
            tracing::debug!(%agent, %task, %from, %to, "booking found no path");
            return Ok(None);
        };

        let mut applied: Vec<Element> = Vec::with_capacity(2 * path.hop_count());
        if let Err(err) = self.commit(&path, agent, task, priority, &mut applied) {
            tracing::warn!(%agent, %task, error = %err, undone = applied.len(), "booking rolled back");
            self.rollback(&applied, task);
            return Err(err);
        }

        tracing::debug!(%agent, %task, hops = path.hop_count(), arrival = %path.arrival(), "path booked");
        Ok(Some(path))
    }

    fn commit(
        &mut self,
        path:     &Path,
        agent:    AgentId,
        task:     TaskId,
        priority: Priority,
        applied:  &mut Vec<Element>,
    ) -> MtResult<()> {
        let mut propagated = path.departure();
        for (i, &edge_id) in path.edges.iter().enumerate() {
            if i > 0 {
                let node = path.nodes[i];
                self.graph.put_on_node(node, task, agent, priority, propagated)?;
                applied.push(Element::Node(node));
            }
            let edge = self.graph.edge(edge_id)?;
            let occupied = edge.occupied_window_from_start(&propagated);
            let next = edge.window_end_from_start(&propagated);
            self.graph.put_on_edge(edge_id, task, agent, priority, occupied)?;
            applied.push(Element::Edge(edge_id));
            propagated = next;
        }
        Ok(())
    }

    fn rollback(&mut self, applied: &[Element], task: TaskId) {
        for &element in applied.iter().rev() {
            let undone = match element {
                Element::Node(n) => self.graph.remove_from_node(n, task),
                Element::Edge(e) => self.graph.remove_from_edge(e, task),
            };
            if let Err(err) = undone {
                tracing::error!(?element, %task, error = %err, "rollback could not remove reservation");
            }
        }
    }

    // ── Release ───────────────────────────────────────────────────────────

    /// Remove `agent`'s reservations along `path`.
    ///
    /// With `task = Some(t)` only that task's reservations go; with `None`
    /// every reservation of the agent on those elements does.  With
    /// `keep_last_node` the reservation on the final node is left in place.
    /// Returns `true` if anything was removed.  Unknown ids are reported
    /// before any reservation is touched.
    pub fn release_path(
        &mut self,
        path:           &Path,
        agent:          AgentId,
        task:           Option<TaskId>,
        keep_last_node: bool,
    ) -> MtResult<bool> {
        for &e in &path.edges {
            self.graph.edge(e)?;
        }
        for &n in &path.nodes {
            self.graph.node(n)?;
        }

        let mut removed = 0;
        for &e in &path.edges {
            removed += self.graph.edge_mut(e)?.ledger_mut().release(agent, task);
        }
        let node_count = if keep_last_node { path.nodes.len().saturating_sub(1) } else { path.nodes.len() };
        for &n in &path.nodes[..node_count] {
            removed += self.graph.node_mut(n)?.ledger_mut().release(agent, task);
        }
        tracing::debug!(%agent, ?task, removed, "path released");
        Ok(removed > 0)
    }

    /// Remove every reservation `agent` holds anywhere.
    pub fn release_agent(&mut self, agent: AgentId) -> usize {
        self.graph.release_agent(agent)
    }

    pub fn validate(&self) -> bool {
        self.graph.validate()
    }
}
