//! Human-readable dumps for logs and debugging.  No state is touched.

use std::fmt::Write;

use mt_core::NodeId;

use crate::TaskGraph;

impl TaskGraph {
    fn render_node(&self, id: NodeId, by_name: bool) -> String {
        if by_name { self.node_label(id) } else { id.0.to_string() }
    }

    /// One line per node: `A: B(e0) D(e5)`.
    pub fn dump_adjacency(&self, by_name: bool) -> String {
        let mut out = String::new();
        for node in self.nodes() {
            let _ = write!(out, "{}:", self.render_node(node.id(), by_name));
            for &(next, edge) in self.neighbors(node.id()) {
                let _ = write!(out, " {}(e{})", self.render_node(next, by_name), edge.0);
            }
            out.push('\n');
        }
        out
    }

    /// One header line per edge followed by its reservations, ordered by
    /// task id.
    pub fn dump_edges(&self, by_name: bool) -> String {
        let mut out = String::new();
        for edge in self.edges() {
            let arrow = if edge.is_bidirectional() { "<->" } else { "->" };
            let _ = writeln!(
                out,
                "e{}: {} {arrow} {} cap={} dur={} held={}",
                edge.id().0,
                self.render_node(edge.from(), by_name),
                self.render_node(edge.to(), by_name),
                edge.capacity(),
                edge.duration(),
                edge.ledger().occupied(),
            );
            for r in edge.ledger().sorted() {
                let _ = writeln!(out, "    {r}");
            }
        }
        out
    }

    /// `A -> B -> C`.
    pub fn dump_path(&self, nodes: &[NodeId], by_name: bool) -> String {
        nodes
            .iter()
            .map(|&n| self.render_node(n, by_name))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
