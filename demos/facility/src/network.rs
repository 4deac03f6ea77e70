//! Five-stop facility layout shared by the demo.

use mt_core::{MtResult, NodeId, PassDuration};
use mt_graph::{EdgeSpec, TaskGraph};

/// Build the facility.
///
/// Returns `(graph, [dock, aisle, pick, pack, charge])`.  `pick → pack` is a
/// one-way conveyor lane; every other lane is bidirectional.
pub fn build_facility() -> MtResult<(TaskGraph, [NodeId; 5])> {
    let mut g = TaskGraph::new();

    let dock   = g.add_node_with("dock", true, 4)?;
    let aisle  = g.add_node("aisle")?;
    let pick   = g.add_node("pick")?;
    let pack   = g.add_node("pack")?;
    let charge = g.add_node_with("charge", true, 2)?;

    //                   from    to      cap  duration (min, max)
    g.add_edge(dock,   aisle,  EdgeSpec::new(2, PassDuration::between(1, 5)?))?;
    g.add_edge(aisle,  pick,   EdgeSpec::new(3, PassDuration::between(1, 2)?))?;
    g.add_edge(pick,   pack,   EdgeSpec::new(2, PassDuration::between(1, 2)?).one_way())?;
    g.add_edge(pack,   charge, EdgeSpec::new(1, PassDuration::between(1, 2)?))?;
    g.add_edge(charge, dock,   EdgeSpec::new(1, PassDuration::between(1, 2)?))?;
    g.add_edge(dock,   pack,   EdgeSpec::new(3, PassDuration::between(1, 2)?))?;

    Ok((g, [dock, aisle, pick, pack, charge]))
}
