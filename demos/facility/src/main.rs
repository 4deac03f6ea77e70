//! facility: walk-through of the reservation graph on a five-stop layout.
//!
//! Books a few robot trips, shows a rejected one, releases an agent and
//! prints the ledgers along the way.  Set `RUST_LOG=debug` to see every
//! put and rollback.

mod network;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use mt_core::{AgentId, TaskId, TimeWindow};
use mt_route::{Path, TaskManager};

use network::build_facility;

fn report(manager: &TaskManager, label: &str, booked: Option<&Path>) {
    match booked {
        Some(path) => println!(
            "  {label}: {}  arrive {}",
            manager.graph().dump_path(&path.nodes, true),
            path.arrival()
        ),
        None => println!("  {label}: no feasible path"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let (graph, [dock, aisle, pick, pack, charge]) = build_facility().context("building facility")?;
    println!("=== facility: {} stops, {} lanes ===", graph.node_count(), graph.edge_count());
    print!("{}", graph.dump_adjacency(true));
    println!();

    let mut manager = TaskManager::new(graph);
    let now = TimeWindow::instant(0);

    // 1. dock → aisle has room for two robots at once.
    println!("Bookings at t=0:");
    for n in 1..=3u32 {
        let booked = manager.book_path(now, dock, aisle, AgentId(n), TaskId(n.into()))?;
        report(&manager, &format!("robot {n} dock -> aisle"), booked.as_ref());
    }

    // 2. Later trips: robot 4 takes the direct lane to pack, robot 5 goes
    //    through aisle to pick and reserves aisle on the way.
    let later = TimeWindow::new(10, 12);
    let trip = manager
        .book_path(later, dock, pack, AgentId(4), TaskId(4))?
        .context("robot 4 should find a route to pack")?;
    report(&manager, "robot 4 dock -> pack", Some(&trip));
    let to_pick = manager.book_path(later, dock, pick, AgentId(5), TaskId(5))?;
    report(&manager, "robot 5 dock -> pick", to_pick.as_ref());
    println!();

    print!("{}", manager.graph().dump_edges(true));
    println!();

    // 3. Free robot 1 and ask again.
    let freed = manager.release_agent(AgentId(1));
    println!("Released robot 1 ({freed} reservation(s)).");
    println!(
        "  dock -> aisle at t=0 now possible: {}",
        manager.query_path_exists(now, dock, aisle, false)?
    );
    println!(
        "  dock -> aisle at t=0 with hard admission: {}",
        manager.query_path_exists(now, dock, aisle, true)?
    );

    // 4. Robot 4 finished; keep its claim on the destination only.
    manager.release_path(&trip, AgentId(4), Some(TaskId(4)), true)?;
    println!("Robot 4 trip released.");
    println!();

    let g = manager.graph();
    println!("charge reachable from pick: {}", g.reachable(pick, charge, None)?);
    println!("components (bare topology):    {}", g.connected_components(None));
    println!("components (free lanes, t=0):  {}", g.connected_components(Some(0)));
    println!("ledgers consistent:            {}", manager.validate());

    Ok(())
}
