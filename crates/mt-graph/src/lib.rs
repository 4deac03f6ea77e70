//! `mt-graph`: facility topology and its reservation ledgers.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`element`] | `Node`, `Edge`, `EdgeSpec`                                  |
//! | [`graph`]   | `TaskGraph`: dense node/edge store, adjacency, name index   |
//! | [`queries`] | Reachability and connected components (iterative DFS)       |
//! | [`dump`]    | Plain-text rendering of adjacency, edges and paths          |
//!
//! # Topology model
//!
//! Nodes and edges get dense ids in creation order and are never removed;
//! only their reservations change.  A bidirectional edge is a single
//! `EdgeId` listed in both endpoints' adjacency lists, so both directions of
//! travel share one capacity ledger.  At most one edge may join any
//! unordered pair of nodes.

pub mod dump;
pub mod element;
pub mod graph;
pub mod queries;


pub use element::{Edge, EdgeSpec, Node};
pub use graph::TaskGraph;
