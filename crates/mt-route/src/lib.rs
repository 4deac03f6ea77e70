//! `mt-route`: constrained path search and path booking.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`router`]  | `Router` trait, `SearchQuery`, `Path`, `WindowedDijkstra`     |
//! | [`manager`] | `TaskManager<R>`: query / book / release over a `TaskGraph`   |
//! | [`shared`]  | `SharedManager<R>`: one lock around search and commit         |
//!
//! # Booking model
//!
//! ```text
//! book_path(window, from, to, agent, task):
//!   ① search:   WindowedDijkstra finds the path minimising the latest
//!                possible arrival, skipping edges (and intermediate nodes)
//!                without capacity for the propagated window.
//!   ② commit:   walk the path with the propagated window, placing one
//!                reservation per edge (occupied window) and one per
//!                intermediate node (arrival window).
//!   ③ rollback: on the first rejected put, remove everything placed in ②
//!                and return the error.  A booking is all-or-nothing.
//! ```
//!
//! `TaskManager` methods take `&mut self`, so search and commit cannot
//! interleave with another booking on the same manager.  Share one across
//! threads through [`SharedManager`], which holds its lock for the whole
//! transaction.

pub mod manager;
pub mod router;
pub mod shared;


pub use manager::TaskManager;
pub use router::{Path, Router, SearchQuery, WindowedDijkstra};
pub use shared::SharedManager;
