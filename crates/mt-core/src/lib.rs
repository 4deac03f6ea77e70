//! `mt-core`: foundational types for the multi-agent task graph.
//!
//! This crate is a dependency of every other `mt-*` crate.  It has no `mt-*`
//! dependencies and only `thiserror` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`, `AgentId`, `TaskId`, `Priority`   |
//! | [`time`]        | `Stamp`, `Bound`, `TimeWindow`                        |
//! | [`duration`]    | `PassDuration` and the window propagation algebra     |
//! | [`config`]      | `GraphConfig` build and booking defaults              |
//! | [`error`]       | `MtError`, `LedgerError`, `MtResult`                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod duration;
pub mod error;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::GraphConfig;
pub use duration::PassDuration;
pub use error::{LedgerError, LedgerResult, MtError, MtResult};
pub use ids::{AgentId, EdgeId, NodeId, Priority, TaskId};
pub use time::{Bound, Stamp, TimeWindow};
