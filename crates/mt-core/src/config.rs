//! Defaults applied by the short build and booking entry points.

use crate::{PassDuration, Priority};

/// Defaults for a task graph.
///
/// Typically loaded from a TOML/JSON file by the application crate (enable
/// the `serde` feature) and handed to `TaskGraph::with_config`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphConfig {
    /// Capacity of nodes created with `add_node(name)`.  Default: 1.
    pub node_capacity: u32,

    /// Whether nodes created with `add_node(name)` may be occupied
    /// indefinitely.  Default: false.
    pub node_stayable: bool,

    /// Capacity used by the `add_road*` helpers.  Default: 1.
    pub edge_capacity: u32,

    /// Pass duration used by the `add_road*` helpers.  Default: exactly 1.
    pub edge_duration: PassDuration,

    /// Priority of `book_path` and `query_path_exists`.  Default: 0.
    pub default_priority: Priority,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_capacity:    1,
            node_stayable:    false,
            edge_capacity:    1,
            edge_duration:    PassDuration { min: 1, max: crate::Bound::At(1) },
            default_priority: 0,
        }
    }
}
