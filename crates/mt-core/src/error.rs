//! Error types shared by every `mt-*` crate.
//!
//! [`MtError`] covers structural faults in the topology, wraps capacity
//! rejections from a ledger, and reports internal consistency violations.
//! "No feasible path" is not an error anywhere in the workspace; searches
//! return `None` for it.

use thiserror::Error;

use crate::{Bound, EdgeId, NodeId, Priority, Stamp, TaskId, TimeWindow};

/// Rejections from a single node or edge reservation ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("task {0} already holds a reservation here")]
    DuplicateTask(TaskId),

    #[error("no capacity for task {task} in window {window} at priority {priority}")]
    NoCapacity {
        task:     TaskId,
        window:   TimeWindow,
        priority: Priority,
    },

    #[error("task {0} holds no reservation here")]
    UnknownTask(TaskId),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// The top-level error type for the task graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MtError {
    #[error("node {0} not found")]
    UnknownNode(NodeId),

    #[error("edge {0} not found")]
    UnknownEdge(EdgeId),

    #[error("no node named {0:?}")]
    UnknownNodeName(String),

    #[error("node name {0:?} is already taken")]
    DuplicateNodeName(String),

    #[error("nodes {a} and {b} are already connected")]
    DuplicateEdge { a: NodeId, b: NodeId },

    #[error("edge would connect {0} to itself")]
    SelfLoop(NodeId),

    #[error("capacity must be positive")]
    ZeroCapacity,

    #[error("too many {0} for a 32-bit id")]
    IdSpaceExhausted(&'static str),

    #[error("invalid pass duration ({min}, {max})")]
    InvalidDuration { min: Stamp, max: Bound },

    #[error("reservation rejected on {element}: {source}")]
    Ledger {
        element: String,
        #[source]
        source:  LedgerError,
    },

    #[error("consistency violation: {0}")]
    Consistency(String),
}

impl MtError {
    /// Attach the node/edge label to a ledger rejection.
    pub fn ledger(element: impl Into<String>, source: LedgerError) -> Self {
        MtError::Ledger { element: element.into(), source }
    }

    /// `true` for rejections caused by exhausted capacity.
    pub fn is_capacity(&self) -> bool {
        matches!(self, MtError::Ledger { source: LedgerError::NoCapacity { .. }, .. })
    }
}

/// Shorthand result type for all `mt-*` crates.
pub type MtResult<T> = Result<T, MtError>;
