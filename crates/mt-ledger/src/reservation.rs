//! A single time-windowed claim on node or edge capacity.

use std::fmt;

use mt_core::{AgentId, Priority, TaskId, TimeWindow};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reservation {
    pub task:     TaskId,
    pub agent:    AgentId,
    pub priority: Priority,
    pub window:   TimeWindow,
}

impl Reservation {
    /// Does this reservation block a query for `window` at `priority` made on
    /// behalf of `agent`?
    ///
    /// `agent = None` disables the same-agent exception entirely.
    #[inline]
    pub fn blocks(&self, window: &TimeWindow, priority: Priority, agent: Option<AgentId>) -> bool {
        self.window.intersects(window) && self.outranks(priority, agent)
    }

    /// The priority half of [`blocks`](Self::blocks), ignoring time.
    #[inline]
    pub fn outranks(&self, priority: Priority, agent: Option<AgentId>) -> bool {
        if priority > self.priority {
            return false;
        }
        !(agent == Some(self.agent) && priority == self.priority)
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<T#{}, A#{}, P{}, {}>",
            self.task.0, self.agent.0, self.priority, self.window
        )
    }
}
