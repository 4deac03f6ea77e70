//! Edge pass durations and the time-window propagation algebra.
//!
//! An agent entering an edge at some instant of a start window `ws` needs
//! between `min` and `max` time units to clear it.  Four pure functions
//! derive the windows the rest of the system works with:
//!
//! ```text
//! occupied_window_from_start(ws) = [ws.min,         ws.max + max]
//! window_end_from_start(ws)      = [ws.min + min,   ws.max + max]
//! occupied_window_from_end(we)   = [we.min - min,   we.max      ]
//! window_start_from_end(we)      = [we.min - min,   we.max - max]
//! ```
//!
//! The occupied window is deliberately conservative: it covers every instant
//! the agent could possibly be on the edge.

use std::fmt;

use crate::{Bound, MtError, MtResult, Stamp, TimeWindow};

/// Time needed to traverse an edge: `[min, max]`, `max` possibly unbounded.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassDuration {
    pub min: Stamp,
    pub max: Bound,
}

impl PassDuration {
    /// Validated constructor: `0 <= min <= max`.
    pub fn new(min: Stamp, max: Bound) -> MtResult<Self> {
        if min < 0 || !max.admits(min) {
            return Err(MtError::InvalidDuration { min, max });
        }
        Ok(Self { min, max })
    }

    /// Bounded duration `[min, max]`.
    pub fn between(min: Stamp, max: Stamp) -> MtResult<Self> {
        Self::new(min, Bound::At(max))
    }

    /// Exactly `d` time units.
    pub fn fixed(d: Stamp) -> MtResult<Self> {
        Self::new(d, Bound::At(d))
    }

    // ── Forward propagation ───────────────────────────────────────────────

    /// Every instant the edge may be occupied by an agent departing within
    /// `start`.
    #[inline]
    pub fn occupied_window_from_start(&self, start: &TimeWindow) -> TimeWindow {
        TimeWindow { min: start.min, max: start.max.plus(self.max) }
    }

    /// Possible arrival times at the far end for a departure within `start`.
    #[inline]
    pub fn window_end_from_start(&self, start: &TimeWindow) -> TimeWindow {
        TimeWindow {
            min: start.min.saturating_add(self.min),
            max: start.max.plus(self.max),
        }
    }

    // ── Backward propagation ──────────────────────────────────────────────

    /// Every instant the edge may be occupied by an agent arriving within
    /// `end`.
    #[inline]
    pub fn occupied_window_from_end(&self, end: &TimeWindow) -> TimeWindow {
        TimeWindow { min: end.min.saturating_sub(self.min), max: end.max }
    }

    /// Departure window that is consistent with arriving within `end`.
    ///
    /// `None` when no such closed window exists: either the arrival window is
    /// narrower than the duration spread, or a finite arrival bound meets an
    /// unbounded duration.
    pub fn window_start_from_end(&self, end: &TimeWindow) -> Option<TimeWindow> {
        let max = match (end.max, self.max) {
            (Bound::Unbounded, _) => Bound::Unbounded,
            (Bound::At(e), Bound::At(d)) => Bound::At(e.saturating_sub(d)),
            (Bound::At(_), Bound::Unbounded) => return None,
        };
        TimeWindow::checked(end.min.saturating_sub(self.min), max)
    }
}

impl fmt::Display for PassDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.min, self.max)
    }
}
