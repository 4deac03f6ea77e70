//! Time model: integer stamps, optionally unbounded upper bounds, and closed
//! time windows.
//!
//! # Design
//!
//! A timestamp is a plain `i64` (`Stamp`); the unit is whatever the
//! orchestrator uses (seconds, ticks, milliseconds).  All arithmetic is exact.
//!
//! "No upper bound" is the explicit [`Bound::Unbounded`] variant rather than
//! a numeric sentinel, so adding a finite duration to an open bound stays
//! open and never overflows.  `Bound` orders every finite value before
//! `Unbounded`, which is what the path search relies on when it minimises the
//! latest arrival time.

use std::fmt;

/// An absolute point in time.
pub type Stamp = i64;

// ── Bound ─────────────────────────────────────────────────────────────────────

/// Upper end of a window or duration: a finite stamp or "no upper bound".
///
/// Variant order matters: the derived `Ord` places every `At(_)` before
/// `Unbounded`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bound {
    At(Stamp),
    Unbounded,
}

impl Bound {
    #[inline]
    pub fn is_bounded(self) -> bool {
        matches!(self, Bound::At(_))
    }

    /// The finite value, if any.
    #[inline]
    pub fn finite(self) -> Option<Stamp> {
        match self {
            Bound::At(t) => Some(t),
            Bound::Unbounded => None,
        }
    }

    /// `self + rhs`.  Unbounded on either side yields `Unbounded`.
    #[inline]
    pub fn plus(self, rhs: Bound) -> Bound {
        match (self, rhs) {
            (Bound::At(a), Bound::At(b)) => Bound::At(a.saturating_add(b)),
            _ => Bound::Unbounded,
        }
    }

    /// `self - rhs` for a finite `rhs`.  An open bound stays open.
    #[inline]
    pub fn minus(self, rhs: Stamp) -> Bound {
        match self {
            Bound::At(a) => Bound::At(a.saturating_sub(rhs)),
            Bound::Unbounded => Bound::Unbounded,
        }
    }

    /// `true` if the finite stamp `t` lies at or below this bound.
    #[inline]
    pub fn admits(self, t: Stamp) -> bool {
        match self {
            Bound::At(b) => t <= b,
            Bound::Unbounded => true,
        }
    }
}

impl From<Stamp> for Bound {
    #[inline]
    fn from(t: Stamp) -> Bound {
        Bound::At(t)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::At(t) => write!(f, "{t}"),
            Bound::Unbounded => f.write_str("inf"),
        }
    }
}

// ── TimeWindow ────────────────────────────────────────────────────────────────

/// Closed interval `[min, max]`.  `max` may be unbounded.
///
/// Construction keeps `min <= max`: [`TimeWindow::new`] asserts it in debug
/// builds and clamps `max` up to `min` otherwise; [`TimeWindow::checked`]
/// returns `None` instead.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    pub min: Stamp,
    pub max: Bound,
}

impl TimeWindow {
    /// Bounded window `[min, max]`.
    pub fn new(min: Stamp, max: Stamp) -> Self {
        debug_assert!(min <= max, "TimeWindow min must not exceed max");
        Self { min, max: Bound::At(max.max(min)) }
    }

    /// Window `[min, inf]`.
    pub fn open(min: Stamp) -> Self {
        Self { min, max: Bound::Unbounded }
    }

    /// Degenerate window `[t, t]`.
    pub fn instant(t: Stamp) -> Self {
        Self { min: t, max: Bound::At(t) }
    }

    /// `Some` only if `min <= max`.
    pub fn checked(min: Stamp, max: Bound) -> Option<Self> {
        max.admits(min).then_some(Self { min, max })
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.max.is_bounded()
    }

    /// Closed-interval overlap: shared endpoints count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &TimeWindow) -> bool {
        self.max.admits(other.min) && other.max.admits(self.min)
    }

    #[inline]
    pub fn contains(&self, t: Stamp) -> bool {
        self.min <= t && self.max.admits(t)
    }

    /// `max - min`, or `None` for an unbounded window or a width that does
    /// not fit in a `Stamp`.
    pub fn width(&self) -> Option<Stamp> {
        self.max.finite().and_then(|m| m.checked_sub(self.min))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
