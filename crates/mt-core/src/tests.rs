//! Unit tests for mt-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, EdgeId, MtError, NodeId, TaskId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(TaskId::INVALID.0, u64::MAX);
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn try_from_rejects_values_past_u32() {
        if let Ok(n) = usize::try_from(u64::from(u32::MAX) + 1) {
            assert!(NodeId::try_from(n).is_err());
            assert!(EdgeId::try_from(n).is_err());
        }
        // The last representable value is the sentinel, so the graph
        // refuses to hand it out.
        assert_eq!(NodeId::try_from(u32::MAX as usize).ok(), Some(NodeId::INVALID));
        assert_eq!(MtError::IdSpaceExhausted("nodes").to_string(), "too many nodes for a 32-bit id");
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(TaskId(100).to_string(), "TaskId(100)");
    }
}

#[cfg(test)]
mod bounds {
    use crate::Bound;

    #[test]
    fn finite_orders_before_unbounded() {
        assert!(Bound::At(i64::MAX) < Bound::Unbounded);
        assert!(Bound::At(3) < Bound::At(4));
    }

    #[test]
    fn arithmetic_keeps_unbounded_open() {
        assert_eq!(Bound::At(3).plus(Bound::At(4)), Bound::At(7));
        assert_eq!(Bound::At(3).plus(Bound::Unbounded), Bound::Unbounded);
        assert_eq!(Bound::Unbounded.plus(Bound::At(4)), Bound::Unbounded);
        assert_eq!(Bound::Unbounded.minus(10), Bound::Unbounded);
        assert_eq!(Bound::At(10).minus(4), Bound::At(6));
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        assert_eq!(Bound::At(i64::MAX).plus(Bound::At(1)), Bound::At(i64::MAX));
    }
}

#[cfg(test)]
mod windows {
    use crate::{Bound, TimeWindow};

    #[test]
    fn closed_overlap_counts_shared_endpoint() {
        let a = TimeWindow::new(0, 10);
        let b = TimeWindow::new(10, 20);
        let c = TimeWindow::new(11, 20);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn unbounded_overlaps_everything_after_min() {
        let open = TimeWindow::open(100);
        assert!(open.intersects(&TimeWindow::new(5_000, 6_000)));
        assert!(open.intersects(&TimeWindow::new(0, 100)));
        assert!(!open.intersects(&TimeWindow::new(0, 99)));
        assert!(open.intersects(&TimeWindow::open(0)));
    }

    #[test]
    fn checked_rejects_inverted() {
        assert!(TimeWindow::checked(5, Bound::At(4)).is_none());
        assert!(TimeWindow::checked(5, Bound::At(5)).is_some());
        assert!(TimeWindow::checked(5, Bound::Unbounded).is_some());
    }

    #[test]
    fn instant_and_width() {
        let w = TimeWindow::instant(7);
        assert!(w.contains(7));
        assert!(!w.contains(8));
        assert_eq!(w.width(), Some(0));
        assert_eq!(TimeWindow::open(0).width(), None);
        assert_eq!(TimeWindow::new(i64::MIN, i64::MAX).width(), None);
        assert_eq!(TimeWindow::new(-5, i64::MAX - 5).width(), Some(i64::MAX));
    }

    #[test]
    fn display() {
        assert_eq!(TimeWindow::new(1, 2).to_string(), "[1, 2]");
        assert_eq!(TimeWindow::open(1).to_string(), "[1, inf]");
    }
}

#[cfg(test)]
mod algebra {
    use crate::{Bound, MtError, PassDuration, TimeWindow};

    #[test]
    fn occupied_window_covers_worst_case_clearance() {
        let d = PassDuration::between(1, 2).unwrap();
        let occ = d.occupied_window_from_start(&TimeWindow::instant(0));
        assert_eq!(occ, TimeWindow::new(0, 2));
    }

    #[test]
    fn end_window_adds_min_and_max() {
        let d = PassDuration::between(1, 5).unwrap();
        let end = d.window_end_from_start(&TimeWindow::new(10, 12));
        assert_eq!(end, TimeWindow::new(11, 17));
    }

    #[test]
    fn unbounded_duration_opens_windows() {
        let d = PassDuration::new(3, Bound::Unbounded).unwrap();
        let w = TimeWindow::new(0, 1);
        assert_eq!(d.occupied_window_from_start(&w), TimeWindow::open(0));
        assert_eq!(d.window_end_from_start(&w), TimeWindow::open(3));
    }

    #[test]
    fn backward_variants() {
        let d = PassDuration::between(1, 5).unwrap();
        let end = TimeWindow::new(11, 17);
        assert_eq!(d.occupied_window_from_end(&end), TimeWindow::new(10, 17));
        assert_eq!(d.window_start_from_end(&end), Some(TimeWindow::new(10, 12)));
    }

    #[test]
    fn backward_start_window_may_not_exist() {
        let d = PassDuration::between(1, 5).unwrap();
        // Arrival spread 2 is narrower than the duration spread 4.
        assert_eq!(d.window_start_from_end(&TimeWindow::new(10, 12)), None);

        let open = PassDuration::new(1, Bound::Unbounded).unwrap();
        assert_eq!(open.window_start_from_end(&TimeWindow::new(10, 12)), None);
        assert_eq!(
            open.window_start_from_end(&TimeWindow::open(10)),
            Some(TimeWindow::open(9)),
        );
    }

    #[test]
    fn forward_then_backward_recovers_start() {
        let d = PassDuration::between(2, 3).unwrap();
        let start = TimeWindow::new(0, 4);
        let end = d.window_end_from_start(&start);
        assert_eq!(d.window_start_from_end(&end), Some(start));
    }

    #[test]
    fn invalid_durations_rejected() {
        assert!(matches!(
            PassDuration::between(5, 1),
            Err(MtError::InvalidDuration { .. })
        ));
        assert!(PassDuration::fixed(-1).is_err());
        assert!(PassDuration::fixed(0).is_ok());
    }
}

#[cfg(test)]
mod config {
    use crate::{Bound, GraphConfig};

    #[test]
    fn defaults_match_documented_values() {
        let c = GraphConfig::default();
        assert_eq!(c.node_capacity, 1);
        assert!(!c.node_stayable);
        assert_eq!(c.edge_capacity, 1);
        assert_eq!(c.edge_duration.min, 1);
        assert_eq!(c.edge_duration.max, Bound::At(1));
        assert_eq!(c.default_priority, 0);
    }
}
