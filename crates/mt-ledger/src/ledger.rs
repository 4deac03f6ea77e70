//! The `Ledger`: reservations held by one node or edge.
//!
//! # Counters
//!
//! Besides the reservation map the ledger caches two derived quantities:
//!
//! - `occupied`: number of stored reservations, current or future;
//! - `agent_load`: reservations held per agent, for O(1) `has_agent`.
//!
//! Both are updated alongside every insert and removal.  [`validate`]
//! recomputes them from the map and reports any disagreement; [`resync`]
//! clamps them back.  A disagreement is a bug: it trips a debug assertion
//! and is logged at `error` level in release builds.
//!
//! [`validate`]: Ledger::validate
//! [`resync`]: Ledger::resync

use rustc_hash::{FxHashMap, FxHashSet};

use mt_core::{AgentId, LedgerError, LedgerResult, Priority, Stamp, TaskId, TimeWindow};

use crate::Reservation;

#[inline]
fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[derive(Clone, Debug)]
pub struct Ledger {
    capacity:     u32,
    reservations: FxHashMap<TaskId, Reservation>,
    occupied:     u32,
    agent_load:   FxHashMap<AgentId, u32>,
}

impl Ledger {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            reservations: FxHashMap::default(),
            occupied:     0,
            agent_load:   FxHashMap::default(),
        }
    }

    // ── Introspection ─────────────────────────────────────────────────────

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    pub fn get(&self, task: TaskId) -> Option<&Reservation> {
        self.reservations.get(&task)
    }

    pub fn has_task(&self, task: TaskId) -> bool {
        self.reservations.contains_key(&task)
    }

    pub fn has_agent(&self, agent: AgentId) -> bool {
        self.agent_load.get(&agent).is_some_and(|&n| n > 0)
    }

    /// Unordered iterator over all reservations.
    pub fn iter(&self) -> impl Iterator<Item = &Reservation> + '_ {
        self.reservations.values()
    }

    /// Reservations sorted by task id (stable order for dumps and tests).
    pub fn sorted(&self) -> Vec<&Reservation> {
        let mut v: Vec<_> = self.reservations.values().collect();
        v.sort_unstable_by_key(|r| r.task);
        v
    }

    // ── Capacity queries ──────────────────────────────────────────────────

    /// Number of reservations that block `(window, priority, agent)`.
    pub fn blocking_count(&self, window: &TimeWindow, priority: Priority, agent: Option<AgentId>) -> u32 {
        count_u32(self.reservations.values().filter(|r| r.blocks(window, priority, agent)).count())
    }

    /// `capacity - blocking_count`.  Negative when stronger claims already
    /// exceed capacity from the query's point of view.
    pub fn remaining_capacity(&self, window: &TimeWindow, priority: Priority, agent: Option<AgentId>) -> i64 {
        self.capacity as i64 - self.blocking_count(window, priority, agent) as i64
    }

    #[inline]
    pub fn is_available(&self, window: &TimeWindow, priority: Priority, agent: Option<AgentId>) -> bool {
        self.remaining_capacity(window, priority, agent) > 0
    }

    /// Blocking reservations counted at any time, ignoring windows.
    pub fn blocking_count_any_time(&self, priority: Priority, agent: Option<AgentId>) -> u32 {
        count_u32(self.reservations.values().filter(|r| r.outranks(priority, agent)).count())
    }

    /// `true` when untimed blocking claims already fill the capacity.
    pub fn is_saturated(&self, priority: Priority, agent: Option<AgentId>) -> bool {
        self.blocking_count_any_time(priority, agent) >= self.capacity
    }

    /// Agents holding a reservation whose window contains `t`.  An agent
    /// with several chained claims live at `t` counts once.
    pub fn active_at(&self, t: Stamp) -> u32 {
        let live: FxHashSet<AgentId> = self
            .reservations
            .values()
            .filter(|r| r.window.contains(t))
            .map(|r| r.agent)
            .collect();
        count_u32(live.len())
    }

    /// Free capacity at the instant `t`, used by the topology queries.
    #[inline]
    pub fn remaining_at(&self, t: Stamp) -> u32 {
        self.capacity.saturating_sub(self.active_at(t))
    }

    #[inline]
    pub fn occupied(&self) -> u32 {
        self.occupied
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Admit a reservation if capacity allows.
    ///
    /// Admission first asks for free capacity without the same-agent
    /// exception; failing that it retries with it, so an agent's own chained
    /// reservations at equal priority may overlap.
    pub fn put(
        &mut self,
        task:     TaskId,
        agent:    AgentId,
        priority: Priority,
        window:   TimeWindow,
    ) -> LedgerResult<()> {
        if self.reservations.contains_key(&task) {
            return Err(LedgerError::DuplicateTask(task));
        }
        if !self.is_available(&window, priority, None) {
            if !self.is_available(&window, priority, Some(agent)) {
                tracing::warn!(%task, %agent, priority, %window, "no capacity left");
                return Err(LedgerError::NoCapacity { task, window, priority });
            }
            tracing::debug!(%task, %agent, %window, "admitted over own reservation");
        }
        self.reservations.insert(task, Reservation { task, agent, priority, window });
        self.occupied += 1;
        *self.agent_load.entry(agent).or_insert(0) += 1;
        Ok(())
    }

    pub fn remove(&mut self, task: TaskId) -> LedgerResult<Reservation> {
        let r = self
            .reservations
            .remove(&task)
            .ok_or(LedgerError::UnknownTask(task))?;
        self.detach(&r);
        Ok(r)
    }

    /// Remove every reservation of `agent`.  Returns how many were removed.
    pub fn remove_agent(&mut self, agent: AgentId) -> usize {
        if !self.has_agent(agent) {
            return 0;
        }
        self.remove_where(|r| r.agent == agent)
    }

    /// Remove every reservation with priority `<= priority`.
    pub fn remove_below_priority(&mut self, priority: Priority) -> usize {
        self.remove_where(|r| r.priority <= priority)
    }

    /// Remove every reservation of `agent`, or only its `task` if given.
    pub fn release(&mut self, agent: AgentId, task: Option<TaskId>) -> usize {
        match task {
            Some(t) => match self.reservations.get(&t) {
                Some(r) if r.agent == agent => usize::from(self.remove(t).is_ok()),
                _ => 0,
            },
            None => self.remove_agent(agent),
        }
    }

    /// Change the priority of an existing reservation.  `false` if absent.
    pub fn update_priority(&mut self, task: TaskId, priority: Priority) -> bool {
        match self.reservations.get_mut(&task) {
            Some(r) => {
                r.priority = priority;
                true
            }
            None => false,
        }
    }

    fn remove_where(&mut self, pred: impl Fn(&Reservation) -> bool) -> usize {
        let doomed: Vec<TaskId> = self
            .reservations
            .values()
            .filter(|r| pred(*r))
            .map(|r| r.task)
            .collect();
        for task in &doomed {
            if let Some(r) = self.reservations.remove(task) {
                self.detach(&r);
            }
        }
        doomed.len()
    }

    /// Undo the counter contributions of a reservation already taken out of
    /// the map.
    fn detach(&mut self, r: &Reservation) {
        match self.occupied.checked_sub(1) {
            Some(n) => self.occupied = n,
            None => {
                debug_assert!(false, "occupied counter underflow");
                tracing::error!(task = %r.task, "occupied counter underflow, clamped to 0");
            }
        }
        match self.agent_load.get_mut(&r.agent) {
            Some(n) if *n > 1 => *n -= 1,
            Some(_) => {
                self.agent_load.remove(&r.agent);
            }
            None => {
                debug_assert!(false, "agent load missing for {}", r.agent);
                tracing::error!(agent = %r.agent, "agent load missing on removal");
            }
        }
    }

    // ── Consistency ───────────────────────────────────────────────────────

    /// Recompute the cached counters from the reservation set and compare.
    pub fn validate(&self) -> bool {
        if self.occupied as usize != self.reservations.len() {
            return false;
        }
        let mut load: FxHashMap<AgentId, u32> = FxHashMap::default();
        for r in self.reservations.values() {
            *load.entry(r.agent).or_insert(0) += 1;
        }
        load == self.agent_load
    }

    /// Overwrite the cached counters with values recomputed from the
    /// reservation set.  Returns `true` if they were already consistent.
    pub fn resync(&mut self) -> bool {
        let consistent = self.validate();
        if !consistent {
            tracing::error!(
                cached = self.occupied,
                actual = self.reservations.len(),
                "ledger counters out of sync, recomputing"
            );
            self.occupied = count_u32(self.reservations.len());
            self.agent_load.clear();
            for r in self.reservations.values() {
                *self.agent_load.entry(r.agent).or_insert(0) += 1;
            }
        }
        consistent
    }
}
