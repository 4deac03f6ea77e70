//! Thread-safe handle around a [`TaskManager`].
//!
//! Queries take the read lock and may run concurrently; bookings and
//! releases take the write lock for the whole search-then-commit sequence,
//! so no other booking can claim capacity between the search and the puts.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use mt_core::{AgentId, MtResult, NodeId, Priority, TaskId, TimeWindow};

use crate::{Path, Router, TaskManager, WindowedDijkstra};

/// Cheaply cloneable shared [`TaskManager`].
pub struct SharedManager<R: Router = WindowedDijkstra> {
    inner: Arc<RwLock<TaskManager<R>>>,
}

impl<R: Router> Clone for SharedManager<R> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<R: Router> SharedManager<R> {
    pub fn new(manager: TaskManager<R>) -> Self {
        Self { inner: Arc::new(RwLock::new(manager)) }
    }

    // A panic in another holder leaves the ledgers consistent (every
    // mutation either completes or rolls back before returning), so a
    // poisoned lock is recovered rather than propagated.
    fn read(&self) -> RwLockReadGuard<'_, TaskManager<R>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TaskManager<R>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with shared access.
    pub fn with<T>(&self, f: impl FnOnce(&TaskManager<R>) -> T) -> T {
        f(&self.read())
    }

    /// Run `f` with exclusive access.
    pub fn with_mut<T>(&self, f: impl FnOnce(&mut TaskManager<R>) -> T) -> T {
        f(&mut self.write())
    }

    pub fn query_path_exists(
        &self,
        window:         TimeWindow,
        from:           NodeId,
        to:             NodeId,
        hard_admission: bool,
    ) -> MtResult<bool> {
        self.read().query_path_exists(window, from, to, hard_admission)
    }

    pub fn book_path(
        &self,
        window: TimeWindow,
        from:   NodeId,
        to:     NodeId,
        agent:  AgentId,
        task:   TaskId,
    ) -> MtResult<Option<Path>> {
        self.write().book_path(window, from, to, agent, task)
    }

    pub fn book_path_with_priority(
        &self,
        window:   TimeWindow,
        from:     NodeId,
        to:       NodeId,
        agent:    AgentId,
        task:     TaskId,
        priority: Priority,
    ) -> MtResult<Option<Path>> {
        self.write().book_path_with_priority(window, from, to, agent, task, priority)
    }

    pub fn release_path(
        &self,
        path:           &Path,
        agent:          AgentId,
        task:           Option<TaskId>,
        keep_last_node: bool,
    ) -> MtResult<bool> {
        self.write().release_path(path, agent, task, keep_last_node)
    }

    pub fn release_agent(&self, agent: AgentId) -> usize {
        self.write().release_agent(agent)
    }

    pub fn validate(&self) -> bool {
        self.read().validate()
    }
}
