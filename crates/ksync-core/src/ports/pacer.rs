//! Pacing port
//!
//! The remote service enforces an unpublished rate limit. Adapters call
//! [`IPacer::pause`] after each state-mutating request; the wait blocks the
//! sequential run and is not cancellable.

/// Strategy for waiting between remote calls
#[async_trait::async_trait]
pub trait IPacer: Send + Sync {
    /// Waits before the next remote call may be issued
    async fn pause(&self);
}

/// Pacer that never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacer;

#[async_trait::async_trait]
impl IPacer for NoPacer {
    async fn pause(&self) {}
}
