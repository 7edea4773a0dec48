//! Mutation observer seam for the external audit sink.
//!
//! The registry mirrors every mutation through this trait. Observers are
//! invoked outside any registry lock and must not block; the registry is
//! never a client of whatever store sits behind the adapter.

use crate::types::{ServiceHealth, ServiceInfo};

/// Receives registry mutations as fire-and-forget notifications.
pub trait MutationObserver: Send + Sync {
    /// A service was registered or re-registered.
    fn on_register(&self, info: &ServiceInfo);

    /// A service was removed.
    fn on_unregister(&self, service_id: &str);

    /// A health report was stored for a service.
    fn on_health_update(&self, service_id: &str, health: &ServiceHealth);
}

/// Observer that ignores all mutations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl NoopObserver {
    /// Creates a no-op observer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MutationObserver for NoopObserver {
    fn on_register(&self, _info: &ServiceInfo) {}
    fn on_unregister(&self, _service_id: &str) {}
    fn on_health_update(&self, _service_id: &str, _health: &ServiceHealth) {}
}
