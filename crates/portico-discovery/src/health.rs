//! Health tracking and the staleness predicate.
//!
//! The registry stores what callers report; nothing here probes the
//! network. A service that stops reporting is treated as unhealthy for
//! discovery once its `last_seen` falls outside the window, without its
//! stored status changing. There is no background sweep: staleness is
//! evaluated at read time and stale entries linger until unregistered.

use chrono::{DateTime, Duration, Utc};

use crate::types::{ServiceInfo, ServiceStatus};

/// Default window after which an unrefreshed service stops being discoverable.
pub const DEFAULT_STALE_AFTER_SECS: i64 = 300;

/// Evaluates effective healthiness of registered services.
///
/// A service is live iff its reported status is [`ServiceStatus::Healthy`]
/// and its `last_seen` is within the staleness window. This is the single
/// predicate gating every discovery path.
#[derive(Debug, Clone, Copy)]
pub struct HealthTracker {
    window: Duration,
}

impl HealthTracker {
    /// Creates a tracker with the default five minute window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: Duration::seconds(DEFAULT_STALE_AFTER_SECS),
        }
    }

    /// Creates a tracker with a custom staleness window.
    #[must_use]
    pub fn with_window(window: std::time::Duration) -> Self {
        Self {
            window: Duration::from_std(window).unwrap_or_else(|_| Duration::seconds(i64::MAX / 2)),
        }
    }

    /// The configured staleness window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns true if the service is effectively healthy right now.
    #[must_use]
    pub fn is_live(&self, info: &ServiceInfo) -> bool {
        self.is_live_at(info, Utc::now())
    }

    /// Staleness predicate evaluated at an explicit instant.
    #[must_use]
    pub fn is_live_at(&self, info: &ServiceInfo, now: DateTime<Utc>) -> bool {
        info.health.status == ServiceStatus::Healthy && now - info.last_seen < self.window
    }
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ServiceHealth;
    use std::collections::HashMap;

    fn make_info(status: ServiceStatus, last_seen: DateTime<Utc>) -> ServiceInfo {
        ServiceInfo {
            service_id: "svc-a".to_string(),
            service_type: "translation".to_string(),
            base_url: "http://svc-a:8080".to_string(),
            capabilities: HashMap::new(),
            health: ServiceHealth {
                status,
                last_check: last_seen,
                error: None,
            },
            last_seen,
        }
    }

    #[test]
    fn healthy_and_recent_is_live() {
        let tracker = HealthTracker::new();
        let info = make_info(ServiceStatus::Healthy, Utc::now());
        assert!(tracker.is_live(&info));
    }

    #[test]
    fn healthy_but_stale_is_not_live() {
        let tracker = HealthTracker::new();
        let old = Utc::now() - Duration::seconds(DEFAULT_STALE_AFTER_SECS + 1);
        let info = make_info(ServiceStatus::Healthy, old);
        assert!(!tracker.is_live(&info));
    }

    #[test]
    fn unknown_is_never_live() {
        let tracker = HealthTracker::new();
        let info = make_info(ServiceStatus::Unknown, Utc::now());
        assert!(!tracker.is_live(&info));
    }

    #[test]
    fn unhealthy_is_never_live() {
        let tracker = HealthTracker::new();
        let info = make_info(ServiceStatus::Unhealthy, Utc::now());
        assert!(!tracker.is_live(&info));
    }

    #[test]
    fn staleness_boundary_is_exclusive() {
        let tracker = HealthTracker::new();
        let now = Utc::now();
        let at_window = now - Duration::seconds(DEFAULT_STALE_AFTER_SECS);
        let info = make_info(ServiceStatus::Healthy, at_window);
        // Exactly at the window edge: no longer live.
        assert!(!tracker.is_live_at(&info, now));
    }

    #[test]
    fn custom_window_shrinks_liveness() {
        let tracker = HealthTracker::with_window(std::time::Duration::ZERO);
        let info = make_info(ServiceStatus::Healthy, Utc::now());
        assert!(!tracker.is_live(&info));
    }
}
