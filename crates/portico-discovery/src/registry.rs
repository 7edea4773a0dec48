//! Service registry: the source of truth for registered services.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info};

use crate::health::HealthTracker;
use crate::observer::{MutationObserver, NoopObserver};
use crate::types::{
    RoutePattern, ServiceHealth, ServiceInfo, ServiceRegistration, ServiceStatus,
};

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Service not found.
    #[error("service '{0}' not found")]
    NotFound(String),

    /// Registration was missing a required field.
    #[error("invalid registration: {0}")]
    InvalidRegistration(String),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Internal record: the service plus its pre-parsed route patterns.
///
/// Patterns are parsed once per register so path queries never re-split
/// the `"routes"` capability string.
#[derive(Debug, Clone)]
struct ServiceEntry {
    info: ServiceInfo,
    routes: Vec<RoutePattern>,
}

/// Source of truth for registered services and their health snapshots.
///
/// All state lives in a single lock-guarded map, so unregistering a
/// service removes its record and health as one unit. Mutations are
/// mirrored to the injected [`MutationObserver`] after the lock is
/// released.
pub struct ServiceRegistry {
    services: RwLock<HashMap<String, ServiceEntry>>,
    tracker: HealthTracker,
    observer: Arc<dyn MutationObserver>,
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.services.read().len())
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}

impl ServiceRegistry {
    /// Creates an empty registry with the default staleness window and no
    /// audit mirror.
    #[must_use]
    pub fn new() -> Self {
        Self {
            services: RwLock::new(HashMap::new()),
            tracker: HealthTracker::new(),
            observer: Arc::new(NoopObserver::new()),
        }
    }

    /// Replaces the health tracker (staleness window).
    #[must_use]
    pub fn with_tracker(mut self, tracker: HealthTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// Installs a mutation observer for the audit mirror.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn MutationObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The staleness predicate used by all discovery paths.
    #[must_use]
    pub fn tracker(&self) -> &HealthTracker {
        &self.tracker
    }

    /// Registers a service, overwriting any existing record with the same
    /// id (last-writer-wins; duplicates are never rejected).
    ///
    /// Health is seeded as [`ServiceStatus::Unknown`] until the first
    /// health report arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is empty.
    pub fn register(&self, registration: ServiceRegistration) -> Result<ServiceInfo> {
        validate(&registration)?;

        let routes = registration
            .capabilities
            .get(crate::types::ROUTES_CAPABILITY)
            .map(|joined| RoutePattern::parse_list(joined))
            .unwrap_or_default();

        let info = ServiceInfo::from_registration(registration);

        let replaced = {
            let mut services = self.services.write();
            services
                .insert(
                    info.service_id.clone(),
                    ServiceEntry {
                        info: info.clone(),
                        routes,
                    },
                )
                .is_some()
        };

        info!(
            service_id = %info.service_id,
            service_type = %info.service_type,
            replaced,
            "Registered service"
        );

        self.observer.on_register(&info);
        Ok(info)
    }

    /// Removes a service and its health snapshot as one unit.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the id is not registered;
    /// the registry is left unchanged in that case.
    pub fn unregister(&self, service_id: &str) -> Result<ServiceInfo> {
        let removed = {
            let mut services = self.services.write();
            services.remove(service_id)
        };

        let entry = removed.ok_or_else(|| RegistryError::NotFound(service_id.to_string()))?;

        info!(service_id = %service_id, "Unregistered service");
        self.observer.on_unregister(service_id);
        Ok(entry.info)
    }

    /// Gets a service by id.
    #[must_use]
    pub fn get(&self, service_id: &str) -> Option<ServiceInfo> {
        self.services.read().get(service_id).map(|e| e.info.clone())
    }

    /// Lists all registered services (no ordering guarantee).
    #[must_use]
    pub fn list(&self) -> Vec<ServiceInfo> {
        self.services.read().values().map(|e| e.info.clone()).collect()
    }

    /// Number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.read().len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.read().is_empty()
    }

    /// Stores a health report and refreshes `last_seen`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the service was never
    /// registered.
    pub fn update_health(
        &self,
        service_id: &str,
        status: ServiceStatus,
        error: Option<String>,
    ) -> Result<ServiceHealth> {
        let health = ServiceHealth::reported(status, error);

        {
            let mut services = self.services.write();
            let entry = services
                .get_mut(service_id)
                .ok_or_else(|| RegistryError::NotFound(service_id.to_string()))?;
            entry.info.health = health.clone();
            entry.info.last_seen = health.last_check;
        }

        debug!(service_id = %service_id, status = %status, "Stored health report");
        self.observer.on_health_update(service_id, &health);
        Ok(health)
    }

    /// Effective healthiness of a service right now.
    ///
    /// Returns false for unknown ids. This is the predicate gating every
    /// discovery path: reported healthy and seen within the window.
    #[must_use]
    pub fn is_healthy(&self, service_id: &str) -> bool {
        self.services
            .read()
            .get(service_id)
            .is_some_and(|e| self.tracker.is_live(&e.info))
    }

    /// Services whose parsed route patterns prefix-match `path`.
    ///
    /// Applies no health filtering; callers layer the health gate on top.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Vec<ServiceInfo> {
        self.services
            .read()
            .values()
            .filter(|e| e.routes.iter().any(|p| p.matches(path)))
            .map(|e| e.info.clone())
            .collect()
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(registration: &ServiceRegistration) -> Result<()> {
    if registration.service_id.trim().is_empty() {
        return Err(RegistryError::InvalidRegistration(
            "serviceId cannot be empty".to_string(),
        ));
    }
    if registration.service_type.trim().is_empty() {
        return Err(RegistryError::InvalidRegistration(
            "serviceType cannot be empty".to_string(),
        ));
    }
    if registration.base_url.trim().is_empty() {
        return Err(RegistryError::InvalidRegistration(
            "baseUrl cannot be empty".to_string(),
        ));
    }
    Ok(())
}
