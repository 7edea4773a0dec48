//! Discovery queries over the service registry.

use std::sync::Arc;

use tracing::debug;

use crate::registry::ServiceRegistry;
use crate::types::ServiceInfo;

/// Configuration for discovery behavior.
#[derive(Debug, Clone, Copy)]
pub struct DiscoveryConfig {
    /// Whether path-based discovery filters by effective healthiness.
    ///
    /// Historically path queries skipped the health gate that every other
    /// discovery method applies, so the default preserves that behavior.
    /// Enable to make `by_path` consistent with `by_type`/`by_capability`.
    pub route_health_gate: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            route_health_gate: false,
        }
    }
}

/// Read-side queries: find services by type, capability, or request path.
///
/// Unknown types, capabilities, and paths yield empty results rather than
/// errors.
#[derive(Debug, Clone)]
pub struct DiscoveryEngine {
    registry: Arc<ServiceRegistry>,
    config: DiscoveryConfig,
}

impl DiscoveryEngine {
    /// Creates a discovery engine over the given registry.
    #[must_use]
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self {
            registry,
            config: DiscoveryConfig::default(),
        }
    }

    /// Creates a discovery engine with explicit configuration.
    #[must_use]
    pub fn with_config(registry: Arc<ServiceRegistry>, config: DiscoveryConfig) -> Self {
        Self { registry, config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> DiscoveryConfig {
        self.config
    }

    /// Live services whose type matches (case-insensitive exact match).
    #[must_use]
    pub fn by_type(&self, service_type: &str) -> Vec<ServiceInfo> {
        let tracker = *self.registry.tracker();
        let found: Vec<ServiceInfo> = self
            .registry
            .list()
            .into_iter()
            .filter(|s| s.service_type.eq_ignore_ascii_case(service_type))
            .filter(|s| tracker.is_live(s))
            .collect();

        debug!(service_type, count = found.len(), "Discovery by type");
        found
    }

    /// Live services advertising the named capability key.
    #[must_use]
    pub fn by_capability(&self, capability: &str) -> Vec<ServiceInfo> {
        let tracker = *self.registry.tracker();
        let found: Vec<ServiceInfo> = self
            .registry
            .list()
            .into_iter()
            .filter(|s| s.has_capability(capability))
            .filter(|s| tracker.is_live(s))
            .collect();

        debug!(capability, count = found.len(), "Discovery by capability");
        found
    }

    /// Services whose route patterns prefix-match `path`.
    ///
    /// Health filtering is governed by
    /// [`DiscoveryConfig::route_health_gate`].
    #[must_use]
    pub fn by_path(&self, path: &str) -> Vec<ServiceInfo> {
        let mut found = self.registry.match_path(path);

        if self.config.route_health_gate {
            let tracker = *self.registry.tracker();
            found.retain(|s| tracker.is_live(s));
        }

        debug!(path, count = found.len(), "Discovery by path");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HealthTracker;
    use crate::types::{ServiceRegistration, ServiceStatus};

    fn registry_with(services: &[(&str, &str)]) -> Arc<ServiceRegistry> {
        let registry = Arc::new(ServiceRegistry::new());
        for (id, service_type) in services {
            registry
                .register(ServiceRegistration::new(
                    *id,
                    *service_type,
                    format!("http://{id}:8080"),
                ))
                .ok();
        }
        registry
    }

    fn mark_healthy(registry: &ServiceRegistry, id: &str) {
        registry
            .update_health(id, ServiceStatus::Healthy, None)
            .ok();
    }

    // ==================== by_type Tests ====================

    #[test]
    fn by_type_returns_only_live_matches() {
        let registry = registry_with(&[
            ("svc-a", "translation"),
            ("svc-b", "translation"),
            ("svc-c", "analysis"),
        ]);
        mark_healthy(&registry, "svc-a");
        mark_healthy(&registry, "svc-c");

        let engine = DiscoveryEngine::new(registry);
        let found = engine.by_type("translation");

        // svc-b never reported health, so only svc-a qualifies.
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].service_id, "svc-a");
    }

    #[test]
    fn by_type_is_case_insensitive() {
        let registry = registry_with(&[("svc-a", "Translation")]);
        mark_healthy(&registry, "svc-a");

        let engine = DiscoveryEngine::new(registry);
        assert_eq!(engine.by_type("translation").len(), 1);
        assert_eq!(engine.by_type("TRANSLATION").len(), 1);
    }

    #[test]
    fn by_type_unknown_type_is_empty() {
        let registry = registry_with(&[("svc-a", "translation")]);
        mark_healthy(&registry, "svc-a");

        let engine = DiscoveryEngine::new(registry);
        assert!(engine.by_type("nonexistent").is_empty());
    }

    #[test]
    fn by_type_excludes_stale_services() {
        let registry = Arc::new(
            ServiceRegistry::new()
                .with_tracker(HealthTracker::with_window(std::time::Duration::ZERO)),
        );
        registry
            .register(ServiceRegistration::new("svc-a", "translation", "http://a"))
            .ok();
        mark_healthy(&registry, "svc-a");

        let engine = DiscoveryEngine::new(registry);
        assert!(engine.by_type("translation").is_empty());
    }

    // ==================== by_capability Tests ====================

    #[test]
    fn by_capability_matches_key_presence() {
        let registry = Arc::new(ServiceRegistry::new());
        registry
            .register(
                ServiceRegistration::new("svc-a", "translation", "http://a")
                    .capability("batch", "true"),
            )
            .ok();
        registry
            .register(ServiceRegistration::new("svc-b", "translation", "http://b"))
            .ok();
        mark_healthy(&registry, "svc-a");
        mark_healthy(&registry, "svc-b");

        let engine = DiscoveryEngine::new(registry);
        let found = engine.by_capability("batch");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].service_id, "svc-a");
    }

    #[test]
    fn by_capability_applies_health_gate() {
        let registry = Arc::new(ServiceRegistry::new());
        registry
            .register(
                ServiceRegistration::new("svc-a", "translation", "http://a")
                    .capability("batch", "true"),
            )
            .ok();

        let engine = DiscoveryEngine::new(registry);
        assert!(engine.by_capability("batch").is_empty());
    }

    // ==================== by_path Tests ====================

    #[test]
    fn by_path_prefix_matching() {
        let registry = Arc::new(ServiceRegistry::new());
        registry
            .register(
                ServiceRegistration::new("svc-a", "translation", "http://a")
                    .routes("/translate,/analyze*"),
            )
            .ok();

        let engine = DiscoveryEngine::new(registry);
        assert_eq!(engine.by_path("/translate").len(), 1);
        assert_eq!(engine.by_path("/analyze/foo").len(), 1);
        assert!(engine.by_path("/other").is_empty());
    }

    #[test]
    fn by_path_default_skips_health_gate() {
        let registry = Arc::new(ServiceRegistry::new());
        registry
            .register(
                ServiceRegistration::new("svc-a", "translation", "http://a")
                    .routes("/translate"),
            )
            .ok();

        // Health never reported: by_type hides it, by_path does not.
        let engine = DiscoveryEngine::new(registry);
        assert!(engine.by_type("translation").is_empty());
        assert_eq!(engine.by_path("/translate").len(), 1);
    }

    #[test]
    fn by_path_with_health_gate_enabled() {
        let registry = Arc::new(ServiceRegistry::new());
        registry
            .register(
                ServiceRegistration::new("svc-a", "translation", "http://a")
                    .routes("/translate"),
            )
            .ok();
        registry
            .register(
                ServiceRegistration::new("svc-b", "translation", "http://b")
                    .routes("/translate"),
            )
            .ok();
        mark_healthy(&registry, "svc-a");

        let engine = DiscoveryEngine::with_config(
            registry,
            DiscoveryConfig {
                route_health_gate: true,
            },
        );

        let found = engine.by_path("/translate");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].service_id, "svc-a");
    }

    #[test]
    fn by_path_service_without_routes_never_matches() {
        let registry = registry_with(&[("svc-a", "translation")]);
        mark_healthy(&registry, "svc-a");

        let engine = DiscoveryEngine::new(registry);
        assert!(engine.by_path("/anything").is_empty());
    }
}
