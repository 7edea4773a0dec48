//! Shared state for the API server.

use std::sync::Arc;

use portico_audit::TracingObserver;
use portico_discovery::{
    DiscoveryConfig, DiscoveryEngine, HealthTracker, LoadBalancer, MutationObserver,
    ServiceRegistry,
};
use portico_gateway::{GatewayRouter, HealthAggregator};

use crate::config::PorticoConfig;

/// Shared state wired from the configuration: the registry plus the
/// read-side components layered over it.
#[derive(Debug, Clone)]
pub struct AppState {
    config: PorticoConfig,
    registry: Arc<ServiceRegistry>,
    discovery: DiscoveryEngine,
    balancer: LoadBalancer,
    router: GatewayRouter,
    aggregator: HealthAggregator,
}

impl AppState {
    /// Creates state with the default audit sink (structured tracing).
    #[must_use]
    pub fn new(config: PorticoConfig) -> Self {
        Self::with_observer(config, Arc::new(TracingObserver::new()))
    }

    /// Creates state with an explicit audit sink.
    #[must_use]
    pub fn with_observer(config: PorticoConfig, observer: Arc<dyn MutationObserver>) -> Self {
        let registry = Arc::new(
            ServiceRegistry::new()
                .with_tracker(HealthTracker::with_window(config.stale_after))
                .with_observer(observer),
        );
        let discovery = DiscoveryEngine::with_config(
            Arc::clone(&registry),
            DiscoveryConfig {
                route_health_gate: config.route_health_gate,
            },
        );
        let balancer = LoadBalancer::new(Arc::clone(&registry));
        let router = GatewayRouter::new(balancer.clone());
        let aggregator = HealthAggregator::new(Arc::clone(&registry));

        Self {
            config,
            registry,
            discovery,
            balancer,
            router,
            aggregator,
        }
    }

    /// The server configuration.
    #[must_use]
    pub fn config(&self) -> &PorticoConfig {
        &self.config
    }

    /// The service registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }

    /// The discovery engine.
    #[must_use]
    pub fn discovery(&self) -> &DiscoveryEngine {
        &self.discovery
    }

    /// The load balancer.
    #[must_use]
    pub fn balancer(&self) -> &LoadBalancer {
        &self.balancer
    }

    /// The gateway router.
    #[must_use]
    pub fn router(&self) -> &GatewayRouter {
        &self.router
    }

    /// The fleet health aggregator.
    #[must_use]
    pub fn aggregator(&self) -> &HealthAggregator {
        &self.aggregator
    }
}
