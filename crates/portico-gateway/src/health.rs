//! Fleet-wide health aggregation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use portico_discovery::{ServiceHealth, ServiceRegistry};

/// Overall gateway status derived from per-service healthiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayStatus {
    /// Every registered service is effectively healthy (or none exist).
    Healthy,
    /// At least one registered service is not effectively healthy.
    Degraded,
}

/// Per-service entry in the aggregated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceReport {
    /// Service identifier.
    pub service_id: String,
    /// Service type.
    pub service_type: String,
    /// Effective healthiness: reported healthy and seen within the window.
    pub is_healthy: bool,
    /// Raw stored health snapshot.
    pub health: ServiceHealth,
}

/// Aggregated health across all registered services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayHealth {
    /// Overall status.
    pub status: GatewayStatus,
    /// Total registered services.
    pub total: usize,
    /// Effectively healthy services.
    pub healthy: usize,
    /// Services that are not effectively healthy.
    pub unhealthy: usize,
    /// Per-service breakdown.
    pub services: Vec<ServiceReport>,
}

/// Computes fleet-wide health snapshots from the registry.
#[derive(Debug, Clone)]
pub struct HealthAggregator {
    registry: Arc<ServiceRegistry>,
}

impl HealthAggregator {
    /// Creates an aggregator over the given registry.
    #[must_use]
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self { registry }
    }

    /// Snapshot of fleet health right now.
    ///
    /// `total` always equals `healthy + unhealthy`; an empty registry is
    /// reported healthy.
    #[must_use]
    pub fn snapshot(&self) -> GatewayHealth {
        let tracker = *self.registry.tracker();
        let services: Vec<ServiceReport> = self
            .registry
            .list()
            .into_iter()
            .map(|info| ServiceReport {
                is_healthy: tracker.is_live(&info),
                service_id: info.service_id,
                service_type: info.service_type,
                health: info.health,
            })
            .collect();

        let total = services.len();
        let healthy = services.iter().filter(|s| s.is_healthy).count();
        let unhealthy = total - healthy;
        let status = if unhealthy == 0 {
            GatewayStatus::Healthy
        } else {
            GatewayStatus::Degraded
        };

        GatewayHealth {
            status,
            total,
            healthy,
            unhealthy,
            services,
        }
    }
}
