//! Wire types for the API server.
//!
//! Response envelopes carry `success` plus a human-readable `message`;
//! field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use portico_discovery::{ServiceHealth, ServiceInfo};
use portico_gateway::{GatewayStatus, ServiceReport};
use serde::{Deserialize, Serialize};

/// Acknowledgement for register/unregister operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAck {
    /// Always true on the success path.
    pub success: bool,
    /// Service the operation applied to.
    pub service_id: String,
    /// Human-readable outcome.
    pub message: String,
}

/// A list of services with its count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Matching services.
    pub services: Vec<ServiceInfo>,
    /// Number of matching services.
    pub count: usize,
    /// Human-readable outcome.
    pub message: String,
}

impl ServiceListResponse {
    /// Wraps a service list with its count and a message.
    #[must_use]
    pub fn new(services: Vec<ServiceInfo>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            count: services.len(),
            services,
            message: message.into(),
        }
    }
}

/// A single service lookup result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    /// Always true on the success path.
    pub success: bool,
    /// The requested service.
    pub service: ServiceInfo,
}

/// Capability discovery result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Capability that was queried.
    pub capability: String,
    /// Services advertising the capability.
    pub services: Vec<ServiceInfo>,
    /// Number of matching services.
    pub count: usize,
    /// Human-readable outcome.
    pub message: String,
}

/// Body for POST /service/health.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHealthRequest {
    /// Reporting service.
    pub service_id: String,
    /// Reported status: healthy, unhealthy, or unknown (case-insensitive).
    pub status: String,
    /// Optional error detail for unhealthy reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of storing a health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHealthResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Reporting service.
    pub service_id: String,
    /// The stored health snapshot.
    pub health: ServiceHealth,
    /// Human-readable outcome.
    pub message: String,
}

/// A service's stored health plus its effective healthiness.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealthResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Queried service.
    pub service_id: String,
    /// Effective healthiness: reported healthy and seen within the window.
    pub is_healthy: bool,
    /// Raw stored health snapshot.
    pub health: ServiceHealth,
    /// Human-readable outcome.
    pub message: String,
}

/// A routing decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Chosen service.
    pub service_id: String,
    /// Full URL the caller should invoke.
    pub service_url: String,
    /// Endpoint segment used to build the URL.
    pub endpoint: String,
    /// Method the caller should use.
    pub method: String,
    /// When the decision was made.
    pub timestamp: DateTime<Utc>,
    /// Human-readable outcome.
    pub message: String,
}

/// A load-balancing pick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalanceResponse {
    /// Always true on the success path.
    pub success: bool,
    /// The picked service.
    pub service: ServiceInfo,
    /// Human-readable outcome.
    pub message: String,
}

/// Aggregated gateway health.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayHealthResponse {
    /// Overall status: healthy iff every service is effectively healthy.
    pub status: GatewayStatus,
    /// Total registered services.
    pub total_services: usize,
    /// Effectively healthy services.
    pub healthy_services: usize,
    /// Services that are not effectively healthy.
    pub unhealthy_services: usize,
    /// Per-service breakdown.
    pub services: Vec<ServiceReport>,
    /// Human-readable outcome.
    pub message: String,
}

/// Path-based discovery result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDiscoveryResponse {
    /// Path that was queried.
    pub path: String,
    /// Services whose route patterns match the path.
    pub matching_services: Vec<ServiceInfo>,
    /// Number of matching services.
    pub count: usize,
    /// Human-readable outcome.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_health_request_wire_shape() {
        let request: UpdateHealthRequest = serde_json::from_str(
            r#"{"serviceId":"svc-a","status":"Healthy","error":null}"#,
        )
        .unwrap();
        assert_eq!(request.service_id, "svc-a");
        assert_eq!(request.status, "Healthy");
        assert!(request.error.is_none());
    }

    #[test]
    fn list_response_counts_services() {
        let response = ServiceListResponse::new(Vec::new(), "no services");
        assert!(response.success);
        assert_eq!(response.count, 0);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""count":0"#));
    }

    #[test]
    fn ack_serializes_camel_case() {
        let ack = ServiceAck {
            success: true,
            service_id: "svc-a".to_string(),
            message: "registered".to_string(),
        };
        let json = serde_json::to_string(&ack).unwrap();
        assert!(json.contains("serviceId"));
    }
}
