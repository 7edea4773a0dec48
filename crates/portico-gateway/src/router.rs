//! Gateway routing: resolve a request to one healthy backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use portico_discovery::{BalanceError, LoadBalancer};

/// Default endpoint segment when the caller names none.
pub const DEFAULT_ENDPOINT: &str = "default";

/// Default method recorded in routing decisions.
pub const DEFAULT_METHOD: &str = "POST";

/// Errors that can occur while routing.
#[derive(Debug, Error)]
pub enum RouteError {
    /// No healthy service satisfied the request.
    #[error("no suitable service available")]
    NoSuitableService,
}

impl From<BalanceError> for RouteError {
    fn from(err: BalanceError) -> Self {
        match err {
            BalanceError::NoneAvailable => Self::NoSuitableService,
        }
    }
}

/// Result type for routing operations.
pub type Result<T> = std::result::Result<T, RouteError>;

/// A routing request: at least one of `service_type` or `path` narrows
/// the candidate set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    /// Restrict candidates to this type (case-insensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    /// Restrict candidates to services whose routes match this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Endpoint appended to the chosen base URL. Defaults to `"default"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Method recorded in the decision. Defaults to `"POST"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Opaque payload carried for the caller; never inspected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl RouteRequest {
    /// Creates a request targeting a service type.
    #[must_use]
    pub fn for_type(service_type: impl Into<String>) -> Self {
        Self {
            service_type: Some(service_type.into()),
            ..Self::default()
        }
    }

    /// Creates a request targeting a path.
    #[must_use]
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Sets the endpoint segment.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }
}

/// A routing decision: which service to call and how.
///
/// The decision is returned to the caller; the gateway never proxies the
/// request itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    /// Chosen service identifier.
    pub service_id: String,
    /// Full URL to call: base URL joined with the endpoint.
    pub service_url: String,
    /// Endpoint segment used to build the URL.
    pub endpoint: String,
    /// Method the caller should use.
    pub method: String,
    /// When the decision was made.
    pub timestamp: DateTime<Utc>,
}

/// Routes requests to one healthy service via the load balancer.
#[derive(Debug, Clone)]
pub struct GatewayRouter {
    balancer: LoadBalancer,
}

impl GatewayRouter {
    /// Creates a router over the given balancer.
    #[must_use]
    pub fn new(balancer: LoadBalancer) -> Self {
        Self { balancer }
    }

    /// Resolves a request to a routing decision.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NoSuitableService`] when no healthy candidate
    /// matches the request.
    pub fn route(&self, request: &RouteRequest) -> Result<RouteResult> {
        let picked = self
            .balancer
            .pick(request.service_type.as_deref(), request.path.as_deref())
            .map_err(|err| {
                warn!(
                    service_type = request.service_type.as_deref(),
                    path = request.path.as_deref(),
                    "Routing failed, no suitable service"
                );
                RouteError::from(err)
            })?;

        let endpoint = request.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let method = request.method.as_deref().unwrap_or(DEFAULT_METHOD);
        let service_url = join_url(&picked.base_url, endpoint);

        debug!(
            service_id = %picked.service_id,
            %service_url,
            method,
            "Routed request"
        );

        Ok(RouteResult {
            service_id: picked.service_id,
            service_url,
            endpoint: endpoint.to_string(),
            method: method.to_string(),
            timestamp: Utc::now(),
        })
    }
}

/// Joins a base URL and an endpoint with exactly one separating slash.
fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
