//! Core types for service registration and discovery.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capability key whose value encodes path-prefix route patterns.
pub const ROUTES_CAPABILITY: &str = "routes";

/// Reported health status of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Service reported itself healthy.
    Healthy,
    /// Service reported itself unhealthy.
    Unhealthy,
    /// No health report received yet (initial state).
    #[default]
    Unknown,
}

impl ServiceStatus {
    /// Parses a status from its wire representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "healthy" => Some(Self::Healthy),
            "unhealthy" => Some(Self::Unhealthy),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Unhealthy => write!(f, "unhealthy"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Health snapshot for a registered service.
///
/// Health is reported by callers; the registry never probes the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    /// Reported status.
    pub status: ServiceStatus,
    /// When the status was last reported.
    pub last_check: DateTime<Utc>,
    /// Error detail accompanying an unhealthy report, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    /// Initial health for a freshly registered service.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            status: ServiceStatus::Unknown,
            last_check: Utc::now(),
            error: None,
        }
    }

    /// Builds a snapshot for a new report.
    #[must_use]
    pub fn reported(status: ServiceStatus, error: Option<String>) -> Self {
        Self {
            status,
            last_check: Utc::now(),
            error,
        }
    }
}

impl Default for ServiceHealth {
    fn default() -> Self {
        Self::unknown()
    }
}

/// A single path-prefix route pattern.
///
/// Patterns arrive on the wire as a comma-joined string under the
/// `"routes"` capability, each segment optionally ending in `*`. The
/// trailing `*` is cosmetic: matching is always prefix matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePattern {
    prefix: String,
}

impl RoutePattern {
    /// Creates a pattern from a raw segment, trimming whitespace and a
    /// trailing `*`. Returns `None` for an empty segment.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw
            .trim()
            .trim_end_matches(|c: char| c == '*' || c.is_whitespace());
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            prefix: trimmed.to_string(),
        })
    }

    /// Parses a comma-joined list of patterns, dropping empty segments.
    #[must_use]
    pub fn parse_list(joined: &str) -> Vec<Self> {
        joined.split(',').filter_map(Self::parse).collect()
    }

    /// Returns true if the request path falls under this prefix.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// The normalized prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// A registered service's identity, address, and capability metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    /// Unique service identifier (caller supplied).
    pub service_id: String,
    /// Free-form category (e.g. "translation").
    pub service_type: String,
    /// Base URL requests are routed to.
    pub base_url: String,
    /// Capability name to value. The `"routes"` key holds path patterns.
    pub capabilities: HashMap<String, String>,
    /// Latest health snapshot.
    pub health: ServiceHealth,
    /// Timestamp of the last registration or health update.
    pub last_seen: DateTime<Utc>,
}

impl ServiceInfo {
    /// Builds the initial record for a registration: unknown health,
    /// `last_seen` set to now.
    #[must_use]
    pub fn from_registration(registration: ServiceRegistration) -> Self {
        Self {
            service_id: registration.service_id,
            service_type: registration.service_type,
            base_url: registration.base_url,
            capabilities: registration.capabilities,
            health: ServiceHealth::unknown(),
            last_seen: Utc::now(),
        }
    }

    /// Returns the raw `"routes"` capability value, if present.
    #[must_use]
    pub fn routes_capability(&self) -> Option<&str> {
        self.capabilities.get(ROUTES_CAPABILITY).map(String::as_str)
    }

    /// Returns true if the service advertises the named capability.
    #[must_use]
    pub fn has_capability(&self, name: &str) -> bool {
        self.capabilities.contains_key(name)
    }
}

/// Parameters for registering (or re-registering) a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRegistration {
    /// Unique service identifier.
    pub service_id: String,
    /// Free-form category.
    pub service_type: String,
    /// Base URL for routed requests.
    pub base_url: String,
    /// Capability map; may carry the `"routes"` key.
    #[serde(default)]
    pub capabilities: HashMap<String, String>,
}

impl ServiceRegistration {
    /// Creates a registration with an empty capability map.
    #[must_use]
    pub fn new(
        service_id: impl Into<String>,
        service_type: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            service_type: service_type.into(),
            base_url: base_url.into(),
            capabilities: HashMap::new(),
        }
    }

    /// Adds a capability.
    #[must_use]
    pub fn capability(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.capabilities.insert(name.into(), value.into());
        self
    }

    /// Sets the `"routes"` capability from a comma-joined pattern list.
    #[must_use]
    pub fn routes(self, joined: impl Into<String>) -> Self {
        self.capability(ROUTES_CAPABILITY, joined)
    }
}
