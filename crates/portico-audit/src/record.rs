//! Audit record types.
//!
//! One record per registry mutation, carrying enough to reconstruct the
//! registry state offline.

use crate::error::Result;
use chrono::{DateTime, Utc};
use portico_discovery::{ServiceHealth, ServiceInfo};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registry mutation, as seen by the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditRecord {
    /// A service was registered or re-registered.
    ServiceRegistered {
        /// Unique record identifier.
        event_id: Uuid,
        /// When the mutation was observed.
        timestamp: DateTime<Utc>,
        /// Full registered snapshot.
        service: ServiceInfo,
    },

    /// A service was removed from the registry.
    ServiceUnregistered {
        /// Unique record identifier.
        event_id: Uuid,
        /// When the mutation was observed.
        timestamp: DateTime<Utc>,
        /// Identifier of the removed service.
        service_id: String,
    },

    /// A health report was stored for a service.
    HealthUpdated {
        /// Unique record identifier.
        event_id: Uuid,
        /// When the mutation was observed.
        timestamp: DateTime<Utc>,
        /// Identifier of the reporting service.
        service_id: String,
        /// The stored health snapshot.
        health: ServiceHealth,
    },
}

impl AuditRecord {
    /// Creates a registration record.
    #[must_use]
    pub fn registered(service: ServiceInfo) -> Self {
        Self::ServiceRegistered {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            service,
        }
    }

    /// Creates an unregistration record.
    #[must_use]
    pub fn unregistered(service_id: impl Into<String>) -> Self {
        Self::ServiceUnregistered {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            service_id: service_id.into(),
        }
    }

    /// Creates a health update record.
    #[must_use]
    pub fn health_updated(service_id: impl Into<String>, health: ServiceHealth) -> Self {
        Self::HealthUpdated {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            service_id: service_id.into(),
            health,
        }
    }

    /// Returns the record ID.
    #[must_use]
    pub const fn event_id(&self) -> Uuid {
        match self {
            Self::ServiceRegistered { event_id, .. }
            | Self::ServiceUnregistered { event_id, .. }
            | Self::HealthUpdated { event_id, .. } => *event_id,
        }
    }

    /// Returns the record timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ServiceRegistered { timestamp, .. }
            | Self::ServiceUnregistered { timestamp, .. }
            | Self::HealthUpdated { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the identifier of the service the record concerns.
    #[must_use]
    pub fn service_id(&self) -> &str {
        match self {
            Self::ServiceRegistered { service, .. } => &service.service_id,
            Self::ServiceUnregistered { service_id, .. }
            | Self::HealthUpdated { service_id, .. } => service_id,
        }
    }

    /// Returns the record type as a string.
    #[must_use]
    pub const fn record_type(&self) -> &'static str {
        match self {
            Self::ServiceRegistered { .. } => "service_registered",
            Self::ServiceUnregistered { .. } => "service_unregistered",
            Self::HealthUpdated { .. } => "health_updated",
        }
    }

    /// Serializes the record to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_discovery::{ServiceRegistration, ServiceStatus};

    fn sample_info() -> ServiceInfo {
        ServiceInfo::from_registration(ServiceRegistration::new(
            "svc-a",
            "translation",
            "http://svc-a:8080",
        ))
    }

    #[test]
    fn registered_record_carries_snapshot() {
        let record = AuditRecord::registered(sample_info());
        assert_eq!(record.record_type(), "service_registered");
        assert_eq!(record.service_id(), "svc-a");
    }

    #[test]
    fn unregistered_record() {
        let record = AuditRecord::unregistered("svc-a");
        assert_eq!(record.record_type(), "service_unregistered");
        assert_eq!(record.service_id(), "svc-a");
    }

    #[test]
    fn health_updated_record() {
        let health = ServiceHealth::reported(ServiceStatus::Unhealthy, Some("oom".into()));
        let record = AuditRecord::health_updated("svc-a", health);
        assert_eq!(record.record_type(), "health_updated");
        assert_eq!(record.service_id(), "svc-a");
    }

    #[test]
    fn record_timestamps_are_recent() {
        let record = AuditRecord::unregistered("svc-a");
        let diff = Utc::now().signed_duration_since(record.timestamp());
        assert!(diff.num_seconds() < 1);
    }

    #[test]
    fn records_serialize_with_type_tag() {
        let records = vec![
            AuditRecord::registered(sample_info()),
            AuditRecord::unregistered("svc-a"),
            AuditRecord::health_updated(
                "svc-a",
                ServiceHealth::reported(ServiceStatus::Healthy, None),
            ),
        ];

        for record in records {
            let json = record.to_json().ok().unwrap();
            assert!(json.contains(&format!("\"type\":\"{}\"", record.record_type())));
        }
    }

    #[test]
    fn record_serialization_roundtrip() {
        let record = AuditRecord::registered(sample_info());
        let json = record.to_json().ok().unwrap();
        let parsed: AuditRecord = serde_json::from_str(&json).ok().unwrap();
        assert_eq!(parsed.event_id(), record.event_id());
        assert_eq!(parsed.service_id(), record.service_id());
    }
}
