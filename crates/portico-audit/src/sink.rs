//! Audit sinks: observer adapters that deliver records somewhere.
//!
//! Each sink implements [`MutationObserver`] and is installed on the
//! registry at construction. Sinks must never block the registry; slow
//! consumers lose records rather than stall mutations.

use parking_lot::Mutex;
use portico_discovery::{MutationObserver, ServiceHealth, ServiceInfo, ServiceStatus};
use tokio::sync::mpsc;
use tracing::warn;

use crate::record::AuditRecord;

/// Sink that writes records through the `tracing` infrastructure.
///
/// Registrations and unregistrations log at info. Health updates log at
/// info when healthy and warn otherwise.
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    /// Optional prefix for all log messages.
    prefix: Option<String>,
}

impl TracingObserver {
    /// Creates a new tracing-based sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new tracing-based sink with a message prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or("AUDIT")
    }
}

impl MutationObserver for TracingObserver {
    fn on_register(&self, info: &ServiceInfo) {
        let record = AuditRecord::registered(info.clone());
        let json = record.to_json().unwrap_or_else(|_| "{}".to_string());
        let prefix = self.prefix();
        tracing::info!(
            target: "portico_audit",
            event_id = %record.event_id(),
            service_id = %info.service_id,
            record_json = %json,
            "[{prefix}] service_registered"
        );
    }

    fn on_unregister(&self, service_id: &str) {
        let record = AuditRecord::unregistered(service_id);
        let json = record.to_json().unwrap_or_else(|_| "{}".to_string());
        let prefix = self.prefix();
        tracing::info!(
            target: "portico_audit",
            event_id = %record.event_id(),
            service_id = %service_id,
            record_json = %json,
            "[{prefix}] service_unregistered"
        );
    }

    fn on_health_update(&self, service_id: &str, health: &ServiceHealth) {
        let record = AuditRecord::health_updated(service_id, health.clone());
        let json = record.to_json().unwrap_or_else(|_| "{}".to_string());
        let prefix = self.prefix();
        match health.status {
            ServiceStatus::Healthy => {
                tracing::info!(
                    target: "portico_audit",
                    event_id = %record.event_id(),
                    service_id = %service_id,
                    status = %health.status,
                    record_json = %json,
                    "[{prefix}] health_updated"
                );
            }
            ServiceStatus::Unhealthy | ServiceStatus::Unknown => {
                tracing::warn!(
                    target: "portico_audit",
                    event_id = %record.event_id(),
                    service_id = %service_id,
                    status = %health.status,
                    record_json = %json,
                    "[{prefix}] health_updated"
                );
            }
        }
    }
}

/// Sink that forwards records over a bounded channel.
///
/// Delivery is best effort: when the channel is full or the receiver is
/// gone, the record is dropped with a warning. The registry never waits
/// on a consumer.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::Sender<AuditRecord>,
}

impl ChannelObserver {
    /// Creates a channel sink with the given capacity, returning the sink
    /// and the receiving half.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<AuditRecord>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    fn deliver(&self, record: AuditRecord) {
        if let Err(err) = self.tx.try_send(record) {
            let record = match &err {
                mpsc::error::TrySendError::Full(r) | mpsc::error::TrySendError::Closed(r) => r,
            };
            warn!(
                record_type = record.record_type(),
                service_id = record.service_id(),
                "Dropping audit record, channel unavailable"
            );
        }
    }
}

impl MutationObserver for ChannelObserver {
    fn on_register(&self, info: &ServiceInfo) {
        self.deliver(AuditRecord::registered(info.clone()));
    }

    fn on_unregister(&self, service_id: &str) {
        self.deliver(AuditRecord::unregistered(service_id));
    }

    fn on_health_update(&self, service_id: &str, health: &ServiceHealth) {
        self.deliver(AuditRecord::health_updated(service_id, health.clone()));
    }
}

/// Sink that buffers records in memory, for tests and introspection.
#[derive(Debug, Default)]
pub struct MemoryObserver {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryObserver {
    /// Creates an empty in-memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records observed so far.
    #[must_use]
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().clone()
    }

    /// Number of records observed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Returns true if no records have been observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl MutationObserver for MemoryObserver {
    fn on_register(&self, info: &ServiceInfo) {
        self.records.lock().push(AuditRecord::registered(info.clone()));
    }

    fn on_unregister(&self, service_id: &str) {
        self.records.lock().push(AuditRecord::unregistered(service_id));
    }

    fn on_health_update(&self, service_id: &str, health: &ServiceHealth) {
        self.records
            .lock()
            .push(AuditRecord::health_updated(service_id, health.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_discovery::{ServiceRegistration, ServiceRegistry};
    use std::sync::Arc;

    fn sample_info() -> ServiceInfo {
        ServiceInfo::from_registration(ServiceRegistration::new(
            "svc-a",
            "translation",
            "http://svc-a:8080",
        ))
    }

    // ==================== TracingObserver Tests ====================

    #[test]
    fn tracing_observer_handles_all_mutations() {
        let observer = TracingObserver::new();
        let info = sample_info();

        observer.on_register(&info);
        observer.on_unregister("svc-a");
        observer.on_health_update(
            "svc-a",
            &ServiceHealth::reported(ServiceStatus::Healthy, None),
        );
        observer.on_health_update(
            "svc-a",
            &ServiceHealth::reported(ServiceStatus::Unhealthy, Some("oom".into())),
        );
    }

    #[test]
    fn tracing_observer_prefix() {
        let observer = TracingObserver::with_prefix("REGISTRY");
        assert_eq!(observer.prefix(), "REGISTRY");
        assert_eq!(TracingObserver::new().prefix(), "AUDIT");
    }

    // ==================== ChannelObserver Tests ====================

    #[test]
    fn channel_observer_delivers_records() {
        let (observer, mut rx) = ChannelObserver::new(8);

        observer.on_register(&sample_info());
        observer.on_unregister("svc-a");

        let first = rx.try_recv().ok().unwrap();
        assert_eq!(first.record_type(), "service_registered");
        let second = rx.try_recv().ok().unwrap();
        assert_eq!(second.record_type(), "service_unregistered");
    }

    #[test]
    fn channel_observer_drops_when_full() {
        let (observer, mut rx) = ChannelObserver::new(1);

        observer.on_unregister("svc-a");
        // Channel is full; this record is dropped, not queued.
        observer.on_unregister("svc-b");

        let delivered = rx.try_recv().ok().unwrap();
        assert_eq!(delivered.service_id(), "svc-a");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_observer_survives_closed_receiver() {
        let (observer, rx) = ChannelObserver::new(1);
        drop(rx);

        // Must not panic or block.
        observer.on_unregister("svc-a");
    }

    // ==================== MemoryObserver Tests ====================

    #[test]
    fn memory_observer_buffers_records() {
        let observer = MemoryObserver::new();
        assert!(observer.is_empty());

        observer.on_register(&sample_info());
        observer.on_health_update(
            "svc-a",
            &ServiceHealth::reported(ServiceStatus::Healthy, None),
        );
        observer.on_unregister("svc-a");

        let records = observer.records();
        assert_eq!(observer.len(), 3);
        assert_eq!(records[0].record_type(), "service_registered");
        assert_eq!(records[1].record_type(), "health_updated");
        assert_eq!(records[2].record_type(), "service_unregistered");
    }

    // ==================== Registry Integration Tests ====================

    #[test]
    fn registry_mirrors_mutations_into_sink() {
        let sink = Arc::new(MemoryObserver::new());
        let registry = ServiceRegistry::new().with_observer(sink.clone());

        registry
            .register(ServiceRegistration::new("svc-a", "translation", "http://a"))
            .ok();
        registry
            .update_health("svc-a", ServiceStatus::Healthy, None)
            .ok();
        registry.unregister("svc-a").ok();

        let records = sink.records();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.service_id() == "svc-a"));
    }
}
