//! # portico-audit
//!
//! Audit trail adapters for Portico registry mutations.
//!
//! The registry mirrors every mutation through a pluggable observer seam;
//! this crate provides the adapters that turn those notifications into an
//! audit trail. The registry side never blocks on a consumer: slow sinks
//! lose records rather than stall mutations.
//!
//! ## Features
//!
//! - [`AuditRecord`]: one record per registry mutation
//! - [`TracingObserver`]: structured log lines via `tracing`
//! - [`ChannelObserver`]: best-effort delivery over a bounded channel
//! - [`MemoryObserver`]: in-memory buffer for tests and introspection
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use portico_audit::TracingObserver;
//! use portico_discovery::{ServiceRegistration, ServiceRegistry};
//!
//! let registry =
//!     ServiceRegistry::new().with_observer(Arc::new(TracingObserver::new()));
//!
//! // Every mutation now emits a structured audit line.
//! registry
//!     .register(ServiceRegistration::new("svc-a", "translation", "http://a"))
//!     .expect("register service");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod record;
pub mod sink;

// Re-export main types
pub use error::{AuditError, Result};
pub use record::AuditRecord;
pub use sink::{ChannelObserver, MemoryObserver, TracingObserver};
