//! # portico-discovery
//!
//! Service registry, health tracking, discovery, and load balancing for
//! Portico.
//!
//! This crate is the in-memory control plane the gateway routes against:
//!
//! - **Service Registry** - Register services with their capabilities and routes
//! - **Health Tracking** - Caller-reported health with read-time staleness
//! - **Discovery** - Find services by type, capability, or request path
//! - **Load Balancing** - Pick one healthy instance per request
//!
//! ## Overview
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                     Discovery Core                    │
//! │                                                       │
//! │  ┌──────────────┐    ┌──────────────┐                 │
//! │  │   Service    │───▶│   Health     │                 │
//! │  │   Registry   │    │   Tracker    │                 │
//! │  └──────┬───────┘    └──────┬───────┘                 │
//! │         │                   │                         │
//! │         ▼                   ▼                         │
//! │  ┌──────────────┐    ┌──────────────┐                 │
//! │  │  Discovery   │───▶│    Load      │                 │
//! │  │   Engine     │    │   Balancer   │                 │
//! │  └──────────────┘    └──────────────┘                 │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use portico_discovery::{
//!     DiscoveryEngine, ServiceRegistration, ServiceRegistry, ServiceStatus,
//! };
//!
//! let registry = Arc::new(ServiceRegistry::new());
//!
//! // Register a service with routes
//! registry
//!     .register(
//!         ServiceRegistration::new("translator-1", "translation", "http://translator:8080")
//!             .routes("/translate*")
//!             .capability("batch", "true"),
//!     )
//!     .expect("register service");
//!
//! // Report health
//! registry
//!     .update_health("translator-1", ServiceStatus::Healthy, None)
//!     .expect("report health");
//!
//! // Discover by type
//! let engine = DiscoveryEngine::new(Arc::clone(&registry));
//! let found = engine.by_type("translation");
//! assert_eq!(found.len(), 1);
//! ```
//!
//! ## Health Model
//!
//! The registry only stores what services report about themselves; it never
//! probes the network. A service is *effectively healthy* when its last
//! report was `healthy` and arrived within the staleness window (five
//! minutes by default). Discovery and load balancing gate on effective
//! healthiness at read time; stale entries linger until unregistered.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod balancer;
pub mod discovery;
pub mod health;
pub mod observer;
pub mod registry;
pub mod types;

// Re-export main types for convenience
pub use balancer::{
    BalanceError, FirstHealthy, LoadBalancer, Random, RoundRobin, SelectionPolicy,
};
pub use discovery::{DiscoveryConfig, DiscoveryEngine};
pub use health::{DEFAULT_STALE_AFTER_SECS, HealthTracker};
pub use observer::{MutationObserver, NoopObserver};
pub use registry::{RegistryError, ServiceRegistry};
pub use types::{
    ROUTES_CAPABILITY, RoutePattern, ServiceHealth, ServiceInfo, ServiceRegistration,
    ServiceStatus,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::balancer::{LoadBalancer, SelectionPolicy};
    pub use crate::discovery::DiscoveryEngine;
    pub use crate::health::HealthTracker;
    pub use crate::registry::ServiceRegistry;
    pub use crate::types::{ServiceInfo, ServiceRegistration, ServiceStatus};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
