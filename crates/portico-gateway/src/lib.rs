//! # portico-gateway
//!
//! Request routing and health aggregation over the Portico registry.
//!
//! The gateway makes routing decisions but never proxies traffic: given a
//! service type or a request path, it picks one healthy backend through the
//! load balancer and hands the caller a fully joined URL to invoke.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use portico_discovery::{
//!     LoadBalancer, ServiceRegistration, ServiceRegistry, ServiceStatus,
//! };
//! use portico_gateway::{GatewayRouter, RouteRequest};
//!
//! let registry = Arc::new(ServiceRegistry::new());
//! registry
//!     .register(ServiceRegistration::new(
//!         "translator-1",
//!         "translation",
//!         "http://translator:8080",
//!     ))
//!     .expect("register");
//! registry
//!     .update_health("translator-1", ServiceStatus::Healthy, None)
//!     .expect("report health");
//!
//! let router = GatewayRouter::new(LoadBalancer::new(registry));
//! let decision = router
//!     .route(&RouteRequest::for_type("translation").endpoint("translate"))
//!     .expect("route");
//! assert_eq!(decision.service_url, "http://translator:8080/translate");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod health;
pub mod router;

// Re-export main types
pub use health::{GatewayHealth, GatewayStatus, HealthAggregator, ServiceReport};
pub use router::{
    DEFAULT_ENDPOINT, DEFAULT_METHOD, GatewayRouter, RouteError, RouteRequest, RouteResult,
};
