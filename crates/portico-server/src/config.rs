//! Server configuration.

use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the Portico server.
#[derive(Debug, Clone)]
pub struct PorticoConfig {
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// CORS allowed origins (empty means all).
    pub cors_origins: Vec<String>,
    /// Window after which an unrefreshed service stops being discoverable.
    pub stale_after: Duration,
    /// Whether path-based discovery filters by effective healthiness.
    pub route_health_gate: bool,
}

impl Default for PorticoConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080"
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8080))),
            cors_origins: Vec::new(),
            stale_after: Duration::from_secs(300),
            route_health_gate: false,
        }
    }
}

impl PorticoConfig {
    /// Create a new configuration with the specified bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Self::default()
        }
    }

    /// Add a CORS allowed origin.
    #[must_use]
    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origins.push(origin.into());
        self
    }

    /// Set the staleness window.
    #[must_use]
    pub const fn with_stale_after(mut self, window: Duration) -> Self {
        self.stale_after = window;
        self
    }

    /// Enable or disable the health gate on path-based discovery.
    #[must_use]
    pub const fn with_route_health_gate(mut self, enabled: bool) -> Self {
        self.route_health_gate = enabled;
        self
    }
}
