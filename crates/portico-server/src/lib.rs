//! # portico-server
//!
//! HTTP API server for the Portico registry and gateway.
//!
//! Exposes the registry's lifecycle operations, discovery queries, and
//! gateway routing over a JSON API. All endpoints share one in-memory
//! registry; the server owns no persistent state.
//!
//! ## Endpoints
//!
//! Under `/service`: register, list, get, unregister, discover by type or
//! capability, report and read health. Under `/gateway`: route a request,
//! load-balance a type, aggregate fleet health, discover by path.
//!
//! ## Example
//!
//! ```rust,no_run
//! use portico_server::{PorticoConfig, PorticoServer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = PorticoConfig::default();
//!     let addr = config.bind_addr;
//!     let server = PorticoServer::new(config);
//!     if let Err(e) = server.serve(addr).await {
//!         eprintln!("server error: {e}");
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod types;

// Re-export main types
pub use config::PorticoConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use server::PorticoServer;
pub use state::AppState;
