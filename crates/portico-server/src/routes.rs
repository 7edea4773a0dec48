//! Route configuration for the registry and gateway API.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    discover_by_capability, discover_by_route, discover_by_type, gateway_health, get_service,
    get_service_health, list_services, load_balance, register_service, route_request,
    unregister_service, update_health,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(state.config());

    let service_routes = Router::new()
        // Registration
        .route("/register", post(register_service))
        .route("/list", get(list_services))
        // Discovery
        .route("/discover/{serviceType}", get(discover_by_type))
        .route("/capability/{capability}", get(discover_by_capability))
        // Health reporting
        .route("/health", post(update_health))
        // Id-addressed lookups
        .route("/{serviceId}", get(get_service).delete(unregister_service))
        .route("/{serviceId}/health", get(get_service_health));

    let gateway_routes = Router::new()
        .route("/route", post(route_request))
        .route("/load-balance/{serviceType}", get(load_balance))
        .route("/health", get(gateway_health))
        .route("/discover/route/{*path}", get(discover_by_route));

    Router::new()
        .nest("/service", service_routes)
        .nest("/gateway", gateway_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &crate::config::PorticoConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
