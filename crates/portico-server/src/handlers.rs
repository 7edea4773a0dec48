//! HTTP request handlers for the registry and gateway API.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use portico_discovery::{ServiceRegistration, ServiceStatus};
use portico_gateway::RouteRequest;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{
    CapabilityResponse, GatewayHealthResponse, LoadBalanceResponse, RouteDiscoveryResponse,
    RouteResponse, ServiceAck, ServiceHealthResponse, ServiceListResponse, ServiceResponse,
    UpdateHealthRequest, UpdateHealthResponse,
};

/// Handle POST /service/register - register or re-register a service.
pub async fn register_service(
    State(state): State<Arc<AppState>>,
    Json(registration): Json<ServiceRegistration>,
) -> ApiResult<Json<ServiceAck>> {
    let info = state.registry().register(registration)?;
    Ok(Json(ServiceAck {
        success: true,
        service_id: info.service_id,
        message: "service registered".to_string(),
    }))
}

/// Handle DELETE `/service/{serviceId}` - remove a service and its health.
pub async fn unregister_service(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<String>,
) -> ApiResult<Json<ServiceAck>> {
    state.registry().unregister(&service_id)?;
    Ok(Json(ServiceAck {
        success: true,
        service_id,
        message: "service unregistered".to_string(),
    }))
}

/// Handle GET /service/list - list all registered services.
pub async fn list_services(State(state): State<Arc<AppState>>) -> Json<ServiceListResponse> {
    let services = state.registry().list();
    let message = format!("{} services registered", services.len());
    Json(ServiceListResponse::new(services, message))
}

/// Handle GET `/service/{serviceId}` - get a single service.
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<String>,
) -> ApiResult<Json<ServiceResponse>> {
    let service = state
        .registry()
        .get(&service_id)
        .ok_or_else(|| ApiError::NotFound("service".to_string(), service_id))?;
    Ok(Json(ServiceResponse {
        success: true,
        service,
    }))
}

/// Handle GET `/service/discover/{serviceType}` - healthy services by type.
pub async fn discover_by_type(
    State(state): State<Arc<AppState>>,
    Path(service_type): Path<String>,
) -> Json<ServiceListResponse> {
    let services = state.discovery().by_type(&service_type);
    let message = format!("{} healthy {service_type} services", services.len());
    Json(ServiceListResponse::new(services, message))
}

/// Handle GET `/service/capability/{capability}` - healthy services by capability.
pub async fn discover_by_capability(
    State(state): State<Arc<AppState>>,
    Path(capability): Path<String>,
) -> Json<CapabilityResponse> {
    let services = state.discovery().by_capability(&capability);
    let message = format!("{} services with capability {capability}", services.len());
    Json(CapabilityResponse {
        success: true,
        count: services.len(),
        capability,
        services,
        message,
    })
}

/// Handle POST /service/health - store a health report.
pub async fn update_health(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateHealthRequest>,
) -> ApiResult<Json<UpdateHealthResponse>> {
    let status = ServiceStatus::parse(&request.status)
        .ok_or_else(|| ApiError::Validation(format!("invalid status: {}", request.status)))?;

    let health = state
        .registry()
        .update_health(&request.service_id, status, request.error)?;

    Ok(Json(UpdateHealthResponse {
        success: true,
        service_id: request.service_id,
        health,
        message: "health updated".to_string(),
    }))
}

/// Handle GET `/service/{serviceId}/health` - stored health plus the
/// effective healthiness flag.
pub async fn get_service_health(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<String>,
) -> ApiResult<Json<ServiceHealthResponse>> {
    let service = state
        .registry()
        .get(&service_id)
        .ok_or_else(|| ApiError::NotFound("service".to_string(), service_id.clone()))?;
    let is_healthy = state.registry().is_healthy(&service_id);

    Ok(Json(ServiceHealthResponse {
        success: true,
        service_id,
        is_healthy,
        health: service.health,
        message: "health retrieved".to_string(),
    }))
}

/// Handle POST /gateway/route - resolve a request to one healthy backend.
pub async fn route_request(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> ApiResult<Json<RouteResponse>> {
    let result = state.router().route(&request)?;
    Ok(Json(RouteResponse {
        success: true,
        service_id: result.service_id,
        service_url: result.service_url,
        endpoint: result.endpoint,
        method: result.method,
        timestamp: result.timestamp,
        message: "request routed".to_string(),
    }))
}

/// Handle GET `/gateway/load-balance/{serviceType}` - pick one healthy
/// instance of a type.
pub async fn load_balance(
    State(state): State<Arc<AppState>>,
    Path(service_type): Path<String>,
) -> ApiResult<Json<LoadBalanceResponse>> {
    let service = state.balancer().pick(Some(&service_type), None)?;
    Ok(Json(LoadBalanceResponse {
        success: true,
        service,
        message: format!("selected instance of {service_type}"),
    }))
}

/// Handle GET /gateway/health - aggregated fleet health.
pub async fn gateway_health(State(state): State<Arc<AppState>>) -> Json<GatewayHealthResponse> {
    let snapshot = state.aggregator().snapshot();
    let message = format!(
        "{} of {} services healthy",
        snapshot.healthy, snapshot.total
    );
    Json(GatewayHealthResponse {
        status: snapshot.status,
        total_services: snapshot.total,
        healthy_services: snapshot.healthy,
        unhealthy_services: snapshot.unhealthy,
        services: snapshot.services,
        message,
    })
}

/// Handle GET `/gateway/discover/route/{*path}` - services matching a path.
pub async fn discover_by_route(
    State(state): State<Arc<AppState>>,
    Path(rest): Path<String>,
) -> Json<RouteDiscoveryResponse> {
    // The wildcard capture drops the leading slash; put it back so the
    // query matches patterns as registered.
    let path = format!("/{}", rest.trim_start_matches('/'));
    let matching_services = state.discovery().by_path(&path);
    let message = format!("{} services match {path}", matching_services.len());
    Json(RouteDiscoveryResponse {
        path,
        count: matching_services.len(),
        matching_services,
        message,
    })
}
