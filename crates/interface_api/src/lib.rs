//! HTTP API Layer
//!
//! REST API of the DAVIVIENDA quote adapter using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: quotes, application tracking, health
//! - **Middleware**: tracing, CORS, audit logging
//! - **DTOs**: request/response bodies
//! - **Error Handling**: consistent `{error, message, details}` bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(config, registry, port);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_application::{ApplicationPort, ApplicationService};
use domain_quote::InstitutionRegistry;

use crate::config::ApiConfig;
use crate::handlers::{applications, health, quotes};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<InstitutionRegistry>,
    pub applications: ApplicationService,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(
        config: ApiConfig,
        registry: InstitutionRegistry,
        applications: Arc<dyn ApplicationPort>,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            applications: ApplicationService::new(applications),
            config: Arc::new(config),
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/", get(health::health_check))
        .route("/ready", get(health::readiness_check));

    let quote_routes = Router::new()
        .route("/", post(quotes::create_quote))
        .route("/institutions", get(quotes::list_institutions))
        .route("/:institution", post(quotes::create_institution_quote));

    let application_routes = Router::new()
        .route(
            "/",
            get(applications::list_applications).post(applications::create_application),
        )
        .route(
            "/:id",
            get(applications::get_application).delete(applications::delete_application),
        )
        .route("/:id/status", patch(applications::update_status))
        .route("/user/:user_id", get(applications::list_by_user))
        .route("/user/:user_id/count", get(applications::count_by_user))
        .route("/status/:status", get(applications::list_by_status));

    let api_routes = Router::new()
        .nest("/health", health_routes)
        .nest("/quotes", quote_routes)
        .nest("/applications", application_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
