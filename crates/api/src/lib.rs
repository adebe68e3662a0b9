//! HTTP API server with observability for the DNS registry.
//!
//! Provides REST endpoints for domain and service management,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use event_store::EventStore;
use metrics_exporter_prometheus::PrometheusHandle;
use projections::{DomainDetailView, DomainListView, ProjectionProcessor};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::domains::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: EventStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/domains", post(routes::domains::register::<S>))
        .route("/domains", get(routes::domains::list::<S>))
        .route("/domains/{name}", get(routes::domains::get::<S>))
        .route(
            "/domains/{name}/services/manual",
            post(routes::domains::add_manual_service::<S>),
        )
        .route(
            "/domains/{name}/services/googlesuite",
            post(routes::domains::add_google_suite_service::<S>),
        )
        .route(
            "/domains/{name}/services/{service_id}",
            delete(routes::domains::remove_service::<S>),
        )
        .route("/domains/{name}/events", get(routes::domains::events::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state with the registry and read models.
pub fn create_default_state<S: EventStore + Clone + 'static>(
    event_store: S,
) -> (Arc<AppState<S>>, Arc<ProjectionProcessor<S>>) {
    use domain::DomainRegistry;
    use projections::Projection;

    let registry = DomainRegistry::new(event_store.clone());

    let domain_list = Arc::new(DomainListView::new());
    let domain_detail = Arc::new(DomainDetailView::new());

    let mut processor = ProjectionProcessor::new(event_store.clone());
    processor.register(Box::new(domain_list.as_ref().clone()) as Box<dyn Projection>);
    processor.register(Box::new(domain_detail.as_ref().clone()) as Box<dyn Projection>);
    let processor = Arc::new(processor);

    let state = Arc::new(AppState {
        registry,
        domain_list,
        domain_detail,
        event_store,
        projection_processor: processor.clone(),
    });

    (state, processor)
}
