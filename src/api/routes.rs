//! Application route configuration.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    auth_handler, catalog_handler, method_not_allowed, payment_handler, wallet_handler,
};
use super::middleware::session_auth;
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::MAX_BODY_BYTES;

/// Prefix of the serverless-function URLs the storefront scripts still call
const LEGACY_PREFIX: &str = "/.netlify/functions";

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let session = middleware::from_fn_with_state(state.clone(), session_auth);

    let catalog = Router::new()
        .route(
            "/api/products",
            get(catalog_handler::list_products).fallback(method_not_allowed),
        )
        .route(
            "/api/products/:slug",
            get(catalog_handler::get_product).fallback(method_not_allowed),
        )
        .route(
            "/api/site-config",
            get(catalog_handler::site_config).fallback(method_not_allowed),
        )
        .route(
            "/api/recharge-packages",
            get(catalog_handler::recharge_packages).fallback(method_not_allowed),
        );

    // Session check wraps the handlers only, so a wrong method still gets 405
    let wallet = Router::new()
        .route(
            "/api/wallet/balance",
            get(wallet_handler::balance)
                .route_layer(session.clone())
                .fallback(method_not_allowed),
        )
        .route(
            "/api/wallet/deduct",
            post(wallet_handler::deduct)
                .route_layer(session.clone())
                .fallback(method_not_allowed),
        );

    let checkout = Router::new()
        .route(
            "/api/auth/google",
            post(auth_handler::google_login).fallback(method_not_allowed),
        )
        .route(
            "/api/payments",
            post(payment_handler::submit_payment).fallback(method_not_allowed),
        );

    let legacy = Router::new()
        .route(
            "/get-productos",
            get(catalog_handler::list_products).fallback(method_not_allowed),
        )
        .route(
            "/get-product-details",
            get(catalog_handler::get_product_by_query).fallback(method_not_allowed),
        )
        .route(
            "/get-site-config",
            get(catalog_handler::site_config).fallback(method_not_allowed),
        )
        .route(
            "/get-user-balance",
            get(wallet_handler::balance)
                .route_layer(session.clone())
                .fallback(method_not_allowed),
        )
        .route(
            "/process-google-login",
            post(auth_handler::google_login).fallback(method_not_allowed),
        )
        .route(
            "/deduct-wallet-balance",
            post(wallet_handler::deduct)
                .route_layer(session)
                .fallback(method_not_allowed),
        )
        .route(
            "/process-payment",
            post(payment_handler::submit_payment).fallback(method_not_allowed),
        );

    Router::new()
        .route("/health", get(health).fallback(method_not_allowed))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(catalog)
        .merge(wallet)
        .merge(checkout)
        .nest(LEGACY_PREFIX, legacy)
        // Global middleware
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the storefront's static files for every unmatched path.
pub fn with_static_site(router: Router, dir: &str) -> Router {
    tracing::info!(dir = %dir, "Serving static site");
    router.fallback_service(ServeDir::new(dir))
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (healthy, database) = match state.database.ping().await {
        Ok(_) => (
            true,
            ServiceStatus {
                status: "healthy",
                error: None,
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            (
                false,
                ServiceStatus {
                    status: "unhealthy",
                    error: Some(e.to_string()),
                },
            )
        }
    };

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { database },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
