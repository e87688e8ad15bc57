//! Main application router.

use crate::{
    controllers::{health_controller, user_controller},
    middleware::{api_key_auth, logging_middleware, ApiKeyAuthState},
    openapi::ApiDoc,
    responses::ErrorBody,
    state::AppState,
};
use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use userdir_config::ServerConfig;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
///
/// The users API sits behind the API key gate; health endpoints and the
/// Swagger UI do not.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let cors = create_cors_layer(server_config);
    let auth_state = ApiKeyAuthState::new(state.api_key_service.clone());

    let api_router = Router::new()
        .nest("/users/", user_controller::router())
        .layer(middleware::from_fn_with_state(auth_state, api_key_auth))
        .with_state(state);

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
        .layer(CatchPanicLayer::custom(handle_panic));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Converts a caught handler panic into an opaque 500 response.
///
/// The panic payload goes to the server log only; the client sees the same
/// body as any other system error.
fn handle_panic(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    };
    error!(panic = detail, "panic recovered");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "internal server error".to_string(),
        }),
    )
        .into_response()
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        if server_config.cors_origins.contains(&"*".to_string()) {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    } else {
        CorsLayer::new()
    }
}
