//! OpenAPI documentation configuration.

use crate::controllers::{health_controller, user_controller};
use crate::responses::ErrorBody;
use userdir_service::{CreateUserRequest, UpdateUserRequest, UserResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Userdir API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Userdir API",
        version = "1.0.0",
        description = "User directory REST API with API key authentication"
    ),
    paths(
        health_controller::health_check,
        health_controller::readiness_check,
        health_controller::liveness_check,
        user_controller::list_users,
        user_controller::get_user_by_username,
        user_controller::get_user_by_id,
        user_controller::get_user_by_uuid,
        user_controller::create_user,
        user_controller::update_user_by_uuid,
        user_controller::update_user_by_id,
        user_controller::delete_user_by_uuid,
        user_controller::delete_user_by_id,
    ),
    components(schemas(
        health_controller::HealthResponse,
        CreateUserRequest,
        UpdateUserRequest,
        UserResponse,
        ErrorBody,
    )),
    modifiers(&ApiKeySecurity),
    tags(
        (name = "health", description = "Service health"),
        (name = "users", description = "User management")
    )
)]
pub struct ApiDoc;

/// Registers the `X-API-Key` header security scheme.
struct ApiKeySecurity;

impl Modify for ApiKeySecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
            );
        }
    }
}
