//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint (users and health) together with
//! the request and response schemas. Swagger UI serves it in debug builds and
//! the `openapi-dump` binary prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::ports::StoreStatus;
use crate::domain::{ErrorEnvelope, FieldError, RegistrationPayload, User};
use crate::inbound::http::health::ServiceStatus;
use crate::inbound::http::users::{CreateUserResponse, DeleteUserResponse, ListUsersResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registration API",
        description = "Register, list, and delete users; report service health."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        RegistrationPayload,
        FieldError,
        ErrorEnvelope,
        CreateUserResponse,
        ListUsersResponse,
        DeleteUserResponse,
        ServiceStatus,
        StoreStatus,
    )),
    tags(
        (name = "users", description = "User registration"),
        (name = "health", description = "Service status and probes")
    )
)]
pub struct ApiDoc;
