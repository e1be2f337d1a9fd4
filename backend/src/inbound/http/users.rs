//! Users API handlers.
//!
//! ```text
//! POST   /api/users       {"name":"Jo Ann","email":"jo@example.com","contactNo":"123-456-7890","address":"1 Main Street, Springfield"}
//! GET    /api/users
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ErrorEnvelope, RegistrationPayload, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Message returned with a newly registered user.
pub const USER_REGISTERED: &str = "User registered successfully";
/// Message returned after a successful delete.
pub const USER_DELETED: &str = "User deleted successfully";

/// Body of `201 Created` from `POST /api/users`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserResponse {
    pub success: bool,
    #[schema(example = "User registered successfully")]
    pub message: String,
    pub user: User,
}

/// Body of `200 OK` from `GET /api/users`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListUsersResponse {
    pub success: bool,
    /// Registered users, newest first.
    pub users: Vec<User>,
}

/// Body of `200 OK` from `DELETE /api/users/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteUserResponse {
    pub success: bool,
    #[schema(example = "User deleted successfully")]
    pub message: String,
}

/// Register a user.
///
/// Field values are validated and normalised before the email uniqueness
/// check; unknown fields are ignored.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegistrationPayload,
    responses(
        (status = 201, description = "User registered", body = CreateUserResponse),
        (status = 400, description = "Validation failed, email taken, or body unreadable", body = ErrorEnvelope),
        (status = 500, description = "Store failure", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegistrationPayload>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users
        .register(&payload)
        .await
        .map_err(|err| state.expose(err))?;

    Ok(HttpResponse::Created().json(CreateUserResponse {
        success: true,
        message: USER_REGISTERED.to_owned(),
        user,
    }))
}

/// List every registered user, newest first.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = ListUsersResponse),
        (status = 500, description = "Store failure", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<ListUsersResponse>> {
    let users = state
        .users_query
        .list_users()
        .await
        .map_err(|err| state.expose(err))?;

    Ok(web::Json(ListUsersResponse {
        success: true,
        users,
    }))
}

/// Delete a user by id.
///
/// Ids that are not UUIDs cannot name a stored user and yield 404.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User id (UUID)")),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 404, description = "No such user", body = ErrorEnvelope),
        (status = 500, description = "Store failure", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<DeleteUserResponse>> {
    state
        .users
        .remove(&id)
        .await
        .map_err(|err| state.expose(err))?;

    Ok(web::Json(DeleteUserResponse {
        success: true,
        message: USER_DELETED.to_owned(),
    }))
}
