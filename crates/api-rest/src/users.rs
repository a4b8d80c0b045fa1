//! Handlers for the `/api/users` routes.
//!
//! Each handler validates its inputs in a fixed order and stops at the first failure:
//! identifier format, then record existence, then required body fields. A failed check never
//! touches the store beyond the lookup that produced it.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use users_core::{User, UserPayload};

use crate::error::{ApiError, ApiResult, MessageRes};
use crate::extract::{UserBody, UserIdPath};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users in insertion order", body = [User]),
        (status = 500, description = "Internal server error", body = MessageRes)
    )
)]
/// List every user.
#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.store.list_all()?))
}

#[utoipa::path(
    get,
    path = "/api/users/{userId}",
    params(("userId" = String, Path, description = "Hyphenated UUID of the user")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 400, description = "Invalid userId format", body = MessageRes),
        (status = 404, description = "User not found", body = MessageRes)
    )
)]
/// Fetch a single user by identifier.
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> ApiResult<Json<User>> {
    state
        .store
        .find_by_id(&id)?
        .map(Json)
        .ok_or(ApiError::UserNotFound)
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Username and age are required fields; Hobbies must be an array of strings", body = MessageRes)
    )
)]
/// Create a user.
///
/// The identifier is always generated here; an `id` in the body is ignored. `hobbies` defaults
/// to an empty list when absent.
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    UserBody(payload): UserBody,
) -> ApiResult<impl IntoResponse> {
    let fields = payload.into_fields()?;
    let user = state.store.create(fields)?;

    tracing::info!(user_id = %user.id, "Created user");
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{userId}",
    params(("userId" = String, Path, description = "Hyphenated UUID of the user")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User replaced", body = User),
        (status = 400, description = "Invalid userId format; Username and age are required fields; Hobbies must be an array of strings", body = MessageRes),
        (status = 404, description = "User not found", body = MessageRes)
    )
)]
/// Replace every field of a user except its identifier.
///
/// This is a full replacement: omitting `hobbies` resets them to an empty list. The identifier
/// comes from the path, never from the body.
#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    UserBody(payload): UserBody,
) -> ApiResult<Json<User>> {
    if state.store.find_by_id(&id)?.is_none() {
        return Err(ApiError::UserNotFound);
    }

    let fields = payload.into_fields()?;
    let user = state.store.replace(&id, fields)?;

    tracing::info!(user_id = %user.id, "Updated user");
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/api/users/{userId}",
    params(("userId" = String, Path, description = "Hyphenated UUID of the user")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid userId format", body = MessageRes),
        (status = 404, description = "User not found", body = MessageRes)
    )
)]
/// Delete a user.
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> ApiResult<StatusCode> {
    state.store.remove(&id)?;

    tracing::info!(user_id = %id, "Deleted user");
    Ok(StatusCode::NO_CONTENT)
}

/// Catch-all for unmatched paths and unsupported methods.
pub async fn endpoint_not_found() -> ApiError {
    ApiError::EndpointNotFound
}
