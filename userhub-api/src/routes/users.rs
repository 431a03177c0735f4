/// User resource endpoints
///
/// One resource, two paths. The identifier always comes from the path.
///
/// # Endpoints
///
/// - `GET /api/users/` - List all users
/// - `POST /api/users/` - Create a user
/// - `GET /api/users/{id}/` - Retrieve one user
/// - `PUT /api/users/{id}/` - Replace all fields of a user
/// - `DELETE /api/users/{id}/` - Delete a user
///
/// `PUT` and `DELETE` on the collection path answer as if the id were
/// missing (400 and 404 respectively).
///
/// # Error Contract
///
/// Failures are kept apart internally (absent record, malformed id,
/// invalid body, store failure) and logged at different levels, but the
/// response collapses them the same way for every cause:
///
/// | Operation | Absent / malformed id / store failure | Invalid body |
/// |---|---|---|
/// | list, retrieve | 404 | - |
/// | create | 500 (store only) | 400 |
/// | update | 404 | 400 |
/// | delete | 404 | - |

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use userhub_shared::{
    error::RepositoryError,
    models::user::{User, UserPayload},
};

const RETRIEVE_NOT_FOUND: &str = "Requested User does not exist";
const USER_NOT_FOUND: &str = "User does not exist";
const INVALID_DATA: &str = "Invalid Data";
const INVALID_UPDATE: &str = "Either id is wrongly put or invalid data is provided";
const CREATED: &str = "User Successfully created!";
const DELETED: &str = "User Successfully deleted";

/// Plain acknowledgement body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub message: String,

    /// Id assigned to the new user
    pub id: i64,
}

/// Parses the path segment into a user id
///
/// Only plain ASCII digits naming a positive integer identify a user;
/// anything else (signs included) is treated the same as an id that does
/// not exist.
fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

/// Logs a store failure and turns it into the collapsed 404
fn store_failure(
    operation: &'static str,
    id: Option<i64>,
    err: RepositoryError,
    message: &str,
) -> ApiError {
    error!(operation, user_id = ?id, error = %err, "User store operation failed");
    ApiError::NotFound(message.to_string())
}

/// List all users
///
/// # Endpoint
///
/// ```text
/// GET /api/users/
/// ```
///
/// # Response
///
/// `200 OK` with a JSON array, empty when there are no users.
///
/// # Errors
///
/// - `404 Not Found`: the store could not be read
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state
        .users
        .list()
        .await
        .map_err(|e| store_failure("list", None, e, RETRIEVE_NOT_FOUND))?;

    debug!(count = users.len(), "Listed users");
    Ok(Json(users))
}

/// Retrieve one user
///
/// # Endpoint
///
/// ```text
/// GET /api/users/{id}/
/// ```
///
/// # Response
///
/// ```json
/// { "id": 1, "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com" }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no such user, malformed id, or the store failed
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<User>> {
    let Some(id) = parse_id(&raw_id) else {
        debug!(raw_id = %raw_id, "Malformed user id");
        return Err(ApiError::NotFound(RETRIEVE_NOT_FOUND.to_string()));
    };

    match state.users.find_by_id(id).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => {
            debug!(user_id = id, "User not found");
            Err(ApiError::NotFound(RETRIEVE_NOT_FOUND.to_string()))
        }
        Err(e) => Err(store_failure("retrieve", Some(id), e, RETRIEVE_NOT_FOUND)),
    }
}

/// Create a user
///
/// # Endpoint
///
/// ```text
/// POST /api/users/
/// Content-Type: application/json
///
/// { "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "message": "User Successfully created!", "id": 1 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: a field is missing, null, not a string or blank
/// - `500 Internal Server Error`: the store failed
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<CreateUserResponse>)> {
    let payload = state.validator.validate(&body).map_err(|e| {
        debug!(errors = e.errors.len(), "Rejected user payload");
        ApiError::invalid_input(INVALID_DATA, e)
    })?;

    let user = state
        .users
        .create(payload)
        .await
        .map_err(|e| ApiError::InternalError(format!("Failed to create user: {}", e)))?;

    info!(user_id = user.id, "User created");
    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: CREATED.to_string(),
            id: user.id,
        }),
    ))
}

/// Replace all fields of a user
///
/// The body is validated before the id is looked at, so an invalid body
/// is a 400 even for an id that does not exist.
///
/// # Endpoint
///
/// ```text
/// PUT /api/users/{id}/
/// Content-Type: application/json
///
/// { "first_name": "Ada", "last_name": "King", "email": "ada@example.com" }
/// ```
///
/// # Response
///
/// `200 OK` echoing the validated payload.
///
/// # Errors
///
/// - `400 Bad Request`: invalid body
/// - `404 Not Found`: no such user, malformed id, or the store failed
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<UserPayload>> {
    let payload = state.validator.validate(&body).map_err(|e| {
        debug!(errors = e.errors.len(), "Rejected user payload");
        ApiError::invalid_input(INVALID_UPDATE, e)
    })?;

    let Some(id) = parse_id(&raw_id) else {
        debug!(raw_id = %raw_id, "Malformed user id");
        return Err(ApiError::NotFound(USER_NOT_FOUND.to_string()));
    };

    match state.users.update(id, payload.clone()).await {
        Ok(Some(_)) => {
            info!(user_id = id, "User updated");
            Ok(Json(payload))
        }
        Ok(None) => {
            debug!(user_id = id, "User not found");
            Err(ApiError::NotFound(USER_NOT_FOUND.to_string()))
        }
        Err(e) => Err(store_failure("update", Some(id), e, USER_NOT_FOUND)),
    }
}

/// `PUT /api/users/` has no id to update
pub async fn update_without_id() -> ApiError {
    ApiError::bad_request(INVALID_UPDATE)
}

/// Delete a user
///
/// # Endpoint
///
/// ```text
/// DELETE /api/users/{id}/
/// ```
///
/// # Response
///
/// ```json
/// { "message": "User Successfully deleted" }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no such user, malformed id, or the store failed
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let Some(id) = parse_id(&raw_id) else {
        debug!(raw_id = %raw_id, "Malformed user id");
        return Err(ApiError::NotFound(USER_NOT_FOUND.to_string()));
    };

    match state.users.delete(id).await {
        Ok(true) => {
            info!(user_id = id, "User deleted");
            Ok(Json(MessageResponse {
                message: DELETED.to_string(),
            }))
        }
        Ok(false) => {
            debug!(user_id = id, "User not found");
            Err(ApiError::NotFound(USER_NOT_FOUND.to_string()))
        }
        Err(e) => Err(store_failure("delete", Some(id), e, USER_NOT_FOUND)),
    }
}

/// `DELETE /api/users/` has no id to delete
pub async fn delete_without_id() -> ApiError {
    ApiError::NotFound(USER_NOT_FOUND.to_string())
}
