//! User account HTTP handlers.
//!
//! This module implements the account endpoints:
//! - GET /users/{userId} - Fetch a user
//! - PUT /users/{userId} - Replace a user's contact and address fields
//! - DELETE /users/{userId} - Delete a user
//!
//! `/users` without an id is routed to the `*_without_id` handlers so the
//! client gets the 400 envelope instead of a bare 404.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    error::AppError,
    models::{
        response::ApiResponse,
        user::{UpdateUserRequest, User},
    },
    services::user_service,
    state::AppState,
};

/// Get a user by ID.
///
/// # Response
///
/// - **Success (200 OK)**:
///
/// ```json
/// {
///   "success": true,
///   "message": "User fetched successfully",
///   "data": {
///     "id": 7,
///     "first_name": "Asha",
///     "last_name": "Rao",
///     "email": "asha@example.com",
///     "mobile": "9845000000",
///     "address": null,
///     "city": "Mysuru",
///     "state": "KA",
///     "zip_code": null
///   }
/// }
/// ```
///
/// - **Error (400)**: id is not a positive integer
/// - **Error (404)**: no such user
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = user_service::fetch_user(state.users.as_ref(), &user_id).await?;

    Ok(Json(ApiResponse::ok("User fetched successfully", user)))
}

/// Update a user.
///
/// # Request Body
///
/// ```json
/// {
///   "first_name": "Asha",
///   "last_name": "Rao",
///   "email": "asha@example.com",
///   "mobile": "9845000000",
///   "address": "12 MG Road",
///   "city": "Bengaluru",
///   "state": "KA",
///   "zip_code": "560001"
/// }
/// ```
///
/// Omitted optional fields are cleared.
///
/// # Response
///
/// - **Success (200 OK)**: the updated user in `data`
/// - **Error (400)**: bad id, malformed body or missing required field
/// - **Error (404)**: no such user
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let Json(request) = payload?;
    let user = user_service::update_user(state.users.as_ref(), &user_id, request).await?;

    Ok(Json(ApiResponse::ok("User updated successfully", user)))
}

/// Delete a user.
///
/// # Response
///
/// - **Success (200 OK)**: `{"success": true, "message": "User deleted successfully"}`
/// - **Error (400)**: id missing or malformed
/// - **Error (404)**: `{"success": false, "message": "User not found"}`
/// - **Error (500)**: database failure (details are logged, not returned)
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    user_service::delete_user(state.users.as_ref(), &user_id).await?;

    Ok(Json(ApiResponse::done("User deleted successfully")))
}

/// GET /users - id missing.
pub async fn get_user_without_id(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    get_user(State(state), Path(String::new())).await
}

/// PUT /users - id missing.
pub async fn update_user_without_id(
    State(state): State<AppState>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    update_user(State(state), Path(String::new()), payload).await
}

/// DELETE /users - id missing.
pub async fn delete_user_without_id(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    delete_user(State(state), Path(String::new())).await
}
