//! User service - account reads, updates and deletes.
//!
//! Identifiers arrive as raw path segments and are validated here, so every
//! caller gets the same InvalidArgument / NotFound behavior.

use crate::{
    error::AppError,
    models::user::{UpdateUserRequest, User, parse_user_id},
    repository::UserRepository,
};

/// Fetch a user by ID.
///
/// # Errors
///
/// - `InvalidRequest`: id is blank or not a positive integer
/// - `UserNotFound`: no row with this id
/// - `Database`: query failed
pub async fn fetch_user(repo: &dyn UserRepository, raw_id: &str) -> Result<User, AppError> {
    let id = parse_user_id(raw_id)?;

    repo.find_by_id(id).await?.ok_or(AppError::UserNotFound)
}

/// Replace a user's contact and address fields.
///
/// Optional fields that are absent from the request are written as NULL.
/// An update that matches no row is reported as `UserNotFound` rather than
/// silently succeeding.
///
/// # Errors
///
/// - `InvalidRequest`: bad id, or a required field is missing
/// - `UserNotFound`: no row with this id
/// - `Database`: query failed
pub async fn update_user(
    repo: &dyn UserRepository,
    raw_id: &str,
    request: UpdateUserRequest,
) -> Result<User, AppError> {
    let id = parse_user_id(raw_id)?;
    let changes = request.validate()?;

    match repo.update(id, &changes).await? {
        Some(user) => {
            tracing::info!(user_id = id, "User updated");
            Ok(user)
        }
        None => Err(AppError::UserNotFound),
    }
}

/// Delete a user by ID.
///
/// # Errors
///
/// - `InvalidRequest`: id is blank or not a positive integer
/// - `UserNotFound`: no row was deleted; nothing was mutated
/// - `Database`: statement failed
pub async fn delete_user(repo: &dyn UserRepository, raw_id: &str) -> Result<(), AppError> {
    let id = parse_user_id(raw_id)?;

    if repo.delete(id).await? == 0 {
        return Err(AppError::UserNotFound);
    }

    tracing::info!(user_id = id, "User deleted");
    Ok(())
}
