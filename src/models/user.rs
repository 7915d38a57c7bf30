//! User account data models and API request types.
//!
//! This module defines:
//! - `User`: Database entity projected from the `users` table
//! - `UpdateUserRequest`: Request body for `PUT /users/{id}`
//! - `UserChanges`: A validated update, ready to be written

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Represents a user record from the database.
///
/// Only the contact and address columns are projected; bookkeeping
/// timestamps stay in the table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct User {
    /// Unique identifier for this user
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    /// Phone number as entered by the user
    pub mobile: String,

    pub address: Option<String>,

    pub city: Option<String>,

    pub state: Option<String>,

    /// Postal code
    pub zip_code: Option<String>,
}

/// Request body for updating a user.
///
/// # JSON Example
///
/// ```json
/// {
///   "first_name": "Asha",
///   "last_name": "Rao",
///   "email": "asha@example.com",
///   "mobile": "+91 98450 00000",
///   "city": "Mysuru"
/// }
/// ```
///
/// # Validation
///
/// - `first_name`, `last_name`, `email`, `mobile`: Required, non-blank
/// - `address`, `city`, `state`, `zip_code`: Optional, stored as NULL when absent
///
/// The required fields are `Option` here so that a missing one is reported
/// as a 400 with the field name instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Full replacement of a user's editable columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

impl UpdateUserRequest {
    /// Check required fields and produce the changes to write.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` naming every required field that is absent or blank.
    pub fn validate(self) -> Result<UserChanges, AppError> {
        let mut missing = Vec::new();
        let mut required = |value: Option<String>, name: &'static str| match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let first_name = required(self.first_name, "first_name");
        let last_name = required(self.last_name, "last_name");
        let email = required(self.email, "email");
        let mobile = required(self.mobile, "mobile");

        if !missing.is_empty() {
            return Err(AppError::InvalidRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(UserChanges {
            first_name,
            last_name,
            email,
            mobile,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
        })
    }
}

/// Parse a user identifier taken from the URL path.
///
/// # Errors
///
/// - `InvalidRequest("User ID is required")` for an empty or blank id
/// - `InvalidRequest` when the id is not a positive integer
pub fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::InvalidRequest("User ID is required".to_string()));
    }

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::InvalidRequest(
            "User ID must be a positive integer".to_string(),
        )),
    }
}
