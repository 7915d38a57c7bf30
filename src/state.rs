//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{repository::UserRepository, services::notification_service::NotificationService};

#[derive(Clone)]
pub struct AppState {
    /// Storage for user accounts (PostgreSQL in production)
    pub users: Arc<dyn UserRepository>,

    /// Email and ticket delivery
    pub notifications: NotificationService,
}
