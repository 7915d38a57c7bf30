//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle validation, storage access, document rendering and email delivery.

pub mod mailer;
pub mod notification_service;
pub mod ticket_service;
pub mod user_service;
