//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params)
//! 2. Delegates to a service
//! 3. Returns a JSON envelope with a status code

/// Unknown routes and methods
pub mod fallback;
/// Service health endpoint
pub mod health;
/// Booking confirmation and ticket email endpoints
pub mod notifications;
/// User account endpoints
pub mod users;
