//! Data models for requests, responses and database entities.

/// Booking payloads for emails and tickets
pub mod booking;
/// Shared JSON response envelope
pub mod response;
/// User account model
pub mod user;
