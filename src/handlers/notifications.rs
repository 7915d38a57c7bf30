//! Email HTTP handlers.
//!
//! - POST /send-confirmation-email - Booking confirmation
//! - POST /send-flight-ticket - Flight ticket with PDF attachment

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::AppError,
    models::{
        booking::{BookingConfirmationRequest, FlightTicketRequest},
        response::ApiResponse,
    },
    state::AppState,
};

/// Send a booking confirmation email.
///
/// # Request Body
///
/// ```json
/// {
///   "to": "asha@example.com",
///   "name": "Asha",
///   "bookingId": "BK-1042",
///   "packageName": "Goa Getaway",
///   "travelDate": "2025-03-14",
///   "totalPrice": 24999.5
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: email dispatched
/// - **Error (400)**: a field is missing; the message names it
/// - **Error (500)**: mail transport failure
pub async fn send_confirmation_email(
    State(state): State<AppState>,
    payload: Result<Json<BookingConfirmationRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let Json(request) = payload?;
    state.notifications.send_booking_confirmation(request).await?;

    Ok(Json(ApiResponse::done("Confirmation email sent successfully")))
}

/// Render a flight ticket PDF and email it.
///
/// # Request Body
///
/// ```json
/// {
///   "email": "asha@example.com",
///   "bookingDetails": {
///     "flightNumber": "6E-2134",
///     "airline": "IndiGo",
///     "departure": "BLR",
///     "arrival": "GOI",
///     "date": "2025-03-14",
///     "passengers": [{ "name": "Asha Rao", "type": "Adult" }],
///     "amount": 8450,
///     "transactionId": "pay_NX81",
///     "status": "Confirmed"
///   }
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: ticket emailed
/// - **Error (400)**: email or booking details missing or malformed
/// - **Error (500)**: PDF or mail transport failure
pub async fn send_flight_ticket(
    State(state): State<AppState>,
    payload: Result<Json<FlightTicketRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let Json(request) = payload?;
    state.notifications.send_flight_ticket(request).await?;

    Ok(Json(ApiResponse::done("Flight ticket sent successfully")))
}
