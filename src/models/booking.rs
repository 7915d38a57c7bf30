//! Booking payloads used to render confirmation emails and ticket documents.
//!
//! Nothing in this module is persisted; the mobile client sends the full
//! booking with each request.

use std::fmt;

use serde::Deserialize;

/// Flight booking rendered into a ticket.
///
/// # JSON Example
///
/// ```json
/// {
///   "flightNumber": "6E-2134",
///   "airline": "IndiGo",
///   "departure": "BLR",
///   "arrival": "GOI",
///   "date": "2025-03-14",
///   "passengers": [{ "name": "Asha Rao", "type": "Adult" }],
///   "amount": 8450.0,
///   "transactionId": "pay_NX81",
///   "status": "Confirmed"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub flight_number: String,
    pub airline: String,
    pub departure: String,
    pub arrival: String,
    pub date: String,
    #[serde(default)]
    pub passengers: Vec<Passenger>,
    pub amount: f64,
    pub transaction_id: String,
    /// Payment status, shown as "Confirmed" when absent
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Passenger {
    pub name: String,

    /// Fare category ("Adult", "Child", "Infant")
    #[serde(rename = "type", default = "default_passenger_type")]
    pub passenger_type: String,
}

fn default_passenger_type() -> String {
    "Adult".to_string()
}

/// Largest amount a ticket accepts, in either direction.
pub const MAX_TICKET_AMOUNT: f64 = 1_000_000_000_000.0;

impl BookingDetails {
    /// Finite and no larger than [`MAX_TICKET_AMOUNT`] in magnitude.
    pub fn amount_in_range(&self) -> bool {
        self.amount.is_finite() && self.amount.abs() <= MAX_TICKET_AMOUNT
    }

    pub fn status_or_default(&self) -> &str {
        match self.status.as_deref() {
            Some(status) if !status.trim().is_empty() => status,
            _ => "Confirmed",
        }
    }
}

/// Request body for `POST /send-flight-ticket`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightTicketRequest {
    pub email: Option<String>,
    pub booking_details: Option<BookingDetails>,
}

/// A field the client may send either as a JSON string or a JSON number
/// (booking ids and prices arrive both ways).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

/// Request body for `POST /send-confirmation-email`.
///
/// All six fields are required; they are `Option` so that validation can
/// report every missing one at once.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmationRequest {
    pub to: Option<String>,
    pub name: Option<String>,
    pub booking_id: Option<FieldValue>,
    pub package_name: Option<String>,
    pub travel_date: Option<String>,
    pub total_price: Option<FieldValue>,
}

/// A confirmation request with every field present.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    pub to: String,
    pub name: String,
    pub booking_id: String,
    pub package_name: String,
    pub travel_date: String,
    pub total_price: FieldValue,
}

impl BookingConfirmationRequest {
    /// Returns the names (as sent on the wire) of absent or blank fields.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let text = |value: &Option<String>| value.as_deref().is_none_or(|v| v.trim().is_empty());
        let field = |value: &Option<FieldValue>| value.as_ref().is_none_or(FieldValue::is_blank);

        [
            ("to", text(&self.to)),
            ("name", text(&self.name)),
            ("bookingId", field(&self.booking_id)),
            ("packageName", text(&self.package_name)),
            ("travelDate", text(&self.travel_date)),
            ("totalPrice", field(&self.total_price)),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }

    /// Returns `None` when any field is missing; see [`Self::missing_fields`].
    pub fn into_confirmation(self) -> Option<BookingConfirmation> {
        if !self.missing_fields().is_empty() {
            return None;
        }

        Some(BookingConfirmation {
            to: self.to?,
            name: self.name?,
            booking_id: self.booking_id?.to_string(),
            package_name: self.package_name?,
            travel_date: self.travel_date?,
            total_price: self.total_price?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn booking_details_parse_camel_case_and_default_status() {
        let booking: BookingDetails = serde_json::from_value(json!({
            "flightNumber": "AI-101",
            "airline": "Air India",
            "departure": "DEL",
            "arrival": "BOM",
            "date": "2025-02-01",
            "passengers": [{ "name": "Ravi" }, { "name": "Mira", "type": "Child" }],
            "amount": 12000,
            "transactionId": "txn_1"
        }))
        .unwrap();

        assert_eq!(booking.flight_number, "AI-101");
        assert_eq!(booking.passengers[0].passenger_type, "Adult");
        assert_eq!(booking.passengers[1].passenger_type, "Child");
        assert_eq!(booking.status_or_default(), "Confirmed");
    }

    #[test]
    fn blank_status_falls_back_to_confirmed() {
        let mut booking: BookingDetails = serde_json::from_value(json!({
            "flightNumber": "AI-101", "airline": "Air India", "departure": "DEL",
            "arrival": "BOM", "date": "2025-02-01", "amount": 1.0, "transactionId": "t",
            "status": "  "
        }))
        .unwrap();
        assert_eq!(booking.status_or_default(), "Confirmed");

        booking.status = Some("Pending".into());
        assert_eq!(booking.status_or_default(), "Pending");
    }

    #[test]
    fn amount_range_check() {
        let mut booking: BookingDetails = serde_json::from_value(json!({
            "flightNumber": "AI-101", "airline": "Air India", "departure": "DEL",
            "arrival": "BOM", "date": "2025-02-01", "amount": 1e12, "transactionId": "t"
        }))
        .unwrap();
        assert!(booking.amount_in_range());

        booking.amount = -250.0;
        assert!(booking.amount_in_range());

        for amount in [1e12 + 1.0, f64::INFINITY, f64::NAN, 1e300] {
            booking.amount = amount;
            assert!(!booking.amount_in_range(), "{amount}");
        }
    }

    #[test]
    fn confirmation_accepts_numeric_booking_id_and_price() {
        let request: BookingConfirmationRequest = serde_json::from_value(json!({
            "to": "asha@example.com",
            "name": "Asha",
            "bookingId": 1042,
            "packageName": "Goa Getaway",
            "travelDate": "2025-03-14",
            "totalPrice": 24999.5
        }))
        .unwrap();

        assert!(request.missing_fields().is_empty());
        let confirmation = request.into_confirmation().unwrap();
        assert_eq!(confirmation.booking_id, "1042");
        assert!(matches!(confirmation.total_price, FieldValue::Number(_)));
    }

    #[test]
    fn missing_fields_uses_wire_names() {
        let request = BookingConfirmationRequest {
            to: Some("asha@example.com".into()),
            booking_id: Some(FieldValue::Text(" ".into())),
            ..Default::default()
        };

        assert_eq!(
            request.missing_fields(),
            vec!["name", "bookingId", "packageName", "travelDate", "totalPrice"]
        );
        assert!(request.into_confirmation().is_none());
    }
}
