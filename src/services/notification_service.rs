//! Notification service - booking emails.
//!
//! Both operations follow the same path: validate the request, render the
//! HTML (and for tickets, the PDF), then hand the email to the mail
//! transport. Validation failures never reach the transport.

use std::sync::Arc;

use crate::{
    error::AppError,
    models::booking::{
        BookingConfirmation, BookingConfirmationRequest, BookingDetails, FieldValue,
        FlightTicketRequest,
    },
    services::{
        mailer::{Email, EmailAttachment, Mailer},
        ticket_service::{TicketError, TicketGenerator, attachment_name, format_amount},
    },
};

#[derive(Clone)]
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    tickets: TicketGenerator,
    currency_symbol: String,
}

impl NotificationService {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        tickets: TicketGenerator,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            tickets,
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Send the booking confirmation email.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: any of the six fields is absent or blank
    /// - `Mail`: the transport rejected the message
    pub async fn send_booking_confirmation(
        &self,
        request: BookingConfirmationRequest,
    ) -> Result<(), AppError> {
        let missing = request.missing_fields();
        let Some(confirmation) = request.into_confirmation() else {
            return Err(AppError::InvalidRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };

        let email = Email {
            to: confirmation.to.clone(),
            subject: format!("Booking Confirmed - {}", confirmation.package_name),
            html_body: confirmation_html(&confirmation, &self.currency_symbol),
            attachment: None,
        };

        self.mailer.send(email).await?;

        tracing::info!(booking_id = %confirmation.booking_id, "Booking confirmation sent");
        Ok(())
    }

    /// Render the flight ticket PDF and email it as an attachment.
    ///
    /// The staged PDF is deleted on every return path: the generator hands
    /// back a temp-file handle and dropping it removes the file, whether the
    /// send below succeeds or fails.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: email or booking details absent
    /// - `Ticket`: the PDF could not be rendered or read back
    /// - `Mail`: the transport rejected the message
    pub async fn send_flight_ticket(&self, request: FlightTicketRequest) -> Result<(), AppError> {
        let (email, booking) = match (request.email, request.booking_details) {
            (Some(email), Some(booking)) if !email.trim().is_empty() => (email, booking),
            _ => {
                return Err(AppError::InvalidRequest(
                    "Email and booking details are required".to_string(),
                ));
            }
        };

        if !booking.amount_in_range() {
            return Err(AppError::InvalidRequest(
                "Booking amount is out of range".to_string(),
            ));
        }

        let generator = self.tickets.clone();
        let to_render = booking.clone();
        let ticket = tokio::task::spawn_blocking(move || generator.generate(&to_render)).await??;

        let content = tokio::fs::read(ticket.path())
            .await
            .map_err(TicketError::from)?;

        let message = Email {
            to: email,
            subject: format!("Your Flight Ticket - {}", booking.flight_number),
            html_body: ticket_html(&booking),
            attachment: Some(EmailAttachment {
                filename: attachment_name(&booking.transaction_id),
                content_type: "application/pdf".to_string(),
                content,
            }),
        };

        self.mailer.send(message).await?;

        tracing::info!(transaction_id = %booking.transaction_id, "Flight ticket sent");

        if let Err(e) = ticket.close() {
            tracing::warn!(error = %e, "Failed to remove staged ticket");
        }

        Ok(())
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn display_price(price: &FieldValue, currency_symbol: &str) -> String {
    match price {
        FieldValue::Number(number) => number
            .as_f64()
            .map(|amount| format_amount(amount, currency_symbol))
            .unwrap_or_else(|| number.to_string()),
        FieldValue::Text(text) => text.clone(),
    }
}

fn confirmation_html(confirmation: &BookingConfirmation, currency_symbol: &str) -> String {
    let name = escape_html(&confirmation.name);
    let booking_id = escape_html(&confirmation.booking_id);
    let package_name = escape_html(&confirmation.package_name);
    let travel_date = escape_html(&confirmation.travel_date);
    let total_price = escape_html(&display_price(&confirmation.total_price, currency_symbol));

    format!(
        r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Booking Confirmed</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #0f766e;">Your booking is confirmed!</h2>
        <p>Dear {name},</p>
        <p>Thank you for booking with us. Here are your booking details:</p>
        <table style="border-collapse: collapse; margin: 20px 0;">
            <tr><td style="padding: 6px 12px;"><strong>Booking ID</strong></td><td style="padding: 6px 12px;">{booking_id}</td></tr>
            <tr><td style="padding: 6px 12px;"><strong>Package</strong></td><td style="padding: 6px 12px;">{package_name}</td></tr>
            <tr><td style="padding: 6px 12px;"><strong>Travel Date</strong></td><td style="padding: 6px 12px;">{travel_date}</td></tr>
            <tr><td style="padding: 6px 12px;"><strong>Total Price</strong></td><td style="padding: 6px 12px;">{total_price}</td></tr>
        </table>
        <p style="color: #666; font-size: 14px;">
            We look forward to hosting you. Reply to this email if anything needs to change.
        </p>
    </div>
</body>
</html>
"#
    )
}

fn ticket_html(booking: &BookingDetails) -> String {
    let flight_number = escape_html(&booking.flight_number);
    let airline = escape_html(&booking.airline);
    let departure = escape_html(&booking.departure);
    let arrival = escape_html(&booking.arrival);
    let date = escape_html(&booking.date);
    let passengers = booking.passengers.len();

    format!(
        r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Your Flight Ticket</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #2563eb;">Your flight ticket</h2>
        <p>Your e-ticket for {airline} flight {flight_number} is attached.</p>
        <p><strong>{departure}</strong> &rarr; <strong>{arrival}</strong> on {date}, {passengers} passenger(s).</p>
        <p style="color: #666; font-size: 14px;">
            Please carry a valid photo ID along with the attached ticket.
        </p>
    </div>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::services::mailer::MailError;

    /// Mailer that records what it was asked to send.
    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<Email>>,
        reject: bool,
    }

    impl RecordingMailer {
        fn rejecting() -> Self {
            Self {
                reject: true,
                ..Default::default()
            }
        }

        fn sent(&self) -> Vec<Email> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: Email) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(email);
            if self.reject {
                return Err(MailError::Transport("550 mailbox unavailable".into()));
            }
            Ok(())
        }
    }

    fn service(mailer: Arc<RecordingMailer>, dir: &std::path::Path) -> NotificationService {
        NotificationService::new(mailer, TicketGenerator::new(dir, "$"), "$")
    }

    fn confirmation_json() -> serde_json::Value {
        json!({
            "to": "asha@example.com",
            "name": "Asha <Rao>",
            "bookingId": "BK-1042",
            "packageName": "Goa Getaway",
            "travelDate": "2025-03-14",
            "totalPrice": 24999.5
        })
    }

    fn ticket_request(passengers: usize) -> FlightTicketRequest {
        let passengers: Vec<_> = (0..passengers)
            .map(|i| json!({ "name": format!("Traveller {}", i + 1), "type": "Adult" }))
            .collect();

        serde_json::from_value(json!({
            "email": "asha@example.com",
            "bookingDetails": {
                "flightNumber": "6E-2134",
                "airline": "IndiGo",
                "departure": "BLR",
                "arrival": "GOI",
                "date": "2025-03-14",
                "passengers": passengers,
                "amount": 18450,
                "transactionId": "pay_NX81"
            }
        }))
        .unwrap()
    }

    fn dir_is_empty(dir: &std::path::Path) -> bool {
        !dir.exists() || std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn confirmation_is_rendered_and_sent() {
        let mailer = Arc::new(RecordingMailer::default());
        let dir = tempfile::tempdir().unwrap();
        let request = serde_json::from_value(confirmation_json()).unwrap();

        service(mailer.clone(), dir.path())
            .send_booking_confirmation(request)
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "asha@example.com");
        assert_eq!(sent[0].subject, "Booking Confirmed - Goa Getaway");
        assert!(sent[0].html_body.contains("BK-1042"));
        assert!(sent[0].html_body.contains("$24,999.50"));
        assert!(sent[0].html_body.contains("Asha &lt;Rao&gt;"));
        assert!(sent[0].attachment.is_none());
    }

    #[tokio::test]
    async fn confirmation_missing_any_field_never_reaches_transport() {
        let dir = tempfile::tempdir().unwrap();

        for field in ["to", "name", "bookingId", "packageName", "travelDate", "totalPrice"] {
            let mailer = Arc::new(RecordingMailer::default());
            let mut body = confirmation_json();
            body.as_object_mut().unwrap().remove(field);
            let request = serde_json::from_value(body).unwrap();

            let result = service(mailer.clone(), dir.path())
                .send_booking_confirmation(request)
                .await;

            assert!(
                matches!(result, Err(AppError::InvalidRequest(ref m)) if m.contains(field)),
                "{field}: {result:?}"
            );
            assert!(mailer.sent().is_empty(), "{field} reached the transport");
        }
    }

    #[tokio::test]
    async fn confirmation_transport_failure_is_reported() {
        let mailer = Arc::new(RecordingMailer::rejecting());
        let dir = tempfile::tempdir().unwrap();
        let request = serde_json::from_value(confirmation_json()).unwrap();

        let result = service(mailer, dir.path())
            .send_booking_confirmation(request)
            .await;

        assert!(matches!(result, Err(AppError::Mail(_))));
    }

    #[tokio::test]
    async fn ticket_is_attached_and_staged_file_removed() {
        let mailer = Arc::new(RecordingMailer::default());
        let dir = tempfile::tempdir().unwrap();

        service(mailer.clone(), dir.path())
            .send_flight_ticket(ticket_request(3))
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].html_body.contains("3 passenger(s)"));
        let attachment = sent[0].attachment.as_ref().unwrap();
        assert_eq!(attachment.filename, "flight_ticket_pay_NX81.pdf");
        assert_eq!(attachment.content_type, "application/pdf");
        assert!(attachment.content.starts_with(b"%PDF"));

        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn staged_file_removed_when_send_fails() {
        let mailer = Arc::new(RecordingMailer::rejecting());
        let dir = tempfile::tempdir().unwrap();

        let result = service(mailer.clone(), dir.path())
            .send_flight_ticket(ticket_request(2))
            .await;

        assert!(matches!(result, Err(AppError::Mail(_))));
        assert_eq!(mailer.sent().len(), 1);
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn ticket_requires_email_and_booking() {
        let mailer = Arc::new(RecordingMailer::default());
        let dir = tempfile::tempdir().unwrap();
        let service = service(mailer.clone(), dir.path());

        let mut no_email = ticket_request(1);
        no_email.email = Some("   ".to_string());
        assert!(matches!(
            service.send_flight_ticket(no_email).await,
            Err(AppError::InvalidRequest(_))
        ));

        let mut no_booking = ticket_request(1);
        no_booking.booking_details = None;
        assert!(matches!(
            service.send_flight_ticket(no_booking).await,
            Err(AppError::InvalidRequest(_))
        ));

        assert!(mailer.sent().is_empty());
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn out_of_range_amount_is_rejected_before_rendering() {
        let mailer = Arc::new(RecordingMailer::default());
        let dir = tempfile::tempdir().unwrap();
        let service = service(mailer.clone(), dir.path());

        for amount in [1e300, -1e13] {
            let mut request = ticket_request(1);
            if let Some(booking) = request.booking_details.as_mut() {
                booking.amount = amount;
            }

            let result = service.send_flight_ticket(request).await;

            assert!(
                matches!(result, Err(AppError::InvalidRequest(ref m)) if m.contains("amount")),
                "{amount}: {result:?}"
            );
        }

        assert!(mailer.sent().is_empty());
        assert!(dir_is_empty(dir.path()));
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }
}
