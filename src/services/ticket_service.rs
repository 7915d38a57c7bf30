//! Flight ticket document generation.
//!
//! A ticket is built in two steps:
//!
//! 1. [`ticket_lines`] lays the booking out as a list of styled lines.
//! 2. [`render_pdf`] places those lines on A4 pages with `printpdf`,
//!    starting a new page whenever the next line would cross the bottom margin.
//!
//! [`TicketGenerator::generate`] writes the PDF into the ticket directory and
//! returns the file as a [`NamedTempFile`], which deletes it when dropped.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use tempfile::NamedTempFile;

use crate::models::booking::BookingDetails;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const RIGHT_COLUMN_MM: f32 = 110.0;

pub const TICKET_TITLE: &str = "Flight Ticket";

#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error("Ticket file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Body,
    Note,
    /// Vertical gap; carries no text
    Spacer,
}

impl LineStyle {
    fn font_size(self) -> f32 {
        match self {
            LineStyle::Title => 22.0,
            LineStyle::Heading => 14.0,
            LineStyle::Body => 11.0,
            LineStyle::Note => 9.0,
            LineStyle::Spacer => 0.0,
        }
    }

    /// Vertical space the line consumes, in millimetres.
    fn height_mm(self) -> f32 {
        match self {
            LineStyle::Title => 14.0,
            LineStyle::Heading => 10.0,
            LineStyle::Body => 7.0,
            LineStyle::Note => 5.5,
            LineStyle::Spacer => 5.0,
        }
    }

    fn is_bold(self) -> bool {
        matches!(self, LineStyle::Title | LineStyle::Heading)
    }
}

/// One line of the ticket, optionally split into two columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketLine {
    pub style: LineStyle,
    pub left: String,
    pub right: Option<String>,
}

impl TicketLine {
    fn single(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            left: text.into(),
            right: None,
        }
    }

    fn columns(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            style: LineStyle::Body,
            left: left.into(),
            right: Some(right.into()),
        }
    }

    fn spacer() -> Self {
        Self::single(LineStyle::Spacer, "")
    }
}

/// Lay out the ticket for `booking`.
pub fn ticket_lines(booking: &BookingDetails, currency_symbol: &str) -> Vec<TicketLine> {
    let mut lines = vec![
        TicketLine::single(LineStyle::Title, TICKET_TITLE),
        TicketLine::spacer(),
        TicketLine::columns(
            format!("Flight: {}", booking.flight_number),
            format!("Airline: {}", booking.airline),
        ),
        TicketLine::columns(
            format!("From: {}", booking.departure),
            format!("To: {}", booking.arrival),
        ),
        TicketLine::columns(
            format!("Date: {}", booking.date),
            format!("Passengers: {}", booking.passengers.len()),
        ),
        TicketLine::spacer(),
        TicketLine::single(LineStyle::Heading, "Passenger Details"),
    ];

    lines.extend(booking.passengers.iter().enumerate().map(|(index, passenger)| {
        TicketLine::single(
            LineStyle::Body,
            format!("{}. {} ({})", index + 1, passenger.name, passenger.passenger_type),
        )
    }));

    lines.extend([
        TicketLine::spacer(),
        TicketLine::single(LineStyle::Heading, "Payment Summary"),
        TicketLine::single(
            LineStyle::Body,
            format!("Amount Paid: {}", format_amount(booking.amount, currency_symbol)),
        ),
        TicketLine::single(
            LineStyle::Body,
            format!("Transaction ID: {}", booking.transaction_id),
        ),
        TicketLine::single(
            LineStyle::Body,
            format!("Status: {}", booking.status_or_default()),
        ),
        TicketLine::spacer(),
        TicketLine::single(
            LineStyle::Note,
            "Thank you for booking with us. Please carry a valid photo ID and",
        ),
        TicketLine::single(
            LineStyle::Note,
            "report at the check-in counter at least two hours before departure.",
        ),
    ]);

    lines
}

/// Format an amount with thousands separators, two decimals and a currency
/// symbol, e.g. `format_amount(1234567.5, "$") == "$1,234,567.50"`.
///
/// Amounts beyond `u128` cents saturate; requests are range-checked before
/// they get here.
pub fn format_amount(amount: f64, currency_symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u128;
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{currency_symbol}{grouped}.{:02}", cents % 100)
}

/// A line with its baseline position on the page (mm from the bottom edge).
#[derive(Debug, Clone, Copy)]
pub struct PlacedLine<'a> {
    pub line: &'a TicketLine,
    pub y_mm: f32,
}

/// Split `lines` into pages, assigning each line its vertical position.
///
/// Spacers that would start a page are dropped.
pub fn paginate(lines: &[TicketLine]) -> Vec<Vec<PlacedLine<'_>>> {
    let mut pages = vec![Vec::new()];
    let mut cursor = PAGE_HEIGHT_MM - MARGIN_MM;

    for line in lines {
        let height = line.style.height_mm();
        if cursor - height < MARGIN_MM {
            pages.push(Vec::new());
            cursor = PAGE_HEIGHT_MM - MARGIN_MM;
            if line.style == LineStyle::Spacer {
                continue;
            }
        }

        cursor -= height;
        if line.style != LineStyle::Spacer {
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine { line, y_mm: cursor });
            }
        }
    }

    pages
}

fn pdf_error(error: printpdf::Error) -> TicketError {
    TicketError::Pdf(format!("{error:?}"))
}

/// Render `lines` as an A4 PDF into `out`.
///
/// # Errors
///
/// `Pdf` if fonts cannot be embedded or the document cannot be written.
pub fn render_pdf(lines: &[TicketLine], out: File) -> Result<(), TicketError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        TICKET_TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Page 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    for (index, page) in paginate(lines).iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Page {}", index + 1),
            )
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for placed in page {
            let style = placed.line.style;
            let font: &IndirectFontRef = if style.is_bold() { &bold } else { &regular };
            layer.use_text(
                placed.line.left.as_str(),
                style.font_size(),
                Mm(MARGIN_MM),
                Mm(placed.y_mm),
                font,
            );
            if let Some(right) = &placed.line.right {
                layer.use_text(
                    right.as_str(),
                    style.font_size(),
                    Mm(RIGHT_COLUMN_MM),
                    Mm(placed.y_mm),
                    font,
                );
            }
        }
    }

    doc.save(&mut BufWriter::new(out)).map_err(pdf_error)
}

/// Keep only characters that are safe in a file name.
fn sanitize_for_filename(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

/// File name the recipient sees for a ticket attachment.
pub fn attachment_name(transaction_id: &str) -> String {
    format!("flight_ticket_{}.pdf", sanitize_for_filename(transaction_id))
}

/// Renders ticket PDFs into a staging directory.
///
/// Text is set in the built-in Helvetica fonts, which only cover WinAnsi
/// glyphs. Characters outside it, such as Devanagari names or the `₹` sign,
/// are left out of the page.
#[derive(Debug, Clone)]
pub struct TicketGenerator {
    dir: PathBuf,
    currency_symbol: String,
}

impl TicketGenerator {
    pub fn new(dir: impl Into<PathBuf>, currency_symbol: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Render the ticket for `booking` to
    /// `<dir>/flight_ticket_<transactionId>_<random>.pdf`.
    ///
    /// The random part keeps concurrent requests for the same transaction
    /// from sharing a file. Dropping the returned handle deletes the file;
    /// if rendering fails the partial file is deleted before returning.
    ///
    /// This does blocking I/O; call it from `spawn_blocking` in async code.
    ///
    /// # Errors
    ///
    /// - `Io`: directory or file could not be created
    /// - `Pdf`: rendering or writing the document failed
    pub fn generate(&self, booking: &BookingDetails) -> Result<NamedTempFile, TicketError> {
        fs::create_dir_all(&self.dir)?;

        let prefix = format!(
            "flight_ticket_{}_",
            sanitize_for_filename(&booking.transaction_id)
        );
        let file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".pdf")
            .tempfile_in(&self.dir)?;

        let lines = ticket_lines(booking, &self.currency_symbol);
        render_pdf(&lines, file.reopen()?)?;

        tracing::debug!(
            transaction_id = %booking.transaction_id,
            path = %file.path().display(),
            pages = paginate(&lines).len(),
            "Ticket rendered"
        );

        Ok(file)
    }
}
