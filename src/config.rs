//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DB_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `DB_ACQUIRE_TIMEOUT_SECS` (optional): pool acquisition timeout, defaults to 5
/// - `SMTP_HOST` (optional): SMTP relay. Without it emails are logged, not sent.
/// - `SMTP_PORT` (optional): defaults to 587
/// - `SMTP_USERNAME` / `SMTP_PASSWORD` (optional): relay credentials
/// - `MAIL_FROM` (optional): sender mailbox
/// - `TICKET_DIR` (optional): where ticket PDFs are written before sending
/// - `CURRENCY_SYMBOL` (optional): prefix for formatted amounts, defaults to `$`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,

    #[serde(default = "default_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,

    pub smtp_host: Option<String>,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    pub smtp_username: Option<String>,

    pub smtp_password: Option<String>,

    #[serde(default = "default_mail_from")]
    pub mail_from: String,

    pub ticket_dir: Option<PathBuf>,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_smtp_port() -> u16 {
    587
}

fn default_mail_from() -> String {
    "Travel Bookings <no-reply@example.com>".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - A value cannot be parsed into its expected type (e.g. a non-numeric `SERVER_PORT`)
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }

    /// Directory ticket PDFs are staged in, falling back to a subdirectory of
    /// the OS temp dir.
    pub fn ticket_dir(&self) -> PathBuf {
        self.ticket_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("flight_tickets"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config: Config = envy::from_iter(vec![(
            "DATABASE_URL".to_string(),
            "postgres://localhost/tours".to_string(),
        )])
        .unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_acquire_timeout_secs, 5);
        assert_eq!(config.smtp_port, 587);
        assert!(config.smtp_host.is_none());
        assert_eq!(config.currency_symbol, "$");
        assert!(config.ticket_dir().ends_with("flight_tickets"));
    }

    #[test]
    fn explicit_ticket_dir_wins() {
        let config: Config = envy::from_iter(vec![
            ("DATABASE_URL".to_string(), "postgres://localhost/tours".to_string()),
            ("TICKET_DIR".to_string(), "/var/tmp/tickets".to_string()),
            ("SMTP_HOST".to_string(), "smtp.example.com".to_string()),
        ])
        .unwrap();

        assert_eq!(config.ticket_dir(), PathBuf::from("/var/tmp/tickets"));
        assert_eq!(config.smtp_host.as_deref(), Some("smtp.example.com"));
    }

    #[test]
    fn database_url_is_required() {
        let result = envy::from_iter::<_, Config>(vec![(
            "SMTP_HOST".to_string(),
            "smtp.example.com".to_string(),
        )]);

        assert!(result.is_err());
    }
}
