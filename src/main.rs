//! Tour Booking Server - Main Application Entry Point
//!
//! REST backend for the tour booking mobile app. It manages user accounts
//! and sends booking emails, including flight tickets rendered as PDF.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Email**: Lettre over SMTP
//! - **Documents**: printpdf, staged in scoped temp files
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool and run migrations
//! 3. Build the mail transport and ticket generator
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod repository;
mod routes;
mod services;
mod state;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::{
    repository::PgUserRepository,
    services::{
        mailer::{LogMailer, Mailer, SmtpMailer},
        notification_service::NotificationService,
        ticket_service::TicketGenerator,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(
        &config.database_url,
        config.db_max_connections,
        Duration::from_secs(config.db_acquire_timeout_secs),
    )
    .await?;
    tracing::info!(
        max_connections = config.db_max_connections,
        "Database pool created"
    );

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let mailer: Arc<dyn Mailer> = match &config.smtp_host {
        Some(host) => {
            let mailer = SmtpMailer::new(
                host,
                config.smtp_port,
                config.smtp_username.clone(),
                config.smtp_password.clone(),
                &config.mail_from,
            )?;
            tracing::info!(host = %host, port = config.smtp_port, "SMTP transport configured");
            Arc::new(mailer)
        }
        None => {
            tracing::warn!("SMTP_HOST not set; emails will be logged, not sent");
            Arc::new(LogMailer)
        }
    };

    let tickets = TicketGenerator::new(config.ticket_dir(), config.currency_symbol.clone());
    tracing::info!(dir = %tickets.dir().display(), "Ticket staging directory");

    let state = AppState {
        users: Arc::new(PgUserRepository::new(pool)),
        notifications: NotificationService::new(mailer, tickets, config.currency_symbol.clone()),
    };
    let app = routes::router(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
