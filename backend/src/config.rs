//! Environment-driven runtime configuration.

use std::env;
use std::net::SocketAddr;

/// Runtime configuration, read once at startup. Every knob has a default
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Origin allowed by CORS (the admin frontend).
    pub cors_origin: String,
    /// Username of the bootstrapped admin account.
    pub admin_username: String,
    /// Password for the bootstrapped admin account. Only used when the
    /// users table is empty.
    pub admin_password: String,
    /// Bearer-session lifetime in hours.
    pub session_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("FRONTDESK_ADDR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000))),
            database_url: env::var("FRONTDESK_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:frontdesk.db".to_string()),
            cors_origin: env::var("FRONTDESK_CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            admin_username: env::var("FRONTDESK_ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            admin_password: env::var("FRONTDESK_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin".to_string()),
            session_ttl_hours: env::var("FRONTDESK_SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(12),
        }
    }
}
