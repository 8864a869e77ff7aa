//! Domain error taxonomy.
//!
//! Every fallible domain operation returns one of these variants; the REST
//! layer translates them to HTTP statuses without inspecting messages.

use shared::ReservationStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Input failed validation before any storage was touched.
    #[error("{message}")]
    Validation { message: String },

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Operation is not legal for the entity's current status.
    #[error("invalid state: {message}")]
    InvalidState { message: String },

    /// Requested reservation transition is not part of the state machine.
    #[error("invalid transition from {from} to {requested}")]
    InvalidTransition {
        from: ReservationStatus,
        requested: ReservationStatus,
    },

    /// The operation collides with existing data (e.g. a double booking).
    #[error("{message}")]
    Conflict { message: String },

    /// Bearer token missing, unknown or past its expiry. Clients treat
    /// this as a forced logout, not a dismissible error.
    #[error("session expired")]
    AuthExpired,

    #[error("database error: {0}")]
    Database(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DomainError::NotFound { entity, id }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        DomainError::InvalidState {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict {
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::Database(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
