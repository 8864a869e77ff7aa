//! Domain layer: entities, the reservation lifecycle, the payment ledger
//! and the rate calculator, plus the supporting per-entity services.

pub mod auth_service;
pub mod dashboard_service;
pub mod errors;
pub mod expense_service;
pub mod guest_service;
pub mod models;
pub mod payment_service;
pub mod rate;
pub mod reservation_service;
pub mod room_service;

pub use errors::{DomainError, Result};
