//! Payment ledger for reservations.
//!
//! The ledger is the source of truth for `total_paid` and `balance`:
//! totals are recomputed from the full payment history on every call and
//! never cached across mutations, so a deleted payment is reflected in the
//! very next read. Balances are signed — an overpaid reservation carries a
//! negative balance and nothing clamps it.

use chrono::Utc;
use rust_decimal::Decimal;
use shared::{CreatePaymentRequest, PaymentStatus};
use tracing::info;

use crate::domain::errors::{DomainError, Result};
use crate::domain::models::payment::Payment;
use crate::domain::models::reservation::Reservation;
use crate::storage::repositories::{PaymentRepository, ReservationRepository};
use crate::storage::DbConnection;

/// Ledger-derived totals for one reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerTotals {
    pub total_amount: Decimal,
    pub total_paid: Decimal,
    pub balance: Decimal,
}

impl LedgerTotals {
    pub fn payment_status(&self) -> PaymentStatus {
        if self.balance <= Decimal::ZERO {
            PaymentStatus::FullyPaid
        } else if self.total_paid > Decimal::ZERO {
            PaymentStatus::PartialPaid
        } else {
            PaymentStatus::Unpaid
        }
    }
}

#[derive(Clone)]
pub struct PaymentService {
    payments: PaymentRepository,
    reservations: ReservationRepository,
}

impl PaymentService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            payments: PaymentRepository::new(db.clone()),
            reservations: ReservationRepository::new(db),
        }
    }

    /// Append a payment to a reservation's ledger.
    ///
    /// Only `confirmed` and `checked_in` reservations accept payments. A
    /// payment covering the full balance does not transition the
    /// reservation — check-out stays an explicit, separate step.
    pub async fn record(&self, request: CreatePaymentRequest) -> Result<Payment> {
        if request.amount <= Decimal::ZERO {
            return Err(DomainError::validation("payment amount must be positive"));
        }

        let reservation = self
            .reservations
            .get(request.reservation_id)
            .await?
            .ok_or(DomainError::not_found(
                "reservation",
                request.reservation_id,
            ))?;
        if !reservation.accepts_payments() {
            return Err(DomainError::invalid_state(format!(
                "cannot record a payment against a {} reservation",
                reservation.status
            )));
        }

        let mut payment = Payment {
            id: 0,
            reservation_id: reservation.id,
            amount: request.amount.round_dp(2),
            payment_type: request.payment_type,
            payment_method: request.payment_method,
            payment_date: request.payment_date,
            reference_number: request.reference_number,
            notes: request.notes,
            created_at: Utc::now(),
        };
        payment.id = self.payments.insert(&payment).await?;

        info!(
            "recorded {} payment {} of {} against reservation {}",
            payment.payment_type, payment.id, payment.amount, reservation.id
        );
        Ok(payment)
    }

    pub async fn get(&self, id: i64) -> Result<Payment> {
        self.payments
            .get(id)
            .await?
            .ok_or(DomainError::not_found("payment", id))
    }

    /// Full ledger for a reservation, ordered by creation time ascending.
    pub async fn list_for_reservation(&self, reservation_id: i64) -> Result<Vec<Payment>> {
        self.reservations
            .get(reservation_id)
            .await?
            .ok_or(DomainError::not_found("reservation", reservation_id))?;
        self.payments.list_for_reservation(reservation_id).await
    }

    /// Recompute totals for a reservation already in hand.
    pub async fn totals_for(&self, reservation: &Reservation) -> Result<LedgerTotals> {
        let payments = self.payments.list_for_reservation(reservation.id).await?;
        let total_paid: Decimal = payments.iter().map(|p| p.amount).sum();
        Ok(LedgerTotals {
            total_amount: reservation.total_amount,
            total_paid,
            balance: reservation.total_amount - total_paid,
        })
    }

    /// Fetch a reservation and its recomputed totals.
    pub async fn balance(&self, reservation_id: i64) -> Result<(Reservation, LedgerTotals)> {
        let reservation = self
            .reservations
            .get(reservation_id)
            .await?
            .ok_or(DomainError::not_found("reservation", reservation_id))?;
        let totals = self.totals_for(&reservation).await?;
        Ok((reservation, totals))
    }

    /// Remove a ledger entry. Balances are derived, so the next read
    /// reflects the deletion without any further bookkeeping.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.payments.delete(id).await? {
            return Err(DomainError::not_found("payment", id));
        }
        info!("deleted payment {}", id);
        Ok(())
    }
}
