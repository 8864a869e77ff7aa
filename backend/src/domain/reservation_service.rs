//! Reservation lifecycle management.
//!
//! Owns the reservation state machine and the date/amount invariants.
//! Availability is enforced here, server-side: a room with any overlapping
//! confirmed or checked-in reservation cannot be booked again, regardless
//! of what a client submitted. Cancellation is a status transition — the
//! record and its payment history always remain queryable.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::{CreateReservationRequest, ReservationStatus, RoomStatus, UpdateReservationRequest};
use tracing::info;
use uuid::Uuid;

use crate::domain::errors::{DomainError, Result};
use crate::domain::models::reservation::Reservation;
use crate::domain::rate::{self, Quote};
use crate::storage::repositories::{
    GuestRepository, PaymentRepository, ReservationRepository, RoomRepository,
};
use crate::storage::DbConnection;

/// Result of an availability probe for one room and date range.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityCheck {
    pub available: bool,
    pub conflicting: i64,
}

#[derive(Clone)]
pub struct ReservationService {
    reservations: ReservationRepository,
    payments: PaymentRepository,
    rooms: RoomRepository,
    guests: GuestRepository,
}

impl ReservationService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            reservations: ReservationRepository::new(db.clone()),
            payments: PaymentRepository::new(db.clone()),
            rooms: RoomRepository::new(db.clone()),
            guests: GuestRepository::new(db),
        }
    }

    /// Create a reservation in `confirmed` status.
    ///
    /// The submitted `total_amount` is taken as-is (any discount was applied
    /// by the caller and is not transmitted); everything else is validated:
    /// date ordering, a non-negative amount, referenced guest and room, and
    /// room availability across the date range.
    pub async fn create(&self, request: CreateReservationRequest) -> Result<Reservation> {
        rate::nights_between(request.check_in_date, request.check_out_date)?;
        if request.total_amount < Decimal::ZERO {
            return Err(DomainError::validation("total amount must not be negative"));
        }

        let guest = self
            .guests
            .get(request.guest_id)
            .await?
            .ok_or(DomainError::not_found("guest", request.guest_id))?;
        let room = self
            .rooms
            .get(request.room_id)
            .await?
            .ok_or(DomainError::not_found("room", request.room_id))?;
        if !room.is_active {
            return Err(DomainError::validation(format!(
                "room {} is not active",
                room.room_number
            )));
        }

        let conflicting = self
            .reservations
            .count_overlapping(room.id, request.check_in_date, request.check_out_date, None)
            .await?;
        if conflicting > 0 {
            return Err(DomainError::conflict(format!(
                "room {} is already reserved between {} and {}",
                room.room_number, request.check_in_date, request.check_out_date
            )));
        }

        let now = Utc::now();
        let mut reservation = Reservation {
            id: 0,
            confirmation_number: generate_confirmation_number(),
            guest_id: guest.id,
            room_id: room.id,
            check_in_date: request.check_in_date,
            check_out_date: request.check_out_date,
            status: ReservationStatus::Confirmed,
            total_amount: request.total_amount.round_dp(2),
            booking_source: request.booking_source,
            notes: request.notes,
            checked_in_at: None,
            checked_in_by: None,
            checked_out_at: None,
            checked_out_by: None,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        };
        reservation.id = self.reservations.insert(&reservation).await?;

        info!(
            "created reservation {} ({}) for guest {} in room {}",
            reservation.id, reservation.confirmation_number, guest.id, room.room_number
        );
        Ok(reservation)
    }

    pub async fn get(&self, id: i64) -> Result<Reservation> {
        self.reservations
            .get(id)
            .await?
            .ok_or(DomainError::not_found("reservation", id))
    }

    pub async fn list(
        &self,
        status: Option<ReservationStatus>,
        guest_id: Option<i64>,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<Reservation>, i64)> {
        let limit = limit.clamp(1, 100);
        let skip = skip.max(0);
        self.reservations
            .list(status.map(|s| s.as_str()), guest_id, skip, limit)
            .await
    }

    /// Partial update. Status cannot be changed here — the dedicated
    /// transitions below are the only way to move a reservation along.
    pub async fn update(&self, id: i64, request: UpdateReservationRequest) -> Result<Reservation> {
        let mut reservation = self.get(id).await?;
        if reservation.status.is_terminal() {
            return Err(DomainError::invalid_state(format!(
                "cannot modify a {} reservation",
                reservation.status
            )));
        }

        if let Some(total) = request.total_amount {
            if total < Decimal::ZERO {
                return Err(DomainError::validation("total amount must not be negative"));
            }
            reservation.total_amount = total.round_dp(2);
        }
        if let Some(check_in) = request.check_in_date {
            reservation.check_in_date = check_in;
        }
        if let Some(check_out) = request.check_out_date {
            reservation.check_out_date = check_out;
        }
        rate::nights_between(reservation.check_in_date, reservation.check_out_date)?;

        let room_changed = request.room_id.is_some_and(|r| r != reservation.room_id);
        if let Some(room_id) = request.room_id {
            let room = self
                .rooms
                .get(room_id)
                .await?
                .ok_or(DomainError::not_found("room", room_id))?;
            if !room.is_active {
                return Err(DomainError::validation(format!(
                    "room {} is not active",
                    room.room_number
                )));
            }
            reservation.room_id = room_id;
        }

        let dates_changed = request.check_in_date.is_some() || request.check_out_date.is_some();
        if room_changed || dates_changed {
            let conflicting = self
                .reservations
                .count_overlapping(
                    reservation.room_id,
                    reservation.check_in_date,
                    reservation.check_out_date,
                    Some(reservation.id),
                )
                .await?;
            if conflicting > 0 {
                return Err(DomainError::conflict(format!(
                    "room {} is already reserved between {} and {}",
                    reservation.room_id, reservation.check_in_date, reservation.check_out_date
                )));
            }
        }

        if let Some(source) = request.booking_source {
            reservation.booking_source = Some(source);
        }
        if let Some(notes) = request.notes {
            reservation.notes = Some(notes);
        }
        reservation.updated_at = Utc::now();
        self.reservations.update(&reservation).await?;
        Ok(reservation)
    }

    /// `confirmed -> checked_in`. Records the timestamp and the acting
    /// user, and marks the room occupied.
    pub async fn check_in(
        &self,
        id: i64,
        notes: Option<String>,
        actor_id: i64,
    ) -> Result<Reservation> {
        let mut reservation = self.get(id).await?;
        if reservation.status != ReservationStatus::Confirmed {
            return Err(DomainError::InvalidTransition {
                from: reservation.status,
                requested: ReservationStatus::CheckedIn,
            });
        }

        let now = Utc::now();
        reservation.status = ReservationStatus::CheckedIn;
        reservation.checked_in_at = Some(now);
        reservation.checked_in_by = Some(actor_id);
        append_notes(&mut reservation, notes);
        reservation.updated_at = now;
        self.reservations.update(&reservation).await?;
        self.set_room_status(reservation.room_id, RoomStatus::Occupied)
            .await?;

        info!("checked in reservation {} by user {}", id, actor_id);
        Ok(reservation)
    }

    /// `checked_in -> checked_out`. Refused while the ledger shows an
    /// outstanding balance; overpayment does not block. Frees the room.
    pub async fn check_out(
        &self,
        id: i64,
        notes: Option<String>,
        actor_id: i64,
    ) -> Result<Reservation> {
        let mut reservation = self.get(id).await?;
        if reservation.status != ReservationStatus::CheckedIn {
            return Err(DomainError::InvalidTransition {
                from: reservation.status,
                requested: ReservationStatus::CheckedOut,
            });
        }

        let payments = self.payments.list_for_reservation(id).await?;
        let total_paid: Decimal = payments.iter().map(|p| p.amount).sum();
        let balance = reservation.total_amount - total_paid;
        if balance > Decimal::ZERO {
            return Err(DomainError::invalid_state(format!(
                "cannot check out with outstanding balance {balance}"
            )));
        }

        let now = Utc::now();
        reservation.status = ReservationStatus::CheckedOut;
        reservation.checked_out_at = Some(now);
        reservation.checked_out_by = Some(actor_id);
        append_notes(&mut reservation, notes);
        reservation.updated_at = now;
        self.reservations.update(&reservation).await?;
        self.set_room_status(reservation.room_id, RoomStatus::Available)
            .await?;

        info!("checked out reservation {} by user {}", id, actor_id);
        Ok(reservation)
    }

    /// Soft cancel from `confirmed` or `checked_in`. The record is never
    /// deleted: recorded payments must stay queryable for audit.
    pub async fn cancel(&self, id: i64) -> Result<Reservation> {
        let mut reservation = self.get(id).await?;
        if !matches!(
            reservation.status,
            ReservationStatus::Confirmed | ReservationStatus::CheckedIn
        ) {
            return Err(DomainError::InvalidTransition {
                from: reservation.status,
                requested: ReservationStatus::Cancelled,
            });
        }

        let was_checked_in = reservation.status == ReservationStatus::CheckedIn;
        let now = Utc::now();
        reservation.status = ReservationStatus::Cancelled;
        reservation.cancelled_at = Some(now);
        reservation.updated_at = now;
        self.reservations.update(&reservation).await?;
        if was_checked_in {
            self.set_room_status(reservation.room_id, RoomStatus::Available)
                .await?;
        }

        info!("cancelled reservation {}", id);
        Ok(reservation)
    }

    /// Is the room free across `[check_in, check_out)`?
    pub async fn availability(
        &self,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<AvailabilityCheck> {
        rate::nights_between(check_in, check_out)?;
        self.rooms
            .get(room_id)
            .await?
            .ok_or(DomainError::not_found("room", room_id))?;
        let conflicting = self
            .reservations
            .count_overlapping(room_id, check_in, check_out, None)
            .await?;
        Ok(AvailabilityCheck {
            available: conflicting == 0,
            conflicting,
        })
    }

    /// Advisory price for a stay in the given room. Nothing is persisted.
    pub async fn quote(
        &self,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        discount_percent: Option<Decimal>,
    ) -> Result<Quote> {
        let detail = self
            .rooms
            .get_detail(room_id)
            .await?
            .ok_or(DomainError::not_found("room", room_id))?;
        rate::quote(
            detail.effective_rate(),
            discount_percent.unwrap_or(Decimal::ZERO),
            check_in,
            check_out,
        )
    }

    async fn set_room_status(&self, room_id: i64, status: RoomStatus) -> Result<()> {
        let mut room = self
            .rooms
            .get(room_id)
            .await?
            .ok_or(DomainError::not_found("room", room_id))?;
        room.status = status;
        room.updated_at = Utc::now();
        self.rooms.update(&room).await
    }
}

fn generate_confirmation_number() -> String {
    Uuid::new_v4().simple().to_string()[..10].to_ascii_uppercase()
}

fn append_notes(reservation: &mut Reservation, notes: Option<String>) {
    if let Some(new_notes) = notes.filter(|n| !n.is_empty()) {
        reservation.notes = Some(match reservation.notes.take() {
            Some(existing) => format!("{existing}\n{new_notes}"),
            None => new_notes,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment_service::PaymentService;
    use crate::domain::room_service::RoomService;
    use crate::storage::test_support::{date, seed_guest, seed_room, test_db};
    use rust_decimal_macros::dec;
    use shared::{CreatePaymentRequest, PaymentMethod, PaymentType};

    const ACTOR: i64 = 1;

    fn create_request(
        guest_id: i64,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        total: Decimal,
    ) -> CreateReservationRequest {
        CreateReservationRequest {
            guest_id,
            room_id,
            check_in_date: check_in,
            check_out_date: check_out,
            total_amount: total,
            booking_source: None,
            notes: None,
        }
    }

    async fn pay(db: &DbConnection, reservation_id: i64, amount: Decimal) {
        PaymentService::new(db.clone())
            .record(CreatePaymentRequest {
                reservation_id,
                amount,
                payment_type: PaymentType::Downpayment,
                payment_method: PaymentMethod::Cash,
                payment_date: date(2026, 3, 1),
                reference_number: None,
                notes: None,
            })
            .await
            .expect("failed to record payment");
    }

    #[tokio::test]
    async fn create_starts_confirmed_with_generated_confirmation_number() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let service = ReservationService::new(db.clone());

        let reservation = service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 3),
                dec!(1000000),
            ))
            .await
            .unwrap();

        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.nights(), 2);
        assert_eq!(reservation.confirmation_number.len(), 10);
        assert_eq!(reservation.total_amount, dec!(1000000));
    }

    #[tokio::test]
    async fn create_rejects_non_forward_date_ranges() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let service = ReservationService::new(db.clone());

        let same_day = service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 1),
                dec!(0),
            ))
            .await;
        assert!(matches!(
            same_day.unwrap_err(),
            DomainError::Validation { .. }
        ));

        let backwards = service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 3),
                date(2026, 3, 1),
                dec!(0),
            ))
            .await;
        assert!(matches!(
            backwards.unwrap_err(),
            DomainError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn create_rejects_negative_total_and_unknown_references() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let service = ReservationService::new(db.clone());

        let negative = service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 2),
                dec!(-1),
            ))
            .await;
        assert!(matches!(
            negative.unwrap_err(),
            DomainError::Validation { .. }
        ));

        let no_guest = service
            .create(create_request(
                9999,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 2),
                dec!(0),
            ))
            .await;
        assert!(matches!(
            no_guest.unwrap_err(),
            DomainError::NotFound { entity: "guest", .. }
        ));

        let no_room = service
            .create(create_request(
                guest.id,
                9999,
                date(2026, 3, 1),
                date(2026, 3, 2),
                dec!(0),
            ))
            .await;
        assert!(matches!(
            no_room.unwrap_err(),
            DomainError::NotFound { entity: "room", .. }
        ));
    }

    #[tokio::test]
    async fn overlapping_booking_on_same_room_is_a_conflict() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let other = seed_guest(&db, "Budi Santoso").await;
        let service = ReservationService::new(db.clone());

        service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 5),
                dec!(2000000),
            ))
            .await
            .unwrap();

        let overlap = service
            .create(create_request(
                other.id,
                room.room.id,
                date(2026, 3, 4),
                date(2026, 3, 6),
                dec!(1000000),
            ))
            .await;
        assert!(matches!(
            overlap.unwrap_err(),
            DomainError::Conflict { .. }
        ));

        // back-to-back is fine: previous guest leaves the morning the next
        // one arrives
        let adjacent = service
            .create(create_request(
                other.id,
                room.room.id,
                date(2026, 3, 5),
                date(2026, 3, 7),
                dec!(1000000),
            ))
            .await;
        assert!(adjacent.is_ok());
    }

    #[tokio::test]
    async fn availability_reflects_existing_bookings() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let service = ReservationService::new(db.clone());

        let before = service
            .availability(room.room.id, date(2026, 3, 1), date(2026, 3, 5))
            .await
            .unwrap();
        assert!(before.available);
        assert_eq!(before.conflicting, 0);

        service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 5),
                dec!(2000000),
            ))
            .await
            .unwrap();

        let after = service
            .availability(room.room.id, date(2026, 3, 2), date(2026, 3, 4))
            .await
            .unwrap();
        assert!(!after.available);
        assert_eq!(after.conflicting, 1);
    }

    #[tokio::test]
    async fn double_check_in_fails_with_invalid_transition() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let service = ReservationService::new(db.clone());

        let reservation = service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 3),
                dec!(0),
            ))
            .await
            .unwrap();

        let checked_in = service.check_in(reservation.id, None, ACTOR).await.unwrap();
        assert_eq!(checked_in.status, ReservationStatus::CheckedIn);
        assert!(checked_in.checked_in_at.is_some());
        assert_eq!(checked_in.checked_in_by, Some(ACTOR));

        let again = service.check_in(reservation.id, None, ACTOR).await;
        assert!(matches!(
            again.unwrap_err(),
            DomainError::InvalidTransition {
                from: ReservationStatus::CheckedIn,
                requested: ReservationStatus::CheckedIn,
            }
        ));
    }

    #[tokio::test]
    async fn check_out_before_check_in_fails() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let service = ReservationService::new(db.clone());

        let reservation = service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 3),
                dec!(0),
            ))
            .await
            .unwrap();

        let result = service.check_out(reservation.id, None, ACTOR).await;
        assert!(matches!(
            result.unwrap_err(),
            DomainError::InvalidTransition {
                from: ReservationStatus::Confirmed,
                requested: ReservationStatus::CheckedOut,
            }
        ));
    }

    #[tokio::test]
    async fn check_out_is_gated_on_zero_balance() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let service = ReservationService::new(db.clone());

        let reservation = service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 3),
                dec!(1000000),
            ))
            .await
            .unwrap();
        service.check_in(reservation.id, None, ACTOR).await.unwrap();

        let unpaid = service.check_out(reservation.id, None, ACTOR).await;
        assert!(matches!(
            unpaid.unwrap_err(),
            DomainError::InvalidState { .. }
        ));

        pay(&db, reservation.id, dec!(400000)).await;
        let partial = service.check_out(reservation.id, None, ACTOR).await;
        assert!(matches!(
            partial.unwrap_err(),
            DomainError::InvalidState { .. }
        ));

        pay(&db, reservation.id, dec!(600000)).await;
        let settled = service.check_out(reservation.id, None, ACTOR).await.unwrap();
        assert_eq!(settled.status, ReservationStatus::CheckedOut);
        assert!(settled.checked_out_at.is_some());
    }

    #[tokio::test]
    async fn check_in_and_out_track_room_status() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let service = ReservationService::new(db.clone());
        let rooms = RoomService::new(db.clone());

        let reservation = service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 3),
                dec!(0),
            ))
            .await
            .unwrap();

        service.check_in(reservation.id, None, ACTOR).await.unwrap();
        assert_eq!(
            rooms.get_room(room.room.id).await.unwrap().room.status,
            RoomStatus::Occupied
        );

        service.check_out(reservation.id, None, ACTOR).await.unwrap();
        assert_eq!(
            rooms.get_room(room.room.id).await.unwrap().room.status,
            RoomStatus::Available
        );
    }

    #[tokio::test]
    async fn cancel_keeps_the_record_and_its_payments() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let service = ReservationService::new(db.clone());
        let payments = PaymentService::new(db.clone());

        let reservation = service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 3),
                dec!(1000000),
            ))
            .await
            .unwrap();
        pay(&db, reservation.id, dec!(250000)).await;

        let cancelled = service.cancel(reservation.id).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert!(cancelled.cancelled_at.is_some());

        // record and ledger both survive cancellation
        let reloaded = service.get(reservation.id).await.unwrap();
        assert_eq!(reloaded.status, ReservationStatus::Cancelled);
        let history = payments
            .list_for_reservation(reservation.id)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].amount, dec!(250000));
    }

    #[tokio::test]
    async fn cancel_is_rejected_on_terminal_reservations() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let service = ReservationService::new(db.clone());

        let reservation = service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 3),
                dec!(0),
            ))
            .await
            .unwrap();
        service.check_in(reservation.id, None, ACTOR).await.unwrap();
        service.check_out(reservation.id, None, ACTOR).await.unwrap();

        let result = service.cancel(reservation.id).await;
        assert!(matches!(
            result.unwrap_err(),
            DomainError::InvalidTransition {
                from: ReservationStatus::CheckedOut,
                requested: ReservationStatus::Cancelled,
            }
        ));
    }

    #[tokio::test]
    async fn cancel_from_checked_in_frees_the_room() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let service = ReservationService::new(db.clone());
        let rooms = RoomService::new(db.clone());

        let reservation = service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 3),
                dec!(0),
            ))
            .await
            .unwrap();
        service.check_in(reservation.id, None, ACTOR).await.unwrap();

        service.cancel(reservation.id).await.unwrap();
        assert_eq!(
            rooms.get_room(room.room.id).await.unwrap().room.status,
            RoomStatus::Available
        );
    }

    #[tokio::test]
    async fn update_revalidates_dates_and_rejects_terminal_edits() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let service = ReservationService::new(db.clone());

        let reservation = service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 3),
                dec!(1000000),
            ))
            .await
            .unwrap();

        let bad_dates = service
            .update(
                reservation.id,
                UpdateReservationRequest {
                    check_out_date: Some(date(2026, 2, 28)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(
            bad_dates.unwrap_err(),
            DomainError::Validation { .. }
        ));

        let extended = service
            .update(
                reservation.id,
                UpdateReservationRequest {
                    check_out_date: Some(date(2026, 3, 5)),
                    total_amount: Some(dec!(2000000)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(extended.check_out_date, date(2026, 3, 5));
        assert_eq!(extended.total_amount, dec!(2000000));

        service.cancel(reservation.id).await.unwrap();
        let after_cancel = service
            .update(
                reservation.id,
                UpdateReservationRequest {
                    notes: Some("too late".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(
            after_cancel.unwrap_err(),
            DomainError::InvalidState { .. }
        ));
    }

    #[tokio::test]
    async fn update_rechecks_availability_when_dates_move() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let other = seed_guest(&db, "Budi Santoso").await;
        let service = ReservationService::new(db.clone());

        service
            .create(create_request(
                guest.id,
                room.room.id,
                date(2026, 3, 10),
                date(2026, 3, 12),
                dec!(1000000),
            ))
            .await
            .unwrap();
        let movable = service
            .create(create_request(
                other.id,
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 3),
                dec!(1000000),
            ))
            .await
            .unwrap();

        let moved = service
            .update(
                movable.id,
                UpdateReservationRequest {
                    check_in_date: Some(date(2026, 3, 11)),
                    check_out_date: Some(date(2026, 3, 13)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(moved.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn quote_uses_room_rate_and_multiplies_nights() {
        let db = test_db().await;
        let room = seed_room(&db, "101", dec!(200000)).await;
        let service = ReservationService::new(db.clone());

        let quote = service
            .quote(
                room.room.id,
                date(2026, 3, 1),
                date(2026, 3, 4),
                Some(dec!(10)),
            )
            .await
            .unwrap();
        assert_eq!(quote.nightly_rate, dec!(200000));
        assert_eq!(quote.effective_rate, dec!(180000));
        assert_eq!(quote.nights, 3);
        assert_eq!(quote.total_amount, dec!(540000));
    }
}
