use shared::Reservation as ReservationDto;

use crate::domain::models::reservation::Reservation;
use crate::domain::payment_service::LedgerTotals;

pub struct ReservationMapper;

impl ReservationMapper {
    /// Combine a reservation with its ledger totals into the wire view.
    pub fn to_dto(reservation: Reservation, totals: &LedgerTotals) -> ReservationDto {
        ReservationDto {
            id: reservation.id,
            confirmation_number: reservation.confirmation_number,
            guest_id: reservation.guest_id,
            room_id: reservation.room_id,
            check_in_date: reservation.check_in_date,
            check_out_date: reservation.check_out_date,
            status: reservation.status,
            total_amount: totals.total_amount,
            total_paid: totals.total_paid,
            balance: totals.balance,
            booking_source: reservation.booking_source,
            notes: reservation.notes,
            checked_in_at: reservation.checked_in_at,
            checked_out_at: reservation.checked_out_at,
            cancelled_at: reservation.cancelled_at,
            created_at: reservation.created_at,
            updated_at: reservation.updated_at,
        }
    }
}
