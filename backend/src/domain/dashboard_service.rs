//! At-a-glance numbers for the landing view: room occupancy, today's
//! arrivals, outstanding balances and month-to-date expenses.

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use shared::DashboardSummary;

use crate::domain::errors::Result;
use crate::storage::repositories::{
    ExpenseRepository, PaymentRepository, ReservationRepository, RoomRepository,
};
use crate::storage::DbConnection;

#[derive(Clone)]
pub struct DashboardService {
    rooms: RoomRepository,
    reservations: ReservationRepository,
    payments: PaymentRepository,
    expenses: ExpenseRepository,
}

impl DashboardService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            rooms: RoomRepository::new(db.clone()),
            reservations: ReservationRepository::new(db.clone()),
            payments: PaymentRepository::new(db.clone()),
            expenses: ExpenseRepository::new(db),
        }
    }

    pub async fn summary(&self) -> Result<DashboardSummary> {
        let mut rooms_available = 0;
        let mut rooms_occupied = 0;
        let mut rooms_out_of_order = 0;
        for (status, count) in self.rooms.count_by_status().await? {
            match status.as_str() {
                "available" => rooms_available = count,
                "occupied" => rooms_occupied = count,
                "out_of_order" => rooms_out_of_order = count,
                _ => {}
            }
        }

        let today = Utc::now().date_naive();
        let guests_in_house = self.reservations.count_by_status("checked_in").await?;
        let arrivals_today = self.reservations.count_arrivals_on(today).await?;

        // sum of positive balances across everything still open
        let mut outstanding_balance = Decimal::ZERO;
        for reservation in self.reservations.list_active().await? {
            let paid: Decimal = self
                .payments
                .list_for_reservation(reservation.id)
                .await?
                .iter()
                .map(|p| p.amount)
                .sum();
            let balance = reservation.total_amount - paid;
            if balance > Decimal::ZERO {
                outstanding_balance += balance;
            }
        }

        let month_start = today.with_day(1).unwrap_or(today);
        let expenses_month_to_date: Decimal = self
            .expenses
            .list_between(month_start, today)
            .await?
            .iter()
            .map(|e| e.amount)
            .sum();

        Ok(DashboardSummary {
            rooms_total: rooms_available + rooms_occupied + rooms_out_of_order,
            rooms_available,
            rooms_occupied,
            rooms_out_of_order,
            guests_in_house,
            arrivals_today,
            outstanding_balance,
            expenses_month_to_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment_service::PaymentService;
    use crate::domain::reservation_service::ReservationService;
    use crate::storage::test_support::{date, seed_guest, seed_room, test_db};
    use rust_decimal_macros::dec;
    use shared::{CreatePaymentRequest, CreateReservationRequest, PaymentMethod, PaymentType};

    #[tokio::test]
    async fn summary_reflects_rooms_and_outstanding_balances() {
        let db = test_db().await;
        let room_a = seed_room(&db, "101", dec!(500000)).await;
        seed_room(&db, "102", dec!(500000)).await;
        let guest = seed_guest(&db, "Ana Pratama").await;
        let reservations = ReservationService::new(db.clone());
        let payments = PaymentService::new(db.clone());
        let service = DashboardService::new(db.clone());

        let reservation = reservations
            .create(CreateReservationRequest {
                guest_id: guest.id,
                room_id: room_a.room.id,
                check_in_date: date(2026, 3, 1),
                check_out_date: date(2026, 3, 3),
                total_amount: dec!(1000000),
                booking_source: None,
                notes: None,
            })
            .await
            .unwrap();
        payments
            .record(CreatePaymentRequest {
                reservation_id: reservation.id,
                amount: dec!(300000),
                payment_type: PaymentType::Downpayment,
                payment_method: PaymentMethod::Cash,
                payment_date: date(2026, 3, 1),
                reference_number: None,
                notes: None,
            })
            .await
            .unwrap();
        reservations
            .check_in(reservation.id, None, 1)
            .await
            .unwrap();

        let summary = service.summary().await.unwrap();
        assert_eq!(summary.rooms_total, 2);
        assert_eq!(summary.rooms_occupied, 1);
        assert_eq!(summary.rooms_available, 1);
        assert_eq!(summary.guests_in_house, 1);
        assert_eq!(summary.outstanding_balance, dec!(700000));
    }
}
