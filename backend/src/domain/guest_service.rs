//! Guest management.

use chrono::Utc;
use shared::{CreateGuestRequest, UpdateGuestRequest};
use tracing::info;

use crate::domain::errors::{DomainError, Result};
use crate::domain::models::guest::Guest;
use crate::storage::repositories::{GuestRepository, ReservationRepository};
use crate::storage::DbConnection;

#[derive(Clone)]
pub struct GuestService {
    guests: GuestRepository,
    reservations: ReservationRepository,
}

impl GuestService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            guests: GuestRepository::new(db.clone()),
            reservations: ReservationRepository::new(db),
        }
    }

    pub async fn create(&self, request: CreateGuestRequest) -> Result<Guest> {
        validate_name(&request.full_name)?;
        validate_email(request.email.as_deref())?;

        let now = Utc::now();
        let mut guest = Guest {
            id: 0,
            full_name: request.full_name.trim().to_string(),
            email: request.email,
            phone: request.phone,
            id_type: request.id_type,
            id_number: request.id_number,
            nationality: request.nationality,
            notes: request.notes,
            is_vip: request.is_vip,
            created_at: now,
            updated_at: now,
        };
        guest.id = self.guests.insert(&guest).await?;
        info!("created guest {} ({})", guest.id, guest.full_name);
        Ok(guest)
    }

    pub async fn get(&self, id: i64) -> Result<Guest> {
        self.guests
            .get(id)
            .await?
            .ok_or(DomainError::not_found("guest", id))
    }

    pub async fn list(&self) -> Result<Vec<Guest>> {
        self.guests.list().await
    }

    pub async fn update(&self, id: i64, request: UpdateGuestRequest) -> Result<Guest> {
        let mut guest = self.get(id).await?;
        if let Some(name) = request.full_name {
            validate_name(&name)?;
            guest.full_name = name.trim().to_string();
        }
        if let Some(email) = request.email {
            validate_email(Some(email.as_str()))?;
            guest.email = Some(email);
        }
        if let Some(phone) = request.phone {
            guest.phone = Some(phone);
        }
        if let Some(id_type) = request.id_type {
            guest.id_type = Some(id_type);
        }
        if let Some(id_number) = request.id_number {
            guest.id_number = Some(id_number);
        }
        if let Some(nationality) = request.nationality {
            guest.nationality = Some(nationality);
        }
        if let Some(notes) = request.notes {
            guest.notes = Some(notes);
        }
        if let Some(is_vip) = request.is_vip {
            guest.is_vip = is_vip;
        }
        guest.updated_at = Utc::now();
        self.guests.update(&guest).await?;
        Ok(guest)
    }

    /// Delete a guest with no reservation history. Guests referenced by
    /// reservations cannot be removed — the audit trail wins.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get(id).await?;
        if self.reservations.count_for_guest(id).await? > 0 {
            return Err(DomainError::conflict(
                "guest has reservations on file and cannot be deleted",
            ));
        }
        self.guests.delete(id).await?;
        info!("deleted guest {}", id);
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.len() < 3 || trimmed.len() > 120 {
        return Err(DomainError::validation(
            "guest name must be 3 to 120 characters",
        ));
    }
    Ok(())
}

fn validate_email(email: Option<&str>) -> Result<()> {
    if let Some(email) = email {
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid {
            return Err(DomainError::validation("invalid email format"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation_service::ReservationService;
    use crate::storage::test_support::{date, seed_guest, seed_room, test_db};
    use rust_decimal_macros::dec;
    use shared::CreateReservationRequest;

    #[tokio::test]
    async fn name_and_email_are_validated() {
        let db = test_db().await;
        let service = GuestService::new(db.clone());

        let short = service
            .create(CreateGuestRequest {
                full_name: "Al".to_string(),
                email: None,
                phone: None,
                id_type: None,
                id_number: None,
                nationality: None,
                notes: None,
                is_vip: false,
            })
            .await;
        assert!(matches!(short.unwrap_err(), DomainError::Validation { .. }));

        let bad_email = service
            .create(CreateGuestRequest {
                full_name: "Ana Pratama".to_string(),
                email: Some("not-an-email".to_string()),
                phone: None,
                id_type: None,
                id_number: None,
                nationality: None,
                notes: None,
                is_vip: false,
            })
            .await;
        assert!(matches!(
            bad_email.unwrap_err(),
            DomainError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn update_changes_only_provided_fields() {
        let db = test_db().await;
        let service = GuestService::new(db.clone());
        let guest = seed_guest(&db, "Ana Pratama").await;

        let updated = service
            .update(
                guest.id,
                UpdateGuestRequest {
                    is_vip: Some(true),
                    phone: Some("+62811000222".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_vip);
        assert_eq!(updated.phone.as_deref(), Some("+62811000222"));
        assert_eq!(updated.full_name, "Ana Pratama");
    }

    #[tokio::test]
    async fn guests_with_reservations_cannot_be_deleted() {
        let db = test_db().await;
        let service = GuestService::new(db.clone());
        let guest = seed_guest(&db, "Ana Pratama").await;
        let room = seed_room(&db, "101", dec!(500000)).await;

        ReservationService::new(db.clone())
            .create(CreateReservationRequest {
                guest_id: guest.id,
                room_id: room.room.id,
                check_in_date: date(2026, 3, 1),
                check_out_date: date(2026, 3, 2),
                total_amount: dec!(500000),
                booking_source: None,
                notes: None,
            })
            .await
            .unwrap();

        let result = service.delete(guest.id).await;
        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));

        // a guest with no history deletes fine
        let transient = seed_guest(&db, "Budi Santoso").await;
        service.delete(transient.id).await.unwrap();
        assert!(matches!(
            service.get(transient.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
