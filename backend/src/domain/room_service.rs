//! Room and room type management.

use chrono::Utc;
use rust_decimal::Decimal;
use shared::{
    CreateRoomRequest, CreateRoomTypeRequest, RoomStatus, UpdateRoomRequest,
    UpdateRoomTypeRequest,
};
use tracing::info;

use crate::domain::errors::{DomainError, Result};
use crate::domain::models::room::{Room, RoomDetail};
use crate::domain::models::room_type::RoomType;
use crate::storage::repositories::{RoomRepository, RoomTypeRepository};
use crate::storage::DbConnection;

#[derive(Clone)]
pub struct RoomService {
    room_types: RoomTypeRepository,
    rooms: RoomRepository,
}

impl RoomService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            room_types: RoomTypeRepository::new(db.clone()),
            rooms: RoomRepository::new(db),
        }
    }

    pub async fn create_room_type(&self, request: CreateRoomTypeRequest) -> Result<RoomType> {
        if request.name.trim().is_empty() {
            return Err(DomainError::validation("room type name must not be empty"));
        }
        let code = request.code.trim().to_string();
        if code.is_empty() || code.len() > 10 {
            return Err(DomainError::validation(
                "room type code must be 1 to 10 characters",
            ));
        }
        if request.default_rate < Decimal::ZERO {
            return Err(DomainError::validation("default rate must not be negative"));
        }
        if request.max_occupancy < 1 {
            return Err(DomainError::validation("max occupancy must be at least 1"));
        }
        if self.room_types.get_by_code(&code).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "room type code {code} already exists"
            )));
        }

        let now = Utc::now();
        let mut room_type = RoomType {
            id: 0,
            name: request.name.trim().to_string(),
            code,
            default_rate: request.default_rate.round_dp(2),
            max_occupancy: request.max_occupancy,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        room_type.id = self.room_types.insert(&room_type).await?;
        info!("created room type {} ({})", room_type.id, room_type.code);
        Ok(room_type)
    }

    pub async fn get_room_type(&self, id: i64) -> Result<RoomType> {
        self.room_types
            .get(id)
            .await?
            .ok_or(DomainError::not_found("room type", id))
    }

    pub async fn list_room_types(&self) -> Result<Vec<RoomType>> {
        self.room_types.list().await
    }

    pub async fn update_room_type(
        &self,
        id: i64,
        request: UpdateRoomTypeRequest,
    ) -> Result<RoomType> {
        let mut room_type = self.get_room_type(id).await?;
        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("room type name must not be empty"));
            }
            room_type.name = name.trim().to_string();
        }
        if let Some(rate) = request.default_rate {
            if rate < Decimal::ZERO {
                return Err(DomainError::validation("default rate must not be negative"));
            }
            room_type.default_rate = rate.round_dp(2);
        }
        if let Some(occupancy) = request.max_occupancy {
            if occupancy < 1 {
                return Err(DomainError::validation("max occupancy must be at least 1"));
            }
            room_type.max_occupancy = occupancy;
        }
        if let Some(active) = request.is_active {
            room_type.is_active = active;
        }
        room_type.updated_at = Utc::now();
        self.room_types.update(&room_type).await?;
        Ok(room_type)
    }

    pub async fn create_room(&self, request: CreateRoomRequest) -> Result<RoomDetail> {
        if request.room_number.trim().is_empty() || request.room_number.len() > 20 {
            return Err(DomainError::validation(
                "room number must be 1 to 20 characters",
            ));
        }
        if let Some(rate) = request.custom_rate {
            if rate < Decimal::ZERO {
                return Err(DomainError::validation("custom rate must not be negative"));
            }
        }
        let room_type = self
            .room_types
            .get(request.room_type_id)
            .await?
            .ok_or(DomainError::not_found("room type", request.room_type_id))?;
        if !room_type.is_active {
            return Err(DomainError::validation(format!(
                "room type {} is not active",
                room_type.code
            )));
        }
        let room_number = request.room_number.trim().to_string();
        if self.rooms.get_by_number(&room_number).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "room {room_number} already exists"
            )));
        }

        let now = Utc::now();
        let mut room = Room {
            id: 0,
            room_number,
            floor: request.floor,
            room_type_id: room_type.id,
            status: RoomStatus::Available,
            custom_rate: request.custom_rate.map(|r| r.round_dp(2)),
            notes: request.notes,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        room.id = self.rooms.insert(&room).await?;
        info!("created room {} ({})", room.id, room.room_number);
        Ok(RoomDetail {
            room,
            default_rate: room_type.default_rate,
        })
    }

    pub async fn get_room(&self, id: i64) -> Result<RoomDetail> {
        self.rooms
            .get_detail(id)
            .await?
            .ok_or(DomainError::not_found("room", id))
    }

    pub async fn list_rooms(&self) -> Result<Vec<RoomDetail>> {
        self.rooms.list_detail().await
    }

    pub async fn update_room(&self, id: i64, request: UpdateRoomRequest) -> Result<RoomDetail> {
        let mut room = self
            .rooms
            .get(id)
            .await?
            .ok_or(DomainError::not_found("room", id))?;

        if let Some(room_type_id) = request.room_type_id {
            self.room_types
                .get(room_type_id)
                .await?
                .ok_or(DomainError::not_found("room type", room_type_id))?;
            room.room_type_id = room_type_id;
        }
        if let Some(floor) = request.floor {
            room.floor = Some(floor);
        }
        if let Some(status) = request.status {
            room.status = status;
        }
        if let Some(rate) = request.custom_rate {
            if rate < Decimal::ZERO {
                return Err(DomainError::validation("custom rate must not be negative"));
            }
            room.custom_rate = Some(rate.round_dp(2));
        }
        if let Some(notes) = request.notes {
            room.notes = Some(notes);
        }
        if let Some(active) = request.is_active {
            room.is_active = active;
        }
        room.updated_at = Utc::now();
        self.rooms.update(&room).await?;
        self.get_room(id).await
    }

    /// Soft delete: the room stops being offered but its history stays.
    pub async fn deactivate_room(&self, id: i64) -> Result<()> {
        let mut room = self
            .rooms
            .get(id)
            .await?
            .ok_or(DomainError::not_found("room", id))?;
        if room.status == RoomStatus::Occupied {
            return Err(DomainError::invalid_state(format!(
                "room {} is occupied",
                room.room_number
            )));
        }
        room.is_active = false;
        room.updated_at = Utc::now();
        self.rooms.update(&room).await?;
        info!("deactivated room {}", room.room_number);
        Ok(())
    }
}
