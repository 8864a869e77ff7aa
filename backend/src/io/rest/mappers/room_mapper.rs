use shared::{Room as RoomDto, RoomType as RoomTypeDto};

use crate::domain::models::room::RoomDetail;
use crate::domain::models::room_type::RoomType;

pub struct RoomMapper;

impl RoomMapper {
    pub fn to_dto(detail: RoomDetail) -> RoomDto {
        let effective_rate = detail.effective_rate();
        RoomDto {
            id: detail.room.id,
            room_number: detail.room.room_number,
            floor: detail.room.floor,
            room_type_id: detail.room.room_type_id,
            status: detail.room.status,
            custom_rate: detail.room.custom_rate,
            effective_rate,
            notes: detail.room.notes,
            is_active: detail.room.is_active,
        }
    }

    pub fn type_to_dto(room_type: RoomType) -> RoomTypeDto {
        RoomTypeDto {
            id: room_type.id,
            name: room_type.name,
            code: room_type.code,
            default_rate: room_type.default_rate,
            max_occupancy: room_type.max_occupancy,
            is_active: room_type.is_active,
        }
    }
}
