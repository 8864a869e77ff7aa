use shared::Guest as GuestDto;

use crate::domain::models::guest::Guest;

pub struct GuestMapper;

impl GuestMapper {
    pub fn to_dto(guest: Guest) -> GuestDto {
        GuestDto {
            id: guest.id,
            full_name: guest.full_name,
            email: guest.email,
            phone: guest.phone,
            id_type: guest.id_type,
            id_number: guest.id_number,
            nationality: guest.nationality,
            notes: guest.notes,
            is_vip: guest.is_vip,
        }
    }
}
