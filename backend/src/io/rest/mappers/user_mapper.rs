use shared::User as UserDto;

use crate::domain::models::user::User;

pub struct UserMapper;

impl UserMapper {
    pub fn to_dto(user: User) -> UserDto {
        UserDto {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
        }
    }
}
