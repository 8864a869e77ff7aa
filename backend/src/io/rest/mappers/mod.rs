pub mod expense_mapper;
pub mod guest_mapper;
pub mod payment_mapper;
pub mod reservation_mapper;
pub mod room_mapper;
pub mod user_mapper;
