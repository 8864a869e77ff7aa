pub mod expense_repository;
pub mod guest_repository;
pub mod payment_repository;
pub mod reservation_repository;
pub mod room_repository;
pub mod room_type_repository;
pub mod session_repository;
pub mod user_repository;

pub use expense_repository::ExpenseRepository;
pub use guest_repository::GuestRepository;
pub use payment_repository::PaymentRepository;
pub use reservation_repository::ReservationRepository;
pub use room_repository::RoomRepository;
pub use room_type_repository::RoomTypeRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;
