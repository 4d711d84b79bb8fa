//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod booker_repo;
pub mod booking_repo;
pub mod machine_repo;
pub mod schedule_repo;
pub mod slot_repo;

pub use booker_repo::BookerRepo;
pub use booking_repo::BookingRepo;
pub use machine_repo::MachineRepo;
pub use schedule_repo::ScheduleRepo;
pub use slot_repo::SlotRepo;
