pub mod bookers;
pub mod bookings;
pub mod machines;
pub mod schedule;
pub mod slots;
