//! Domain logic for the laundry booking service.
//!
//! This crate has no internal dependencies: it holds the error taxonomy,
//! primitive types, input validation and the schedule assembler so they can
//! be unit tested without a database.

pub mod booking;
pub mod error;
pub mod interval;
pub mod schedule;
pub mod slot;
pub mod time_of_day;
pub mod types;
pub mod validation;
