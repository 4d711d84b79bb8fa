//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for create and update payloads
//! - Read-only aggregates assembled from joins, where the entity has any

pub mod booker;
pub mod booking;
pub mod machine;
pub mod schedule;
pub mod slot;
