//! Booker entity model and DTOs.

use laundry_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `bookers` table.
///
/// `pin` is private to the service and never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booker {
    pub id: DbId,
    /// Apartment number or similar household identifier.
    pub identifier: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub pin: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Denormalized copy of a booker's public fields, embedded in bookings and
/// schedules.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct BookerSnapshot {
    pub id: DbId,
    pub identifier: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<&Booker> for BookerSnapshot {
    fn from(booker: &Booker) -> Self {
        Self {
            id: booker.id,
            identifier: booker.identifier.clone(),
            name: booker.name.clone(),
            email: booker.email.clone(),
            phone: booker.phone.clone(),
        }
    }
}

/// DTO for creating a new booker.
///
/// A missing `identifier` deserializes as empty so it is reported as a
/// validation error rather than a malformed body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBooker {
    #[serde(default)]
    #[validate(length(max = 64, message = "identifier must be at most 64 characters"))]
    pub identifier: String,
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email is not a valid e-mail address"))]
    pub email: Option<String>,
    #[validate(length(max = 32, message = "phone must be at most 32 characters"))]
    pub phone: Option<String>,
    pub pin: Option<String>,
}

/// DTO for updating a booker's contact fields. The identifier is immutable.
///
/// A field left out of the body keeps its value. For `name`, `email` and
/// `phone` an explicit `null` clears the field; `pin` can only be replaced.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBooker {
    #[serde(default, deserialize_with = "clearable")]
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable")]
    #[validate(email(message = "email is not a valid e-mail address"))]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable")]
    #[validate(length(max = 32, message = "phone must be at most 32 characters"))]
    pub phone: Option<Option<String>>,
    pub pin: Option<String>,
}

/// Present fields deserialize to `Some`, so `null` becomes `Some(None)`.
/// Absent fields fall back to `None` through `#[serde(default)]`.
fn clearable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
