//! Machine entity model and DTOs.

use laundry_core::error::CoreError;
use laundry_core::types::{DbId, Timestamp};
use laundry_core::validation::{require, require_non_empty};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `machines` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Machine {
    pub id: DbId,
    pub info: String,
    pub working: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payload for both creating and updating a machine.
///
/// `working` is optional here only so that an omitted value can be told
/// apart from an explicit `false`; it must always be supplied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MachineInput {
    #[serde(default)]
    #[validate(length(max = 255, message = "info must be at most 255 characters"))]
    pub info: String,
    pub working: Option<bool>,
}

/// Validated machine fields, written by both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineFields {
    pub info: String,
    pub working: bool,
}

impl TryFrom<MachineInput> for MachineFields {
    type Error = CoreError;

    fn try_from(input: MachineInput) -> Result<Self, Self::Error> {
        require_non_empty(&input.info, "info")?;
        let working = require(input.working, "working")?;
        Ok(Self {
            info: input.info.trim().to_string(),
            working,
        })
    }
}
