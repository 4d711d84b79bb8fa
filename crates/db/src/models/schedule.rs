//! Schedule types specialised to the stored entities.

use laundry_core::schedule::{Schedule, ScheduleEntry};

use super::booker::BookerSnapshot;
use super::slot::SlotWithMachines;

/// One slot on one date, with the booker if taken.
pub type LaundryScheduleEntry = ScheduleEntry<SlotWithMachines, BookerSnapshot>;

/// Per-date schedule keyed by `YYYY-MM-DD`.
pub type LaundrySchedule = Schedule<SlotWithMachines, BookerSnapshot>;
