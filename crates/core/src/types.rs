/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date without a time-of-day component.
pub type Date = chrono::NaiveDate;

/// Wall-clock time of day, as used by slot templates.
pub type TimeOfDay = chrono::NaiveTime;
