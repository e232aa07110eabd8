/// Backend identifiers (students, teachers, classes, materials) are integers.
pub type DbId = i64;

/// All client-side timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Backend timestamps arrive as zone-less local date-times.
pub type BackendTimestamp = chrono::NaiveDateTime;
