/// Primary keys are plain integers assigned by the collection store.
pub type DbId = i64;

/// Display value used when a foreign key does not resolve at read time.
pub const UNKNOWN_REFERENCE: &str = "Unknown";
