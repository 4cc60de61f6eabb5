/// Primary keys of REST-backed GRC resources (audits, policies, vendors).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
