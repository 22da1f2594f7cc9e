/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current UTC date as `YYYYMMDD`, used in human-readable order numbers
pub fn today_compact() -> String {
    chrono::Utc::now().format("%Y%m%d").to_string()
}

/// Generate a short unique id for ephemeral resources (tabs, terminals)
pub fn short_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
