pub mod url_validator;

use chrono::{NaiveDate, Utc};

/// 当前 UTC 日期（按天截断的"现在"）
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a path segment as an entry id. Only plain decimal digits are
/// accepted, so `+1`, `-1` and `1.0` are rejected.
pub fn parse_entry_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || raw.len() > 18 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
