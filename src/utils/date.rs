use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime};

pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Parse a `--at` override: `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS]`
/// or a bare `YYYY-MM-DD` (midnight).
pub fn parse_at(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    if let Some(dt) = FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Ok(dt);
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| AppError::InvalidDateTime(s.to_string()))
}
