use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::services::rng::hash_seed;

const DAILY_NAMESPACE: &str = "jumbl-daily-";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The date of puzzle #1.
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Seed string for the daily puzzle: `daily-<base36 hash>-<YYYY-MM-DD>`.
pub fn daily_seed(date: NaiveDate) -> String {
    let date = format_date(date);
    let hash = hash_seed(&format!("{}{}", DAILY_NAMESPACE, date));
    format!("daily-{}-{}", to_base36(hash.unsigned_abs()), date)
}

/// Display number of the daily puzzle; 2024-01-01 is #1.
pub fn day_number(date: NaiveDate) -> i64 {
    (date - epoch()).num_days() + 1
}

/// Time left until the next UTC midnight, when a new daily puzzle appears.
pub fn time_until_next_daily(now: DateTime<Utc>) -> Duration {
    let tomorrow = now.date_naive().succ_opt().unwrap_or(now.date_naive());
    let midnight = tomorrow.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    midnight - now
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u32::MAX), "1z141z3");
    }

    #[test]
    fn test_daily_seed_shape_and_stability() {
        let seed = daily_seed(date(2024, 1, 1));
        assert!(seed.starts_with("daily-"));
        assert!(seed.ends_with("-2024-01-01"));
        assert_eq!(seed, daily_seed(date(2024, 1, 1)));
        assert_ne!(seed, daily_seed(date(2024, 1, 2)));

        let hash = hash_seed("jumbl-daily-2024-01-01").unsigned_abs();
        assert_eq!(seed, format!("daily-{}-2024-01-01", to_base36(hash)));
    }

    #[test]
    fn test_day_number() {
        assert_eq!(day_number(date(2024, 1, 1)), 1);
        assert_eq!(day_number(date(2024, 2, 11)), 42);
        assert_eq!(day_number(date(2025, 1, 1)), 367);
    }

    #[test]
    fn test_parse_and_format_roundtrip() {
        assert_eq!(parse_date("2024-03-05"), Some(date(2024, 3, 5)));
        assert_eq!(format_date(date(2024, 3, 5)), "2024-03-05");
        assert_eq!(parse_date("05/03/2024"), None);
    }

    #[test]
    fn test_time_until_next_daily() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 22, 30, 0).unwrap();
        assert_eq!(time_until_next_daily(now), Duration::minutes(90));
    }
}
