//! Timestamps backing document ids and canonical file names.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{Result, SnapzError};

/// A screenshot's capture time, second precision, local timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Timestamp(datetime)
    }

    pub fn now() -> Self {
        Timestamp(Local::now().naive_local())
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Canonical file-name stem, e.g. `2024-01-15_14-35-27`.
    pub fn formatted(&self) -> String {
        self.0.format("%Y-%m-%d_%H-%M-%S").to_string()
    }

    /// Document id, e.g. `24-01-15:143-527`. The minute straddles the
    /// dash: its first digit closes the hour block and its second
    /// digit opens the second block, which keeps ids lexicographically
    /// ordered by time.
    pub fn id(&self) -> String {
        format!(
            "{:02}-{:02}-{:02}:{:02}{}-{}{:02}",
            self.0.year() % 100,
            self.0.month(),
            self.0.day(),
            self.0.hour(),
            self.0.minute() / 10,
            self.0.minute() % 10,
            self.0.second(),
        )
    }

    /// Parses a full document id back into its timestamp.
    pub fn parse_id(id: &str) -> Result<Self> {
        let invalid = || SnapzError::InvalidId(id.to_string());

        let (date_part, time_part) = id.split_once(':').ok_or_else(invalid)?;
        let (year, month, day) = parse_date_block(date_part).ok_or_else(invalid)?;
        let (hour, minute, second) = parse_time_block(time_part).ok_or_else(invalid)?;
        let datetime = NaiveDate::from_ymd_opt(2000 + year as i32, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(invalid)?;

        Ok(Timestamp(datetime))
    }
}

/// Expands the id shorthand accepted on the command line into a full
/// document id. Three shapes are understood:
///
/// - `143-527` or `143527` — a time today;
/// - `15:143-527` or `15:143527` — a day and time in the current month;
/// - `24-01-15:143-527` — a full id, passed through.
pub fn expand_input_id(input: &str) -> Result<String> {
    expand_input_id_at(input, Local::now().naive_local())
}

pub fn expand_input_id_at(input: &str, now: NaiveDateTime) -> Result<String> {
    let invalid = || SnapzError::InvalidId(input.to_string());

    let (year, month, day, time) = match input.split_once(':') {
        None => {
            let (hour, minute, second) = parse_time_block(input).ok_or_else(invalid)?;
            (now.year(), now.month(), now.day(), (hour, minute, second))
        }
        Some((date_part, time_part)) => {
            let time = parse_time_block(time_part).ok_or_else(invalid)?;
            let day_only = (date_part.len() == 2)
                .then(|| pair_of_digits(date_part.as_bytes(), 0))
                .flatten();
            if let Some(day) = day_only {
                (now.year(), now.month(), day, time)
            } else {
                let (year, month, day) = parse_date_block(date_part).ok_or_else(invalid)?;
                (2000 + year as i32, month, day, time)
            }
        }
    };

    let (hour, minute, second) = time;
    let datetime = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(invalid)?;

    Ok(Timestamp::new(datetime).id())
}

/// `HHM-MSS` or `HHMMSS`; the dash may only sit between the minute's
/// two digits.
fn parse_time_block(block: &str) -> Option<(u32, u32, u32)> {
    let bytes = block.as_bytes();
    let digits = match (bytes.len(), bytes.get(3)) {
        (7, Some(b'-')) => [&bytes[..3], &bytes[4..]].concat(),
        (6, _) => bytes.to_vec(),
        _ => return None,
    };

    Some((
        pair_of_digits(&digits, 0)?,
        pair_of_digits(&digits, 2)?,
        pair_of_digits(&digits, 4)?,
    ))
}

/// `YY-MM-DD`, the date half of a full id.
fn parse_date_block(block: &str) -> Option<(u32, u32, u32)> {
    let bytes = block.as_bytes();
    if bytes.len() != 8 || bytes[2] != b'-' || bytes[5] != b'-' {
        return None;
    }

    Some((
        pair_of_digits(bytes, 0)?,
        pair_of_digits(bytes, 3)?,
        pair_of_digits(bytes, 6)?,
    ))
}

fn pair_of_digits(bytes: &[u8], at: usize) -> Option<u32> {
    let (hi, lo) = (*bytes.get(at)?, *bytes.get(at + 1)?);
    if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
        return None;
    }
    Some(u32::from(hi - b'0') * 10 + u32::from(lo - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_id_splits_minute_across_dash() {
        let ts = Timestamp::new(at(2024, 1, 15, 14, 35, 27));
        assert_eq!(ts.id(), "24-01-15:143-527");
    }

    #[test]
    fn test_formatted_is_canonical_stem() {
        let ts = Timestamp::new(at(2024, 1, 15, 14, 35, 27));
        assert_eq!(ts.formatted(), "2024-01-15_14-35-27");
    }

    #[test]
    fn test_id_padding() {
        let ts = Timestamp::new(at(2026, 9, 3, 7, 5, 9));
        assert_eq!(ts.id(), "26-09-03:070-509");
    }

    #[test]
    fn test_id_order_matches_time_order() {
        let earlier = Timestamp::new(at(2024, 1, 15, 14, 35, 27));
        let later = Timestamp::new(at(2024, 1, 15, 14, 36, 2));
        assert!(earlier.id() < later.id());
    }

    #[test]
    fn test_expand_time_today() {
        let now = at(2024, 1, 15, 20, 0, 0);
        assert_eq!(
            expand_input_id_at("143-527", now).unwrap(),
            "24-01-15:143-527"
        );
        assert_eq!(
            expand_input_id_at("143527", now).unwrap(),
            "24-01-15:143-527"
        );
    }

    #[test]
    fn test_expand_day_and_time_this_month() {
        let now = at(2024, 1, 20, 9, 0, 0);
        assert_eq!(
            expand_input_id_at("15:143-527", now).unwrap(),
            "24-01-15:143-527"
        );
        assert_eq!(
            expand_input_id_at("15:143527", now).unwrap(),
            "24-01-15:143-527"
        );
    }

    #[test]
    fn test_expand_full_id_passes_through() {
        let now = at(2026, 6, 1, 0, 0, 0);
        assert_eq!(
            expand_input_id_at("24-01-15:143-527", now).unwrap(),
            "24-01-15:143-527"
        );
    }

    #[test]
    fn test_parse_id_round_trips() {
        let ts = Timestamp::parse_id("24-01-15:143-527").unwrap();
        assert_eq!(ts.datetime(), at(2024, 1, 15, 14, 35, 27));
        assert_eq!(ts.id(), "24-01-15:143-527");
        assert!(Timestamp::parse_id("143-527").is_err());
        assert!(Timestamp::parse_id("24-13-15:143-527").is_err());
    }

    #[test]
    fn test_expand_rejects_malformed_input() {
        let now = at(2024, 1, 15, 20, 0, 0);
        for input in ["", "abc", "1435", "14-3527", "1435279", "15:14352"] {
            assert!(expand_input_id_at(input, now).is_err(), "{input:?}");
        }
    }

    #[test]
    fn test_expand_rejects_out_of_range_time() {
        let now = at(2024, 1, 15, 20, 0, 0);
        assert!(expand_input_id_at("253-527", now).is_err());
        assert!(expand_input_id_at("146-567", now).is_err());
        assert!(expand_input_id_at("32:143-527", now).is_err());
    }
}
