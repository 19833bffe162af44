//! Creation timestamps as sent by the transactions service
//!
//! The service serialises `fechaCreacion` in two shapes: a date-time tuple
//! `[year, month, day, hour, minute, second, nanosecond]` or a string that
//! may or may not carry a zone marker. Both are decoded here, once, into a
//! `DateTime<FixedOffset>`; nothing else in the workspace looks at the raw
//! encoding.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Ecuador does not observe daylight saving time
const BANK_UTC_OFFSET_SECS: i32 = 5 * 3600;

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

const ZONELESS_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Bank-local offset (America/Guayaquil, UTC-05:00)
pub fn bank_offset() -> FixedOffset {
    FixedOffset::west_opt(BANK_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Raw `fechaCreacion` value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// `[year, month(1-12), day, hour, minute, second, nanosecond]`, trailing parts optional
    Parts(Vec<i64>),
    /// ISO-like text, zone marker optional
    Text(String),
}

impl Timestamp {
    /// Resolve to an absolute instant.
    ///
    /// Tuples and zone-less strings are bank-local wall-clock times.
    pub fn to_datetime(&self) -> Result<DateTime<FixedOffset>, String> {
        let offset = bank_offset();
        match self {
            Timestamp::Parts(parts) => {
                let naive = naive_from_parts(parts)?;
                localize(naive, offset)
            }
            Timestamp::Text(text) => {
                let text = text.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                    return Ok(dt);
                }
                for format in ZONELESS_FORMATS {
                    if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                        return localize(naive, offset);
                    }
                }
                if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                    return localize(date.and_time(chrono::NaiveTime::MIN), offset);
                }
                Err(format!("Unrecognised timestamp: {}", text))
            }
        }
    }
}

fn naive_from_parts(parts: &[i64]) -> Result<NaiveDateTime, String> {
    if parts.len() < 3 {
        return Err(format!("Timestamp tuple needs at least 3 parts, got {}", parts.len()));
    }
    let part = |i: usize| parts.get(i).copied().unwrap_or(0);

    let year = i32::try_from(part(0)).map_err(|_| format!("Year out of range: {}", part(0)))?;
    let to_u32 = |v: i64| u32::try_from(v).map_err(|_| format!("Negative timestamp part: {}", v));

    NaiveDate::from_ymd_opt(year, to_u32(part(1))?, to_u32(part(2))?)
        .and_then(|d| d.and_hms_nano_opt(to_u32(part(3)).ok()?, to_u32(part(4)).ok()?, to_u32(part(5)).ok()?, to_u32(part(6)).ok()?))
        .ok_or_else(|| format!("Invalid date-time tuple: {:?}", parts))
}

fn localize(naive: NaiveDateTime, offset: FixedOffset) -> Result<DateTime<FixedOffset>, String> {
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| format!("Ambiguous local time: {}", naive))
}

/// Render a timestamp the way the teller screens show it, in bank-local time.
///
/// `"15 ene 2025, 03:45 p. m."`; a missing value renders as `"-"` and an
/// undecodable one is shown raw.
pub fn format_display(timestamp: Option<&Timestamp>) -> String {
    let Some(timestamp) = timestamp else {
        return "-".to_string();
    };

    match timestamp.to_datetime() {
        Ok(dt) => {
            let local = dt.with_timezone(&bank_offset());
            let (is_pm, hour12) = local.hour12();
            format!(
                "{} {} {}, {:02}:{:02} {}",
                local.day(),
                MONTHS_ES[local.month0() as usize],
                local.year(),
                hour12,
                local.minute(),
                if is_pm { "p. m." } else { "a. m." }
            )
        }
        Err(_) => match timestamp {
            Timestamp::Text(text) => text.clone(),
            Timestamp::Parts(parts) => format!("{:?}", parts),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_is_bank_local() {
        let ts = Timestamp::Parts(vec![2025, 1, 15, 15, 45, 30, 123_000_000]);
        let dt = ts.to_datetime().unwrap();
        assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(dt.to_rfc3339(), "2025-01-15T15:45:30.123-05:00");
    }

    #[test]
    fn test_short_tuple_defaults_time_to_midnight() {
        let dt = Timestamp::Parts(vec![2024, 12, 31]).to_datetime().unwrap();
        assert_eq!(dt.hour(), 0);
        assert!(Timestamp::Parts(vec![2024, 12]).to_datetime().is_err());
        assert!(Timestamp::Parts(vec![2024, 13, 1]).to_datetime().is_err());
    }

    #[test]
    fn test_zoneless_string_is_bank_local() {
        let dt = Timestamp::Text("2025-01-15T15:45:30.5".to_string()).to_datetime().unwrap();
        assert_eq!(dt.with_timezone(&Utc).hour(), 20);

        let dt = Timestamp::Text("2025-01-15 08:00:00".to_string()).to_datetime().unwrap();
        assert_eq!(dt.with_timezone(&Utc).hour(), 13);
    }

    #[test]
    fn test_zulu_string_is_utc() {
        let dt = Timestamp::Text("2025-01-15T20:45:30Z".to_string()).to_datetime().unwrap();
        assert_eq!(dt.with_timezone(&bank_offset()).hour(), 15);
    }

    #[test]
    fn test_untagged_decoding() {
        let ts: Timestamp = serde_json::from_str("[2025,3,1,9,5,0,0]").unwrap();
        assert!(matches!(ts, Timestamp::Parts(_)));
        let ts: Timestamp = serde_json::from_str("\"2025-03-01T09:05:00\"").unwrap();
        assert!(matches!(ts, Timestamp::Text(_)));
    }

    #[test]
    fn test_format_display() {
        let ts = Timestamp::Parts(vec![2025, 1, 15, 15, 45, 0, 0]);
        assert_eq!(format_display(Some(&ts)), "15 ene 2025, 03:45 p. m.");

        let ts = Timestamp::Text("2025-09-02T13:05:00Z".to_string());
        assert_eq!(format_display(Some(&ts)), "2 sept 2025, 08:05 a. m.");

        assert_eq!(format_display(None), "-");
        assert_eq!(format_display(Some(&Timestamp::Text("ayer".to_string()))), "ayer");
    }
}
