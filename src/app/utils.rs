// src/app/utils.rs
use super::data::UNKNOWN_YEAR;

/// First four characters of a TMDb release date, when they are a year.
/// Anything else (absent, empty, "TBA", short strings) becomes "Unknown".
pub(crate) fn release_year_token(release_date: Option<&str>) -> String {
    let Some(date) = release_date.map(str::trim) else {
        return UNKNOWN_YEAR.into();
    };
    let head: String = date.chars().take(4).collect();
    if head.len() == 4 && head.bytes().all(|b| b.is_ascii_digit()) {
        head
    } else {
        UNKNOWN_YEAR.into()
    }
}

/// "1994" -> Some(1990). Non-numeric input has no decade.
pub(crate) fn decade_of(release_year: &str) -> Option<i32> {
    let year = release_year.trim().parse::<i32>().ok()?;
    Some(year.div_euclid(10) * 10)
}

pub fn decade_label(release_year: &str) -> String {
    decade_of(release_year).map_or_else(|| UNKNOWN_YEAR.to_string(), |d| format!("{d}s"))
}

/// Date part of an ISO timestamp ("2024-05-01T20:15:03" -> "2024-05-01").
pub fn date_part(iso: &str) -> &str {
    iso.split('T').next().unwrap_or(iso)
}

/// Serde adapter for `Option<NaiveDateTime>` written the way the annotation
/// file has always stored it: naive local ISO 8601 with microseconds.
pub(crate) mod iso_timestamp {
    use chrono::{DateTime, Local, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub fn format(ts: &NaiveDateTime) -> String {
        ts.format(WRITE_FORMAT).to_string()
    }

    /// Accepts naive timestamps and RFC 3339 ones with an offset (moved to local time).
    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
        s.parse::<NaiveDateTime>().ok()
    }

    pub fn serialize<S>(ts: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ts {
            Some(ts) => s.serialize_str(&format(ts)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse(s)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp `{s}`"))),
        }
    }
}
