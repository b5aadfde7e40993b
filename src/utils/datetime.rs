use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};

/// A timestamp exactly as the source driver returned it.
///
/// `timestamp` columns arrive without an offset and stay that way; only
/// `timestamptz` columns carry one into the ISO string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTimestamp {
    Naive(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

impl SourceTimestamp {
    /// ISO-8601 form: `YYYY-MM-DDTHH:MM:SS`, microseconds only when non-zero,
    /// then the offset (`+HH:MM`) for zoned values.
    pub fn to_iso8601(&self) -> String {
        match self {
            SourceTimestamp::Naive(dt) => format_naive(dt),
            SourceTimestamp::Zoned(dt) => {
                format!("{}{}", format_naive(&dt.naive_local()), dt.format("%:z"))
            }
        }
    }
}

impl From<NaiveDateTime> for SourceTimestamp {
    fn from(dt: NaiveDateTime) -> Self {
        SourceTimestamp::Naive(dt)
    }
}

impl From<DateTime<FixedOffset>> for SourceTimestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        SourceTimestamp::Zoned(dt)
    }
}

fn format_naive(dt: &NaiveDateTime) -> String {
    // PostgreSQL timestamps have microsecond resolution
    if dt.nanosecond() / 1_000 == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micro)
            .unwrap()
    }

    #[test]
    fn test_naive_timestamp_has_no_offset() {
        let ts = SourceTimestamp::from(naive(10, 30, 0, 0));
        assert_eq!(ts.to_iso8601(), "2024-03-15T10:30:00");
    }

    #[test]
    fn test_midnight_keeps_time_part() {
        let ts = SourceTimestamp::from(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        );
        assert_eq!(ts.to_iso8601(), "2024-01-01T00:00:00");
    }

    #[test]
    fn test_microseconds_are_six_digits() {
        let ts = SourceTimestamp::from(naive(10, 30, 0, 1_500));
        assert_eq!(ts.to_iso8601(), "2024-03-15T10:30:00.001500");
    }

    #[test]
    fn test_zoned_timestamp_keeps_driver_offset() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let dt = naive(10, 30, 0, 0).and_local_timezone(offset).unwrap();
        assert_eq!(
            SourceTimestamp::from(dt).to_iso8601(),
            "2024-03-15T10:30:00+00:00"
        );

        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let dt = naive(7, 30, 0, 250_000).and_local_timezone(offset).unwrap();
        assert_eq!(
            SourceTimestamp::from(dt).to_iso8601(),
            "2024-03-15T07:30:00.250000-03:00"
        );
    }
}
