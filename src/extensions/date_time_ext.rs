use chrono::{DateTime, SecondsFormat, Utc};

pub trait ToIso8601 {
    /// Formats as `YYYY-MM-DDTHH:MM:SS.sssZ`.
    fn to_iso8601(&self) -> String;
}

impl ToIso8601 for DateTime<Utc> {
    fn to_iso8601(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_with_millis_and_zulu_suffix() {
        let date_time = Utc.with_ymd_and_hms(2025, 5, 10, 8, 30, 15).unwrap();

        assert_eq!(date_time.to_iso8601(), "2025-05-10T08:30:15.000Z");
    }
}
