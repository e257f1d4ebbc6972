//! @acp:module "Date Formats"
//! @acp:summary "Formats accepted by the -d directive"
//! @acp:domain cli
//! @acp:layer logic

use std::fmt::Display;

use chrono::{DateTime, Locale, SecondsFormat, TimeZone, Utc};

use crate::error::{Result, VersionlyError};

/// Fallback when no locale is configured or detected
pub const DEFAULT_LOCALE: Locale = Locale::en_US;

/// @acp:summary "Output format selected by the value part of a -d field"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// Milliseconds since the Unix epoch
    EpochMillis,
    Iso,
    Locale,
    LocaleDate,
    LocaleTime,
    /// Time of day with numeric UTC offset
    Time,
    /// RFC 1123 in GMT
    Utc,
}

impl DateFormat {
    /// Select a format; a missing or empty value means epoch milliseconds
    pub fn from_value(value: Option<&str>) -> Result<Self> {
        match value.unwrap_or("") {
            "" | "now" => Ok(Self::EpochMillis),
            "iso" => Ok(Self::Iso),
            "locale" => Ok(Self::Locale),
            "localedate" => Ok(Self::LocaleDate),
            "localetime" => Ok(Self::LocaleTime),
            "time" => Ok(Self::Time),
            "utc" => Ok(Self::Utc),
            other => Err(VersionlyError::UnsupportedDateFormat(other.to_string())),
        }
    }

    /// Render `at` in this format. Locale formats use `at`'s own offset.
    pub fn render<Tz>(&self, at: &DateTime<Tz>, locale: Locale) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            Self::EpochMillis => at.timestamp_millis().to_string(),
            Self::Iso => at
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            Self::Locale => at.format_localized("%c", locale).to_string(),
            Self::LocaleDate => at.format_localized("%x", locale).to_string(),
            Self::LocaleTime => at.format_localized("%X", locale).to_string(),
            Self::Time => at.format("%H:%M:%S GMT%z").to_string(),
            Self::Utc => at
                .with_timezone(&Utc)
                .format("%a, %d %b %Y %H:%M:%S GMT")
                .to_string(),
        }
    }
}

/// Parse a locale name such as `de_DE.UTF-8` or `fr-FR`
pub fn parse_locale(name: &str) -> Option<Locale> {
    let base = name.split(['.', '@']).next().unwrap_or("").replace('-', "_");
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Locale::try_from(base.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn sample() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-10-15T14:04:05.678+02:00").unwrap()
    }

    #[test]
    fn test_format_selection() {
        assert_eq!(DateFormat::from_value(None).unwrap(), DateFormat::EpochMillis);
        assert_eq!(DateFormat::from_value(Some("")).unwrap(), DateFormat::EpochMillis);
        assert_eq!(DateFormat::from_value(Some("now")).unwrap(), DateFormat::EpochMillis);
        assert_eq!(DateFormat::from_value(Some("utc")).unwrap(), DateFormat::Utc);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = DateFormat::from_value(Some("foo")).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected date format: 'foo'");
        assert!(DateFormat::from_value(Some("ISO")).is_err());
    }

    #[test]
    fn test_epoch_millis_round_trip() {
        let at = sample();
        let rendered = DateFormat::EpochMillis.render(&at, DEFAULT_LOCALE);
        let millis: i64 = rendered.parse().unwrap();
        assert_eq!(DateTime::from_timestamp_millis(millis).unwrap(), at);
    }

    #[test]
    fn test_iso_is_utc_with_millis() {
        let rendered = DateFormat::Iso.render(&sample(), DEFAULT_LOCALE);
        assert_eq!(rendered, "2026-10-15T12:04:05.678Z");
        assert_eq!(DateTime::parse_from_rfc3339(&rendered).unwrap(), sample());
    }

    #[test]
    fn test_utc_is_rfc1123() {
        let rendered = DateFormat::Utc.render(&sample(), DEFAULT_LOCALE);
        assert_eq!(rendered, "Thu, 15 Oct 2026 12:04:05 GMT");
        let parsed = DateTime::parse_from_rfc2822(&rendered).unwrap();
        assert_eq!(parsed.timestamp(), sample().timestamp());
    }

    #[test]
    fn test_time_keeps_local_offset() {
        let rendered = DateFormat::Time.render(&sample(), DEFAULT_LOCALE);
        assert_eq!(rendered, "14:04:05 GMT+0200");
    }

    #[test]
    fn test_locale_formats_are_not_empty() {
        for format in [DateFormat::Locale, DateFormat::LocaleDate, DateFormat::LocaleTime] {
            assert!(!format.render(&sample(), DEFAULT_LOCALE).is_empty());
        }
        assert!(DateFormat::LocaleDate
            .render(&sample(), DEFAULT_LOCALE)
            .contains("15"));
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!(parse_locale("de_DE.UTF-8"), Some(Locale::de_DE));
        assert_eq!(parse_locale("fr-FR"), Some(Locale::fr_FR));
        assert_eq!(parse_locale("C"), None);
        assert_eq!(parse_locale(""), None);
        assert_eq!(parse_locale("xx_NOPE"), None);
    }
}
