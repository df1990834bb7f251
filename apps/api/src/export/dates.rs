//! Timestamp presentation for export metadata lines.
//!
//! Locale and UTC offset are explicit so composition stays a pure function of its
//! inputs.

use chrono::{DateTime, FixedOffset, Locale, Offset, Utc};

/// Long-form date plus hour:minute, e.g. `January 5, 2024, 03:45 PM`.
const TIMESTAMP_FORMAT: &str = "%B %-d, %Y, %I:%M %p";
/// Long-form date only, used for the cover's generation line.
const DATE_FORMAT: &str = "%B %-d, %Y";

#[derive(Debug, Clone, Copy)]
pub struct DateFormatter {
    locale: Locale,
    offset: FixedOffset,
}

impl DateFormatter {
    pub fn new(locale: Locale, offset: FixedOffset) -> Self {
        DateFormatter { locale, offset }
    }

    pub fn timestamp(&self, at: &DateTime<Utc>) -> String {
        at.with_timezone(&self.offset)
            .format_localized(TIMESTAMP_FORMAT, self.locale)
            .to_string()
    }

    pub fn date(&self, at: &DateTime<Utc>) -> String {
        at.with_timezone(&self.offset)
            .format_localized(DATE_FORMAT, self.locale)
            .to_string()
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        DateFormatter {
            locale: Locale::en_US,
            offset: Utc.fix(),
        }
    }
}
