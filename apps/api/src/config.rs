use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{FixedOffset, Locale};

use crate::layout::PageGeometry;

/// Application configuration loaded from environment variables.
/// Every variable has a default except `EXPORT_DIR`, which enables the save route.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub export_locale: Locale,
    pub export_utc_offset: FixedOffset,
    pub page_geometry: PageGeometry,
    pub export_dir: Option<PathBuf>,
    /// Request body limit; entry HTML may carry inline base64 images.
    pub max_request_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            export_locale: parse_locale(&env_or("EXPORT_LOCALE", "en_US"))?,
            export_utc_offset: parse_utc_offset(&env_or("EXPORT_UTC_OFFSET_MINUTES", "0"))?,
            page_geometry: parse_page_size(&env_or("EXPORT_PAGE_SIZE", "a4"))?,
            export_dir: std::env::var("EXPORT_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            max_request_bytes: env_or("MAX_REQUEST_BYTES", "16777216")
                .parse::<usize>()
                .context("MAX_REQUEST_BYTES must be a byte count")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_locale(value: &str) -> Result<Locale> {
    Locale::try_from(value.trim())
        .map_err(|_| anyhow!("EXPORT_LOCALE '{value}' is not a known locale (e.g. en_US)"))
}

fn parse_utc_offset(value: &str) -> Result<FixedOffset> {
    let minutes = value
        .trim()
        .parse::<i32>()
        .context("EXPORT_UTC_OFFSET_MINUTES must be an integer number of minutes")?;
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .with_context(|| format!("EXPORT_UTC_OFFSET_MINUTES {minutes} is out of range"))
}

fn parse_page_size(value: &str) -> Result<PageGeometry> {
    match value.trim().to_ascii_lowercase().as_str() {
        "a4" => Ok(PageGeometry::a4()),
        "letter" => Ok(PageGeometry::letter()),
        other => Err(anyhow!("EXPORT_PAGE_SIZE must be 'a4' or 'letter', got '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert!(matches!(parse_locale("en_US"), Ok(Locale::en_US)));
        assert!(matches!(parse_locale(" eu_ES "), Ok(Locale::eu_ES)));
        assert!(parse_locale("xx_YY").is_err());
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("0").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("-300").unwrap().local_minus_utc(), -300 * 60);
        assert!(parse_utc_offset("abc").is_err());
        assert!(parse_utc_offset("100000").is_err());
        assert!(parse_utc_offset("99999999").is_err());
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("A4").unwrap(), PageGeometry::a4());
        assert_eq!(parse_page_size("letter").unwrap(), PageGeometry::letter());
        assert!(parse_page_size("legal").is_err());
    }
}
