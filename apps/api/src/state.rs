use crate::config::Config;
use crate::export::ExportSettings;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Page geometry and timestamp formatting applied to every export.
    pub export: ExportSettings,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let export = ExportSettings {
            geometry: config.page_geometry.clone(),
            dates: crate::export::DateFormatter::new(config.export_locale, config.export_utc_offset),
        };
        AppState { config, export }
    }
}
