//! Axum route handlers for the Export API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::service::{
    compose_export, render_export, run_blocking, save_export, ExportJob, SavedExport,
};
use crate::export::sink::DirectorySink;
use crate::layout::contract::LayoutViolation;
use crate::layout::page_fill::{analyze_pages, PageFill};
use crate::layout::Page;
use crate::models::diary::{Diary, Entry};
use crate::state::AppState;

/// Upper bound on entries per export request.
pub const MAX_ENTRIES: usize = 5000;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub diary: Diary,
    #[serde(default)]
    pub entries: Vec<Entry>,
    /// Date printed on the cover. Defaults to the time of the request.
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl ExportRequest {
    fn into_job(self) -> Result<ExportJob, AppError> {
        if self.entries.len() > MAX_ENTRIES {
            return Err(AppError::UnprocessableEntity(format!(
                "at most {MAX_ENTRIES} entries can be exported at once, got {}",
                self.entries.len()
            )));
        }
        Ok(ExportJob {
            diary: self.diary,
            entries: self.entries,
            generated_at: self.generated_at.unwrap_or_else(Utc::now),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub export_id: Uuid,
    pub filename: String,
    pub page_count: usize,
    pub pages: Vec<Page>,
    pub fill: Vec<PageFill>,
    pub violations: Vec<LayoutViolation>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/exports/pdf
///
/// Renders the diary and returns the PDF as an attachment.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let job = request.into_job()?;
    let settings = state.export.clone();

    let rendered = run_blocking(move || render_export(&job, &settings)).await?;

    let disposition = format!("attachment; filename=\"{}\"", rendered.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.bytes,
    )
        .into_response())
}

/// POST /api/v1/exports/preview
///
/// Returns the composed page layout as JSON without serializing a PDF.
pub async fn handle_export_preview(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let job = request.into_job()?;
    let settings = state.export.clone();

    let composed = run_blocking(move || compose_export(&job, &settings)).await?;
    let fill = analyze_pages(&composed.document);

    Ok(Json(PreviewResponse {
        export_id: composed.export_id,
        filename: composed.filename,
        page_count: composed.document.page_count(),
        pages: composed.document.pages,
        fill,
        violations: composed.violations,
    }))
}

/// POST /api/v1/exports/save
///
/// Renders the diary into the configured export directory.
pub async fn handle_export_save(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<SavedExport>, AppError> {
    let dir = state.config.export_dir.clone().ok_or_else(|| {
        AppError::SinkUnavailable("EXPORT_DIR is not configured".to_string())
    })?;
    let job = request.into_job()?;
    let settings = state.export.clone();

    let saved = run_blocking(move || {
        let mut sink = DirectorySink::new(dir);
        save_export(&job, &settings, &mut sink)
    })
    .await??;

    Ok(Json(saved))
}
