//! Export pipeline: compose, check, render, and optionally hand off to a sink.
//!
//! # spawn_blocking pattern
//! Composition and rendering are CPU-bound and synchronous. The async entry
//! points run the whole unit through `tokio::task::spawn_blocking`, taking owned
//! inputs (required for the `'static` closure bound) and returning only a
//! finished result. A failed task yields an error, never a partial artifact.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::ExportError;
use crate::export::composer::{compose, effective_title, ComposeOptions};
use crate::export::dates::DateFormatter;
use crate::export::filename::pdf_filename;
use crate::export::render::render_pdf;
use crate::export::sink::ExportSink;
use crate::layout::contract::{check_document, LayoutViolation};
use crate::layout::{Document, PageGeometry};
use crate::models::diary::{Diary, Entry};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Layout and presentation settings shared by every export of this process.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub geometry: PageGeometry,
    pub dates: DateFormatter,
}

/// Everything one export needs, owned so it can move into a blocking task.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub diary: Diary,
    pub entries: Vec<Entry>,
    pub generated_at: DateTime<Utc>,
}

/// A composed, not yet serialized, export.
#[derive(Debug, Clone, Serialize)]
pub struct ComposedExport {
    pub export_id: Uuid,
    pub filename: String,
    pub document: Document,
    pub violations: Vec<LayoutViolation>,
}

/// A finished PDF export.
#[derive(Debug, Clone)]
pub struct RenderedExport {
    pub export_id: Uuid,
    pub filename: String,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

/// Where a saved export ended up.
#[derive(Debug, Clone, Serialize)]
pub struct SavedExport {
    pub export_id: Uuid,
    pub filename: String,
    pub path: PathBuf,
    pub page_count: usize,
    pub bytes: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Synchronous pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Composes the document and checks its layout contract.
pub fn compose_export(job: &ExportJob, settings: &ExportSettings) -> ComposedExport {
    let export_id = Uuid::new_v4();
    let options = ComposeOptions {
        generated_at: job.generated_at,
        dates: settings.dates,
    };
    let document = compose(&job.diary, &job.entries, &settings.geometry, &options);

    let violations = check_document(&document);
    if !violations.is_empty() {
        warn!(
            %export_id,
            count = violations.len(),
            "Layout contract violated: {:?}",
            violations
        );
    }

    ComposedExport {
        export_id,
        filename: pdf_filename(effective_title(&job.diary)),
        document,
        violations,
    }
}

/// Composes and serializes the export to PDF bytes.
pub fn render_export(job: &ExportJob, settings: &ExportSettings) -> RenderedExport {
    let composed = compose_export(job, settings);
    let bytes = render_pdf(&composed.document, effective_title(&job.diary));
    let page_count = composed.document.page_count();

    info!(
        export_id = %composed.export_id,
        entries = job.entries.len(),
        pages = page_count,
        bytes = bytes.len(),
        "Diary export rendered"
    );

    RenderedExport {
        export_id: composed.export_id,
        filename: composed.filename,
        page_count,
        bytes,
    }
}

/// Renders the export and writes it through `sink`.
pub fn save_export(
    job: &ExportJob,
    settings: &ExportSettings,
    sink: &mut dyn ExportSink,
) -> Result<SavedExport, ExportError> {
    let rendered = render_export(job, settings);
    let path = sink.emit(&rendered.filename, &rendered.bytes)?;
    Ok(SavedExport {
        export_id: rendered.export_id,
        filename: rendered.filename,
        path,
        page_count: rendered.page_count,
        bytes: rendered.bytes.len(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Async entry points
// ────────────────────────────────────────────────────────────────────────────

/// Runs `work` on the blocking pool as one atomic unit.
pub async fn run_blocking<T, F>(work: F) -> Result<T, ExportError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ExportError::Task(e.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
