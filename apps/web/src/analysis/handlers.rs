//! Axum route handlers for résumé analysis.

use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::report::AnalysisReport;
use crate::analysis::sections::{extract, ParsedSections};
use crate::errors::AppError;
use crate::models::profile::ExtractedData;
use crate::pages::PageView;
use crate::state::AppState;
use crate::upload::{read_pdf_upload, PdfUpload};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub request_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub file_name: String,
    pub extracted_data: ExtractedData,
    pub ai_analysis: String,
    pub sections: ParsedSections,
}

#[derive(Debug, Deserialize)]
pub struct SectionsRequest {
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Gate → read upload → forward to the analysis service → build the report.
/// The gate slot is held until the upstream call returns.
async fn analyze_upload(
    state: &AppState,
    multipart: &mut Multipart,
    request_id: Uuid,
) -> Result<(PdfUpload, AnalysisReport), AppError> {
    let _permit = state.gate.try_begin()?;

    let upload = read_pdf_upload(multipart, state.config.max_upload_bytes()).await?;
    info!(
        %request_id,
        file_name = %upload.file_name,
        bytes = upload.size_bytes(),
        "Forwarding resume for analysis"
    );

    let profile = state.analysis.analyze(&upload).await?;
    let report = AnalysisReport::build(profile);

    info!(
        %request_id,
        sections_found = !report.sections.is_empty(),
        has_score = report.has_score(),
        strengths = report.sections.strengths.len(),
        weaknesses = report.sections.weaknesses.len(),
        keywords = report.sections.keywords.len(),
        "Analysis complete"
    );

    Ok((upload, report))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(PageView::idle().render(state.config.max_upload_mb)?))
}

/// POST /analyze
///
/// Form submission from the upload page. Failures are shown on the upload
/// page as an "Analysis Failed" banner with a flat message.
pub async fn handle_analyze_form(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let request_id = Uuid::new_v4();
    let max_upload_mb = state.config.max_upload_mb;

    let (status, view) = match analyze_upload(&state, &mut multipart, request_id).await {
        Ok((upload, report)) => (
            axum::http::StatusCode::OK,
            PageView::results(report, &upload),
        ),
        Err(e) => {
            warn!(%request_id, "Analysis failed: {e}");
            (e.status(), PageView::failed(e.user_message()))
        }
    };

    match view.render(max_upload_mb) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// POST /api/analyze
///
/// Same pipeline as the form, returning the upstream fields plus the parsed sections.
pub async fn handle_analyze_json(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let (upload, report) = analyze_upload(&state, &mut multipart, request_id).await?;

    Ok(Json(AnalyzeResponse {
        request_id,
        analyzed_at: Utc::now(),
        file_name: upload.file_name,
        extracted_data: report.extracted_data,
        ai_analysis: report.raw_analysis,
        sections: report.sections,
    }))
}

/// POST /api/sections
///
/// Runs the section extractor over arbitrary analysis text.
pub async fn handle_extract_sections(
    Json(request): Json<SectionsRequest>,
) -> Json<ParsedSections> {
    Json(extract(&request.text))
}
