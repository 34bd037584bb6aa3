use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::proposal::models::ProposalDocument;
use crate::render::{proposal_pdf, proposal_preview, RenderedPdf};
use crate::state::AppState;

/// Keeps a download name header-safe: printable ASCII without quotes or
/// backslashes.
pub fn attachment_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect()
}

fn pdf_response(pdf: RenderedPdf) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        attachment_filename(&pdf.filename)
    );
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf.bytes,
    )
        .into_response()
}

// Layout and PDF assembly are CPU-bound; keep them off the async workers.
async fn render_pdf(doc: ProposalDocument) -> Result<RenderedPdf, AppError> {
    let pdf = tokio::task::spawn_blocking(move || proposal_pdf(&doc))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF render: {e}")))??;
    info!(filename = %pdf.filename, bytes = pdf.bytes.len(), "Proposal PDF rendered");
    Ok(pdf)
}

async fn render_preview(doc: ProposalDocument) -> Result<Html<String>, AppError> {
    let html = tokio::task::spawn_blocking(move || proposal_preview(&doc))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in preview render: {e}")))??;
    Ok(Html(html))
}

/// GET /api/v1/proposals/:id/pdf
pub async fn handle_proposal_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let doc = state.drafts.get(id).await?;
    Ok(pdf_response(render_pdf(doc).await?))
}

/// GET /api/v1/proposals/:id/preview
pub async fn handle_proposal_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let doc = state.drafts.get(id).await?;
    render_preview(doc).await
}

/// POST /api/v1/render/pdf
///
/// Renders a document supplied in full by the caller, without storing it.
pub async fn handle_render_pdf(AppJson(doc): AppJson<ProposalDocument>) -> Result<Response, AppError> {
    Ok(pdf_response(render_pdf(doc).await?))
}

/// POST /api/v1/render/preview
pub async fn handle_render_preview(
    AppJson(doc): AppJson<ProposalDocument>,
) -> Result<Html<String>, AppError> {
    render_preview(doc).await
}
