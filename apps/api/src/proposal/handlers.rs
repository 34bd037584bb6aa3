use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::proposal::apply_patch;
use crate::proposal::catalog::{CatalogEntryInput, CatalogFilter};
use crate::proposal::expenses::{calculate, ReimbursableTotals};
use crate::proposal::models::{
    CatalogEntry, LineItem, ProposalDocument, ProposalPatch, ProposalType, ReimbursableInputs,
};
use crate::proposal::selection::{
    add_line_item, available_services, remove_line_item, update_line_item, LineItemEdit,
};
use crate::proposal::validation::{validate_document, ValidationReport};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Service catalog
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/services
pub async fn handle_list_services(
    State(state): State<AppState>,
    Query(filter): Query<CatalogFilter>,
) -> Json<Vec<CatalogEntry>> {
    Json(state.catalog.read().await.list(&filter))
}

/// POST /api/v1/services
pub async fn handle_create_service(
    State(state): State<AppState>,
    AppJson(input): AppJson<CatalogEntryInput>,
) -> Result<(StatusCode, Json<CatalogEntry>), AppError> {
    let entry = state.catalog.write().await.create(input)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/v1/services/:id
pub async fn handle_update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<CatalogEntryInput>,
) -> Result<Json<CatalogEntry>, AppError> {
    Ok(Json(state.catalog.write().await.update(&id, input)?))
}

/// DELETE /api/v1/services/:id
pub async fn handle_delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.catalog.write().await.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct ToggleProposalType {
    pub proposal_type: ProposalType,
}

/// POST /api/v1/services/:id/proposal-types
pub async fn handle_toggle_proposal_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<ToggleProposalType>,
) -> Result<Json<CatalogEntry>, AppError> {
    let entry = state
        .catalog
        .write()
        .await
        .toggle_proposal_type(&id, req.proposal_type)?;
    Ok(Json(entry))
}

// ────────────────────────────────────────────────────────────────────────────
// Drafts
// ────────────────────────────────────────────────────────────────────────────

/// An empty body means no initial patch; anything else must be a valid patch.
fn initial_patch(body: &[u8]) -> Result<Option<ProposalPatch>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| match e.classify() {
            Category::Data => AppError::UnprocessableEntity(format!("Invalid proposal: {e}")),
            _ => AppError::Validation(format!("Malformed JSON body: {e}")),
        })
}

/// POST /api/v1/proposals
///
/// An optional body is applied to the fresh draft as a patch.
pub async fn handle_create_proposal(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ProposalDocument>), AppError> {
    let mut doc = ProposalDocument::default();
    if let Some(patch) = initial_patch(&body)? {
        let catalog = state.catalog.read().await;
        apply_patch(&mut doc, patch, &catalog);
    }
    let doc = state.drafts.insert(doc).await;
    info!(proposal_id = %doc.id, "Proposal draft created");
    Ok((StatusCode::CREATED, Json(doc)))
}

/// GET /api/v1/proposals
pub async fn handle_list_proposals(State(state): State<AppState>) -> Json<Vec<ProposalDocument>> {
    Json(state.drafts.list().await)
}

/// GET /api/v1/proposals/:id
pub async fn handle_get_proposal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProposalDocument>, AppError> {
    Ok(Json(state.drafts.get(id).await?))
}

/// PATCH /api/v1/proposals/:id
pub async fn handle_patch_proposal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(patch): AppJson<ProposalPatch>,
) -> Result<Json<ProposalDocument>, AppError> {
    let catalog = state.catalog.read().await;
    let (_, doc) = state
        .drafts
        .update(id, |doc| {
            apply_patch(doc, patch, &catalog);
            Ok(())
        })
        .await?;
    Ok(Json(doc))
}

/// DELETE /api/v1/proposals/:id
pub async fn handle_delete_proposal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.drafts.remove(id).await?;
    info!(proposal_id = %id, "Proposal draft deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Line items
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddLineItem {
    pub service_id: String,
}

/// POST /api/v1/proposals/:id/services
pub async fn handle_add_line_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(req): AppJson<AddLineItem>,
) -> Result<(StatusCode, Json<LineItem>), AppError> {
    let catalog = state.catalog.read().await;
    let (item, _) = state
        .drafts
        .update(id, |doc| add_line_item(doc, &catalog, &req.service_id))
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/v1/proposals/:id/services/:service_id
pub async fn handle_update_line_item(
    State(state): State<AppState>,
    Path((id, service_id)): Path<(Uuid, String)>,
    AppJson(edit): AppJson<LineItemEdit>,
) -> Result<Json<LineItem>, AppError> {
    let (item, _) = state
        .drafts
        .update(id, |doc| update_line_item(doc, &service_id, edit))
        .await?;
    Ok(Json(item))
}

/// DELETE /api/v1/proposals/:id/services/:service_id
pub async fn handle_remove_line_item(
    State(state): State<AppState>,
    Path((id, service_id)): Path<(Uuid, String)>,
) -> Result<StatusCode, AppError> {
    state
        .drafts
        .update(id, |doc| remove_line_item(doc, &service_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/v1/proposals/:id/available-services?q=
pub async fn handle_available_services(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CatalogEntry>>, AppError> {
    let doc = state.drafts.get(id).await?;
    let catalog = state.catalog.read().await;
    Ok(Json(available_services(&doc, &catalog, query.q.as_deref())))
}

// ────────────────────────────────────────────────────────────────────────────
// Reimbursables & validation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ReimbursablesResponse {
    pub inputs: ReimbursableInputs,
    pub totals: ReimbursableTotals,
}

/// GET /api/v1/proposals/:id/reimbursables
pub async fn handle_get_reimbursables(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReimbursablesResponse>, AppError> {
    let doc = state.drafts.get(id).await?;
    let totals = calculate(&doc.reimbursables);
    Ok(Json(ReimbursablesResponse {
        inputs: doc.reimbursables,
        totals,
    }))
}

/// PUT /api/v1/proposals/:id/reimbursables
pub async fn handle_put_reimbursables(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(inputs): AppJson<ReimbursableInputs>,
) -> Result<Json<ReimbursablesResponse>, AppError> {
    let (_, doc) = state
        .drafts
        .update(id, |doc| {
            doc.reimbursables = inputs;
            Ok(())
        })
        .await?;
    let totals = calculate(&doc.reimbursables);
    Ok(Json(ReimbursablesResponse {
        inputs: doc.reimbursables,
        totals,
    }))
}

/// POST /api/v1/reimbursables/calculate
pub async fn handle_calculate_reimbursables(
    AppJson(inputs): AppJson<ReimbursableInputs>,
) -> Json<ReimbursableTotals> {
    Json(calculate(&inputs))
}

/// GET /api/v1/proposals/:id/validation
pub async fn handle_validation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ValidationReport>, AppError> {
    let doc = state.drafts.get(id).await?;
    Ok(Json(validate_document(&doc)))
}
