//! Ledger API endpoints

use api_types::entry::{
    BalanceState, DeletedAll, EntryCreated, EntryNew, EntryUpdate, EntryView, LedgerPageResponse,
    LedgerQuery, PageMarker,
};
use api_types::import::ImportResponse;
use api_types::suggestion::{SuggestionQuery, SuggestionView, SuggestionsResponse};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_state(state: engine::BalanceState) -> BalanceState {
    match state {
        engine::BalanceState::Outstanding => BalanceState::Outstanding,
        engine::BalanceState::Overpaid => BalanceState::Overpaid,
        engine::BalanceState::Settled => BalanceState::Settled,
    }
}

fn map_marker(marker: engine::PageMarker) -> PageMarker {
    match marker {
        engine::PageMarker::Page(number) => PageMarker::Page { number },
        engine::PageMarker::Ellipsis => PageMarker::Ellipsis,
    }
}

fn view(row: engine::LedgerRow) -> EntryView {
    EntryView {
        id: row.entry.id,
        sno: row.sno,
        name: row.entry.name,
        place: row.entry.place,
        amount_received_minor: row.entry.amount_received.cents(),
        amount_receivable_minor: row.entry.amount_receivable.cents(),
        balance_minor: row.balance.cents(),
        balance_state: map_state(row.state),
        balance_display: row.balance.magnitude(),
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<LedgerPageResponse>, ServerError> {
    let search = query.search.unwrap_or_default();
    let page = state.engine.list(&search, query.page.unwrap_or(1)).await?;

    Ok(Json(LedgerPageResponse {
        entries: page.rows.into_iter().map(view).collect(),
        page: page.page,
        total_pages: page.total_pages,
        total_matching: page.total_matching,
        page_markers: page.markers.into_iter().map(map_marker).collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EntryNew>,
) -> Result<(StatusCode, Json<EntryCreated>), ServerError> {
    let id = state
        .engine
        .add_entry(engine::NewEntry {
            name: payload.name,
            place: payload.place,
            amount_received: payload.amount_received,
            amount_receivable: payload.amount_receivable,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(EntryCreated { id })))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EntryUpdate>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .update_entry(
            id,
            engine::EntryUpdate {
                name: payload.name,
                place: payload.place,
                amount_received: payload.amount_received,
                amount_receivable: payload.amount_receivable,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_one(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_entry(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_all(
    State(state): State<ServerState>,
) -> Result<Json<DeletedAll>, ServerError> {
    let outcome = state.engine.delete_all().await?;
    Ok(Json(DeletedAll {
        deleted: outcome.deleted,
    }))
}

pub async fn suggest(
    State(state): State<ServerState>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<SuggestionsResponse>, ServerError> {
    let suggestions = state
        .engine
        .suggestions(&query.name)
        .await?
        .into_iter()
        .map(|s| SuggestionView {
            name: s.name,
            place: s.place,
        })
        .collect();

    Ok(Json(SuggestionsResponse { suggestions }))
}

pub async fn import(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<ImportResponse>, ServerError> {
    let outcome = state.engine.import_csv(&body).await?;
    Ok(Json(ImportResponse {
        imported: outcome.imported,
        skipped: outcome.skipped,
    }))
}

pub async fn export(
    State(state): State<ServerState>,
    Query(query): Query<LedgerQuery>,
) -> Result<impl IntoResponse, ServerError> {
    let search = query.search.unwrap_or_default();
    let bytes = state.engine.export_csv(&search).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"ledger.csv\"",
            ),
        ],
        bytes,
    ))
}
