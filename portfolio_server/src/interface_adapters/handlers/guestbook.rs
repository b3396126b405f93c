use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use std::sync::Arc;

use crate::domain::entities::{GuestbookEntry, NewGuestbookEntry};
use crate::domain::errors::GuestbookError;
use crate::interface_adapters::handlers::{ApiError, error_response, reject_query};
use crate::interface_adapters::protocol::{CreateEntryRequest, DeleteEntryQuery};
use crate::interface_adapters::state::AppState;
use crate::use_cases::create_entry::CreateEntryUseCase;
use crate::use_cases::delete_entry::DeleteEntryUseCase;
use crate::use_cases::list_entries::ListEntriesUseCase;

// Handler for listing guestbook entries, newest first.
#[tracing::instrument(name = "list_entries", skip_all)]
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GuestbookEntry>>, ApiError> {
    let use_case = ListEntriesUseCase {
        store: state.entries.clone(),
    };

    let entries = use_case
        .execute()
        .await
        .map_err(|err| map_guestbook_error(err, GuestbookErrorContext::List))?;

    Ok(Json(entries))
}

// Handler for signing the guestbook. The body is parsed by hand so that any
// malformed submission is answered with a JSON 400.
#[tracing::instrument(name = "create_entry", skip_all)]
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<GuestbookEntry>), ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(error_response(StatusCode::BAD_REQUEST, "Missing body"));
    }
    let payload: CreateEntryRequest = serde_json::from_slice(&body).map_err(|err| {
        tracing::debug!(error = %err, "rejected malformed guestbook payload");
        error_response(StatusCode::BAD_REQUEST, "Invalid guestbook entry data")
    })?;

    let use_case = CreateEntryUseCase {
        clock: state.clock.clone(),
        store: state.entries.clone(),
    };

    let entry = use_case
        .execute(NewGuestbookEntry {
            name: payload.name,
            email: payload.email,
            message: payload.message,
        })
        .await
        .map_err(|err| map_guestbook_error(err, GuestbookErrorContext::Create))?;

    tracing::info!(entry_id = %entry.id, "guestbook entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

// Handler for removing an entry; requires the shared admin secret.
#[tracing::instrument(name = "delete_entry", skip_all, fields(entry_id))]
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DeleteEntryQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let Query(query) = query.map_err(reject_query)?;
    if let Some(id) = &query.id {
        tracing::Span::current().record("entry_id", id.as_str());
    }
    let use_case = DeleteEntryUseCase {
        store: state.entries.clone(),
        admin_secret: state.admin_secret.as_deref(),
    };

    use_case
        .execute(query.id.as_deref(), query.secret.as_deref())
        .await
        .map_err(|err| map_guestbook_error(err, GuestbookErrorContext::Delete))?;

    tracing::info!("guestbook entry deleted");
    Ok(StatusCode::NO_CONTENT)
}

// Maps domain errors to HTTP responses by endpoint context.
enum GuestbookErrorContext {
    List,
    Create,
    Delete,
}

fn map_guestbook_error(err: GuestbookError, context: GuestbookErrorContext) -> ApiError {
    match err {
        GuestbookError::MissingField(_) | GuestbookError::FieldTooLong { .. } => {
            error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
        GuestbookError::MissingId => error_response(StatusCode::BAD_REQUEST, err.to_string()),
        GuestbookError::DeletionDisabled => {
            tracing::warn!("delete attempted while deletion is disabled");
            error_response(StatusCode::FORBIDDEN, err.to_string())
        }
        GuestbookError::InvalidSecret => {
            tracing::warn!("delete rejected: invalid secret");
            error_response(StatusCode::UNAUTHORIZED, err.to_string())
        }
        GuestbookError::NotFound => error_response(StatusCode::NOT_FOUND, err.to_string()),
        GuestbookError::Storage(store_err) => {
            tracing::error!(error = %store_err, "guestbook store failure");
            let message = match context {
                GuestbookErrorContext::List => "Failed to fetch guestbook entries",
                GuestbookErrorContext::Create => "Failed to save guestbook entry",
                GuestbookErrorContext::Delete => "Failed to delete guestbook entry",
            };
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}
