use axum::{extract::State, Json};
use chrono::Utc;
use common::errors::UpdateError;
use common::mobilize::flatten_events;
use common::poster::post_events;
use common::window::tomorrow_window;
use serde::Serialize;

use crate::handlers::ErrorResponse;
use crate::state::AppState;

/// Summary returned to the scheduler after a completed run.
#[derive(Debug, Serialize)]
pub struct UpdateSummary {
    pub posted: usize,
    pub window_start: String,
    pub window_end: String,
}

/// Handle a trusted cron trigger: announce tomorrow's events.
///
/// Stages run strictly in sequence and the first failure aborts the rest,
/// surfacing as a 500 with the failure category; nothing is retried and no
/// partial result is persisted.
#[tracing::instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
) -> Result<Json<UpdateSummary>, ErrorResponse> {
    match run_update(&state).await {
        Ok(summary) => {
            tracing::info!(posted = summary.posted, "Update completed");
            Ok(Json(summary))
        }
        Err(err) => {
            tracing::error!(error = %err, category = err.category(), "Update aborted");
            Err(err.into())
        }
    }
}

async fn run_update(state: &AppState) -> Result<UpdateSummary, UpdateError> {
    // Credentials are resolved fresh on every trigger; nothing is cached
    // between invocations.
    let credentials = state.secrets.fetch_credentials().await?;
    let session = state.reddit.login(&credentials).await?;

    let window = tomorrow_window(Utc::now(), state.config.window.timezone)?;
    let raw = state.mobilize.fetch_events(&window).await?;
    let events = flatten_events(raw)?;

    let posted = post_events(
        &session,
        state.config.window.timezone,
        &state.config.window.timezone_label,
        &events,
    )
    .await?;

    Ok(UpdateSummary {
        posted,
        window_start: window.start.to_rfc3339(),
        window_end: window.end.to_rfc3339(),
    })
}
