use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::instrument;

use crate::{app_state::AppState, domain::StudyLibrary, routes::ApiError};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/refresh", post(refresh))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LibraryStats {
    sermons: usize,
    verse_insights: usize,
    community_notes: usize,
    personal_notes: usize,
}

impl From<&StudyLibrary> for LibraryStats {
    fn from(library: &StudyLibrary) -> Self {
        Self {
            sermons: library.sermons.len(),
            verse_insights: library.insight_count(),
            community_notes: library.community_notes.len(),
            personal_notes: library.personal_notes.len(),
        }
    }
}

#[instrument(name = "GET /library/stats", skip(app_state))]
async fn stats(State(app_state): State<AppState>) -> Json<LibraryStats> {
    let library = app_state.library_snapshot().await;
    Json(LibraryStats::from(library.as_ref()))
}

#[instrument(name = "POST /library/refresh", skip(app_state))]
async fn refresh(
    State(app_state): State<AppState>,
) -> Result<Json<LibraryStats>, ApiError> {
    let library = app_state.refresh_library().await?;
    tracing::info!(
        sermons = library.sermons.len(),
        community_notes = library.community_notes.len(),
        "Study library refreshed"
    );
    Ok(Json(LibraryStats::from(library.as_ref())))
}
