//! REST API route definitions

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
    routing::get,
    Router,
};
use pixart_core::{is_valid_preset_name, Grid};

use super::handlers::{preferred_locale, ApiError, LocaleQuery, TranslationsResponse};
use super::server::AppState;

/// Build the API router
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(art_routes())
        .nest("/api", art_routes())
        .route("/api/translations", get(get_translations))
}

fn art_routes() -> Router<AppState> {
    Router::new()
        .route("/art", get(list_art))
        // Wildcard so names containing `/` reach validation instead of 404
        .route("/art/*name", get(show_art))
}

/// GET /art - List preset names
async fn list_art(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.library.art_list())
}

/// GET /art/{name} - 256 colors of one preset
async fn show_art(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    if !is_valid_preset_name(&name) {
        tracing::warn!("Rejected art name {:?}", name);
        return Err(ApiError::InvalidName);
    }

    state
        .library
        .get_grid(&name)
        .map(|grid| Json(Grid::to_color_strings(grid)))
        .ok_or(ApiError::NotFound)
}

/// GET /api/translations?lang=xx - Editor text for the negotiated locale
async fn get_translations(
    Query(query): Query<LocaleQuery>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Json<TranslationsResponse> {
    let preferred = preferred_locale(&headers, &state.locales);
    let locale = state
        .locales
        .negotiate(query.lang.as_deref(), preferred.as_deref());
    let translations = state.locales.translations_for(&locale);

    Json(TranslationsResponse {
        locale,
        translations,
    })
}
