//! HTTP request and response types

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use fluent_langneg::accepted_languages;
use pixart_core::{LocaleCatalog, Translations};
use serde::{Deserialize, Serialize};

use crate::error::ControlError;

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors surfaced by the art API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Name outside `[A-Za-z0-9_-]+`
    InvalidName,
    /// Valid name, no preset
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidName => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidName => "Invalid art name",
            ApiError::NotFound => "Art not found",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl ApiError {
    /// API error for a provider error, `None` for server-side failures
    pub fn from_control(err: &ControlError) -> Option<Self> {
        match err {
            ControlError::InvalidPresetName(_) => Some(ApiError::InvalidName),
            ControlError::PresetNotFound(_) => Some(ApiError::NotFound),
            _ => None,
        }
    }
}

/// `?lang=xx` query
#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    #[serde(default)]
    pub lang: Option<String>,
}

/// Translation endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationsResponse {
    pub locale: String,
    pub translations: Translations,
}

/// First `Accept-Language` entry whose language is an allowed locale
pub fn preferred_locale(headers: &HeaderMap, locales: &LocaleCatalog) -> Option<String> {
    let value = headers.get(header::ACCEPT_LANGUAGE)?.to_str().ok()?;
    accepted_languages::parse(value)
        .into_iter()
        .map(|id| id.language.to_string())
        .find(|language| locales.is_allowed(language))
}
