//! Web API for preset access
//!
//! Routes, mounted at both `/` and `/api`:
//! - `GET /art` - preset names
//! - `GET /art/{name}` - 256 colors of one preset
//!
//! Plus `GET /api/translations?lang=xx` for the editor text.

pub mod handlers;
pub mod routes;
pub mod server;

pub use handlers::{ApiError, ErrorBody, LocaleQuery, TranslationsResponse};
pub use routes::build_router;
pub use server::{AppState, ServerConfig, WebServer};
