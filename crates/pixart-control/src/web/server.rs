//! Axum HTTP server

use axum::http::{header, HeaderValue, Method};
use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};
use pixart_core::LocaleCatalog;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::library::ArtLibrary;
use crate::{error::ControlError, Result};

use super::routes::build_router;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<ArtLibrary>,
    pub locales: Arc<LocaleCatalog>,
}

/// Web server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    pub allowed_origins: Vec<String>,
    /// Directory of preset JSON files; the embedded seed set when unset
    pub preset_dir: Option<PathBuf>,
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            enable_cors: true,
            allowed_origins: default_allowed_origins(),
            preset_dir: None,
        }
    }
}

impl ServerConfig {
    /// Create a new server config
    pub fn new(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Set the host address
    pub fn with_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    /// Set CORS enabled/disabled
    pub fn with_cors(mut self, enable: bool) -> Self {
        self.enable_cors = enable;
        self
    }

    /// Set allowed origins for CORS
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Set the preset directory
    pub fn with_preset_dir(mut self, dir: PathBuf) -> Self {
        self.preset_dir = Some(dir);
        self
    }

    /// Socket address to bind
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ControlError::HttpError(format!("Invalid address: {}", e)))
    }

    /// Library for this config: the preset directory if set, else the seed set
    pub fn load_library(&self) -> Result<ArtLibrary> {
        match &self.preset_dir {
            Some(dir) => ArtLibrary::load_dir(dir),
            None => Ok(ArtLibrary::embedded()),
        }
    }
}

/// Web server for the preset API
pub struct WebServer {
    config: ServerConfig,
    state: AppState,
}

impl WebServer {
    /// Create a new web server with the default locale catalog
    pub fn new(config: ServerConfig, library: ArtLibrary) -> Self {
        Self::with_locales(config, library, LocaleCatalog::default())
    }

    /// Create a new web server
    pub fn with_locales(config: ServerConfig, library: ArtLibrary, locales: LocaleCatalog) -> Self {
        Self {
            config,
            state: AppState {
                library: Arc::new(library),
                locales: Arc::new(locales),
            },
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Fully layered application router
    pub fn router(&self) -> Result<Router> {
        let app = build_router()
            .layer(middleware::from_fn(security_headers))
            .with_state(self.state.clone());

        if !self.config.enable_cors {
            return Ok(app);
        }

        let cors_layer = CorsLayer::new()
            .allow_methods([Method::GET])
            .allow_headers([header::CONTENT_TYPE]);

        // If allowed_origins contains "*" or is empty (default permissive), allow Any
        if self.config.allowed_origins.iter().any(|o| o == "*")
            || self.config.allowed_origins.is_empty()
        {
            Ok(app.layer(cors_layer.allow_origin(Any)))
        } else {
            let origins: Result<Vec<HeaderValue>> = self
                .config
                .allowed_origins
                .iter()
                .map(|o| parse_origin(o))
                .collect();

            Ok(app.layer(cors_layer.allow_origin(origins?)))
        }
    }

    /// Run the web server on the configured address (blocking)
    pub async fn run(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ControlError::HttpError(format!("Failed to bind: {}", e)))?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let app = self.router()?;

        if let Ok(addr) = listener.local_addr() {
            tracing::info!("Web server listening on {}", addr);
        }

        axum::serve(listener, app.into_make_service())
            .await
            .map_err(|e| ControlError::HttpError(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Spawn the server in a background task
    pub fn spawn(self) -> tokio::task::JoinHandle<Result<()>> {
        tokio::spawn(async move { self.run().await })
    }
}

fn parse_origin(origin: &str) -> Result<HeaderValue> {
    origin
        .parse::<HeaderValue>()
        .map_err(|e| ControlError::HttpError(format!("Invalid origin header: {}", e)))
}

/// Security headers middleware
async fn security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    // Prevent MIME sniffing
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    // Prevent clickjacking
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    headers.insert(
        header::X_XSS_PROTECTION,
        HeaderValue::from_static("1; mode=block"),
    );

    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );

    response
}
