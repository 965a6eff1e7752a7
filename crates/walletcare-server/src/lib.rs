//! WalletCare Web Server
//!
//! Axum-based REST API behind the WalletCare chat front end.
//!
//! Every data endpoint is scoped by a `device_id` (query parameter for reads,
//! body field for writes). There is no authentication beyond that scoping.
//!
//! Security features:
//! - Restrictive CORS policy
//! - Device id validation before any file access
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info};

use walletcare_core::{validate_device_id, DeviceStore, InsightEngine, MessageClassifier};

mod handlers;

/// Environment variable with comma-separated allowed CORS origins
pub const ALLOWED_ORIGINS_ENV: &str = "WALLETCARE_ALLOWED_ORIGINS";

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read allowed origins from `WALLETCARE_ALLOWED_ORIGINS`
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var(ALLOWED_ORIGINS_ENV)
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

/// Shared application state
pub struct AppState {
    pub store: DeviceStore,
    pub classifier: MessageClassifier,
    pub insights: InsightEngine,
    pub config: ServerConfig,
    /// Serializes read-modify-write cycles on device files
    pub write_lock: Mutex<()>,
}

/// Query string carrying the device scope
#[derive(Debug, Deserialize)]
pub struct DeviceQuery {
    pub device_id: Option<String>,
}

/// Resolve a device id from a request, rejecting missing or unsafe values
pub fn require_device_id(device_id: Option<&str>) -> Result<&str, AppError> {
    let device_id = device_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::bad_request("device_id required"))?;

    validate_device_id(device_id).map_err(AppError::from_core)?;
    Ok(device_id)
}

/// Success response with a status marker
#[derive(Serialize)]
pub struct SuccessResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn with_message(message: &str) -> Self {
        Self {
            status: "success",
            message: Some(message.to_string()),
        }
    }
}

/// GET /manifest.json - PWA manifest for the web front end
async fn manifest() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "WalletCare",
        "short_name": "WalletCare",
        "description": "Aplicativo de controle financeiro pessoal",
        "start_url": "/",
        "display": "standalone",
        "background_color": "#ffffff",
        "theme_color": "#4CAF50",
        "icons": [
            {
                "src": "/static/icon-192.png",
                "sizes": "192x192",
                "type": "image/png"
            },
            {
                "src": "/static/icon-512.png",
                "sizes": "512x512",
                "type": "image/png"
            }
        ]
    }))
}

/// Create the application router
pub fn create_router(
    store: DeviceStore,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<Router> {
    let classifier = MessageClassifier::new()?;
    let insights = InsightEngine::new();
    info!(
        "Insight analyzers: {}",
        insights.insight_names().join(", ")
    );

    let state = Arc::new(AppState {
        store,
        classifier,
        insights,
        config: config.clone(),
        write_lock: Mutex::new(()),
    });

    let api_routes = Router::new()
        // Settings
        .route(
            "/config",
            get(handlers::get_config).post(handlers::update_config),
        )
        // Expenses
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route("/reset-expenses", post(handlers::reset_expenses))
        // Chat
        .route("/chat", post(handlers::chat))
        // Summaries
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/investments", get(handlers::get_investments))
        .route("/insights", get(handlers::get_insights))
        .route("/report", get(handlers::get_report));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    let mut app = Router::new()
        .nest("/api", api_routes)
        .route("/manifest.json", get(manifest))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    // Serve the web front end if a directory is provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    Ok(app)
}

/// Start the server
pub async fn serve(
    store: DeviceStore,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    info!("Data directory: {}", store.root().display());

    let app = create_router(store, static_dir, config)?;
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error: bad input is the client's fault, the rest is ours
    pub fn from_core(err: walletcare_core::Error) -> Self {
        match err {
            walletcare_core::Error::InvalidData(msg) => Self::bad_request(&msg),
            walletcare_core::Error::NotFound(msg) => Self::not_found(&msg),
            other => Self::from(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
