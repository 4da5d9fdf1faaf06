use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pickpath_core::{
    AnalysisConfig, AnalysisError, AnalysisRequest, AnalysisResult, Analyzer, DistanceModel,
    LayoutRow, SlotIndex,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const OPENAPI_SPEC: &str = include_str!("../../../openapi.yaml");
const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Pick Path API Docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            SwaggerUIBundle({
                url: '/openapi.yaml',
                dom_id: '#swagger-ui',
                presets: [SwaggerUIBundle.presets.apis],
                layout: 'BaseLayout',
            });
        };
    </script>
</body>
</html>"#;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Pick Path API");

    let addr = std::env::var("PICKPATH_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Try: curl http://{}/api/health", addr);

    axum::serve(listener, app()).await?;
    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/health", get(health_check))
        .route("/api/analyze", post(analyze))
        .route("/api/distance", post(distance))
        .route("/openapi.yaml", get(serve_openapi_spec))
        .route("/docs", get(serve_swagger_ui))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "pickpath-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Full trip analysis
async fn analyze(Json(request): Json<AnalysisRequest>) -> Result<Json<AnalysisResult>, AppError> {
    info!(
        "Received analysis request with {} layout rows and {} picks",
        request.layout.len(),
        request.picks.len()
    );

    let analyzer = Analyzer::new(request)?;
    let result = analyzer.analyze();

    info!(
        "Analysis complete: {} categories, {} trips",
        result.categories.len(),
        result.trips.len()
    );

    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct DistanceRequest {
    layout: Vec<LayoutRow>,
    from: String,
    to: String,
    #[serde(default)]
    config: AnalysisConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct DistanceResponse {
    from: String,
    to: String,
    distance: f64,
}

/// Single slot-to-slot distance
async fn distance(
    Json(request): Json<DistanceRequest>,
) -> Result<Json<DistanceResponse>, AppError> {
    request.config.validate()?;

    let index = SlotIndex::build(&request.layout);
    let distance = DistanceModel::new(&index, &request.config).distance(&request.from, &request.to);

    Ok(Json(DistanceResponse {
        from: request.from,
        to: request.to,
        distance,
    }))
}

/// Application error type
struct AppError(anyhow::Error);

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        let status = match self.0.downcast_ref::<AnalysisError>() {
            Some(_) => StatusCode::BAD_REQUEST,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

async fn serve_index() -> impl IntoResponse {
    Html(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Pick Path API</title>
        </head>
        <body>
            <h1>Pick Path API</h1>
            <h2>API Endpoints:</h2>
            <ul>
                <li>GET /api/health - Health check</li>
                <li>POST /api/analyze - Per-trip distances and category statistics</li>
                <li>POST /api/distance - Distance between two slots</li>
                <li>GET /docs - OpenAPI documentation</li>
            </ul>
        </body>
        </html>
    "#,
    )
}

async fn serve_openapi_spec() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("Content-Type", "application/yaml")],
        OPENAPI_SPEC,
    )
}

async fn serve_swagger_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}
