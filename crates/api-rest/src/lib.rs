//! # API REST
//!
//! REST API implementation for AurumRx.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, CORS, timeouts, artificial latency)
//!
//! Uses `api-shared` for wire types and `aurum-core` for the interaction engine.

#![warn(rust_2018_idioms)]

pub mod error;

use api_shared::{
    AnalysisRes, AnalyzeReq, CheckPairReq, ErrorRes, HealthRes, HealthService, InteractionRes,
    KnowledgeBaseRes,
};
use aurum_core::{
    config::{request_timeout_from_env_value, response_delay_from_env_value},
    InteractionService, PatientContext, RxError, RxResult,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// HTTP boundary settings resolved at startup.
#[derive(Clone, Debug)]
pub struct RestConfig {
    /// Artificial latency added before an analysis is answered.
    pub response_delay: Duration,
    /// Requests taking longer than this are answered with 408.
    pub request_timeout: Duration,
}

impl RestConfig {
    /// Build the configuration from raw environment values.
    ///
    /// # Errors
    ///
    /// Returns `RxError::InvalidInput` if either value cannot be parsed.
    pub fn from_env_values(
        response_delay_ms: Option<String>,
        request_timeout_secs: Option<String>,
    ) -> RxResult<Self> {
        Ok(Self {
            response_delay: response_delay_from_env_value(response_delay_ms)?,
            request_timeout: request_timeout_from_env_value(request_timeout_secs)?,
        })
    }
}

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    interaction_service: InteractionService,
    config: Arc<RestConfig>,
}

impl AppState {
    pub fn new(interaction_service: InteractionService, config: RestConfig) -> Self {
        Self {
            interaction_service,
            config: Arc::new(config),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, analyze, check_pair, list_knowledge_base),
    components(schemas(
        HealthRes,
        AnalyzeReq,
        CheckPairReq,
        AnalysisRes,
        InteractionRes,
        KnowledgeBaseRes,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with all routes, documentation and middleware.
pub fn router(state: AppState) -> Router {
    let timeout = state.config.request_timeout;

    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/interactions/check", post(check_pair))
        .route("/knowledge-base", get(list_knowledge_base))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the AurumRx REST API service.
/// This endpoint is used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(
        state.interaction_service.knowledge_base().len(),
    ))
}

#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeReq,
    responses(
        (status = 200, description = "Interaction analysis", body = AnalysisRes),
        (status = 400, description = "Invalid drug name or malformed patient context", body = ErrorRes),
        (status = 408, description = "Request timed out"),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Analyse a candidate drug against the patient's current medications
///
/// The patient fields are coerced first (blank list entries dropped, age parsed). The analysis
/// itself runs on the blocking pool so that a panic inside the engine surfaces as a 500 instead
/// of tearing down the connection.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the body is not valid JSON for `AnalyzeReq`,
/// - `test_drug` is blank or invalid,
/// - the patient context is malformed (for example a non-numeric or boolean age).
///
/// Returns `500 Internal Server Error` if the analysis fails unexpectedly.
#[axum::debug_handler]
async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeReq>, JsonRejection>,
) -> Result<Json<AnalysisRes>, ApiError> {
    let Json(req) = payload?;
    let (candidate, raw) = req.into_parts();
    let context = PatientContext::from_raw(raw)?;

    if !state.config.response_delay.is_zero() {
        tokio::time::sleep(state.config.response_delay).await;
    }

    let service = state.interaction_service.clone();
    let result = tokio::task::spawn_blocking(move || {
        service.analyze(&candidate, &context.current_medications, &context)
    })
    .await
    .map_err(|e| RxError::UnhandledFailure(format!("analysis task failed: {e}")))??;

    Ok(Json(AnalysisRes::from(result)))
}

#[utoipa::path(
    post,
    path = "/interactions/check",
    request_body = CheckPairReq,
    responses(
        (status = 200, description = "Pair check result", body = AnalysisRes),
        (status = 400, description = "Invalid drug name", body = ErrorRes)
    )
)]
/// Check a single pair of drugs against the knowledge base
#[axum::debug_handler]
async fn check_pair(
    State(state): State<AppState>,
    payload: Result<Json<CheckPairReq>, JsonRejection>,
) -> Result<Json<AnalysisRes>, ApiError> {
    let Json(req) = payload?;
    let result = state
        .interaction_service
        .check_pair(&req.drug1, &req.drug2)?;
    Ok(Json(AnalysisRes::from(result)))
}

#[utoipa::path(
    get,
    path = "/knowledge-base",
    responses(
        (status = 200, description = "Every stored interaction pair", body = KnowledgeBaseRes)
    )
)]
/// List every interaction pair in the knowledge base, sorted by drug name
#[axum::debug_handler]
async fn list_knowledge_base(State(state): State<AppState>) -> Json<KnowledgeBaseRes> {
    Json(KnowledgeBaseRes::from(
        state.interaction_service.knowledge_base(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_core::KnowledgeBase;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app_with(config: RestConfig) -> Router {
        let service = InteractionService::new(Arc::new(KnowledgeBase::builtin()));
        router(AppState::new(service, config))
    }

    fn app() -> Router {
        app_with(RestConfig {
            response_delay: Duration::ZERO,
            request_timeout: Duration::from_secs(10),
        })
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, json)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn health_reports_alive() {
        let (status, json) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
    }

    #[tokio::test]
    async fn analyze_returns_high_for_aspirin_and_warfarin() {
        let body = r#"{
            "test_drug": "Aspirin",
            "age": 71,
            "sex": "male",
            "current_medications": ["WARFARIN", ""]
        }"#;

        let (status, json) = post_json(app(), "/analyze", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["severity"], "High");
        assert!(json["report"].as_str().expect("report").contains("bleeding"));
        assert_eq!(json["interactions"].as_array().expect("array").len(), 1);
        assert_eq!(json["interactions"][0]["drug2"], "WARFARIN");
    }

    #[tokio::test]
    async fn analyze_without_medications_is_unknown() {
        let (status, json) = post_json(app(), "/analyze", r#"{"test_drug": "aspirin"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["severity"], "Unknown");
    }

    #[tokio::test]
    async fn blank_test_drug_is_bad_request() {
        let body = r#"{"test_drug": "  ", "current_medications": ["warfarin"]}"#;
        let (status, json) = post_json(app(), "/analyze", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().expect("error").contains("test_drug"));
    }

    #[tokio::test]
    async fn non_numeric_age_is_bad_request() {
        let body = r#"{"test_drug": "aspirin", "age": "old", "current_medications": ["warfarin"]}"#;
        let (status, json) = post_json(app(), "/analyze", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().expect("error").contains("age"));
    }

    #[tokio::test]
    async fn boolean_age_is_bad_request() {
        let body = r#"{"test_drug": "aspirin", "age": true, "current_medications": ["warfarin"]}"#;
        let (status, json) = post_json(app(), "/analyze", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"]
            .as_str()
            .expect("error")
            .starts_with("malformed patient context"));
    }

    #[tokio::test]
    async fn long_medication_list_with_blanks_is_analysed() {
        let mut current: Vec<String> = (0..100).map(|n| format!("vitamin {n}")).collect();
        current.push("  ".into());
        current.push("warfarin".into());
        let body = serde_json::json!({ "test_drug": "aspirin", "current_medications": current });

        let (status, json) = post_json(app(), "/analyze", &body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["severity"], "High");
        assert_eq!(json["interactions"][0]["drug2"], "warfarin");
    }

    #[tokio::test]
    async fn invalid_json_gets_error_body() {
        let (status, json) = post_json(app(), "/analyze", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn check_pair_finds_reverse_entry() {
        let body = r#"{"drug1": "alcohol", "drug2": "Metformin"}"#;
        let (status, json) = post_json(app(), "/interactions/check", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["severity"], "Moderate");
        assert_eq!(json["interactions"][0]["drug2"], "Metformin");
    }

    #[tokio::test]
    async fn knowledge_base_lists_pairs() {
        let (status, json) = get_json(app(), "/knowledge-base").await;
        assert_eq!(status, StatusCode::OK);
        let pairs = json["interactions"].as_array().expect("array");
        assert_eq!(pairs.len(), 6);
        assert!(pairs[0]["sideEffects"].is_array());
    }

    #[tokio::test]
    async fn slow_analysis_times_out() {
        let app = app_with(RestConfig {
            response_delay: Duration::from_millis(500),
            request_timeout: Duration::from_millis(50),
        });
        let body = r#"{"test_drug": "aspirin", "current_medications": ["warfarin"]}"#;
        let (status, _) = post_json(app, "/analyze", body).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, json) = get_json(app(), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["paths"]["/analyze"].is_object());
    }

    #[test]
    fn rest_config_parses_env_values() {
        let cfg = RestConfig::from_env_values(Some("250".into()), None).expect("config");
        assert_eq!(cfg.response_delay, Duration::from_millis(250));
        assert!(RestConfig::from_env_values(Some("x".into()), None).is_err());
    }
}
