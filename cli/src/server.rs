#[cfg(feature = "server")]
pub mod http {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
        Router,
    };
    use serde::{Deserialize, Serialize};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tower_http::{cors::CorsLayer, trace::TraceLayer};
    use tracing::{error, info};
    use verdict::{Engine, OperationRecord, VerdictError};

    type SharedEngine = Arc<RwLock<Engine>>;
    type ApiError = (StatusCode, Json<ErrorResponse>);
    type JsonFacts = serde_json::Map<String, serde_json::Value>;

    #[derive(Debug, Deserialize)]
    struct EvaluateRequest {
        rule: String,
        #[serde(default)]
        facts: JsonFacts,
    }

    #[derive(Debug, Deserialize)]
    struct FactsRequest {
        #[serde(default)]
        facts: JsonFacts,
    }

    #[derive(Debug, Serialize)]
    struct EvaluateResponse {
        rule: String,
        matched: bool,
        operations: Vec<OperationRecord>,
    }

    #[derive(Debug, Serialize)]
    struct RuleJson {
        name: String,
        rule: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    }

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
    }

    fn api_error(status: StatusCode, error: String) -> ApiError {
        (status, Json(ErrorResponse { error }))
    }

    pub fn router(engine: Engine) -> Router {
        let shared_engine: SharedEngine = Arc::new(RwLock::new(engine));

        Router::new()
            .route("/health", get(health_check))
            .route("/rules", get(list_rules))
            .route("/rules/:name/evaluate", post(evaluate_named))
            .route("/evaluate", post(evaluate_inline))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(shared_engine)
    }

    pub async fn start_server(engine: Engine, host: &str, port: u16) -> anyhow::Result<()> {
        let app = router(engine);

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("Verdict server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    async fn health_check() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "verdict",
            "version": env!("CARGO_PKG_VERSION")
        }))
    }

    async fn list_rules(State(engine): State<SharedEngine>) -> impl IntoResponse {
        let engine = engine.read().await;
        let rules: Vec<RuleJson> = engine
            .rules()
            .iter()
            .map(|r| RuleJson {
                name: r.name.clone(),
                rule: r.expression.to_string(),
                source: r.source.clone(),
            })
            .collect();
        Json(rules)
    }

    async fn evaluate_inline(
        State(engine): State<SharedEngine>,
        Json(payload): Json<EvaluateRequest>,
    ) -> Result<impl IntoResponse, ApiError> {
        let engine = engine.read().await;

        let expression = engine.parse(&payload.rule).map_err(|e| {
            error!("Failed to parse rule: {}", e);
            api_error(StatusCode::BAD_REQUEST, e.to_string())
        })?;

        let mut operations = Vec::new();
        let matched = expression.interpret_traced(&payload.facts, &mut operations);
        info!(rule = %expression, matched, "evaluated inline rule");

        Ok(Json(EvaluateResponse {
            rule: expression.to_string(),
            matched,
            operations,
        }))
    }

    async fn evaluate_named(
        State(engine): State<SharedEngine>,
        Path(name): Path<String>,
        Json(payload): Json<FactsRequest>,
    ) -> Result<impl IntoResponse, ApiError> {
        let engine = engine.read().await;

        let response = engine
            .evaluate_rules(&payload.facts, Some(vec![name.clone()]))
            .map_err(|e| match &e {
                VerdictError::Engine(_) => api_error(StatusCode::NOT_FOUND, e.to_string()),
                _ => {
                    error!("Evaluation failed: {}", e);
                    api_error(StatusCode::BAD_REQUEST, e.to_string())
                }
            })?;

        let outcome = response.results.into_iter().next().ok_or_else(|| {
            api_error(StatusCode::NOT_FOUND, format!("Rule '{}' not found", name))
        })?;
        info!(rule = %name, matched = outcome.matched, "evaluated rule");

        Ok(Json(EvaluateResponse {
            rule: outcome.rule.expression.to_string(),
            matched: outcome.matched,
            operations: outcome.operations,
        }))
    }

}

#[cfg(not(feature = "server"))]
pub mod http {
    pub async fn start_server(
        _engine: verdict::Engine,
        _host: &str,
        _port: u16,
    ) -> anyhow::Result<()> {
        anyhow::bail!("Server feature not enabled. Recompile with --features server")
    }
}
