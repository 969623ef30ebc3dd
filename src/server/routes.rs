use crate::errors::EngineResult;
use crate::state::AppState;
use crate::strategies;
use crate::types::{AnalysisRequest, AnalysisResult};
use axum::extract::State;
use axum::response::Json;
use std::sync::Arc;
use std::time::Instant;

/// GET / -- service banner
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Options Strategy Analytics API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "strategies": strategies::strategy_count(),
    }))
}

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// POST /api/strategy/analyze -- full position analysis
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalysisRequest>,
) -> EngineResult<Json<AnalysisResult>> {
    serve_analysis(&state, &request).map(Json)
}

/// GET /api/strategy/list -- strategy names by category
pub async fn list_strategies() -> Json<serde_json::Value> {
    Json(strategies::catalog_json())
}

/// GET /api/counters -- performance counters (lock-free reads)
pub async fn get_counters(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(state.counters.snapshot())
}

/// Run one analysis for a service caller (HTTP or WS): tags it with a
/// request id, times it and updates the counters.
pub(crate) fn serve_analysis(state: &AppState, request: &AnalysisRequest) -> EngineResult<AnalysisResult> {
    let request_id = uuid::Uuid::new_v4();
    let started = Instant::now();

    let outcome = state.engine.analyze_request(request);
    state.counters.record_analysis(outcome.is_ok());

    match &outcome {
        Ok(result) => tracing::info!(
            request_id = %request_id,
            strategy = %request.strategy_name,
            category = strategies::category_of(&request.strategy_name).unwrap_or("custom"),
            break_evens = result.break_even_prices.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "analysis served"
        ),
        // The engine already logged the reason
        Err(_) => tracing::info!(request_id = %request_id, "analysis rejected"),
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::server::router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    const BULL_CALL: &str = r#"{
        "strategy_name": "Bull Call Spread",
        "stock_price": 100,
        "option_legs": [
            {"option_type": "call", "position": "long", "strike": 95, "premium": 5},
            {"option_type": "call", "position": "short", "strike": 105, "premium": 3}
        ],
        "market_params": {"days_to_expiration": 30}
    }"#;

    async fn call(app: axum::Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let state = AppState::new(AppConfig::default());

        let (status, body) = call(router(state.clone()), Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "operational");
        assert_eq!(body["strategies"], 45);

        let (status, body) = call(router(state), Request::get("/api/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        let ts = body["timestamp"].as_str().unwrap_or_default();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok(), "timestamp={ts}");
    }

    #[tokio::test]
    async fn test_analyze_bull_call_spread() {
        let state = AppState::new(AppConfig::default());
        let (status, body) = call(router(state.clone()), post("/api/strategy/analyze", BULL_CALL)).await;

        assert_eq!(status, StatusCode::OK, "body={body}");
        assert!((body["max_profit"].as_f64().unwrap() - 800.0).abs() < 1e-6);
        assert!((body["max_loss"].as_f64().unwrap() + 200.0).abs() < 1e-6);
        assert!((body["risk_reward_ratio"].as_f64().unwrap() - 4.0).abs() < 1e-6);
        assert_eq!(body["break_evens"].as_array().map(|a| a.len()), Some(1));
        assert_eq!(body["payoff_data"]["stock_prices"].as_array().map(|a| a.len()), Some(300));
        assert!(body["greeks"]["delta"].as_f64().unwrap() > 0.0);

        assert_eq!(state.counters.snapshot()["analyses_served"], 1);
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_strike() {
        let state = AppState::new(AppConfig::default());
        let body = BULL_CALL.replace("\"strike\": 105", "\"strike\": -5");
        let (status, resp) = call(router(state.clone()), post("/api/strategy/analyze", &body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let msg = resp["error"].as_str().unwrap_or_default();
        assert!(msg.contains("option_legs[1].strike_price"), "error={msg}");
        assert_eq!(state.counters.snapshot()["analyses_rejected"], 1);
    }

    #[tokio::test]
    async fn test_analyze_accepts_names_outside_catalog() {
        let state = AppState::new(AppConfig::default());
        assert_eq!(strategies::category_of("My Hedge"), None);
        let body = BULL_CALL.replace("Bull Call Spread", "My Hedge");
        let (status, _) = call(router(state.clone()), post("/api/strategy/analyze", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.counters.snapshot()["analyses_served"], 1);
        assert_eq!(state.counters.snapshot()["analyses_rejected"], 0);
    }

    #[tokio::test]
    async fn test_strategy_list() {
        let state = AppState::new(AppConfig::default());
        let (status, body) = call(router(state), Request::get("/api/strategy/list").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["condors"].as_array().map(|a| a.len()), Some(3));
    }
}
