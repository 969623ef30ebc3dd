use crate::config::AppConfig;
use crate::errors::{EngineError, EngineResult};
use crate::types::{AnalysisRequest, AnalysisResult};
use reqwest::Client;
use std::time::Duration;

/// Client for a running analysis service. Same inputs and outputs as
/// `Engine::analyze_request`, evaluated remotely. All methods return
/// Result, never panic.
#[derive(Clone)]
pub struct RemoteEngine {
    client: Client,
    base_url: String,
}

impl RemoteEngine {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .pool_max_idle_per_host(4)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(&cfg.remote_base_url, Duration::from_secs(cfg.remote_timeout_secs))
    }

    /// POST /api/strategy/analyze
    pub async fn analyze(&self, request: &AnalysisRequest) -> EngineResult<AnalysisResult> {
        let path = "/api/strategy/analyze";
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(request)
            .send()
            .await?;
        Self::decode(path, resp).await
    }

    /// GET /api/health
    pub async fn health(&self) -> EngineResult<serde_json::Value> {
        let path = "/api/health";
        let resp = self.client.get(format!("{}{}", self.base_url, path)).send().await?;
        Self::decode(path, resp).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(path: &str, resp: reqwest::Response) -> EngineResult<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EngineError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<T>().await.map_err(|e| EngineError::Parse(format!("{path}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Engine;
    use crate::server::router;
    use crate::state::AppState;
    use crate::strategies::catalog;
    use crate::types::MarketParameters;

    async fn spawn_service() -> RemoteEngine {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(AppState::new(AppConfig::default()));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        RemoteEngine::from_config(&AppConfig {
            remote_base_url: format!("http://{addr}/"),
            remote_timeout_secs: 5,
            ..AppConfig::default()
        })
    }

    #[tokio::test]
    async fn test_remote_matches_local() {
        let remote = spawn_service().await;
        let health = remote.health().await.unwrap();
        assert_eq!(health["status"], "healthy");

        let local = Engine::default();
        let market = MarketParameters::default();
        let cases = [
            ("Bull Call Spread", catalog::bull_call_spread(95.0, 105.0, 5.0, 3.0)),
            ("Iron Condor", catalog::iron_condor([85.0, 90.0, 110.0, 115.0], [0.5, 1.2, 1.3, 0.6])),
            ("Long Strangle", catalog::long_strangle(110.0, 90.0, 1.1, 0.9)),
            ("Collar", catalog::collar(100.0, 95.0, 110.0, 2.0, 2.0)),
        ];

        for (name, position) in cases {
            let request = AnalysisRequest::new(name, 100.0, position, market);
            let here = local.analyze_request(&request).unwrap();
            let there = remote.analyze(&request).await.unwrap();
            let diff = here.max_abs_diff(&there);
            assert!(matches!(diff, Some(d) if d < 1e-9), "{name}: diff={diff:?}");
        }
    }

    #[tokio::test]
    async fn test_remote_invalid_request_is_422() {
        let remote = spawn_service().await;
        let request = AnalysisRequest::new(
            "Broken",
            -1.0,
            catalog::long_straddle(100.0, 3.0, 3.0),
            MarketParameters::default(),
        );
        match remote.analyze(&request).await {
            Err(EngineError::Remote { status, body }) => {
                assert_eq!(status, 422);
                assert!(body.contains("underlying_price"), "body={body}");
            }
            other => panic!("expected a 422, got {other:?}"),
        }
    }

    #[test]
    fn test_from_config_normalizes_base_url() {
        let remote = RemoteEngine::from_config(&AppConfig {
            remote_base_url: "http://analytics.internal:8100///".to_string(),
            ..AppConfig::default()
        });
        assert_eq!(remote.base_url, "http://analytics.internal:8100");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        // Nothing listens on port 9 locally
        let remote = RemoteEngine::new("http://127.0.0.1:9", Duration::from_millis(500));
        assert!(matches!(remote.health().await, Err(EngineError::Network(_))));
    }
}
