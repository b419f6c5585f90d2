use crate::client::traits::AnalysisApi;
use crate::config::NAME_ANALYSIS_PATH;
use crate::model::{AnalysisEnvelope, ApiError, NameAnalysisRequest, ServiceInfo};
use crate::utils::join_url;

use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{info, warn};

/// reqwest-backed client for the name-analysis service. No request timeout is set.
#[derive(Debug, Clone)]
pub struct HttpAnalysisApi {
    client: Client,
    base_url: String,
}

impl HttpAnalysisApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("soulchart-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Non-2xx responses are failures regardless of body.
    fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            warn!("❌ Service responded [{}] for {}", status, response.url());
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl AnalysisApi for HttpAnalysisApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn analyze_name(&self, req: &NameAnalysisRequest) -> Result<AnalysisEnvelope, ApiError> {
        let url = self.url(NAME_ANALYSIS_PATH);
        info!("📤 POST {} for {:?}", url, req.name);
        let response = self.client.post(&url).json(req).send().await?;
        let response = Self::check_status(response)?;

        let bytes = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        let envelope = AnalysisEnvelope::deserialize(value)
            .map_err(|e| ApiError::MalformedEnvelope(e.to_string()))?;

        info!("✅ Envelope received: {:?}", envelope);
        Ok(envelope)
    }

    async fn fetch_file(&self, download_url: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.url(download_url);
        info!("📥 GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response)?;
        let bytes = response.bytes().await?;

        info!("✅ Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    async fn service_info(&self) -> Result<ServiceInfo, ApiError> {
        let url = self.url("/");
        info!("🔍 GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response)?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_service, unreachable_base_url};
    use axum::Json;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn posts_json_body_to_name_analysis() {
        let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::default();
        let captured = seen.clone();
        let router = Router::new().route(
            "/api/name-analysis",
            post(move |headers: HeaderMap, body: String| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let body: Value = serde_json::from_str(&body).unwrap();
                *captured.lock().unwrap() = Some((content_type, body));
                Json(json!({ "success": true, "download_url": "/download/x.txt" }))
            }),
        );
        let base = spawn_service(router).await;
        let api = HttpAnalysisApi::new(&base).unwrap();

        let envelope = api.analyze_name(&NameAnalysisRequest::new("")).await.unwrap();

        assert!(matches!(envelope, AnalysisEnvelope::Success { .. }));
        let (content_type, body) = seen.lock().unwrap().take().unwrap();
        assert_eq!(content_type, "application/json");
        assert_eq!(body, json!({ "name": "", "nikud_dict": {} }));
    }

    #[tokio::test]
    async fn error_status_skips_body() {
        let router = Router::new().route(
            "/api/name-analysis",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": true, "download_url": "/ignored" })),
                )
            }),
        );
        let base = spawn_service(router).await;
        let api = HttpAnalysisApi::new(&base).unwrap();

        let err = api
            .analyze_name(&NameAnalysisRequest::new("Noa"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500 }));
    }

    #[tokio::test]
    async fn invalid_json_and_bad_envelope_are_told_apart() {
        let router = Router::new()
            .route("/api/name-analysis", post(|| async { "<html>oops</html>" }));
        let base = spawn_service(router).await;
        let api = HttpAnalysisApi::new(&base).unwrap();
        let err = api
            .analyze_name(&NameAnalysisRequest::new("Noa"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));

        let router = Router::new().route(
            "/api/name-analysis",
            post(|| async { Json(json!({ "success": true })) }),
        );
        let base = spawn_service(router).await;
        let api = HttpAnalysisApi::new(&base).unwrap();
        let err = api
            .analyze_name(&NameAnalysisRequest::new("Noa"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedEnvelope(_)));
    }

    #[tokio::test]
    async fn service_info_reads_root_document() {
        let router = Router::new().route(
            "/",
            get(|| async {
                Json(json!({
                    "message": "SoulChart Mobile API",
                    "status": "running",
                    "endpoints": ["/api/name-analysis", "/download/{file_id}"]
                }))
            }),
        );
        let base = spawn_service(router).await;
        let api = HttpAnalysisApi::new(&base).unwrap();

        let info = api.service_info().await.unwrap();
        assert_eq!(info.status, "running");
        assert_eq!(info.endpoints.len(), 2);
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let api = HttpAnalysisApi::new(unreachable_base_url().await).unwrap();
        let err = api
            .analyze_name(&NameAnalysisRequest::new("Noa"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
