use crate::model::{AnalysisEnvelope, ApiError, NameAnalysisRequest, ServiceInfo};

#[async_trait::async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Base URL every request path is appended to.
    fn base_url(&self) -> &str;

    async fn analyze_name(&self, req: &NameAnalysisRequest) -> Result<AnalysisEnvelope, ApiError>;

    async fn fetch_file(&self, download_url: &str) -> Result<Vec<u8>, ApiError>;

    async fn service_info(&self) -> Result<ServiceInfo, ApiError>;
}
