// Wire types for the name-analysis service and the client error type
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Body of `POST /api/name-analysis`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NameAnalysisRequest {
    pub name: String,
    /// Opaque field required by the service. Always sent as `{}`.
    pub nikud_dict: BTreeMap<String, String>,
}

impl NameAnalysisRequest {
    /// The name is forwarded exactly as given, empty or not.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nikud_dict: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    success: bool,
    download_url: Option<String>,
    message: Option<String>,
    file_id: Option<String>,
    filename: Option<String>,
}

/// Response of the name-analysis endpoint, validated on parse.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(try_from = "RawEnvelope")]
pub enum AnalysisEnvelope {
    Success {
        download_url: String,
        filename: Option<String>,
        file_id: Option<String>,
        message: Option<String>,
    },
    Failure {
        message: String,
    },
}

impl TryFrom<RawEnvelope> for AnalysisEnvelope {
    type Error = String;

    fn try_from(raw: RawEnvelope) -> Result<Self, Self::Error> {
        if raw.success {
            let download_url = raw
                .download_url
                .ok_or("successful envelope without download_url")?;
            Ok(AnalysisEnvelope::Success {
                download_url,
                filename: raw.filename,
                file_id: raw.file_id,
                message: raw.message,
            })
        } else {
            let message = raw.message.ok_or("failed envelope without message")?;
            Ok(AnalysisEnvelope::Failure { message })
        }
    }
}

/// Root document served at `GET /`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {status}")]
    Http { status: u16 },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("malformed response: {0}")]
    MalformedEnvelope(String),
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}
