use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SummaryRequest {
    pub transcript: Option<String>,
    /// Free-form instructions from the UI. The hosted model only accepts raw
    /// inputs, so this is logged but not forwarded.
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EmailRequest {
    pub text: Option<String>,
    pub to: Option<String>,
}

/// Uniform response body: a success flag plus either the payload or a message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        ApiResponse {
            success: true,
            summary: None,
            error: None,
        }
    }

    pub fn summary(summary: impl Into<String>) -> Self {
        ApiResponse {
            summary: Some(summary.into()),
            ..Self::ok()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            summary: None,
            error: Some(message.into()),
        }
    }
}
