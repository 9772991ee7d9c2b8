//! JSON response envelope shared by every endpoint

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
}

/// `{status, message?, data?}` wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message.into()),
            data: None,
        }
    }
}
