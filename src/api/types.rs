use serde::Deserialize;
use crate::core::{Result, TransferError};

pub const SUCCESS_CODE: &str = "00000";

/// Envelope every disk API response is wrapped in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub error_code: String,
    #[serde(default)]
    pub message: String,
    pub tip: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.error_code == SUCCESS_CODE
    }

    /// Unwrap `data`, turning a failure code or a missing payload into an error.
    pub fn into_data(self) -> Result<T> {
        if !self.is_success() {
            let message = match self.tip {
                Some(tip) if !tip.is_empty() => tip,
                _ => self.message,
            };
            return Err(TransferError::api_error(self.error_code, message));
        }

        self.data.ok_or_else(|| TransferError::malformed("No data in response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let body = r#"{"errorCode":"00000","message":"success","data":"abc"}"#;
        let response: ApiResponse<String> = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_data().unwrap(), "abc");
    }

    #[test]
    fn test_failure_envelope_prefers_tip() {
        let body = r#"{"errorCode":"A1001","message":"ERROR_FILE_NOT_FOUND","tip":"File not found","data":null}"#;
        let response: ApiResponse<String> = serde_json::from_str(body).unwrap();
        let err = response.into_data().unwrap_err();

        assert!(matches!(&err, TransferError::ApiError { code, .. } if code == "A1001"));
        assert_eq!(err.detail(), "File not found");
    }

    #[test]
    fn test_missing_data_is_malformed() {
        let body = r#"{"errorCode":"00000","message":"success"}"#;
        let response: ApiResponse<String> = serde_json::from_str(body).unwrap();
        assert!(matches!(response.into_data(), Err(TransferError::MalformedResponse(_))));
    }
}
