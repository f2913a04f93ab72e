use serde::Deserialize;

/// Application-level error code signaling an expired or invalid session.
const UNAUTHORIZED_CODE: i64 = 401;

/// JSON envelope every RTI endpoint responds with. Success is
/// `errorCode == 0` regardless of the transport status; the payload arrives
/// under `data` for most endpoints and under `result` for login.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(rename = "errorCode")]
    pub error_code: i64,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Collapse the envelope into a discriminated result.
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.error_code != 0 {
            if self.error_code == UNAUTHORIZED_CODE {
                return Err(ApiError::Unauthorized);
            }
            return Err(ApiError::Api {
                code: self.error_code,
                message: self
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            });
        }

        self.data
            .or(self.result)
            .ok_or(ApiError::MissingPayload)
    }
}

/// Failures surfaced by the remote API or the transport beneath it.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("api error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("session expired or invalid")]
    Unauthorized,
    #[error("response envelope carried no payload")]
    MissingPayload,
    #[error("no active session; sign in first")]
    NotAuthenticated,
}

impl ApiError {
    /// True when the caller should force a fresh sign-in.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::NotAuthenticated)
    }
}
