//====================================================================

use std::{error::Error, fmt::Display};

use serde::Deserialize;

use super::transport::{HttpResponse, TransportError};

//====================================================================

#[derive(Debug)]
pub enum ApiError {
    Transport(TransportError),
    /// The backend answered with a non-2xx status.
    Status { code: u16, detail: String },
    Decode(serde_json::Error),
    /// The request body could not be turned into JSON.
    Encode(serde_json::Error),
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            ApiError::Status { .. } => None,
            ApiError::Decode(e) | ApiError::Encode(e) => Some(e),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "{}", e),
            ApiError::Status { code, detail } => {
                write!(f, "Backend returned status {}: {}", code, detail)
            }
            ApiError::Decode(e) => write!(f, "Unable to decode response body: {}", e),
            ApiError::Encode(e) => write!(f, "Unable to encode request body: {}", e),
        }
    }
}

impl From<TransportError> for ApiError {
    #[inline]
    fn from(value: TransportError) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for ApiError {
    #[inline]
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

//====================================================================

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ApiError {
    /// Builds a status error, pulling `detail` out of the body when the
    /// backend sent its usual `{"detail": ...}` shape.
    pub(crate) fn from_response(response: &HttpResponse) -> Self {
        let detail = match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(ErrorBody {
                detail: serde_json::Value::String(detail),
            }) => detail,
            Ok(ErrorBody { detail }) => detail.to_string(),
            Err(_) => response.body.trim().to_string(),
        };

        Self::Status {
            code: response.status,
            detail,
        }
    }
}

//====================================================================


//====================================================================
