use thiserror::Error;

/// Errors produced while turning a share link into a [`crate::Vmess`] record.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("vmess unrecognized: {0}")]
    UnrecognizedScheme(String),

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("unmarshal error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URI: {0}")]
    Uri(#[from] url::ParseError),

    #[error("address {input}: {reason}")]
    HostPortSplit { input: String, reason: &'static str },
}

impl ParseError {
    /// True for failures of the base64 or structured-payload decoding step.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            ParseError::Base64(_) | ParseError::Utf8(_) | ParseError::Json(_)
        )
    }
}

/// Errors produced while building engine configuration from a record.
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("port is not a valid number: {0:?}")]
    InvalidPort(String),

    #[error("alterId is not a valid number: {0:?}")]
    InvalidAlterId(String),

    #[error("failed to serialize outbound settings: {0}")]
    Serialize(#[from] serde_json::Error),
}
