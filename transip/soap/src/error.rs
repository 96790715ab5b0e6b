use thiserror::Error;

use crate::fault::SoapFault;

/**
    Errors from signing, dispatching or decoding a TransIP SOAP call.

    No variant is retried anywhere in this crate.
*/
#[derive(Debug, Clone, Error)]
pub enum SoapError {
    // ── Key material ──────────────────────────────────────────────────
    #[error("RSA key parse failed: {0}")]
    KeyParse(String),
    #[error("failed to read key file: {0}")]
    KeyFile(String),

    // ── Signing ───────────────────────────────────────────────────────
    #[error("request signing failed: {0}")]
    Signing(String),

    // ── Transport ─────────────────────────────────────────────────────
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("empty response")]
    EmptyResponse,
    #[error("invalid character in {0} cookie")]
    InvalidCookie(&'static str),

    // ── Remote ────────────────────────────────────────────────────────
    #[error("SOAP fault: {}", .0.message)]
    Fault(SoapFault),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    // ── XML ───────────────────────────────────────────────────────────
    #[error("invalid XML: {0}")]
    InvalidXml(String),
    #[error("failed to decode response payload: {0}")]
    Deserialize(String),
}

impl SoapError {
    /**
        Returns `true` if the remote end answered with a SOAP fault.
    */
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /**
        Returns the SOAP fault carried by this error, if any.
    */
    pub fn fault(&self) -> Option<&SoapFault> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SoapError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_builder() {
            Self::HttpClient(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<quick_xml::Error> for SoapError {
    fn from(err: quick_xml::Error) -> Self {
        Self::InvalidXml(err.to_string())
    }
}

impl From<quick_xml::DeError> for SoapError {
    fn from(err: quick_xml::DeError) -> Self {
        Self::Deserialize(err.to_string())
    }
}

/**
    Type alias for results that may return a [`SoapError`].
*/
pub type SoapResult<T> = std::result::Result<T, SoapError>;
