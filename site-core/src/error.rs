use reqwest::StatusCode;
use thiserror::Error;

use crate::category::Category;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("required parameters are missing")]
    MissingParameters,
    #[error("NOTION_API_KEY is not configured")]
    MissingCredential,
    #[error("invalid page id: {0}")]
    InvalidPageId(String),
    #[error("invalid Notion API base url: {0}")]
    InvalidBaseUrl(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("no collection configured for category {0}")]
    MissingCollection(Category),
    /// Content retrieval failed upstream; carries a human-readable cause.
    #[error("{0}")]
    Retrieval(String),
    #[error("notion api error (status {status})")]
    Upstream { status: StatusCode, message: String },
    #[error("notion response is not JSON")]
    MalformedBody { details: String },
    #[error("internal server error")]
    Network(#[from] reqwest::Error),
}

impl ProxyError {
    /// HTTP status reported to the caller of the proxy endpoints.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameters | Self::InvalidPageId(_) | Self::UnknownCategory(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Upstream { status, .. } => *status,
            Self::MissingCredential
            | Self::MissingCollection(_)
            | Self::InvalidBaseUrl(_)
            | Self::Retrieval(_)
            | Self::MalformedBody { .. }
            | Self::Network(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn details(&self) -> Option<String> {
        match self {
            Self::Upstream { message, .. } => Some(message.clone()),
            Self::MalformedBody { details } => Some(details.clone()),
            Self::Network(err) => Some(err.to_string()),
            _ => None,
        }
    }
}

pub type ProxyResult<T> = Result<T, ProxyError>;

/// Failures seen by the page-side controller when talking to the proxy.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API call failed: {0}")]
    Status(u16),
    #[error("{0}")]
    Api(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
