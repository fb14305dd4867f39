use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request timeout - the service took too long to respond")]
    Timeout,

    #[error("Connection error - unable to reach {0}")]
    Connect(String),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response as JSON: {0}")]
    Decode(String),

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to create HTTP client: {0}")]
    Build(String),
}

impl ClientError {
    pub(crate) fn from_transport(err: reqwest::Error, target: &str) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Connect(target.to_string())
        } else {
            ClientError::Network(err)
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
