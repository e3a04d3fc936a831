use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned status {status}")]
    UpstreamStatus {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Empty response from n8n workflow")]
    EmptyWebhookResponse,

    #[error("Malformed response from {service}: {message}")]
    MalformedResponse {
        service: &'static str,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AgentError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AgentError::Validation(_))
    }
}
