use std::time::Duration;
use crate::cli::Args;
use crate::models::chat::DEFAULT_MODEL;

/// Resolved runtime settings for the agent and its upstream clients.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub ollama_url: String,
    pub webhook_url: Option<String>,
    pub default_model: String,
    pub chat_timeout: Duration,
    pub webhook_timeout: Duration,
    pub models_timeout: Duration,
    pub task_timeout: Option<Duration>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            webhook_url: None,
            default_model: DEFAULT_MODEL.to_string(),
            chat_timeout: Duration::from_secs(5),
            webhook_timeout: Duration::from_secs(300),
            models_timeout: Duration::from_secs(3),
            task_timeout: None,
        }
    }
}

impl From<&Args> for GatewayConfig {
    fn from(args: &Args) -> Self {
        Self {
            ollama_url: args.ollama_url.clone(),
            webhook_url: args.n8n_webhook_url
                .clone()
                .filter(|u| !u.trim().is_empty()),
            default_model: args.default_model.clone(),
            chat_timeout: Duration::from_secs(args.chat_timeout_secs),
            webhook_timeout: Duration::from_secs(args.webhook_timeout_secs),
            models_timeout: Duration::from_secs(args.models_timeout_secs),
            task_timeout: Some(args.task_timeout_secs)
                .filter(|s| *s > 0)
                .map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn blank_webhook_counts_as_unset() {
        let args = Args::parse_from(["agent-gateway", "--n8n-webhook-url", "  "]);
        let config = GatewayConfig::from(&args);
        assert!(config.webhook_url.is_none());
        assert_eq!(config.task_timeout, None);
    }

    #[test]
    fn timeouts_come_from_args() {
        let args = Args::parse_from([
            "agent-gateway",
            "--n8n-webhook-url",
            "http://n8n.local/webhook/chat",
            "--task-timeout-secs",
            "30",
        ]);
        let config = GatewayConfig::from(&args);
        assert_eq!(config.webhook_url.as_deref(), Some("http://n8n.local/webhook/chat"));
        assert_eq!(config.chat_timeout, Duration::from_secs(5));
        assert_eq!(config.webhook_timeout, Duration::from_secs(300));
        assert_eq!(config.task_timeout, Some(Duration::from_secs(30)));
    }
}
