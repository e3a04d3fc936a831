use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Server Args ---
    /// Interface address for the HTTP server to bind.
    #[arg(long, env = "SERVER_ADDR", default_value = "0.0.0.0")]
    pub server_addr: String,

    /// Port for the HTTP server.
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    // --- Upstream Args ---
    /// Base URL of the local Ollama daemon.
    #[arg(long, env = "OLLAMA_URL", default_value = "http://localhost:11434")]
    pub ollama_url: String,

    /// n8n workflow webhook. When set, chat replies come from the workflow instead of Ollama.
    #[arg(long, env = "N8N_WEBHOOK_URL")]
    pub n8n_webhook_url: Option<String>,

    /// Model used when a request does not name one.
    #[arg(long, env = "DEFAULT_MODEL", default_value = "llama2")]
    pub default_model: String,

    // --- Timeout Args ---
    /// Timeout in seconds for chat generation against Ollama.
    #[arg(long, env = "CHAT_TIMEOUT_SECS", default_value = "5")]
    pub chat_timeout_secs: u64,

    /// Timeout in seconds for the n8n workflow call.
    #[arg(long, env = "WEBHOOK_TIMEOUT_SECS", default_value = "300")]
    pub webhook_timeout_secs: u64,

    /// Timeout in seconds for listing Ollama models.
    #[arg(long, env = "MODELS_TIMEOUT_SECS", default_value = "3")]
    pub models_timeout_secs: u64,

    /// Timeout in seconds for task execution. 0 means no timeout.
    #[arg(long, env = "TASK_TIMEOUT_SECS", default_value = "0")]
    pub task_timeout_secs: u64,

    // --- TLS Args ---
    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}
