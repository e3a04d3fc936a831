use crate::config::GatewayConfig;
use crate::error::AgentError;
use crate::history::{ format_history_for_prompt, HistoryStore, HISTORY_FOR_PROMPT_LEN };
use crate::llm::GenerationOptions;
use crate::llm::ollama::OllamaClient;
use crate::llm::webhook::WebhookClient;
use crate::models::chat::{ now_iso, resolve_model, ChatResponse, TaskResponse, Turn };

use serde_json::{ json, Value as JsonValue };
use log::{ info, warn, error };
use std::sync::Arc;
use std::time::Duration;

pub const DEMO_MODE_REPLY: &str =
    "I'm currently running in demo mode without an AI backend. To enable full AI responses, please configure either Ollama or n8n integration. You can find setup instructions in the project README.";

pub const DEMO_MODEL_NAME: &str = "demo-mode";

/// Upstream chosen to answer a chat turn.
#[derive(Debug, Clone)]
pub enum ResponseStrategy {
    /// Configured workflow webhook. Failures reach the caller.
    Webhook(WebhookClient),
    /// Local daemon generation, best effort.
    LocalModel,
}

/// Where a chat reply actually came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Webhook,
    LocalModel,
    Fallback,
}

#[derive(Clone)]
pub struct AIAgent {
    ollama: OllamaClient,
    strategy: ResponseStrategy,
    history_store: Arc<dyn HistoryStore>,
    default_model: String,
    chat_timeout: Duration,
    models_timeout: Duration,
    task_timeout: Option<Duration>,
}

impl AIAgent {
    pub fn new(
        config: &GatewayConfig,
        history_store: Arc<dyn HistoryStore>
    ) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AgentError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let ollama = OllamaClient::new(http.clone(), config.ollama_url.clone());
        let strategy = match &config.webhook_url {
            Some(url) => {
                info!("Using n8n workflow: {}", url);
                ResponseStrategy::Webhook(WebhookClient::new(http, url.clone(), config.webhook_timeout))
            }
            None => {
                info!("n8n workflow not configured (set N8N_WEBHOOK_URL to enable).");
                ResponseStrategy::LocalModel
            }
        };

        Ok(Self {
            ollama,
            strategy,
            history_store,
            default_model: config.default_model.clone(),
            chat_timeout: config.chat_timeout,
            models_timeout: config.models_timeout,
            task_timeout: config.task_timeout,
        })
    }

    pub fn strategy(&self) -> &ResponseStrategy {
        &self.strategy
    }

    pub async fn history(&self) -> Vec<Turn> {
        self.history_store.snapshot().await
    }

    pub async fn clear_history(&self) {
        self.history_store.clear().await;
        info!("Conversation history cleared");
    }

    /// Runs one chat turn. The user turn is recorded before the upstream call,
    /// the assistant turn only once a reply exists.
    pub async fn chat(
        &self,
        message: Option<&str>,
        model: Option<&str>
    ) -> Result<ChatResponse, AgentError> {
        let message = match message {
            Some(m) if !m.is_empty() => m,
            _ => {
                return Err(AgentError::Validation("Message is required".to_string()));
            }
        };
        let model = resolve_model(model, &self.default_model);

        self.history_store.append(Turn::user(message)).await;

        let (reply, source) = self.resolve_reply(message, &model).await?;
        info!("Chat reply resolved via {:?} (model={})", source, model);

        self.history_store.append(Turn::assistant(reply.clone())).await;

        Ok(ChatResponse {
            response: reply,
            model,
            timestamp: now_iso(),
        })
    }

    async fn resolve_reply(
        &self,
        message: &str,
        model: &str
    ) -> Result<(String, ReplySource), AgentError> {
        match &self.strategy {
            ResponseStrategy::Webhook(webhook) => {
                let reply = webhook.send(message, model).await?;
                Ok((reply, ReplySource::Webhook))
            }
            ResponseStrategy::LocalModel => {
                match self.generate_chat_reply(model).await {
                    Ok(reply) => Ok((reply, ReplySource::LocalModel)),
                    Err(e) => {
                        warn!("Ollama unavailable, replying in demo mode: {}", e);
                        Ok((DEMO_MODE_REPLY.to_string(), ReplySource::Fallback))
                    }
                }
            }
        }
    }

    async fn generate_chat_reply(&self, model: &str) -> Result<String, AgentError> {
        let context = self.history_store.recent(HISTORY_FOR_PROMPT_LEN).await;
        let prompt = format_history_for_prompt(&context);
        self.ollama.generate(model, &prompt, GenerationOptions::CHAT, Some(self.chat_timeout)).await
    }

    /// One-shot task against the local daemon. Bypasses history and never falls back.
    pub async fn execute_task(
        &self,
        task: Option<&str>,
        context: Option<&str>,
        model: Option<&str>
    ) -> Result<TaskResponse, AgentError> {
        let task = match task {
            Some(t) if !t.is_empty() => t,
            _ => {
                return Err(AgentError::Validation("Task is required".to_string()));
            }
        };
        let model = resolve_model(model, &self.default_model);
        let prompt = build_task_prompt(task, context);

        let result = self.ollama
            .generate(&model, &prompt, GenerationOptions::TASK, self.task_timeout).await?;

        Ok(TaskResponse {
            result,
            task: task.to_string(),
            model,
            timestamp: now_iso(),
        })
    }

    /// Models known to the daemon, or a single demo placeholder when it cannot be reached.
    pub async fn list_models(&self) -> Vec<JsonValue> {
        match self.ollama.list_models(self.models_timeout).await {
            Ok(models) => models,
            Err(e) => {
                error!("Error fetching models: {}", e);
                vec![demo_model_entry()]
            }
        }
    }
}

pub fn build_task_prompt(task: &str, context: Option<&str>) -> String {
    let context_line = match context {
        Some(c) if !c.is_empty() => format!("Context: {}\n", c),
        _ => String::new(),
    };
    format!("Task: {}\n{}Please provide a detailed response:", task, context_line)
}

fn demo_model_entry() -> JsonValue {
    json!({
        "name": DEMO_MODEL_NAME,
        "size": 0,
        "modified_at": now_iso(),
    })
}
