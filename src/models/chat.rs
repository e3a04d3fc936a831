use chrono::{ SecondsFormat, Utc };
use serde::{ Deserialize, Serialize };
use serde_json::Value as JsonValue;

pub const DEFAULT_MODEL: &str = "llama2";

/// Current UTC time as an ISO-8601 string with millisecond precision.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One message exchanged in the conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub timestamp: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: now_iso(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub model: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TaskRequest {
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    pub result: String,
    pub task: String,
    pub model: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub history: Vec<Turn>,
}

/// Models are passed through as the daemon reports them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<JsonValue>,
}

/// Picks the requested model as given, or the default when the field is absent or empty.
pub fn resolve_model(requested: Option<&str>, default_model: &str) -> String {
    match requested {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => default_model.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_serializes_lowercase_role() {
        let turn = Turn::user("hi");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hi");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn empty_model_falls_back_to_default() {
        assert_eq!(resolve_model(None, DEFAULT_MODEL), "llama2");
        assert_eq!(resolve_model(Some(""), DEFAULT_MODEL), "llama2");
        assert_eq!(resolve_model(Some(" mistral "), DEFAULT_MODEL), " mistral ");
        assert_eq!(resolve_model(Some("mistral"), DEFAULT_MODEL), "mistral");
    }
}
