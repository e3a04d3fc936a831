mod memory;
use async_trait::async_trait;
use std::sync::Arc;
use crate::models::chat::Turn;

pub use memory::MemoryHistoryStore;

/// Number of trailing turns fed to the local model as context.
pub const HISTORY_FOR_PROMPT_LEN: usize = 10;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, turn: Turn);

    async fn snapshot(&self) -> Vec<Turn>;

    async fn recent(&self, limit: usize) -> Vec<Turn>;

    async fn clear(&self);

    async fn len(&self) -> usize;
}

pub fn initialize_history_store() -> Arc<dyn HistoryStore> {
    Arc::new(MemoryHistoryStore::new())
}

/// Renders turns as `role: content` lines followed by the assistant cue.
pub fn format_history_for_prompt(turns: &[Turn]) -> String {
    let context = turns
        .iter()
        .map(|t| format!("{}: {}", t.role.as_str(), t.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\nassistant:", context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_turns_then_cue() {
        let turns = vec![Turn::user("hi"), Turn::assistant("hello"), Turn::user("how are you")];
        assert_eq!(
            format_history_for_prompt(&turns),
            "user: hi\nassistant: hello\nuser: how are you\nassistant:"
        );
    }
}
