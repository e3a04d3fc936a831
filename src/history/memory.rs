use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::history::HistoryStore;
use crate::models::chat::Turn;

/// In-process conversation log. Lost on restart.
#[derive(Default)]
pub struct MemoryHistoryStore {
    turns: RwLock<Vec<Turn>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, turn: Turn) {
        self.turns.write().await.push(turn);
    }

    async fn snapshot(&self) -> Vec<Turn> {
        self.turns.read().await.clone()
    }

    async fn recent(&self, limit: usize) -> Vec<Turn> {
        let turns = self.turns.read().await;
        let start = turns.len().saturating_sub(limit);
        turns[start..].to_vec()
    }

    async fn clear(&self) {
        self.turns.write().await.clear();
    }

    async fn len(&self) -> usize {
        self.turns.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::Role;

    #[tokio::test]
    async fn append_keeps_insertion_order() {
        let store = MemoryHistoryStore::new();
        store.append(Turn::user("one")).await;
        store.append(Turn::assistant("two")).await;

        let turns = store.snapshot().await;
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "one");
        assert_eq!(turns[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn clear_empties_the_log() {
        let store = MemoryHistoryStore::new();
        store.append(Turn::user("hello")).await;
        store.clear().await;
        assert!(store.snapshot().await.is_empty());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn recent_returns_tail() {
        let store = MemoryHistoryStore::new();
        for i in 0..15 {
            store.append(Turn::user(format!("m{}", i))).await;
        }
        let tail = store.recent(10).await;
        assert_eq!(tail.len(), 10);
        assert_eq!(tail[0].content, "m5");
        assert_eq!(tail[9].content, "m14");

        assert_eq!(store.recent(100).await.len(), 15);
    }
}
