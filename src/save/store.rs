use crate::CardId;
use crate::Key;
use crate::roster::Entry;

/// Store defines the write interface between the card boxes and durable
/// storage. Every method either completes or returns an error having changed
/// nothing.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Persists a new player whose leader is `card`. Returns the card's key.
    async fn enlist(&self, name: &str, card: CardId) -> anyhow::Result<Key>;
    /// Persists `card` as the new leader of `name` and drops the row of the
    /// leader it replaces, as one write. Returns the new card's key.
    ///
    /// The replaced row is whatever the store currently points at, so a
    /// repeated call after an ambiguous failure still leaves exactly one card
    /// row per player.
    async fn promote(&self, name: &str, card: CardId) -> anyhow::Result<Key>;
    /// Every persisted player with its durable leader.
    async fn roster(&self) -> anyhow::Result<Vec<(String, Entry)>>;
    async fn ping(&self) -> anyhow::Result<()>;
}
