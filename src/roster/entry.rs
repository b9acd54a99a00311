use crate::CardId;
use crate::Key;

/// One slot of a player's box: a catalog card plus its durable key, if the
/// card has been persisted.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct Entry {
    card: CardId,
    key: Option<Key>,
}

impl Entry {
    /// A persisted card.
    pub fn stored(card: CardId, key: Key) -> Self {
        Self {
            card,
            key: Some(key),
        }
    }
    /// A fresh draw with no durable record yet.
    pub fn drawn(card: CardId) -> Self {
        Self { card, key: None }
    }
    pub fn card(&self) -> CardId {
        self.card
    }
    pub fn key(&self) -> Option<Key> {
        self.key
    }
}
