use super::Entry;
use crate::CardId;
use crate::save::Store;
use tokio::sync::RwLock;

/// Outcome of keeping the latest draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adoption {
    /// The candidate is now the durable leader.
    Leader(Entry),
    /// Nothing has been drawn since the last adoption.
    Vacant,
}

/// A player's card slots.
///
/// Index 0 is always the leader. Index 1, when present, is the candidate from
/// the most recent draw. The box never grows past two entries; all mutation
/// serializes through the box's own lock.
#[derive(Debug)]
pub struct CardBox {
    slots: RwLock<Vec<Entry>>,
}

impl CardBox {
    pub fn new(leader: Entry) -> Self {
        Self {
            slots: RwLock::new(vec![leader]),
        }
    }

    /// Replaces any pending candidate with a fresh draw. The leader is
    /// untouched.
    pub async fn draw(&self, card: CardId) {
        let mut slots = self.slots.write().await;
        slots.truncate(1);
        slots.push(Entry::drawn(card));
    }

    /// Promotes the candidate to leader.
    ///
    /// The new leader is written to the store before anything in memory
    /// changes; if that write fails the box is left exactly as it was and the
    /// error is returned. The store drops the replaced leader's row in the
    /// same write.
    pub async fn adopt(&self, owner: &str, store: &dyn Store) -> anyhow::Result<Adoption> {
        let mut slots = self.slots.write().await;
        let Some(candidate) = slots.get(1).copied() else {
            return Ok(Adoption::Vacant);
        };
        let key = store
            .promote(owner, candidate.card())
            .await
            .inspect_err(|e| log::error!("failed to persist leader for {}: {:#}", owner, e))?;
        let leader = Entry::stored(candidate.card(), key);
        slots[0] = leader;
        slots.truncate(1);
        Ok(Adoption::Leader(leader))
    }

    /// Copy of the current slots, leader first.
    pub async fn snapshot(&self) -> Vec<Entry> {
        self.slots.read().await.clone()
    }

    pub async fn leader(&self) -> Entry {
        self.slots.read().await[0]
    }
}
