use super::Store;
use crate::CardId;
use crate::Key;
use crate::roster::Entry;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use tokio::sync::Mutex;

/// In-process store for ephemeral runs and tests.
///
/// Mirrors the two durable tables, and can be switched into a failing mode to
/// stand in for an unreachable database.
#[derive(Debug, Default)]
pub struct Memory {
    tables: Mutex<Tables>,
    failing: AtomicBool,
}

#[derive(Debug, Default)]
struct Tables {
    next: Key,
    cards: HashMap<Key, CardId>,
    players: BTreeMap<String, Key>,
}

impl Tables {
    fn insert(&mut self, card: CardId) -> Key {
        self.next += 1;
        self.cards.insert(self.next, card);
        self.next
    }
}

impl Memory {
    /// Makes every subsequent call fail until switched back.
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
    /// Number of live card rows.
    pub async fn cards(&self) -> usize {
        self.tables.lock().await.cards.len()
    }
    pub async fn holds(&self, key: Key) -> bool {
        self.tables.lock().await.cards.contains_key(&key)
    }
    pub async fn leader(&self, name: &str) -> Option<Entry> {
        let tables = self.tables.lock().await;
        tables
            .players
            .get(name)
            .and_then(|key| tables.cards.get(key).map(|card| Entry::stored(*card, *key)))
    }
    fn check(&self) -> anyhow::Result<()> {
        match self.failing.load(Ordering::SeqCst) {
            true => Err(anyhow::anyhow!("store unavailable")),
            false => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl Store for Memory {
    async fn enlist(&self, name: &str, card: CardId) -> anyhow::Result<Key> {
        self.check()?;
        let mut tables = self.tables.lock().await;
        anyhow::ensure!(
            !tables.players.contains_key(name),
            "player {} already persisted",
            name
        );
        let key = tables.insert(card);
        tables.players.insert(name.to_string(), key);
        Ok(key)
    }
    async fn promote(&self, name: &str, card: CardId) -> anyhow::Result<Key> {
        self.check()?;
        let mut tables = self.tables.lock().await;
        anyhow::ensure!(
            tables.players.contains_key(name),
            "player {} not persisted",
            name
        );
        let key = tables.insert(card);
        if let Some(old) = tables.players.insert(name.to_string(), key) {
            tables.cards.remove(&old);
        }
        Ok(key)
    }
    async fn roster(&self) -> anyhow::Result<Vec<(String, Entry)>> {
        self.check()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .players
            .iter()
            .filter_map(|(name, key)| {
                tables
                    .cards
                    .get(key)
                    .map(|card| (name.clone(), Entry::stored(*card, *key)))
            })
            .collect())
    }
    async fn ping(&self) -> anyhow::Result<()> {
        self.check()
    }
}
