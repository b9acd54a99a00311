use super::Entry;
use super::Player;
use crate::CardId;
use crate::save::Store;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

/// Outcome of a registration attempt.
#[derive(Debug, Clone)]
pub enum Enlistment {
    Created(Arc<Player>),
    Exists,
}

/// Insert-only mapping from player name to player.
///
/// The registry lock guards membership only. Callers receive an `Arc` handle
/// and lock the player's box on their own, so registry and box locks are never
/// held together. Entries are never removed, so a handle stays valid for the
/// life of the process.
///
/// Registrations serialize on their own lock, so the membership lock is never
/// held across a store write.
#[derive(Debug, Default)]
pub struct Registry {
    players: RwLock<HashMap<String, Arc<Player>>>,
    enlisting: Mutex<()>,
}

impl Registry {
    /// Rebuilds the registry from every durable leader in the store.
    pub async fn hydrate(store: &dyn Store) -> anyhow::Result<Self> {
        let players = store
            .roster()
            .await?
            .into_iter()
            .map(|(name, leader)| (name.clone(), Arc::new(Player::new(&name, leader))))
            .collect::<HashMap<_, _>>();
        log::info!("hydrated {} players", players.len());
        Ok(Self {
            players: RwLock::new(players),
            enlisting: Mutex::new(()),
        })
    }

    /// Check, persist, insert; one registration at a time.
    ///
    /// The starter card is persisted before the player becomes visible; a
    /// store failure leaves the registry unchanged. Lookups only contend for
    /// the brief insert.
    pub async fn register(
        &self,
        name: &str,
        starter: CardId,
        store: &dyn Store,
    ) -> anyhow::Result<Enlistment> {
        let _enlisting = self.enlisting.lock().await;
        if self.players.read().await.contains_key(name) {
            return Ok(Enlistment::Exists);
        }
        let key = store.enlist(name, starter).await?;
        let player = Arc::new(Player::new(name, Entry::stored(starter, key)));
        self.players
            .write()
            .await
            .insert(name.to_string(), player.clone());
        log::info!("registered {}", name);
        Ok(Enlistment::Created(player))
    }

    pub async fn lookup(&self, name: &str) -> Option<Arc<Player>> {
        self.players.read().await.get(name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.players.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.players.read().await.is_empty()
    }
}
