use super::Supporter;
use super::SupporterView;
use crate::Ttl;
use crate::roster::Player;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Outcome of asking to support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enrollment {
    Accepted,
    AlreadySupporting,
    Full,
}

/// Capacity-limited registry of supporters.
///
/// A single exclusive lock guards occupancy and every ttl. Polling mutates
/// (decay and eviction), so it never runs under a shared lock.
#[derive(Debug)]
pub struct Slot {
    capacity: usize,
    ttl: Ttl,
    occupants: Mutex<HashMap<String, Supporter>>,
}

impl Default for Slot {
    fn default() -> Self {
        Self::new(crate::SUPPORT_CAPACITY, crate::SUPPORT_TTL)
    }
}

impl Slot {
    pub fn new(capacity: usize, ttl: Ttl) -> Self {
        Self {
            capacity,
            ttl,
            occupants: Mutex::new(HashMap::new()),
        }
    }

    /// Admits `player` with a fresh ttl if it is not already supporting and
    /// there is room. Check and insert happen under one lock.
    pub async fn begin(&self, player: Arc<Player>) -> Enrollment {
        let mut occupants = self.occupants.lock().await;
        if occupants.contains_key(player.name()) {
            return Enrollment::AlreadySupporting;
        }
        if occupants.len() >= self.capacity {
            return Enrollment::Full;
        }
        log::info!("{} started supporting", player.name());
        occupants.insert(player.name().to_string(), Supporter::new(player, self.ttl));
        Enrollment::Accepted
    }

    /// Removes `name` before its ttl runs out. False if it was not supporting.
    pub async fn withdraw(&self, name: &str) -> bool {
        self.occupants
            .lock()
            .await
            .remove(name)
            .inspect(|_| log::info!("{} stopped supporting", name))
            .is_some()
    }

    /// Decays every occupant by one tick, evicts the expired, and returns the
    /// survivors with their current leaders.
    ///
    /// Decay and eviction are one critical section; leaders are read after the
    /// slot lock is released so polling never waits on a player's box while
    /// holding it.
    pub async fn poll(&self) -> BTreeMap<String, SupporterView> {
        let survivors = {
            let mut occupants = self.occupants.lock().await;
            occupants.values_mut().for_each(Supporter::tick);
            occupants.retain(|name, supporter| match supporter.expired() {
                true => {
                    log::info!("{} stopped supporting (expired)", name);
                    false
                }
                false => true,
            });
            occupants
                .values()
                .map(|supporter| supporter.player().clone())
                .collect::<Vec<Arc<Player>>>()
        };
        let mut views = BTreeMap::new();
        for player in survivors {
            let view = SupporterView {
                name: player.name().to_string(),
                leader: player.cards().leader().await,
            };
            views.insert(view.name.clone(), view);
        }
        views
    }

    pub async fn len(&self) -> usize {
        self.occupants.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.occupants.lock().await.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
