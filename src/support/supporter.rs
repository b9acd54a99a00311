use crate::Ttl;
use crate::roster::Entry;
use crate::roster::Player;
use std::sync::Arc;

/// A player occupying the supporter slot, decaying by one per poll.
#[derive(Debug, Clone)]
pub struct Supporter {
    player: Arc<Player>,
    ttl: Ttl,
}

impl Supporter {
    pub fn new(player: Arc<Player>, ttl: Ttl) -> Self {
        Self { player, ttl }
    }
    pub fn player(&self) -> &Arc<Player> {
        &self.player
    }
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }
    pub fn tick(&mut self) {
        self.ttl -= 1;
    }
    pub fn expired(&self) -> bool {
        self.ttl <= 0
    }
}

/// Presentation of an active supporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupporterView {
    pub name: String,
    pub leader: Entry,
}
