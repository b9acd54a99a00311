use super::CardBox;
use super::Entry;

/// A registered player. The name never changes; only the box contents do.
#[derive(Debug)]
pub struct Player {
    name: String,
    cards: CardBox,
}

impl Player {
    pub fn new(name: &str, leader: Entry) -> Self {
        Self {
            name: name.to_string(),
            cards: CardBox::new(leader),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn cards(&self) -> &CardBox {
        &self.cards
    }
}
