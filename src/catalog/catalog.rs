use super::Card;
use crate::CardId;
use std::collections::HashMap;

/// Process-wide mapping from catalog id to card, built once at startup.
///
/// Every decoded card stays addressable by id so that historical leaders can
/// still be named, but only unrestricted cards are eligible for draws.
#[derive(Debug, Default)]
pub struct Catalog {
    cards: HashMap<CardId, Card>,
    eligible: Vec<CardId>,
}

impl Catalog {
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }
    /// Ids a draw may land on, in ascending order.
    pub fn eligible(&self) -> &[CardId] {
        &self.eligible
    }
    /// Presentation name for an id, tolerating ids the catalog never saw.
    pub fn name(&self, id: CardId) -> String {
        self.get(id)
            .map(|card| card.name().to_string())
            .unwrap_or_else(|| format!("#{}", id))
    }
    pub fn len(&self) -> usize {
        self.cards.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl From<Vec<Card>> for Catalog {
    fn from(cards: Vec<Card>) -> Self {
        let cards = cards
            .into_iter()
            .map(|card| (card.id(), card))
            .collect::<HashMap<CardId, Card>>();
        let mut eligible = cards
            .values()
            .filter(|card| !card.restricted())
            .map(Card::id)
            .collect::<Vec<CardId>>();
        eligible.sort_unstable();
        Self { cards, eligible }
    }
}
