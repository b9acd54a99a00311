use crate::CardId;
use serde::Deserialize;
use serde::Serialize;

/// Immutable descriptor of one catalog card.
///
/// Field names follow the remote catalog's JSON; anything the engine does not
/// consume is ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    name: String,
    #[serde(default)]
    rarity: u32,
    #[serde(default, rename = "monster_points")]
    strength: u32,
    #[serde(default, rename = "jp_only")]
    restricted: bool,
}

impl Card {
    pub fn new(id: CardId, name: &str, rarity: u32, strength: u32, restricted: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            rarity,
            strength,
            restricted,
        }
    }
    pub fn id(&self) -> CardId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn rarity(&self) -> u32 {
        self.rarity
    }
    pub fn strength(&self) -> u32 {
        self.strength
    }
    /// Region-restricted cards are never drawn.
    pub fn restricted(&self) -> bool {
        self.restricted
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
