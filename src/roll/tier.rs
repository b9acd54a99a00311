use crate::catalog::Card;

/// Presentation label for a draw. Carries no state.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Tier {
    Diamond,
    Gold,
    Silver,
    Bronze,
}

impl Tier {
    /// (strength, rarity) floors, most restrictive first.
    const FLOORS: [(Tier, u32, u32); 3] = [
        (Tier::Diamond, 15000, 9),
        (Tier::Gold, 5000, 7),
        (Tier::Silver, 3000, 5),
    ];
}

/// Highest tier whose strength or rarity floor is met wins.
impl From<&Card> for Tier {
    fn from(card: &Card) -> Self {
        Self::FLOORS
            .iter()
            .find(|(_, strength, rarity)| card.strength() >= *strength || card.rarity() >= *rarity)
            .map(|(tier, _, _)| *tier)
            .unwrap_or(Tier::Bronze)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Tier::Diamond => write!(f, "DIAMOND EGG!!!"),
            Tier::Gold => write!(f, "GOLD EGG!!"),
            Tier::Silver => write!(f, "SILVER EGG!"),
            Tier::Bronze => write!(f, "BRONZE EGG"),
        }
    }
}
