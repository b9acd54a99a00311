use super::Tier;
use crate::catalog::Card;
use crate::catalog::Catalog;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::sync::Arc;

/// Draw policy over the eligible part of the catalog.
///
/// Pure with respect to the catalog: the randomness source is the only input
/// that varies, and it is supplied by the caller.
#[derive(Debug, Clone)]
pub struct Roll {
    catalog: Arc<Catalog>,
}

impl Roll {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
    /// Uniform draw among eligible ids. `None` only for a catalog with
    /// nothing drawable.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Card> {
        self.catalog
            .eligible()
            .choose(rng)
            .and_then(|id| self.catalog.get(*id))
    }
    pub fn tier(card: &Card) -> Tier {
        Tier::from(card)
    }
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
