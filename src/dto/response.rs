use crate::CardId;
use crate::catalog::Catalog;
use crate::shout::Shout;
use crate::support::SupporterView;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSupporter {
    pub name: String,
    pub card: CardId,
    pub leader: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiShout {
    pub name: String,
    pub card: CardId,
    pub leader: String,
    pub message: String,
}

impl From<(&Catalog, SupporterView)> for ApiSupporter {
    fn from((catalog, view): (&Catalog, SupporterView)) -> Self {
        Self {
            card: view.leader.card(),
            leader: catalog.name(view.leader.card()),
            name: view.name,
        }
    }
}

impl From<(&Catalog, Shout)> for ApiShout {
    fn from((catalog, shout): (&Catalog, Shout)) -> Self {
        Self {
            name: shout.name().to_string(),
            card: shout.leader().card(),
            leader: catalog.name(shout.leader().card()),
            message: shout.message().to_string(),
        }
    }
}
