use super::Config;
use super::Reply;
use crate::CardId;
use crate::STARTER_CARD;
use crate::catalog::Catalog;
use crate::dto::ApiShout;
use crate::dto::ApiSupporter;
use crate::roll::Roll;
use crate::roster::Adoption;
use crate::roster::Enlistment;
use crate::roster::Registry;
use crate::save::Memory;
use crate::save::Store;
use crate::shout::Delivery;
use crate::shout::Mailbox;
use crate::shout::Shout;
use crate::support::Enrollment;
use crate::support::Slot;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The gacha machine: every shared structure a request can touch.
///
/// Requests resolve the player through the registry, then work on that
/// player's box under the box's own lock. The supporter slot and the mailbox
/// are independent of both.
pub struct Machine {
    roll: Roll,
    rng: Mutex<SmallRng>,
    registry: Registry,
    slot: Slot,
    mailbox: Mailbox,
    store: Arc<dyn Store>,
    starter: CardId,
}

impl Machine {
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn Store>) -> Self {
        Self {
            roll: Roll::new(catalog),
            rng: Mutex::new(SmallRng::from_os_rng()),
            registry: Registry::default(),
            slot: Slot::default(),
            mailbox: Mailbox::default(),
            store,
            starter: STARTER_CARD,
        }
    }
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }
    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slot = slot;
        self
    }
    pub fn with_mailbox(mut self, mailbox: Mailbox) -> Self {
        self.mailbox = mailbox;
        self
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(SmallRng::seed_from_u64(seed));
        self
    }
    pub fn with_starter(mut self, starter: CardId) -> Self {
        self.starter = starter;
        self
    }

    /// Loads the catalog, connects the store and rebuilds the registry.
    /// Any failure here is fatal.
    pub async fn boot(config: &Config) -> anyhow::Result<Self> {
        anyhow::ensure!(
            (1..=Mailbox::MAX_CAPACITY).contains(&config.mailbox),
            "mailbox capacity must be between 1 and {}",
            Mailbox::MAX_CAPACITY
        );
        anyhow::ensure!(config.capacity >= 1, "supporter capacity must be at least 1");
        anyhow::ensure!(config.ttl >= 1, "supporter ttl must be at least 1");
        let catalog = Arc::new(Catalog::load(&config.catalog).await?);
        let store: Arc<dyn Store> = match (&config.database, config.ephemeral) {
            (Some(url), false) => crate::save::postgres::db(url).await? as Arc<dyn Store>,
            _ => {
                log::warn!("running without a database, state is lost on exit");
                Arc::new(Memory::default())
            }
        };
        let registry = Registry::hydrate(store.as_ref()).await?;
        let machine = Self::new(catalog, store)
            .with_registry(registry)
            .with_slot(Slot::new(config.capacity, config.ttl))
            .with_mailbox(Mailbox::new(config.mailbox, crate::SHOUT_LIMIT))
            .with_starter(config.starter);
        Ok(match config.seed {
            Some(seed) => machine.with_seed(seed),
            None => machine,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        self.roll.catalog()
    }

    pub async fn register(&self, name: &str) -> anyhow::Result<Reply> {
        match self
            .registry
            .register(name, self.starter, self.store.as_ref())
            .await?
        {
            Enlistment::Created(_) => Ok(Reply::Registered(name.to_string())),
            Enlistment::Exists => Ok(Reply::AlreadyRegistered(name.to_string())),
        }
    }

    pub async fn draw(&self, name: &str) -> anyhow::Result<Reply> {
        let Some(player) = self.registry.lookup(name).await else {
            return Ok(Reply::Unregistered(name.to_string()));
        };
        let card = {
            let mut rng = self.rng.lock().await;
            self.roll
                .draw(&mut *rng)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("catalog has nothing to draw"))?
        };
        player.cards().draw(card.id()).await;
        log::debug!("{} drew {}", name, card);
        Ok(Reply::Drew {
            name: name.to_string(),
            tier: Roll::tier(&card),
            card: card.name().to_string(),
        })
    }

    pub async fn adopt(&self, name: &str) -> anyhow::Result<Reply> {
        let Some(player) = self.registry.lookup(name).await else {
            return Ok(Reply::Unregistered(name.to_string()));
        };
        match player.cards().adopt(name, self.store.as_ref()).await? {
            Adoption::Vacant => Ok(Reply::NoCandidate(name.to_string())),
            Adoption::Leader(leader) => {
                let card = self.catalog().name(leader.card());
                log::info!("{} adopted {}", name, card);
                Ok(Reply::Adopted {
                    name: name.to_string(),
                    card,
                })
            }
        }
    }

    pub async fn status(&self, name: &str) -> Reply {
        let Some(player) = self.registry.lookup(name).await else {
            return Reply::Unregistered(name.to_string());
        };
        let cards = player
            .cards()
            .snapshot()
            .await
            .iter()
            .map(|entry| self.catalog().name(entry.card()))
            .collect();
        Reply::Status {
            name: name.to_string(),
            cards,
        }
    }

    pub async fn support(&self, name: &str) -> Reply {
        let Some(player) = self.registry.lookup(name).await else {
            return Reply::Unregistered(name.to_string());
        };
        let leader = player.cards().leader().await;
        match self.slot.begin(player).await {
            Enrollment::Accepted => Reply::Supporting {
                name: name.to_string(),
                card: self.catalog().name(leader.card()),
            },
            Enrollment::AlreadySupporting => Reply::AlreadySupporting(name.to_string()),
            Enrollment::Full => Reply::SupportFull,
        }
    }

    pub async fn withdraw(&self, name: &str) -> Reply {
        if self.registry.lookup(name).await.is_none() {
            return Reply::Unregistered(name.to_string());
        }
        match self.slot.withdraw(name).await {
            true => Reply::Withdrawn(name.to_string()),
            false => Reply::NotSupporting(name.to_string()),
        }
    }

    /// Advances every supporter by one tick and presents the survivors.
    pub async fn supporters(&self) -> BTreeMap<String, ApiSupporter> {
        self.slot
            .poll()
            .await
            .into_iter()
            .map(|(name, view)| (name, ApiSupporter::from((self.catalog(), view))))
            .collect()
    }

    /// Queues a shout without waiting; a full mailbox is reported, not awaited.
    pub async fn shout(&self, name: &str, message: &str) -> anyhow::Result<Reply> {
        let Some(player) = self.registry.lookup(name).await else {
            return Ok(Reply::Unregistered(name.to_string()));
        };
        let leader = player.cards().leader().await;
        match self.mailbox.offer(Shout::new(name, leader, message))? {
            Delivery::Queued => Ok(Reply::Queued(name.to_string())),
            Delivery::TooLong => Ok(Reply::TooLong(name.to_string())),
            Delivery::Full => Ok(Reply::MailboxFull(name.to_string())),
        }
    }

    /// Oldest pending shout, handed out once.
    pub async fn shouts(&self) -> Option<ApiShout> {
        self.mailbox
            .poll()
            .await
            .map(|shout| ApiShout::from((self.catalog(), shout)))
    }

    pub async fn health(&self) -> anyhow::Result<()> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Card;
    use crate::roll::Tier;
    use clap::Parser;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from(vec![
            Card::new(1, "Egg", 1, 100, false),
            Card::new(2, "Oni", 6, 4000, true),
            Card::new(3, "Dragon", 9, 20000, false),
        ]))
    }

    fn machine() -> (Machine, Arc<Memory>) {
        let store = Arc::new(Memory::default());
        let machine = Machine::new(catalog(), store.clone()).with_seed(1);
        (machine, store)
    }

    #[tokio::test]
    async fn unregistered_players_are_told_so() {
        let (machine, _) = machine();
        let ghost = Reply::Unregistered("ghost".to_string());
        assert_eq!(machine.draw("ghost").await.unwrap(), ghost);
        assert_eq!(machine.adopt("ghost").await.unwrap(), ghost);
        assert_eq!(machine.status("ghost").await, ghost);
        assert_eq!(machine.support("ghost").await, ghost);
        assert_eq!(machine.withdraw("ghost").await, ghost);
        assert_eq!(machine.shout("ghost", "hi").await.unwrap(), ghost);
    }

    #[tokio::test]
    async fn register_once() {
        let (machine, _) = machine();
        assert_eq!(
            machine.register("ann").await.unwrap(),
            Reply::Registered("ann".to_string())
        );
        assert_eq!(
            machine.register("ann").await.unwrap(),
            Reply::AlreadyRegistered("ann".to_string())
        );
        assert_eq!(
            machine.status("ann").await.to_string(),
            "ann's box: [Egg (leader)]"
        );
    }

    #[tokio::test]
    async fn draw_then_keep() {
        let (machine, store) = machine();
        machine.register("ann").await.unwrap();
        assert_eq!(
            machine.adopt("ann").await.unwrap(),
            Reply::NoCandidate("ann".to_string())
        );
        let Reply::Drew { card, tier, .. } = machine.draw("ann").await.unwrap() else {
            panic!("expected a draw");
        };
        assert!(card == "Egg" || card == "Dragon");
        assert_eq!(tier == Tier::Diamond, card == "Dragon");
        assert_eq!(
            machine.status("ann").await.to_string(),
            format!("ann's box: [Egg (leader), {} (overflow)]", card)
        );
        assert_eq!(
            machine.adopt("ann").await.unwrap(),
            Reply::Adopted {
                name: "ann".to_string(),
                card: card.clone(),
            }
        );
        assert_eq!(
            machine.status("ann").await.to_string(),
            format!("ann's box: [{} (leader)]", card)
        );
        assert_eq!(store.cards().await, 1);
    }

    #[tokio::test]
    async fn failed_keep_reports_error_and_keeps_candidate() {
        let (machine, store) = machine();
        machine.register("ann").await.unwrap();
        machine.draw("ann").await.unwrap();
        let before = machine.status("ann").await;
        store.fail(true);
        assert!(machine.adopt("ann").await.is_err());
        assert_eq!(machine.status("ann").await, before);
    }

    #[tokio::test]
    async fn support_lifecycle() {
        let (machine, _) = machine();
        machine.register("ann").await.unwrap();
        machine.register("bob").await.unwrap();
        assert_eq!(
            machine.support("ann").await,
            Reply::Supporting {
                name: "ann".to_string(),
                card: "Egg".to_string(),
            }
        );
        assert_eq!(
            machine.support("ann").await,
            Reply::AlreadySupporting("ann".to_string())
        );
        assert_eq!(machine.support("bob").await, Reply::SupportFull);
        let supporters = machine.supporters().await;
        assert_eq!(supporters["ann"].leader, "Egg");
        assert_eq!(machine.withdraw("ann").await, Reply::Withdrawn("ann".to_string()));
        assert_eq!(
            machine.withdraw("ann").await,
            Reply::NotSupporting("ann".to_string())
        );
        assert!(machine.supporters().await.is_empty());
    }

    #[tokio::test]
    async fn shouts_are_delivered_in_order_once() {
        let (machine, _) = machine();
        machine.register("ann").await.unwrap();
        for message in ["A", "B", "C"] {
            assert_eq!(
                machine.shout("ann", message).await.unwrap(),
                Reply::Queued("ann".to_string())
            );
        }
        for message in ["A", "B", "C"] {
            let shout = machine.shouts().await.unwrap();
            assert_eq!(shout.message, message);
            assert_eq!(shout.leader, "Egg");
        }
        assert!(machine.shouts().await.is_none());
        assert_eq!(
            machine.shout("ann", &"x".repeat(101)).await.unwrap(),
            Reply::TooLong("ann".to_string())
        );
        assert!(machine.shouts().await.is_none());
    }

    #[tokio::test]
    async fn full_mailbox_is_reported() {
        let (machine, _) = machine();
        let machine = machine.with_mailbox(Mailbox::new(1, 100));
        machine.register("ann").await.unwrap();
        machine.shout("ann", "A").await.unwrap();
        assert_eq!(
            machine.shout("ann", "B").await.unwrap(),
            Reply::MailboxFull("ann".to_string())
        );
    }

    async fn catalog_file(tag: &str, json: &str) -> String {
        let path = std::env::temp_dir().join(format!("boot-{}-{}.json", tag, std::process::id()));
        tokio::fs::write(&path, json).await.unwrap();
        path.to_str().unwrap().to_string()
    }

    fn config(args: &[&str]) -> Config {
        let base = ["gachabox", "--ephemeral"];
        Config::try_parse_from(base.iter().chain(args)).unwrap()
    }

    const CARDS: &str = r#"[
        {"id": 1, "name": "Egg", "rarity": 1, "monster_points": 100},
        {"id": 4, "name": "Imp", "rarity": 3, "monster_points": 900},
        {"id": 7, "name": "Oni", "rarity": 6, "monster_points": 4000, "jp_only": true}
    ]"#;

    #[tokio::test]
    async fn boot_applies_configuration() {
        let path = catalog_file("wired", CARDS).await;
        let machine = Machine::boot(&config(&[
            "--catalog", &path, "--capacity", "2", "--ttl", "3", "--starter", "4",
            "--mailbox", "1",
        ]))
        .await
        .unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
        assert_eq!(machine.catalog().len(), 3);
        assert_eq!(machine.catalog().eligible(), &[1, 4]);
        for name in ["ann", "bob", "cat"] {
            machine.register(name).await.unwrap();
        }
        assert_eq!(
            machine.status("ann").await.to_string(),
            "ann's box: [Imp (leader)]"
        );
        assert!(matches!(machine.support("ann").await, Reply::Supporting { .. }));
        assert!(matches!(machine.support("bob").await, Reply::Supporting { .. }));
        assert_eq!(machine.support("cat").await, Reply::SupportFull);
        assert_eq!(machine.supporters().await.len(), 2);
        assert_eq!(machine.supporters().await.len(), 2);
        assert!(machine.supporters().await.is_empty());
        machine.shout("ann", "A").await.unwrap();
        assert_eq!(
            machine.shout("ann", "B").await.unwrap(),
            Reply::MailboxFull("ann".to_string())
        );
        assert!(machine.health().await.is_ok());
    }

    #[tokio::test]
    async fn boot_seed_fixes_draws() {
        let path = catalog_file("seeded", CARDS).await;
        let config = config(&["--catalog", &path, "--seed", "7"]);
        let one = Machine::boot(&config).await.unwrap();
        let two = Machine::boot(&config).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
        one.register("ann").await.unwrap();
        two.register("ann").await.unwrap();
        for _ in 0..16 {
            assert_eq!(one.draw("ann").await.unwrap(), two.draw("ann").await.unwrap());
        }
    }

    #[tokio::test]
    async fn boot_refuses_undrawable_catalog() {
        let path = catalog_file("restricted", r#"[{"id": 7, "name": "Oni", "jp_only": true}]"#).await;
        let result = Machine::boot(&config(&["--catalog", &path])).await;
        tokio::fs::remove_file(&path).await.unwrap();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn boot_refuses_unusable_bounds() {
        let path = catalog_file("bounds", CARDS).await;
        let huge = usize::MAX.to_string();
        for args in [
            ["--mailbox", huge.as_str()],
            ["--mailbox", "0"],
            ["--capacity", "0"],
            ["--ttl", "0"],
        ] {
            let mut args = args.to_vec();
            args.extend(["--catalog", path.as_str()]);
            assert!(Machine::boot(&config(&args)).await.is_err(), "{:?}", args);
        }
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn health_follows_store() {
        let (machine, store) = machine();
        assert!(machine.health().await.is_ok());
        store.fail(true);
        assert!(machine.health().await.is_err());
    }
}
