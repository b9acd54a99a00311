use crate::CATALOG_URL;
use crate::CardId;
use crate::MAILBOX_CAPACITY;
use crate::STARTER_CARD;
use crate::SUPPORT_CAPACITY;
use crate::SUPPORT_TTL;
use crate::Ttl;
use clap::Parser;

/// Server configuration. Every flag can also be set through its environment
/// variable; flags win.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: String,
    #[arg(long, env = "DB_URL", required_unless_present = "ephemeral")]
    pub database: Option<String>,
    /// Keep all state in memory; nothing survives a restart.
    #[arg(long, env = "EPHEMERAL")]
    pub ephemeral: bool,
    /// URL to fetch, or path to a local JSON file.
    #[arg(long, env = "CATALOG", default_value = CATALOG_URL)]
    pub catalog: String,
    #[arg(long, env = "SUPPORT_CAPACITY", default_value_t = SUPPORT_CAPACITY)]
    pub capacity: usize,
    #[arg(long, env = "SUPPORT_TTL", default_value_t = SUPPORT_TTL)]
    pub ttl: Ttl,
    #[arg(long, env = "MAILBOX_CAPACITY", default_value_t = MAILBOX_CAPACITY)]
    pub mailbox: usize,
    #[arg(long, env = "STARTER_CARD", default_value_t = STARTER_CARD)]
    pub starter: CardId,
    /// Fixed seed for draws; entropy when absent.
    #[arg(long, env = "ROLL_SEED")]
    pub seed: Option<u64>,
    #[arg(long, env = "WORKERS", default_value_t = num_cpus::get())]
    pub workers: usize,
}
