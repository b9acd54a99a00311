//! Concurrent game-state engine for a collectible-card gacha game.
//!
//! Players register, draw random cards from a fixed catalog, decide whether
//! to keep a draw as their new leader, shout short messages, and take turns
//! occupying a capacity-limited supporter slot.
//!
//! ## Modules
//!
//! - [`catalog`]: Immutable card catalog loaded once at startup
//! - [`roll`]: Random draws and presentation tiers
//! - [`roster`]: Player registry and per-player card boxes
//! - [`support`]: Capacity-limited supporter slot with ttl decay
//! - [`shout`]: Bounded FIFO mailbox of broadcast messages
//! - [`save`]: Durable leader records
//! - [`dto`]: Request and response bodies
//! - [`hosting`]: Request-level service and HTTP surface
pub mod catalog;
pub mod dto;
pub mod roll;
pub mod roster;
pub mod save;
pub mod shout;
pub mod support;

#[cfg(feature = "server")]
pub mod hosting;

/// Catalog identifier of a card.
pub type CardId = i64;
/// Durable storage key of a persisted card instance.
pub type Key = i64;
/// Remaining poll cycles before a supporter is evicted.
pub type Ttl = i32;

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Number of players that may support at the same time.
pub const SUPPORT_CAPACITY: usize = 1;
/// Poll cycles a new supporter survives.
pub const SUPPORT_TTL: Ttl = 12;
/// Shouts held before publishers are pushed back.
pub const MAILBOX_CAPACITY: usize = 100;
/// Longest accepted shout, in characters.
pub const SHOUT_LIMIT: usize = 100;
/// Catalog id every new player starts with as leader.
pub const STARTER_CARD: CardId = 1;
/// Default remote source of card descriptors.
pub const CATALOG_URL: &str = "https://www.padherder.com/api/monsters/";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Err(e) => log::error!("failed to listen for interrupt: {}", e),
            Ok(()) => {
                println!();
                log::warn!("violent interrupt received, exiting immediately");
                std::process::exit(0);
            }
        }
    });
}
