//! Gacha Server Binary
//!
//! Loads the catalog, rebuilds players from the store, and serves the
//! game over HTTP.

use clap::Parser;
use gachabox::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log()?;
    kys();
    hosting::Server::run(hosting::Config::parse()).await
}
