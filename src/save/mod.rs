//! Durable leader records.
//!
//! The engine only ever needs the current leader of each player to survive a
//! restart: one card row per leader ever adopted, and one player row pointing
//! at the live one.
mod memory;
mod store;

#[cfg(feature = "database")]
pub mod postgres;

pub use memory::*;
pub use store::*;
