//! Request-level service and HTTP surface.
//!
//! - [`Machine`]: Composes catalog, registry, supporter slot and mailbox
//! - [`Reply`]: Definite, user-visible outcome of a request
//! - [`Server`]: actix-web routes over a shared [`Machine`]
//! - [`Config`]: Command line and environment configuration
mod config;
mod machine;
mod reply;
mod server;

pub use config::*;
pub use machine::*;
pub use reply::*;
pub use server::*;
