mod card;
mod catalog;
#[cfg(feature = "server")]
mod source;

pub use card::*;
pub use catalog::*;
