mod cardbox;
mod entry;
mod player;
mod registry;

pub use cardbox::*;
pub use entry::*;
pub use player::*;
pub use registry::*;
