mod mailbox;
mod message;

pub use mailbox::*;
pub use message::*;
