mod slot;
mod supporter;

pub use slot::*;
pub use supporter::*;
