mod roll;
mod tier;

pub use roll::*;
pub use tier::*;
