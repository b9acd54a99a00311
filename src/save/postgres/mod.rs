mod connect;
mod schema;
mod store;

pub use connect::*;
pub use schema::*;
