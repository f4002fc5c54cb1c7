mod schema;

pub use schema::{AccessConfig, ChatConfig, Config, DataConfig};
