pub mod config;
pub mod db;

pub use config::StoreConfig;
pub use db::{append_transactions, create_pool, DbPool, CHUNK_SIZE};
