//! Persistent storage for the news cache
//!
//! The cached snapshot and its fetch timestamp live in a key-value store that
//! mirrors browser local storage: string keys, string values, overwrite wins.

mod store;

pub use store::{default_cache_dir, FileStore, KeyValueStore, MemoryStore, StoreError};
