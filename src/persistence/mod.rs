//! Best-score persistence
//!
//! The simulation reads the stored best once at startup and writes it back on
//! every game over. Storage failures never reach gameplay: a missing or
//! unreadable value is treated as a best of 0.

pub mod store;

pub use store::{BestScoreStore, FileStore, MemoryStore, StoreError};

#[cfg(target_arch = "wasm32")]
pub use store::LocalStorageStore;
