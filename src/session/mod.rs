// ABOUTME: Session module — persistence of calculation history, totals, and log.
// ABOUTME: A single JSON record per storage key, read-modify-written on every operation.

pub mod kv;
pub mod log;
pub mod state;
pub mod store;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use state::{CalculationRecord, NewCalculation, SessionState, Statistics, Totals};
pub use store::{DEFAULT_STORAGE_KEY, SessionStore, statistics_for};
