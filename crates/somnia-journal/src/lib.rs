//! Dream journal records and the key-value storage they live in

mod io;
mod journal;
mod paths;
mod store;
mod timestamp;
mod types;

pub use io::atomic_write;
pub use journal::{Journal, DREAMS_KEY};
pub use paths::Paths;
pub use store::{FileStore, JournalError, KeyValueStore, MemoryStore};
pub use timestamp::parse_timestamp;
pub use types::{DreamRecord, Emotion, Symbol, MAX_INTENSITY};
