pub mod add;
pub mod insights;
pub mod list;
pub mod quote;
pub mod stats;
pub mod status;
pub mod version;

use somnia_journal::{FileStore, Paths};
use std::sync::Arc;

/// File store under the resolved data directory
pub fn open_store(paths: &Paths) -> Arc<FileStore> {
    Arc::new(FileStore::new(paths.store_dir()))
}
