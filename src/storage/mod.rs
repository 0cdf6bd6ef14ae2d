//! Flat-file persistence.
//!
//! - [`ApStore`]: the saved access point list (`SSID//PASSWORD` per line)
//! - [`TextFile`]: single-value files for the server URL, API key and
//!   system message
//! - [`DataFiles`]: all of the above resolved from [`StorageConfig`]

mod ap_store;
mod error;
mod text_file;

pub use ap_store::{
    join_for_display, parse_entries, serialize_entries, ApEntry, ApRecord, ApStore, UpsertOutcome,
    SEPARATOR,
};
pub use error::{StorageError, StorageResult};
pub use text_file::TextFile;

use crate::config::StorageConfig;

/// Every file the session reads or writes.
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub aps: ApStore,
    pub server_url: TextFile,
    pub api_key: TextFile,
    pub system_message: TextFile,
}

impl DataFiles {
    /// Resolve file names against the configured data directory.
    ///
    /// Absolute file names in the config are used as-is.
    pub fn from_config(config: &StorageConfig) -> Self {
        let dir = config.resolve_data_dir();
        Self {
            aps: ApStore::new(dir.join(&config.saved_aps_file)),
            server_url: TextFile::new(dir.join(&config.server_url_file)),
            api_key: TextFile::new(dir.join(&config.api_key_file)),
            system_message: TextFile::new(dir.join(&config.system_message_file)),
        }
    }
}
