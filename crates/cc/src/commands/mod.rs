//! CLI command implementations

pub mod commit;
pub mod models;
pub mod update;
pub mod version;

use cc_core::{Config, ConfigStore};

use crate::output;

/// Load the user configuration, falling back to defaults with a warning
pub fn load_config() -> Config {
    let loaded = ConfigStore::new().and_then(|store| store.load());
    match loaded {
        Ok(config) => config,
        Err(e) => {
            output::warning(&format!("Could not load config: {}", e));
            Config::default()
        }
    }
}
