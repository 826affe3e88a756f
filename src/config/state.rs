// Application state module
// Immutable state shared by every connection

use super::types::Config;
use crate::handler::StaticResponder;

/// Application state
pub struct AppState {
    pub config: Config,
    pub responder: StaticResponder,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let responder = StaticResponder::new(&config.site.root)
            .with_index_files(config.site.index_files.clone());

        Self {
            config: config.clone(),
            responder,
        }
    }
}
