//! Logger setup
//!
//! Everything logs through the `log` facade; `env_logger` is the backend.

use std::sync::Once;

use log::{debug, LevelFilter};

static INIT: Once = Once::new();

/// Initialize the global logger once. Later calls are ignored.
///
/// The filter comes from `RUST_LOG` when set, otherwise `info`.
pub fn init_logging() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(LevelFilter::Info);
        }

        builder.init();
        debug!("logging initialized");
    });
}
