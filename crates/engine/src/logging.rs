//! Process-wide log subscriber
//!
//! Library code only emits `tracing` events under `arpm::*` targets; the
//! service installs a subscriber once at startup.

use tracing::Level;

/// Install a formatting subscriber at DEBUG (`debug == true`) or INFO level.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(debug: bool) -> bool {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
