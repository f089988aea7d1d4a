//! Console logging setup

use crate::config::Config;
use env_logger::{Builder, Target};

/// Install the global logger at the level the configuration asks for.
///
/// Logs go to stderr so the report on stdout stays clean. `RUST_LOG`, when
/// set, refines the configured level per module. Calling this twice is
/// harmless; the second call reports that a logger already exists.
pub fn init_logging(config: &Config) -> Result<(), log::SetLoggerError> {
    let mut builder = Builder::new();
    builder
        .filter_level(config.level_filter())
        .target(Target::Stderr)
        .format_timestamp(None)
        .format_module_path(config.debug);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.try_init()?;
    log::debug!("Logging initialised with {:?}", config);
    Ok(())
}
