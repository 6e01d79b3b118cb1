use log::{info, warn, LevelFilter};

use crate::config::ViewerConfig;

/// Installs the global logger at the configured level: `[LEVEL target]
/// message` on stdout.
pub fn init_logging(config: &ViewerConfig) -> Result<(), log::SetLoggerError> {
    init_logging_to(config, std::io::stdout())
}

/// [`init_logging`] with a chosen output.
///
/// The GPU stack is very chatty below `Warn`, so its crates are capped
/// there whatever the level is.  Notes about the configuration itself are
/// written once the logger is in place.
pub fn init_logging_to(
    config: &ViewerConfig,
    output: impl Into<fern::Output>,
) -> Result<(), log::SetLoggerError> {
    let level = config.log_level();
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
        })
        .level(level.unwrap_or(LevelFilter::Info))
        .level_for("wgpu_core", LevelFilter::Warn)
        .level_for("wgpu_hal", LevelFilter::Warn)
        .level_for("naga", LevelFilter::Warn)
        .chain(output)
        .apply()?;

    match &config.source {
        Some(path) => info!("configuration read from {}", path.display()),
        None => info!("no configuration file, using defaults"),
    }
    if level.is_none() {
        warn!("unknown log level `{}`, using info", config.log_level);
    }
    Ok(())
}
