use std::path::PathBuf;
use std::time::SystemTime;

use color_eyre::Result;
use color_eyre::eyre::Context;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

const APP_DIR: &str = "ukebook-helper";

/// Crates that log every request at debug level
const NOISY_TARGETS: &[&str] = &["reqwest", "hyper", "hyper_util", "cookie_store", "rustls"];

/// Default log file location, under the platform's local data directory
pub fn default_log_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join("ukebook-helper.log"))
}

/// Install the global logger.
///
/// The console gets colored output at `console_level`; keep it `off` while the
/// terminal UI is running. The log file receives plain lines at `file_level`.
pub fn setup_logging(
    console_level: LevelFilter,
    log_file: Option<PathBuf>,
    file_level: LevelFilter,
) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    let console = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(console_level)
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new().chain(console);

    if let Some(path) = log_file.or_else(default_log_file) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create log directory: {}", parent.display())
            })?;
        }

        let mut file = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    humantime::format_rfc3339_seconds(SystemTime::now()),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(file_level);
        for target in NOISY_TARGETS {
            file = file.level_for(*target, LevelFilter::Warn.min(file_level));
        }
        let file = file.chain(
            fern::log_file(&path)
                .wrap_err_with(|| format!("Failed to open log file: {}", path.display()))?,
        );

        dispatch = dispatch.chain(file);
    }

    dispatch.apply().wrap_err("Failed to install logger")?;

    log::debug!("Logging initialized");
    Ok(())
}
