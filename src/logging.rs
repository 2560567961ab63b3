use std::io::Write;

use chrono::Local;
use env_logger::{Builder, Env};
use log::{self, LevelFilter};
use yansi::Paint;

/// Initializes logging for a delegation run
///
/// The level comes from `RUST_LOG` when set, otherwise from the given
/// default. Valid levels are: error, warn, info, debug, trace.
pub fn init(default_level: &str) {
    let fallback = parse_log_level(default_level).to_string().to_lowercase();
    let env = Env::default().filter_or("RUST_LOG", fallback);

    Builder::from_env(env)
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("hyper", LevelFilter::Warn)
        .format(|buf, record| {
            let level = match record.level() {
                log::Level::Error => Paint::red("ERROR").bold(),
                log::Level::Warn => Paint::yellow("WARN ").bold(),
                log::Level::Info => Paint::cyan("INFO ").bold(),
                log::Level::Debug => Paint::blue("DEBUG").bold(),
                log::Level::Trace => Paint::new("TRACE"),
            };
            writeln!(
                buf,
                "{} {} {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                level,
                record.args()
            )
        })
        .init();
}

/// Parses a log level string into a LevelFilter, defaulting to Info for
/// unrecognized input
pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}
