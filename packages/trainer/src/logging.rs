//! Tracing setup: stderr console plus an optional daily log file

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Keeps the file writer alive; drop it only on exit
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// How much of the log reaches the terminal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleLogs {
    /// Everything `RUST_LOG` lets through
    Full,
    /// Warnings and errors only, so session prompts are not interleaved with
    /// per-answer events. The log file still gets everything.
    Quiet,
}

impl ConsoleLogs {
    pub fn level(self) -> LevelFilter {
        match self {
            ConsoleLogs::Full => LevelFilter::TRACE,
            ConsoleLogs::Quiet => LevelFilter::WARN,
        }
    }
}

/// Console logs go to stderr so they never mix with the session prompts.
///
/// With `log_dir` set, a `woordjes.log` file rotating daily is written there
/// at the full `log_level`.
pub fn init_tracing(
    log_level: &str,
    log_dir: Option<&Path>,
    console: ConsoleLogs,
) -> Option<FileLogGuard> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console.level());

    if let Some(log_dir) = log_dir {
        match std::fs::create_dir_all(log_dir) {
            Ok(()) => {
                let file_appender =
                    RollingFileAppender::new(Rotation::DAILY, log_dir, "woordjes.log");
                let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
                let file_layer = fmt::layer()
                    .with_writer(file_writer)
                    .with_ansi(false)
                    .with_target(true);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(console_layer)
                    .with(file_layer)
                    .init();

                return Some(FileLogGuard { _guard: guard });
            }
            Err(err) => eprintln!("failed to create log directory {}: {err}", log_dir.display()),
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();

    None
}
