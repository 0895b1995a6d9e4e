//! Dragoon entry point.
//!
//! Environment variables:
//! - `DRAGOON_CONFIG` - Path of the TOML config file (default: `dragoon.toml`, optional)
//! - `DRAGOON_NEW_GAME` - Wipe saved progress before starting (default: false)
//! - `RUST_LOG` - Log filter (default: `info`)
//!
//! Engine settings can also be overridden with the `VN_*` variables.

mod days;

use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use vn_engine::{EngineConfig, EngineError, StoryOutcome, TerminalEngine};

const FAREWELL: &str = "\nExiting...";

/// Held here rather than on `main`'s stack so the interrupt handler can flush
/// buffered log lines before the process exits.
static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

fn main() -> Result<()> {
    let result = run();
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    flush_logs();
    result
}

fn run() -> Result<()> {
    let config_path = env::var_os("DRAGOON_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dragoon.toml"));
    let config = EngineConfig::load_or_default(&config_path)?.with_env();

    // Logs go to a file so they never draw over the story.
    let guard = setup_logging()?;
    if let Ok(mut slot) = LOG_GUARD.lock() {
        *slot = Some(guard);
    }

    // Every accepted answer is already on disk, so an interrupt can just leave.
    ctrlc::set_handler(|| {
        tracing::info!("Interrupted");
        flush_logs();
        println!("{}", FAREWELL);
        std::process::exit(130);
    })
    .context("failed to install interrupt handler")?;

    tracing::info!("Starting with save file {}", config.save_file.display());
    let mut vn = TerminalEngine::stdio(config);

    if read_env_bool("DRAGOON_NEW_GAME").unwrap_or(false) {
        vn.reset_progress()?;
    }

    match days::story().run(&mut vn) {
        Ok(StoryOutcome::Finished { day }) => {
            tracing::info!("Story finished before day {}", day);
            vn.show_banner("To be continued...")?;
            Ok(())
        }
        Ok(outcome) => {
            tracing::warn!("Story stopped early: {:?}", outcome);
            Ok(())
        }
        Err(EngineError::InputClosed) => {
            println!("{}", FAREWELL);
            Ok(())
        }
        Err(e) => Err(e).context("the story could not continue"),
    }
}

/// Log to `<cache dir>/dragoon/logs/dragoon.log`.
fn setup_logging() -> Result<WorkerGuard> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("dragoon")
        .join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "dragoon.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Drop the log writer's guard, which writes out everything still buffered.
fn flush_logs() {
    if let Ok(mut slot) = LOG_GUARD.lock() {
        slot.take();
    }
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_flush_logs_writes_buffered_lines() {
        let sink = SharedBuf::default();
        let (mut writer, guard) = tracing_appender::non_blocking(sink.clone());
        *LOG_GUARD.lock().unwrap() = Some(guard);

        writer.write_all(b"Interrupted\n").unwrap();
        flush_logs();

        assert!(LOG_GUARD.lock().unwrap().is_none());
        assert_eq!(sink.0.lock().unwrap().as_slice(), b"Interrupted\n");
    }

    #[test]
    fn test_read_env_bool() {
        env::set_var("DRAGOON_TEST_FLAG", "Yes");
        assert_eq!(read_env_bool("DRAGOON_TEST_FLAG"), Some(true));
        env::set_var("DRAGOON_TEST_FLAG", "off");
        assert_eq!(read_env_bool("DRAGOON_TEST_FLAG"), Some(false));
        env::set_var("DRAGOON_TEST_FLAG", "maybe");
        assert_eq!(read_env_bool("DRAGOON_TEST_FLAG"), None);
        env::remove_var("DRAGOON_TEST_FLAG");
        assert_eq!(read_env_bool("DRAGOON_TEST_FLAG"), None);
    }
}
