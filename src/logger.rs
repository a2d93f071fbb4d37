use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const APP_DIR: &str = "tfwork";
const LOG_FILE: &str = "tfwork.log";

static INIT: OnceLock<()> = OnceLock::new();
static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize file logging. With `verbose`, events are mirrored to stderr.
pub fn init(verbose: bool) -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    init_inner(verbose)?;
    let _ = INIT.set(());
    Ok(())
}

fn init_inner(verbose: bool) -> Result<()> {
    let log_path = log_path_from(
        std::env::var("XDG_STATE_HOME").ok(),
        home::home_dir(),
        std::env::current_dir()?,
    );
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory at {}", parent.display()))?;
    }

    let (directory, file_name) = split_path(&log_path)?;
    let file_appender = rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = GUARD.set(guard);

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false),
        )
        .with(stderr_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}

/// `$XDG_STATE_HOME/tfwork/tfwork.log`, else `~/.local/state/tfwork/tfwork.log`,
/// else `tfwork.log` in the current directory.
fn log_path_from(state_home: Option<String>, home_dir: Option<PathBuf>, cwd: PathBuf) -> PathBuf {
    if let Some(state_home) = state_home
        && !state_home.is_empty()
    {
        return PathBuf::from(state_home).join(APP_DIR).join(LOG_FILE);
    }

    if let Some(home_dir) = home_dir {
        return home_dir
            .join(".local")
            .join("state")
            .join(APP_DIR)
            .join(LOG_FILE);
    }

    cwd.join(LOG_FILE)
}

fn split_path(path: &Path) -> Result<(PathBuf, &str)> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid log file name"))?;

    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok((dir, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_prefers_xdg_state_home() {
        let path = log_path_from(
            Some("/state".to_string()),
            Some(PathBuf::from("/home/me")),
            PathBuf::from("/cwd"),
        );
        assert_eq!(path, PathBuf::from("/state/tfwork/tfwork.log"));
    }

    #[test]
    fn log_path_ignores_empty_state_home() {
        let path = log_path_from(
            Some(String::new()),
            Some(PathBuf::from("/home/me")),
            PathBuf::from("/cwd"),
        );
        assert_eq!(
            path,
            PathBuf::from("/home/me/.local/state/tfwork/tfwork.log")
        );
    }

    #[test]
    fn log_path_falls_back_to_cwd() {
        let path = log_path_from(None, None, PathBuf::from("/cwd"));
        assert_eq!(path, PathBuf::from("/cwd/tfwork.log"));
    }

    #[test]
    fn split_path_separates_directory_and_file() {
        let path = PathBuf::from("/state/tfwork/tfwork.log");
        let (dir, file) = split_path(&path).unwrap();
        assert_eq!(dir, PathBuf::from("/state/tfwork"));
        assert_eq!(file, "tfwork.log");
    }
}
