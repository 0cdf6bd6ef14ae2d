//! Tracing subscriber setup.
//!
//! The menus own the terminal, so logs go to a file when one is configured,
//! to stderr only on request, and nowhere otherwise.

use crate::config::{LogFormat, LoggingConfig};
use crate::error::AppError;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Where log lines end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
    Discard,
}

/// Pick the target: a configured file wins, then stderr if asked for.
pub fn target_for(config: &LoggingConfig, to_stderr: bool) -> LogTarget {
    if config.file.is_some() {
        LogTarget::File
    } else if to_stderr {
        LogTarget::Stderr
    } else {
        LogTarget::Discard
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init(config: &LoggingConfig, to_stderr: bool) -> Result<LogTarget, AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AppError::Logging(format!("bad level '{}': {}", config.level, e)))?;

    let target = target_for(config, to_stderr);
    let writer = match (target, &config.file) {
        (LogTarget::File, Some(path)) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .map_err(|e| AppError::Logging(format!("{}: {}", parent.display(), e)))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::Logging(format!("{}: {}", path.display(), e)))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        (LogTarget::Stderr, _) => BoxMakeWriter::new(std::io::stderr),
        _ => BoxMakeWriter::new(std::io::sink),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(target == LogTarget::Stderr);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    installed.map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_target_selection() {
        let mut config = LoggingConfig::default();
        assert_eq!(target_for(&config, false), LogTarget::Discard);
        assert_eq!(target_for(&config, true), LogTarget::Stderr);

        config.file = Some(PathBuf::from("ollama-remote.log"));
        assert_eq!(target_for(&config, true), LogTarget::File);
    }
}
