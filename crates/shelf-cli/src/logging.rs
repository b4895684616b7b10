// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_ENV: &str = "SHELF_LOG";

/// `SHELF_LOG` wins over the configured level when set and non-empty.
pub fn resolve_filter(configured: &str, env_override: Option<&str>) -> Result<EnvFilter> {
    let directives = match env_override {
        Some(value) if !value.trim().is_empty() => value,
        _ => configured,
    };
    EnvFilter::try_new(directives)
        .map_err(|error| anyhow!("invalid log filter {directives:?}: {error}"))
}

/// Logs go to a file since the terminal belongs to the table view.
pub fn init(level: &str, path: &Path) -> Result<()> {
    let env_override = env::var(LOG_ENV).ok();
    let filter = resolve_filter(level, env_override.as_deref())?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("install log subscriber")?;

    tracing::debug!(log_path = %path.display(), "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::resolve_filter;

    #[test]
    fn env_override_takes_precedence() {
        let filter = resolve_filter("info", Some("shelf=trace")).expect("valid filter");
        assert!(filter.to_string().contains("shelf=trace"));
    }

    #[test]
    fn blank_env_override_falls_back_to_config() {
        let filter = resolve_filter("warn", Some("  ")).expect("valid filter");
        assert!(filter.to_string().contains("warn"));

        let filter = resolve_filter("debug", None).expect("valid filter");
        assert!(filter.to_string().contains("debug"));
    }

    #[test]
    fn invalid_directive_is_reported() {
        let error = resolve_filter("info", Some("shelf=loud")).expect_err("bad directive");
        assert!(error.to_string().contains("invalid log filter"));
    }
}
