use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use promptdeck_core::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "PROMPTDECK_LOG";
// The binary logs under `promptdeck::`, the library under `promptdeck_core::`
const DEFAULT_FILTER: &str = "promptdeck=info,promptdeck_core=info";

/// Filter directive: env var first, then config, then the default.
fn resolve_filter(env_value: Option<String>, config: &Config) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| config.log_filter.clone())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn log_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| anyhow!("Could not determine data directory"))?;

    Ok(data_dir.join("promptdeck").join("logs").join("promptdeck.log"))
}

/// Route tracing output to a log file; the terminal belongs to the UI.
pub fn init(config: &Config) -> Result<PathBuf> {
    let log_path = log_path()?;
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)?;

    let directive = resolve_filter(std::env::var(LOG_ENV_VAR).ok(), config);
    let filter = EnvFilter::try_new(&directive).or_else(|e| {
        eprintln!("Invalid log filter {:?} ({}), using default", directive, e);
        EnvFilter::try_new(DEFAULT_FILTER)
    })?;

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false), // No ANSI colors in file
    );
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!("Logging initialized to: {:?}", log_path);
    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_env_var_wins() {
        let config = Config {
            log_filter: Some("promptdeck_core=debug".to_string()),
            ..Config::new()
        };
        assert_eq!(resolve_filter(Some("trace".to_string()), &config), "trace");
    }

    #[test]
    fn test_config_then_default() {
        let config = Config {
            log_filter: Some("promptdeck_core=debug".to_string()),
            ..Config::new()
        };
        assert_eq!(resolve_filter(Some("  ".to_string()), &config), "promptdeck_core=debug");
        assert_eq!(resolve_filter(None, &Config::new()), DEFAULT_FILTER);
    }

    #[derive(Clone, Default)]
    struct TargetRecorder(Arc<Mutex<Vec<String>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for TargetRecorder {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
            self.0.lock().unwrap().push(event.metadata().target().to_string());
        }
    }

    #[test]
    fn test_default_filter_keeps_binary_and_core_logs() {
        let recorder = TargetRecorder::default();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::try_new(DEFAULT_FILTER).unwrap())
            .with(recorder.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("from this module");
            tracing::warn!(target: "promptdeck::clipboard", "fallback");
            tracing::info!(target: "promptdeck_core::deck", "copied");
            tracing::debug!(target: "promptdeck::app", "too verbose");
            tracing::info!(target: "hyper::client", "unrelated");
        });

        let targets = recorder.0.lock().unwrap().clone();
        assert_eq!(
            targets,
            vec![
                module_path!().to_string(),
                "promptdeck::clipboard".to_string(),
                "promptdeck_core::deck".to_string(),
            ]
        );
        assert!(module_path!().starts_with("promptdeck::"));
    }
}
