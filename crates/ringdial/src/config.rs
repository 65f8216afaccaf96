use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use ringtime::resolver::Range;
use ringtime::time::{ClockTime, Interval, OpenCloseWindow, Step};
use ringtime::DialConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: f64,
    pub open: ClockTime,
    pub close: ClockTime,
    pub unavailable: Vec<Interval>,
    pub start: Step,
    pub end: Step,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 300.0,
            open: ClockTime::from_hour(8),
            close: ClockTime::from_hour(23),
            unavailable: Interval::new(34, 40).into_iter().collect(),
            start: 20,
            end: 30,
        }
    }
}

impl Config {
    pub fn window(&self) -> OpenCloseWindow {
        OpenCloseWindow::new(self.open, self.close)
    }

    pub fn dial(&self) -> DialConfig {
        DialConfig::new(self.width, self.window(), self.unavailable.clone())
    }

    pub fn initial_range(&self) -> Range {
        Range::new(self.start, self.end)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "ringtime", "ringdial").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("RINGDIAL"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the user config, writing the bundled default first if there is none yet.
pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Could not write default config: {}", e),
        }
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }
    log::debug!("Watching {}", config_dir.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_matches_defaults() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: Config = serde_json::from_str(r#"{"width": 400}"#).unwrap();
        assert_eq!(parsed.width, 400.0);
        assert_eq!(parsed.window().open_val(), 16);
        assert_eq!(parsed.initial_range(), Range::new(20, 30));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"open": "08:15"}"#).is_err());
        assert!(serde_json::from_str::<Config>(r#"{"unavailable": [[40, 34]]}"#).is_err());
    }

    #[test]
    fn test_dial_config() {
        let dial = Config::default().dial();
        assert_eq!(dial.window.close_val(), 46);
        assert_eq!(dial.unavailable.len(), 1);
    }
}
