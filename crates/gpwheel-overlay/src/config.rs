use gpwheel::geometry::{Insets, Region};
use gpwheel::prefs::store::get_config_dir;
use gpwheel::prefs::{FileStore, Preferences, SettingsStore};
use gpwheel::session::INVOKE_MARGIN;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub ui_scale: f64,
    /// Height of the strip along the bottom edge where `show` is refused.
    pub invoke_margin: f64,
    /// Whether the host backs tools with brush assets.
    pub brush_assets: bool,
    /// Host panels covering the overlay; the wheel is kept clear of them.
    pub regions: Vec<Region>,
    /// Searched for `<icon>.png` before the XDG data directories.
    pub icon_dir: Option<PathBuf>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            ui_scale: 1.0,
            invoke_margin: INVOKE_MARGIN,
            brush_assets: true,
            regions: Vec::new(),
            icon_dir: None,
        }
    }
}

impl OverlayConfig {
    pub fn insets(&self) -> Insets {
        Insets::from_regions(&self.regions)
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

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let dir = get_config_dir().map_err(|_| ConfigError::ConfigDirNotFound)?;
    Ok(dir.join("overlay.toml"))
}

pub fn load_config() -> Result<OverlayConfig, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("GPWHEEL_OVERLAY"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the overlay settings, writing the commented template on first start.
pub fn load_or_setup() -> OverlayConfig {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default overlay settings to {}", path.display()),
            Err(e) => log::warn!("Could not write default overlay settings: {}", e),
        }
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load overlay settings, using defaults: {}", e);
        OverlayConfig::default()
    })
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
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

/// Watches the config directory. Overlay settings changes are forwarded as
/// [`AppEvent::ConfigReload`]; preference changes are loaded straight into `prefs`.
pub async fn run_async_watcher(
    tx: Sender<AppEvent>,
    store: FileStore,
    prefs: Arc<RwLock<Preferences>>,
) {
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

    while let Ok(res) = bridge_rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::error!("Watch error: {}", e);
                continue;
            }
        };
        if !matches!(
            event.kind,
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
        ) {
            continue;
        }

        if event.paths.iter().any(|p| p.as_path() == store.path()) {
            match store.load() {
                Ok(loaded) => {
                    *prefs.write() = loaded;
                    log::info!("Preferences reloaded");
                }
                Err(e) => log::error!("Failed to reload preferences: {}", e),
            }
        }

        if event.paths.iter().any(|p| p == &config_path)
            && tx.send(AppEvent::ConfigReload).await.is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpwheel::geometry::RegionKind;

    #[test]
    fn default_template_parses() {
        let parsed: OverlayConfig = toml_from(DEFAULT_CONFIG);
        assert_eq!(parsed, OverlayConfig::default());
    }

    #[test]
    fn regions_become_insets() {
        let parsed: OverlayConfig = toml_from(
            r#"
            ui_scale = 1.5

            [[regions]]
            kind = "left_panel"
            width = 40.0
            height = 900.0

            [[regions]]
            kind = "header"
            width = 1920.0
            height = 26.0
            "#,
        );
        assert_eq!(parsed.ui_scale, 1.5);
        assert_eq!(parsed.regions[0].kind, RegionKind::LeftPanel);

        let insets = parsed.insets();
        assert_eq!(insets.left, 40.0);
        assert_eq!(insets.top, 28.0);
        assert_eq!(insets.right, 3.0);
    }

    fn toml_from(s: &str) -> OverlayConfig {
        config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
