use super::{Preferences, SettingsError, SettingsStore};
use crate::catalog::Catalog;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn get_config_dir() -> Result<PathBuf, SettingsError> {
    let proj_dirs =
        ProjectDirs::from("org", "gpwheel", "gpwheel").ok_or(SettingsError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

pub fn get_preferences_path() -> Result<PathBuf, SettingsError> {
    Ok(get_config_dir()?.join("preferences.toml"))
}

/// Preferences persisted as TOML. Every load re-reads the file and syncs it with the
/// catalog, so edits made while the overlay runs show up at the next open.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    catalog: Arc<Catalog>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, catalog: Arc<Catalog>) -> Self {
        Self {
            path: path.into(),
            catalog,
        }
    }

    pub fn open_default(catalog: Arc<Catalog>) -> Result<Self, SettingsError> {
        Ok(Self::new(get_preferences_path()?, catalog))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file as stored, without syncing. A missing file reads as empty
    /// preferences.
    pub fn read(&self) -> Result<Preferences, SettingsError> {
        let s = config::Config::builder()
            .add_source(config::File::from(self.path.clone()).required(false))
            .add_source(config::Environment::with_prefix("GPWHEEL"))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    pub fn save(&self, prefs: &Preferences) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs_err::create_dir_all(parent)?;
        }
        fs_err::write(&self.path, toml::to_string_pretty(prefs)?)?;
        log::info!("Saved preferences to {}", self.path.display());
        Ok(())
    }

    /// Overwrites the file with catalog defaults.
    pub fn reset(&self) -> Result<Preferences, SettingsError> {
        let prefs = Preferences::defaults(&self.catalog);
        self.save(&prefs)?;
        Ok(prefs)
    }
}

impl SettingsStore for FileStore {
    fn load(&self) -> Result<Preferences, SettingsError> {
        let mut prefs = self.read()?;
        if prefs.sync(&self.catalog) {
            log::debug!("Preferences at {} were completed from defaults", self.path.display());
        }
        Ok(prefs)
    }
}
