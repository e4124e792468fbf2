//! Settings import and export as a JSON document.
//!
//! The document keeps the record layout of earlier releases: tuples instead of objects,
//! and tool records that may lack the three brush fields.

use super::{Hotkey, Preferences, ToolPref};
use crate::catalog::{BrushAsset, Catalog, Mode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

/// `(mode, tool index, enabled, library type, library id, asset path)`, or the
/// first three fields only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolRecord {
    Full(Mode, usize, bool, String, String, String),
    Legacy(Mode, usize, bool),
}

/// `(display name, mode rank, mode)`.
pub type ModeRecord = (String, usize, Mode);

/// `(user set, key, alt, ctrl, shift, os key)`.
pub type HotkeyRecord = (bool, String, bool, bool, bool, bool);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    pub tools: Vec<ToolRecord>,
    pub mode_order: Vec<ModeRecord>,
    #[serde(default = "default_true")]
    pub show_hints: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kmi_wheel: Option<HotkeyRecord>,
}

fn default_true() -> bool {
    true
}

impl SettingsDocument {
    pub fn from_preferences(prefs: &Preferences, catalog: &Catalog) -> Self {
        let tools = prefs
            .tools
            .iter()
            .map(|t| match &t.asset {
                Some(asset) => ToolRecord::Full(
                    t.mode,
                    t.index,
                    t.enabled,
                    asset.library_type.to_string(),
                    asset.library.clone(),
                    asset.path.to_string(),
                ),
                None => ToolRecord::Full(
                    t.mode,
                    t.index,
                    t.enabled,
                    String::new(),
                    String::new(),
                    String::new(),
                ),
            })
            .collect();

        let mode_order = prefs
            .mode_order
            .iter()
            .map(|&mode| (catalog.mode(mode).name.to_string(), mode.as_index(), mode))
            .collect();

        let h = &prefs.hotkey;
        Self {
            tools,
            mode_order,
            show_hints: prefs.show_hints,
            kmi_wheel: Some((h.user_set, h.key.clone(), h.alt, h.ctrl, h.shift, h.oskey)),
        }
    }

    /// Converts the document into preferences synced with `catalog`.
    pub fn into_preferences(self, catalog: &Catalog) -> Preferences {
        let tools = self
            .tools
            .into_iter()
            .map(|record| match record {
                ToolRecord::Full(mode, index, enabled, library_type, library, path) => ToolPref {
                    mode,
                    index,
                    enabled,
                    asset: (!path.is_empty())
                        .then(|| BrushAsset::new(library_type, library, path)),
                },
                ToolRecord::Legacy(mode, index, enabled) => ToolPref {
                    mode,
                    index,
                    enabled,
                    asset: None,
                },
            })
            .collect();

        let hotkey = match self.kmi_wheel {
            Some((user_set, key, alt, ctrl, shift, oskey)) => Hotkey {
                key,
                alt,
                ctrl,
                shift,
                oskey,
                user_set,
            },
            None => Hotkey::default(),
        };

        let mut prefs = Preferences {
            show_hints: self.show_hints,
            mode_order: self.mode_order.into_iter().map(|(_, _, mode)| mode).collect(),
            hotkey,
            tools,
        };
        prefs.sync(catalog);
        prefs
    }
}

pub fn export_settings(
    prefs: &Preferences,
    catalog: &Catalog,
    path: &Path,
) -> Result<(), TransferError> {
    let doc = SettingsDocument::from_preferences(prefs, catalog);
    fs_err::write(path, serde_json::to_string_pretty(&doc)?)?;
    log::info!("Exported settings to {}", path.display());
    Ok(())
}

pub fn import_settings(catalog: &Catalog, path: &Path) -> Result<Preferences, TransferError> {
    let doc: SettingsDocument = serde_json::from_str(&fs_err::read_to_string(path)?)?;
    log::info!("Imported settings from {}", path.display());
    Ok(doc.into_preferences(catalog))
}
