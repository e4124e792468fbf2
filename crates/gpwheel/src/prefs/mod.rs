//! User preferences: which tools are enabled, the order of the modes in the wheel,
//! brush overrides and the wheel's own keyboard shortcut.
//!
//! Preferences are plain data. The catalog is passed in wherever defaults or tool
//! order matter, so nothing here mutates the catalog.

pub mod store;
pub mod transfer;

use crate::catalog::{BrushAsset, Catalog, Mode, TINT_TOOL_INDEX};
use crate::wheel::ActiveMode;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use strum::IntoEnumIterator;
use thiserror::Error;

pub use store::FileStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPref {
    pub mode: Mode,
    pub index: usize,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<BrushAsset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotkey {
    pub key: String,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub oskey: bool,
    /// False until the user picks a shortcut; the default is then reapplied on load.
    pub user_set: bool,
}

impl Default for Hotkey {
    fn default() -> Self {
        Self {
            key: "F8".to_string(),
            alt: false,
            ctrl: false,
            shift: false,
            oskey: false,
            user_set: false,
        }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = [
            (self.ctrl, "Ctrl"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
            (self.oskey, "Cmd"),
        ];
        for (_, name) in modifiers.iter().filter(|(on, _)| *on) {
            write!(f, "{} ", name)?;
        }
        write!(f, "{}", self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub show_hints: bool,
    pub mode_order: Vec<Mode>,
    pub hotkey: Hotkey,
    pub tools: Vec<ToolPref>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            show_hints: true,
            mode_order: Vec::new(),
            hotkey: Hotkey::default(),
            tools: Vec::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Tool {index} of mode '{mode}' does not take a brush asset")]
    NotABrushTool { mode: Mode, index: usize },
}

impl Preferences {
    /// Preferences with every tool at its catalog default and the catalog's mode order.
    pub fn defaults(catalog: &Catalog) -> Self {
        let mut prefs = Self::default();
        prefs.sync(catalog);
        prefs
    }

    /// Brings stored preferences in line with the catalog: drops records for tools that
    /// no longer exist, adds missing tools with their default state, fills in default
    /// brushes and repairs the mode order into a permutation of all modes.
    pub fn sync(&mut self, catalog: &Catalog) -> bool {
        let before = self.clone();

        let mut seen = HashSet::new();
        self.tools.retain(|pref| {
            let known = catalog.tool(pref.mode, pref.index).is_some();
            if !known {
                log::warn!(
                    "Dropping preference for unknown tool {} of mode '{}'",
                    pref.index,
                    pref.mode
                );
            }
            known && seen.insert((pref.mode, pref.index))
        });

        for entry in catalog.modes() {
            for (index, tool) in entry.tools.iter().enumerate() {
                if !seen.contains(&(entry.mode, index)) {
                    self.tools.push(ToolPref {
                        mode: entry.mode,
                        index,
                        enabled: tool.default_enabled,
                        asset: None,
                    });
                }
            }
        }

        for pref in &mut self.tools {
            if pref.asset.is_some() {
                continue;
            }
            if let Some(tool) = catalog.tool(pref.mode, pref.index)
                && tool.is_asset_only()
            {
                pref.asset = tool.asset.as_ref().and_then(|a| a.default_asset.clone());
            }
        }

        let mut order_seen = HashSet::new();
        self.mode_order.retain(|mode| order_seen.insert(*mode));
        self.mode_order
            .extend(Mode::iter().filter(|mode| !order_seen.contains(mode)));

        if !self.hotkey.user_set {
            self.hotkey = Hotkey::default();
        }

        *self != before
    }

    pub fn tool_pref(&self, mode: Mode, index: usize) -> Option<&ToolPref> {
        self.tools
            .iter()
            .find(|p| p.mode == mode && p.index == index)
    }

    pub fn tool_pref_mut(&mut self, mode: Mode, index: usize) -> Option<&mut ToolPref> {
        self.tools
            .iter_mut()
            .find(|p| p.mode == mode && p.index == index)
    }

    pub fn is_enabled(&self, catalog: &Catalog, mode: Mode, index: usize) -> bool {
        self.tool_pref(mode, index)
            .map(|p| p.enabled)
            .or_else(|| catalog.tool(mode, index).map(|t| t.default_enabled))
            .unwrap_or(false)
    }

    pub fn set_enabled(&mut self, mode: Mode, index: usize, enabled: bool) {
        if let Some(pref) = self.tool_pref_mut(mode, index) {
            pref.enabled = enabled;
        }
    }

    /// Enabled tools of `mode`, in the catalog's tool order.
    pub fn enabled_tools(&self, catalog: &Catalog, mode: Mode) -> Vec<usize> {
        catalog
            .mode(mode)
            .tool_order
            .iter()
            .copied()
            .filter(|&i| self.is_enabled(catalog, mode, i))
            .collect()
    }

    /// The brush an asset-only tool activates: the user's override, else the catalog's.
    pub fn tool_asset(&self, catalog: &Catalog, mode: Mode, index: usize) -> Option<BrushAsset> {
        self.tool_pref(mode, index)
            .and_then(|p| p.asset.clone())
            .or_else(|| {
                catalog
                    .tool(mode, index)
                    .and_then(|t| t.asset.as_ref())
                    .and_then(|a| a.default_asset.clone())
            })
    }

    /// Modes with at least one enabled tool, in the user's order. Each gets the next
    /// number hotkey.
    pub fn active_modes(&self, catalog: &Catalog) -> Vec<ActiveMode> {
        self.mode_order
            .iter()
            .map(|&mode| (mode, self.enabled_tools(catalog, mode)))
            .filter(|(_, tools)| !tools.is_empty())
            .enumerate()
            .map(|(rank, (mode, tools))| {
                let entry = catalog.mode(mode);
                ActiveMode {
                    mode,
                    name: entry.name,
                    short_name: entry.short_name,
                    tools,
                    hotkey: rank as u8 + 1,
                }
            })
            .collect()
    }

    /// Moves the mode at `index` one place up or down the order. Returns its new index.
    pub fn move_mode(&mut self, index: usize, up: bool) -> usize {
        let last = self.mode_order.len().saturating_sub(1);
        let target = if up {
            index.saturating_sub(1)
        } else {
            (index + 1).min(last)
        };
        if index <= last && target != index {
            self.mode_order.swap(index, target);
        }
        target.min(last)
    }

    /// Binds a brush asset to a brush tool of the wheel.
    pub fn link_brush(
        &mut self,
        catalog: &Catalog,
        mode: Mode,
        index: usize,
        asset: BrushAsset,
    ) -> Result<(), SettingsError> {
        let linkable = catalog.tool(mode, index).is_some_and(|t| t.is_asset_only());
        match self.tool_pref_mut(mode, index) {
            Some(pref) if linkable => {
                pref.asset = Some(asset);
                Ok(())
            }
            _ => Err(SettingsError::NotABrushTool { mode, index }),
        }
    }
}

/// Picks the wheel tool a brush most likely belongs to: the Tint slot in Draw mode, or
/// the sculpt tool named by one of the words in the brush's name.
pub fn guess_brush_tool(catalog: &Catalog, mode: Mode, asset: &BrushAsset) -> Option<usize> {
    match mode {
        Mode::Draw => Some(TINT_TOOL_INDEX),
        Mode::Sculpt => {
            let tools = &catalog.mode(Mode::Sculpt).tools;
            asset
                .path
                .name()
                .to_lowercase()
                .split_whitespace()
                .find_map(|word| {
                    tools
                        .iter()
                        .position(|t| t.display_name(true).eq_ignore_ascii_case(word))
                })
        }
        _ => None,
    }
}

/// Where a session reads preferences at every open.
pub trait SettingsStore {
    fn load(&self) -> Result<Preferences, SettingsError>;
}

impl SettingsStore for Preferences {
    fn load(&self) -> Result<Preferences, SettingsError> {
        Ok(self.clone())
    }
}

impl SettingsStore for Arc<RwLock<Preferences>> {
    fn load(&self) -> Result<Preferences, SettingsError> {
        Ok(self.read().clone())
    }
}
