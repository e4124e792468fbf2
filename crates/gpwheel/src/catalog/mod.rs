//! The static tool/mode catalog.
//!
//! The raw table in [`builtin`] uses the host's string identifiers. Loading it turns
//! every identifier into a closed enum, so an unknown mode or tool is a load-time
//! [`CatalogError`] instead of a dispatch-time surprise.

pub mod builtin;

use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumCount, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

pub use builtin::{AssetDef, ModeDef, ToolDef};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    EnumCount,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[strum(
        to_string = "weight",
        serialize = "WEIGHT_GPENCIL",
        serialize = "WEIGHT_GREASE_PENCIL"
    )]
    Weight,
    #[strum(
        to_string = "draw",
        serialize = "PAINT_GPENCIL",
        serialize = "PAINT_GREASE_PENCIL"
    )]
    Draw,
    #[strum(
        to_string = "vertex",
        serialize = "VERTEX_GPENCIL",
        serialize = "VERTEX_GREASE_PENCIL"
    )]
    Vertex,
    #[strum(
        to_string = "edit",
        serialize = "EDIT_GPENCIL",
        serialize = "EDIT_GREASE_PENCIL"
    )]
    Edit,
    #[strum(
        to_string = "sculpt",
        serialize = "SCULPT_GPENCIL",
        serialize = "SCULPT_GREASE_PENCIL"
    )]
    Sculpt,
    #[strum(to_string = "object")]
    Object,
}

impl Mode {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::iter().nth(idx)
    }
}

/// Mode order used when listing tools for the user.
pub const PREFS_ORDER: [Mode; 6] = [
    Mode::Draw,
    Mode::Edit,
    Mode::Sculpt,
    Mode::Object,
    Mode::Vertex,
    Mode::Weight,
];

/// Index of the Draw tool in Draw mode.
pub const DRAW_TOOL_INDEX: usize = 0;
/// Index of the Tint tool in Draw mode.
pub const TINT_TOOL_INDEX: usize = 3;
/// Brushes in Draw mode that are not drawing brushes.
pub const NON_DRAW_ASSETS: &[&str] = &["/Fill", "/Tint", "/Eraser"];

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ToolId(String);

crate::impl_string_newtype!(ToolId);

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct LibraryType(String);

crate::impl_string_newtype!(LibraryType);

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct AssetPath(String);

crate::impl_string_newtype!(AssetPath);

impl AssetPath {
    /// The asset's name: everything after the last `/`.
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn is_non_draw(&self) -> bool {
        NON_DRAW_ASSETS.iter().any(|suffix| self.0.ends_with(suffix))
    }
}

/// A brush asset reference in the host's asset libraries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrushAsset {
    pub library_type: LibraryType,
    #[serde(default)]
    pub library: String,
    pub path: AssetPath,
}

impl BrushAsset {
    pub fn new(
        library_type: impl Into<String>,
        library: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            library_type: LibraryType::new(library_type),
            library: library.into(),
            path: AssetPath::new(path),
        }
    }
}

/// Objects a creation entry adds instead of selecting a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CreationKind {
    Empty,
    Bone,
    StrokeObject,
    BlankObject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolKind {
    Builtin(ToolId),
    Create(CreationKind),
}

impl FromStr for ToolKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add.empty" => Ok(Self::Create(CreationKind::Empty)),
            "add.bone" => Ok(Self::Create(CreationKind::Bone)),
            "add.gp.stroke" => Ok(Self::Create(CreationKind::StrokeObject)),
            "add.gp.empty" => Ok(Self::Create(CreationKind::BlankObject)),
            s if s.starts_with("add.") => Err(CatalogError::UnknownCreation(s.to_string())),
            s if is_tool_id(s) => Ok(Self::Builtin(ToolId::new(s))),
            s => Err(CatalogError::UnknownTool(s.to_string())),
        }
    }
}

fn is_tool_id(s: &str) -> bool {
    s.split_once('.').is_some_and(|(space, name)| {
        matches!(space, "builtin" | "builtin_brush") && !name.is_empty()
    })
}

/// How a tool behaves on hosts with brush assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBinding {
    /// Tool selected instead of the entry's own tool. `None` means the entry activates
    /// a brush asset.
    pub tool: Option<ToolId>,
    pub name: Option<&'static str>,
    pub icon: Option<&'static str>,
    pub default_asset: Option<BrushAsset>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolEntry {
    pub name: &'static str,
    pub icon: &'static str,
    pub kind: ToolKind,
    pub default_enabled: bool,
    pub asset: Option<AssetBinding>,
}

impl ToolEntry {
    pub fn display_name(&self, brush_assets: bool) -> &'static str {
        self.asset
            .as_ref()
            .filter(|_| brush_assets)
            .and_then(|a| a.name)
            .unwrap_or(self.name)
    }

    pub fn display_icon(&self, brush_assets: bool) -> &'static str {
        self.asset
            .as_ref()
            .filter(|_| brush_assets)
            .and_then(|a| a.icon)
            .unwrap_or(self.icon)
    }

    /// Entries whose brush-asset form is a library brush rather than a tool.
    pub fn is_asset_only(&self) -> bool {
        self.asset.as_ref().is_some_and(|a| a.tool.is_none())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeEntry {
    pub mode: Mode,
    pub name: &'static str,
    pub short_name: &'static str,
    pub tools: Vec<ToolEntry>,
    /// Order in which tools appear in the wheel, as indices into `tools`.
    pub tool_order: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    modes: Vec<ModeEntry>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown mode '{0}'")]
    UnknownMode(String),
    #[error("Mode '{0}' is defined more than once")]
    DuplicateMode(Mode),
    #[error("Mode '{0}' is missing from the catalog")]
    MissingMode(Mode),
    #[error("Unknown tool identifier '{0}'")]
    UnknownTool(String),
    #[error("Unknown creation entry '{0}'")]
    UnknownCreation(String),
    #[error("Tool order of mode '{0}' is not a permutation of its tools")]
    BadToolOrder(Mode),
}

impl Catalog {
    /// Loads the table shipped with the wheel.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_defs(builtin::MODES)
    }

    pub fn from_defs(defs: &[ModeDef]) -> Result<Self, CatalogError> {
        let mut slots: Vec<Option<ModeEntry>> = vec![None; Mode::COUNT];

        for def in defs {
            let entry = Self::load_mode(def)?;
            let slot = &mut slots[entry.mode.as_index()];
            if slot.is_some() {
                return Err(CatalogError::DuplicateMode(entry.mode));
            }
            *slot = Some(entry);
        }

        let modes = slots
            .into_iter()
            .zip(Mode::iter())
            .map(|(entry, mode)| entry.ok_or(CatalogError::MissingMode(mode)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { modes })
    }

    fn load_mode(def: &ModeDef) -> Result<ModeEntry, CatalogError> {
        let mode =
            Mode::from_str(def.key).map_err(|_| CatalogError::UnknownMode(def.key.to_string()))?;

        let tools = def
            .tools
            .iter()
            .map(Self::load_tool)
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = vec![false; tools.len()];
        for &i in def.tool_order {
            match seen.get_mut(i) {
                Some(s) if !*s => *s = true,
                _ => return Err(CatalogError::BadToolOrder(mode)),
            }
        }
        if seen.iter().any(|s| !s) {
            return Err(CatalogError::BadToolOrder(mode));
        }

        Ok(ModeEntry {
            mode,
            name: def.name,
            short_name: def.short_name,
            tools,
            tool_order: def.tool_order.to_vec(),
        })
    }

    fn load_tool(def: &ToolDef) -> Result<ToolEntry, CatalogError> {
        let asset = def
            .asset
            .as_ref()
            .map(|a| -> Result<AssetBinding, CatalogError> {
                let tool = match a.tool {
                    "" => None,
                    id if is_tool_id(id) => Some(ToolId::new(id)),
                    id => return Err(CatalogError::UnknownTool(id.to_string())),
                };
                let default_asset = (!a.path.is_empty())
                    .then(|| BrushAsset::new(a.library_type, a.library, a.path));
                Ok(AssetBinding {
                    tool,
                    name: a.name,
                    icon: a.icon,
                    default_asset,
                })
            })
            .transpose()?;

        Ok(ToolEntry {
            name: def.name,
            icon: def.icon,
            kind: ToolKind::from_str(def.tool)?,
            default_enabled: def.default,
            asset,
        })
    }

    pub fn mode(&self, mode: Mode) -> &ModeEntry {
        &self.modes[mode.as_index()]
    }

    pub fn modes(&self) -> impl Iterator<Item = &ModeEntry> {
        self.modes.iter()
    }

    pub fn tool(&self, mode: Mode, index: usize) -> Option<&ToolEntry> {
        self.mode(mode).tools.get(index)
    }

    /// Every distinct icon name the wheel may draw.
    pub fn icon_names(&self) -> Vec<&'static str> {
        let mut icons: Vec<_> = self
            .modes
            .iter()
            .flat_map(|m| m.tools.iter())
            .flat_map(|t| {
                std::iter::once(t.icon).chain(t.asset.as_ref().and_then(|a| a.icon))
            })
            .collect();
        icons.sort_unstable();
        icons.dedup();
        icons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.modes().count(), 6);
        assert_eq!(catalog.mode(Mode::Draw).tools.len(), 13);
        assert_eq!(catalog.mode(Mode::Edit).tool_order[0], 11);
        assert_eq!(
            catalog.tool(Mode::Object, 7).unwrap().kind,
            ToolKind::Create(CreationKind::Empty)
        );
        assert_eq!(catalog.tool(Mode::Draw, TINT_TOOL_INDEX).unwrap().name, "Tint");
    }

    #[test]
    fn mode_parsing() {
        let cases = vec![
            ("\"draw\"", Mode::Draw),
            ("\"Draw\"", Mode::Draw),
            ("\"PAINT_GREASE_PENCIL\"", Mode::Draw),
            ("\"weight_gpencil\"", Mode::Weight),
            ("\"object\"", Mode::Object),
        ];

        for (json, expected) in cases {
            let deserialized: Mode = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert_eq!(serde_json::to_string(&Mode::Sculpt).unwrap(), "\"sculpt\"");
        assert_eq!(Mode::Vertex.to_string(), "vertex");
    }

    #[test]
    fn host_mode_identifiers_parse() {
        let cases = [
            ("WEIGHT_GPENCIL", Mode::Weight),
            ("WEIGHT_GREASE_PENCIL", Mode::Weight),
            ("PAINT_GPENCIL", Mode::Draw),
            ("PAINT_GREASE_PENCIL", Mode::Draw),
            ("VERTEX_GPENCIL", Mode::Vertex),
            ("VERTEX_GREASE_PENCIL", Mode::Vertex),
            ("EDIT_GPENCIL", Mode::Edit),
            ("EDIT_GREASE_PENCIL", Mode::Edit),
            ("EDIT", Mode::Edit),
            ("SCULPT_GPENCIL", Mode::Sculpt),
            ("SCULPT_GREASE_PENCIL", Mode::Sculpt),
            ("OBJECT", Mode::Object),
        ];

        for (name, expected) in cases {
            assert_eq!(name.parse::<Mode>(), Ok(expected), "{}", name);
        }
        assert!("PAINT".parse::<Mode>().is_err());
    }

    #[test]
    fn tool_kind_parsing() {
        assert_eq!(
            "builtin.move".parse::<ToolKind>(),
            Ok(ToolKind::Builtin(ToolId::new("builtin.move")))
        );
        assert_eq!(
            "add.gp.stroke".parse::<ToolKind>(),
            Ok(ToolKind::Create(CreationKind::StrokeObject))
        );
        assert_eq!(
            "add.light".parse::<ToolKind>(),
            Err(CatalogError::UnknownCreation("add.light".to_string()))
        );
        assert_eq!(
            "wm.save".parse::<ToolKind>(),
            Err(CatalogError::UnknownTool("wm.save".to_string()))
        );
    }

    #[test]
    fn unknown_tool_fails_at_load() {
        static BOGUS: &[ToolDef] = &[ToolDef {
            name: "Bogus",
            tool: "script.bogus",
            icon: "bogus",
            default: true,
            asset: None,
        }];
        let defs = [ModeDef {
            key: "draw",
            name: "Draw Mode",
            short_name: "Draw",
            tool_order: &[0],
            tools: BOGUS,
        }];
        assert_eq!(
            Catalog::from_defs(&defs).unwrap_err(),
            CatalogError::UnknownTool("script.bogus".to_string())
        );
    }

    #[test]
    fn incomplete_catalog_is_rejected() {
        let defs = &builtin::MODES[..5];
        assert!(matches!(
            Catalog::from_defs(defs),
            Err(CatalogError::MissingMode(_))
        ));
    }

    #[test]
    fn bad_tool_order_is_rejected() {
        let mut defs = builtin::MODES.to_vec();
        defs[0].tool_order = &[0, 0, 1, 2, 3];
        assert_eq!(
            Catalog::from_defs(&defs).unwrap_err(),
            CatalogError::BadToolOrder(Mode::Weight)
        );
    }

    #[test]
    fn asset_display_overrides() {
        let catalog = Catalog::builtin().unwrap();
        let cutter = catalog.tool(Mode::Draw, 4).unwrap();
        assert_eq!(cutter.display_name(false), "Cutter");
        assert_eq!(cutter.display_name(true), "Trim");

        let transform_fill = catalog.tool(Mode::Edit, 9).unwrap();
        assert_eq!(transform_fill.display_icon(true), "weight_paint_gradient");
        assert_eq!(transform_fill.display_icon(false), "edit_transform_fill");

        assert!(catalog.tool(Mode::Sculpt, 0).unwrap().is_asset_only());
        assert!(!catalog.tool(Mode::Draw, 0).unwrap().is_asset_only());
    }

    #[test]
    fn asset_path_helpers() {
        let tint = AssetPath::new("brushes/essentials_brushes-gp_draw.blend/Brush/Tint");
        assert_eq!(tint.name(), "Tint");
        assert!(tint.is_non_draw());
        assert!(!AssetPath::new("brushes/x.blend/Brush/Pencil").is_non_draw());
    }
}
