use crate::catalog::{AssetBinding, BrushAsset, Catalog, CreationKind, Mode, ToolId, ToolKind};
use crate::prefs::Preferences;
use crate::wheel::Hit;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The single command a committed wheel sends to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SwitchMode {
        mode: Mode,
    },
    SelectTool {
        mode: Mode,
        switch_mode: bool,
        tool: ToolId,
    },
    Create {
        mode: Mode,
        switch_mode: bool,
        kind: CreationKind,
    },
    ActivateAsset {
        mode: Mode,
        switch_mode: bool,
        asset: BrushAsset,
    },
}

impl Action {
    pub fn mode(&self) -> Mode {
        match self {
            Action::SwitchMode { mode }
            | Action::SelectTool { mode, .. }
            | Action::Create { mode, .. }
            | Action::ActivateAsset { mode, .. } => *mode,
        }
    }

    pub fn switches_mode(&self) -> bool {
        match self {
            Action::SwitchMode { .. } => true,
            Action::SelectTool { switch_mode, .. }
            | Action::Create { switch_mode, .. }
            | Action::ActivateAsset { switch_mode, .. } => *switch_mode,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.switches_mode() {
            format!("{} mode, ", self.mode())
        } else {
            String::new()
        };
        match self {
            Action::SwitchMode { mode } => write!(f, "{} mode", mode),
            Action::SelectTool { tool, .. } => write!(f, "{}tool {}", prefix, tool),
            Action::Create { kind, .. } => write!(f, "{}add {}", prefix, kind),
            Action::ActivateAsset { asset, .. } => write!(f, "{}brush {}", prefix, asset.path),
        }
    }
}

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Host rejected the action: {0}")]
    Rejected(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode action: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Turns a hit into the action to issue, or `None` when the commit is a no-op.
pub fn resolve(
    catalog: &Catalog,
    prefs: &Preferences,
    hit: Hit,
    current: Option<Mode>,
    brush_assets: bool,
) -> Option<Action> {
    let mode = hit.mode?;
    let switch_mode = current != Some(mode);

    let Some(index) = hit.tool else {
        return switch_mode.then_some(Action::SwitchMode { mode });
    };
    let Some(entry) = catalog.tool(mode, index) else {
        log::warn!("Hit unknown tool {} of mode '{}'", index, mode);
        return switch_mode.then_some(Action::SwitchMode { mode });
    };

    let binding = entry.asset.as_ref().filter(|_| brush_assets);
    let action = match (&entry.kind, binding) {
        (ToolKind::Create(kind), _) => Action::Create {
            mode,
            switch_mode,
            kind: *kind,
        },
        (
            _,
            Some(AssetBinding {
                tool: Some(tool), ..
            }),
        ) => Action::SelectTool {
            mode,
            switch_mode,
            tool: tool.clone(),
        },
        (ToolKind::Builtin(own), Some(_)) => match prefs.tool_asset(catalog, mode, index) {
            Some(asset) => Action::ActivateAsset {
                mode,
                switch_mode,
                asset,
            },
            None => Action::SelectTool {
                mode,
                switch_mode,
                tool: own.clone(),
            },
        },
        (ToolKind::Builtin(tool), None) => Action::SelectTool {
            mode,
            switch_mode,
            tool: tool.clone(),
        },
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TINT_TOOL_INDEX;

    fn hit(mode: Mode, tool: Option<usize>) -> Hit {
        Hit {
            mode: Some(mode),
            tool,
        }
    }

    #[test]
    fn mode_only_commits() {
        let catalog = Catalog::builtin().unwrap();
        let prefs = Preferences::defaults(&catalog);

        assert_eq!(
            resolve(&catalog, &prefs, hit(Mode::Edit, None), Some(Mode::Draw), true),
            Some(Action::SwitchMode { mode: Mode::Edit })
        );
        assert_eq!(
            resolve(&catalog, &prefs, hit(Mode::Edit, None), Some(Mode::Edit), true),
            None
        );
        assert_eq!(
            resolve(&catalog, &prefs, Hit::default(), Some(Mode::Edit), true),
            None
        );
    }

    #[test]
    fn tool_commits_by_kind() {
        let catalog = Catalog::builtin().unwrap();
        let prefs = Preferences::defaults(&catalog);

        assert_eq!(
            resolve(&catalog, &prefs, hit(Mode::Edit, Some(1)), Some(Mode::Edit), false),
            Some(Action::SelectTool {
                mode: Mode::Edit,
                switch_mode: false,
                tool: ToolId::new("builtin.move"),
            })
        );
        assert_eq!(
            resolve(&catalog, &prefs, hit(Mode::Object, Some(6)), Some(Mode::Draw), true),
            Some(Action::Create {
                mode: Mode::Object,
                switch_mode: true,
                kind: CreationKind::StrokeObject,
            })
        );
    }

    #[test]
    fn brush_asset_hosts_use_bindings() {
        let catalog = Catalog::builtin().unwrap();
        let mut prefs = Preferences::defaults(&catalog);

        assert_eq!(
            resolve(&catalog, &prefs, hit(Mode::Draw, Some(4)), Some(Mode::Draw), true),
            Some(Action::SelectTool {
                mode: Mode::Draw,
                switch_mode: false,
                tool: ToolId::new("builtin.trim"),
            })
        );
        assert_eq!(
            resolve(&catalog, &prefs, hit(Mode::Draw, Some(4)), Some(Mode::Draw), false),
            Some(Action::SelectTool {
                mode: Mode::Draw,
                switch_mode: false,
                tool: ToolId::new("builtin.cutter"),
            })
        );

        let soft = BrushAsset::new("LOCAL", "", "Brush/Soft Tint");
        prefs
            .link_brush(&catalog, Mode::Draw, TINT_TOOL_INDEX, soft.clone())
            .unwrap();
        assert_eq!(
            resolve(
                &catalog,
                &prefs,
                hit(Mode::Draw, Some(TINT_TOOL_INDEX)),
                Some(Mode::Sculpt),
                true
            ),
            Some(Action::ActivateAsset {
                mode: Mode::Draw,
                switch_mode: true,
                asset: soft,
            })
        );
    }

    #[test]
    fn actions_serialize_tagged() {
        let action = Action::SwitchMode { mode: Mode::Sculpt };
        assert_eq!(
            serde_json::to_string(&action).unwrap(),
            r#"{"action":"switch_mode","mode":"sculpt"}"#
        );
        assert_eq!(action.to_string(), "sculpt mode");
    }
}
