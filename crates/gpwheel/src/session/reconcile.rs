//! Follow-up for hosts that quietly swap in a non-drawing brush after the Draw tool is
//! selected.

use super::action::Action;
use crate::catalog::{AssetPath, BrushAsset, Catalog, DRAW_TOOL_INDEX, Mode};
use std::time::Duration;

pub const BRUSH_CHECK_DELAY: Duration = Duration::from_millis(250);

/// The last drawing brush the host reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawBrushMemory {
    last: Option<BrushAsset>,
}

impl DrawBrushMemory {
    /// Returns false and keeps the previous brush for Fill, Tint and Eraser brushes.
    pub fn remember(&mut self, asset: BrushAsset) -> bool {
        if asset.path.is_non_draw() {
            return false;
        }
        self.last = Some(asset);
        true
    }

    pub fn last(&self) -> Option<&BrushAsset> {
        self.last.as_ref()
    }
}

/// A one-shot check to run `delay` after a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrushCheck {
    pub delay: Duration,
    pub expected: BrushAsset,
}

impl BrushCheck {
    /// Only a commit of Draw mode's Draw tool on a brush-asset host needs a check.
    pub fn for_commit(
        catalog: &Catalog,
        memory: &DrawBrushMemory,
        mode: Mode,
        tool: usize,
        brush_assets: bool,
    ) -> Option<Self> {
        if !brush_assets || mode != Mode::Draw || tool != DRAW_TOOL_INDEX {
            return None;
        }
        let expected = memory.last().cloned().or_else(|| {
            catalog
                .tool(Mode::Draw, DRAW_TOOL_INDEX)
                .and_then(|t| t.asset.as_ref())
                .and_then(|a| a.default_asset.clone())
        })?;
        Some(Self {
            delay: BRUSH_CHECK_DELAY,
            expected,
        })
    }

    /// The correcting action, if the host ended up on a non-drawing brush.
    pub fn correction(&self, active: Option<&AssetPath>) -> Option<Action> {
        active.filter(|path| path.is_non_draw()).map(|_| Action::ActivateAsset {
            mode: Mode::Draw,
            switch_mode: false,
            asset: self.expected.clone(),
        })
    }
}
