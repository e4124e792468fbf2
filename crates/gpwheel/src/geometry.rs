//! Region-space geometry.
//!
//! All coordinates are in the viewport's region space: the origin is the bottom-left
//! corner and y grows upward, so a rectangle's `top` is its largest y.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    /// Builds a rectangle from its top-left corner, the way boxes and buttons are anchored.
    pub fn from_top_left(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(left, top - height, width, height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }

    /// Edges are inclusive.
    pub fn contains(&self, p: Point) -> bool {
        self.left <= p.x && p.x <= self.right() && self.bottom <= p.y && p.y <= self.top()
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            left: self.left + dx,
            bottom: self.bottom + dy,
            ..self
        }
    }

    pub fn union(self, other: Rect) -> Self {
        let left = self.left.min(other.left);
        let bottom = self.bottom.min(other.bottom);
        let right = self.right().max(other.right());
        let top = self.top().max(other.top());
        Self::new(left, bottom, right - left, top - bottom)
    }
}

/// Space reserved along each edge of the viewport by panels, headers and shelves.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

const MIN_SIDE_INSET: f64 = 3.0;
const MIN_EDGE_INSET: f64 = 2.0;

impl Insets {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Side panels occlude by their widest member, headers and asset shelves stack up.
    pub fn from_regions(regions: &[Region]) -> Self {
        regions.iter().fold(
            Self::new(MIN_SIDE_INSET, MIN_SIDE_INSET, MIN_EDGE_INSET, MIN_EDGE_INSET),
            |mut acc, region| {
                match region.kind {
                    RegionKind::LeftPanel => acc.left = acc.left.max(region.width),
                    RegionKind::RightPanel => acc.right = acc.right.max(region.width),
                    RegionKind::Header | RegionKind::ToolHeader => acc.top += region.height,
                    RegionKind::AssetShelf | RegionKind::AssetShelfHeader => {
                        acc.bottom += region.height
                    }
                    RegionKind::Other => {}
                }
                acc
            },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    LeftPanel,
    RightPanel,
    Header,
    ToolHeader,
    AssetShelf,
    AssetShelfHeader,
    Other,
}

/// A host panel overlapping the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub kind: RegionKind,
    pub width: f64,
    pub height: f64,
}

/// The area the wheel may occupy, queried from the host at every open.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub insets: Insets,
}

impl Viewport {
    pub fn new(width: f64, height: f64, insets: Insets) -> Self {
        Self {
            width,
            height,
            insets,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The part of the viewport not covered by the insets.
    pub fn usable(&self) -> Rect {
        Rect::new(
            self.insets.left,
            self.insets.bottom,
            self.width - self.insets.left - self.insets.right,
            self.height - self.insets.bottom - self.insets.top,
        )
    }
}
