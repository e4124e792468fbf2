use super::layout::{PositionedBox, Slot, Wheel};
use super::{DEADZONE, SECTOR_COUNT};
use crate::catalog::Mode;
use crate::geometry::Point;
use serde::Serialize;

/// 45° sectors, counter-clockwise from the positive x axis, to slots. Sectors outnumber
/// slots, so the top and bottom slots take two sectors each.
pub const SECTOR_TO_SLOT: [Slot; SECTOR_COUNT] = [
    Slot::UpperRight,
    Slot::Top,
    Slot::Top,
    Slot::UpperLeft,
    Slot::LowerLeft,
    Slot::Bottom,
    Slot::Bottom,
    Slot::LowerRight,
];

/// The mode and tool under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Hit {
    pub mode: Option<Mode>,
    pub tool: Option<usize>,
}

/// Direction of the pointer from the anchor in degrees, `[0, 360)`. `None` inside the
/// deadzone.
pub fn pointer_angle(pointer: Point, anchor: Point) -> Option<f64> {
    let (dx, dy) = (pointer.x - anchor.x, pointer.y - anchor.y);
    if dx.abs() <= DEADZONE && dy.abs() <= DEADZONE {
        return None;
    }
    Some(dy.atan2(dx).to_degrees().rem_euclid(360.0))
}

pub fn sector_slot(angle: f64) -> Slot {
    // rem_euclid can round up to exactly 360
    SECTOR_TO_SLOT[(angle / 45.0) as usize % SECTOR_COUNT]
}

/// Resolves the box by pointer direction, unless the pointer is inside a box, then the
/// button under the pointer within that box.
pub fn hit_test(pointer: Point, anchor: Point, boxes: &[PositionedBox]) -> Hit {
    let by_angle = pointer_angle(pointer, anchor)
        .map(sector_slot)
        .and_then(|slot| boxes.iter().find(|b| b.slot == slot));

    let active = boxes
        .iter()
        .find(|b| b.rect.contains(pointer))
        .or(by_angle);

    match active {
        Some(b) => Hit {
            mode: Some(b.mode),
            tool: b
                .buttons
                .iter()
                .find(|button| button.rect.contains(pointer))
                .map(|button| button.tool),
        },
        None => Hit::default(),
    }
}

impl Wheel {
    pub fn hit(&self, pointer: Point) -> Hit {
        hit_test(pointer, self.anchor, &self.boxes)
    }
}
