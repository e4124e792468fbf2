use super::{
    ActiveMode, BOX_ANGLE_DEG, BOX_PADDING, BOX_SPACING, BUTTON_IMG_PADDING, BUTTON_IMG_SIZE,
    BUTTON_SIZE, BUTTONS_PER_ROW, TITLE_HEIGHT,
};
use crate::catalog::Mode;
use crate::geometry::{Point, Rect, Viewport};
use serde::Serialize;
use strum::{EnumCount, EnumIter, IntoEnumIterator};
use thiserror::Error;

/// The six fixed positions a mode box can take around the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumCount)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    UpperLeft,
    Top,
    UpperRight,
    LowerRight,
    Bottom,
    LowerLeft,
}

impl Slot {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::iter().nth(idx)
    }

    /// Upper boxes grow away from the anchor, so their button rows stack bottom to top.
    pub fn opens_upward(&self) -> bool {
        matches!(self, Slot::UpperLeft | Slot::Top | Slot::UpperRight)
    }

    pub fn fills_right_to_left(&self) -> bool {
        matches!(self, Slot::UpperLeft | Slot::LowerLeft)
    }

    fn offset(&self, template: &Template, height: f64) -> (f64, f64) {
        let Template {
            width,
            dx,
            dy,
            r_half,
            w_half,
        } = *template;
        match self {
            Slot::UpperLeft => (-dx - width, dy + height),
            Slot::Top => (-w_half, r_half + height),
            Slot::UpperRight => (dx, dy + height),
            Slot::LowerRight => (dx, -dy),
            Slot::Bottom => (-w_half, -r_half),
            Slot::LowerLeft => (-dx - width, -dy),
        }
    }
}

/// Slots used for 1 to 6 active modes, in display order.
pub const BOX_LAYOUTS: [&[Slot]; Slot::COUNT] = [
    &[Slot::Top],
    &[Slot::Top, Slot::Bottom],
    &[Slot::UpperLeft, Slot::Top, Slot::UpperRight],
    &[Slot::UpperLeft, Slot::Top, Slot::UpperRight, Slot::Bottom],
    &[
        Slot::UpperLeft,
        Slot::Top,
        Slot::UpperRight,
        Slot::LowerRight,
        Slot::LowerLeft,
    ],
    &[
        Slot::UpperLeft,
        Slot::Top,
        Slot::UpperRight,
        Slot::LowerRight,
        Slot::Bottom,
        Slot::LowerLeft,
    ],
];

pub fn slots_for(count: usize) -> Option<&'static [Slot]> {
    count
        .checked_sub(1)
        .and_then(|i| BOX_LAYOUTS.get(i))
        .copied()
}

/// Polar offsets shared by every slot, derived from the box width.
#[derive(Debug, Clone, Copy)]
struct Template {
    width: f64,
    dx: f64,
    dy: f64,
    r_half: f64,
    w_half: f64,
}

impl Template {
    fn new(width: f64, ui_scale: f64) -> Self {
        let radius = width + BOX_SPACING * ui_scale;
        let angle = BOX_ANGLE_DEG.to_radians();
        Self {
            width,
            dx: angle.cos() * radius,
            dy: angle.sin() * radius,
            r_half: (radius * 0.5).trunc(),
            w_half: (width * 0.5).trunc(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("No mode has an enabled tool")]
    NoActiveModes,
    #[error("The wheel holds at most 6 modes, got {0}")]
    TooManyModes(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedButton {
    pub tool: usize,
    /// Square hit area of the button.
    pub rect: Rect,
    pub icon: Rect,
    pub row: usize,
    pub column: usize,
    pub separator_right: bool,
    pub separator_top: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedBox {
    pub slot: Slot,
    pub mode: Mode,
    pub name: &'static str,
    pub hotkey: u8,
    pub rect: Rect,
    pub rows: usize,
    pub upward: bool,
    /// Baseline origin of the box title.
    pub title: Point,
    pub buttons: Vec<PositionedButton>,
}

impl PositionedBox {
    fn new(slot: Slot, active: &ActiveMode, rows: usize, rect: Rect, ui_scale: f64) -> Self {
        let pad = BOX_PADDING * ui_scale;
        let bsize = BUTTON_SIZE * ui_scale;
        let img_size = (BUTTON_IMG_SIZE * ui_scale).round();
        let img_pad = BUTTON_IMG_PADDING * ui_scale;
        let upward = slot.opens_upward();
        let right_to_left = slot.fills_right_to_left();

        let buttons = active
            .tools
            .iter()
            .enumerate()
            .map(|(i, &tool)| {
                let row = i / BUTTONS_PER_ROW;
                let step = i % BUTTONS_PER_ROW;
                let column = if right_to_left {
                    BUTTONS_PER_ROW - 1 - step
                } else {
                    step
                };

                let x = rect.left + pad + bsize * column as f64;
                let top = if upward {
                    rect.bottom + pad + bsize * (row + 1) as f64
                } else {
                    rect.top() - pad - bsize * row as f64
                };

                PositionedButton {
                    tool,
                    rect: Rect::from_top_left(x, top, bsize, bsize),
                    icon: Rect::from_top_left(x + img_pad, top - img_pad, img_size, img_size),
                    row,
                    column,
                    separator_right: column != BUTTONS_PER_ROW - 1,
                    separator_top: column == 0
                        && if upward { row + 1 < rows } else { row > 0 },
                }
            })
            .collect();

        let title = if upward {
            Point::new(
                rect.left + pad,
                rect.top() - pad - TITLE_HEIGHT * ui_scale + 7.0 * ui_scale,
            )
        } else {
            Point::new(rect.left + pad, rect.bottom + pad + 3.0)
        };

        Self {
            slot,
            mode: active.mode,
            name: active.name,
            hotkey: active.hotkey,
            rect,
            rows,
            upward,
            title,
            buttons,
        }
    }
}

/// A laid-out wheel, fixed for the lifetime of one open session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wheel {
    /// Wheel center after clamping.
    pub anchor: Point,
    /// The translation applied to keep the wheel inside the viewport.
    pub shift: Point,
    pub ui_scale: f64,
    pub boxes: Vec<PositionedBox>,
}

impl Wheel {
    pub fn bounds(&self) -> Option<Rect> {
        self.boxes.iter().map(|b| b.rect).reduce(Rect::union)
    }

    pub fn box_for(&self, mode: Mode) -> Option<&PositionedBox> {
        self.boxes.iter().find(|b| b.mode == mode)
    }

    pub fn box_in(&self, slot: Slot) -> Option<&PositionedBox> {
        self.boxes.iter().find(|b| b.slot == slot)
    }

    pub fn mode_for_hotkey(&self, hotkey: u8) -> Option<Mode> {
        self.boxes
            .iter()
            .find(|b| b.hotkey == hotkey)
            .map(|b| b.mode)
    }
}

fn box_height(rows: usize, ui_scale: f64) -> f64 {
    ((2.0 * BOX_PADDING + rows as f64 * BUTTON_SIZE + TITLE_HEIGHT) * ui_scale).round()
}

/// One translation bringing `bounds` inside `usable`. When the wheel cannot fit, it is
/// pinned to the right and top edges.
fn clamp_shift(bounds: Rect, usable: Rect) -> Point {
    let mut dx = 0.0;
    if bounds.left < usable.left {
        dx = usable.left - bounds.left;
    }
    if bounds.right() + dx > usable.right() {
        dx = usable.right() - bounds.right();
    }

    let mut dy = 0.0;
    if bounds.bottom < usable.bottom {
        dy = usable.bottom - bounds.bottom;
    }
    if bounds.top() + dy > usable.top() {
        dy = usable.top() - bounds.top();
    }

    Point::new(dx, dy)
}

/// Lays out one box per active mode around `anchor`, in the slots reserved for that many
/// modes, then shifts the whole wheel inside the viewport's usable area.
pub fn arrange(
    active: &[ActiveMode],
    anchor: Point,
    viewport: &Viewport,
    ui_scale: f64,
) -> Result<Wheel, LayoutError> {
    let slots = match active.len() {
        0 => return Err(LayoutError::NoActiveModes),
        n => slots_for(n).ok_or(LayoutError::TooManyModes(n))?,
    };

    let width =
        ((2.0 * BOX_PADDING + BUTTONS_PER_ROW as f64 * BUTTON_SIZE) * ui_scale).round();
    let template = Template::new(width, ui_scale);

    let placed: Vec<_> = slots
        .iter()
        .zip(active)
        .map(|(&slot, mode)| {
            let rows = mode.tools.len().div_ceil(BUTTONS_PER_ROW);
            let height = box_height(rows, ui_scale);
            let (left, top) = slot.offset(&template, height);
            let rect = Rect::from_top_left(anchor.x + left, anchor.y + top, width, height);
            (slot, mode, rows, rect)
        })
        .collect();

    let bounds = placed
        .iter()
        .map(|(_, _, _, rect)| *rect)
        .reduce(Rect::union)
        .ok_or(LayoutError::NoActiveModes)?;
    let shift = clamp_shift(bounds, viewport.usable());
    if shift != Point::default() {
        log::debug!("Shifting wheel by ({}, {}) to fit the viewport", shift.x, shift.y);
    }

    let boxes = placed
        .into_iter()
        .map(|(slot, mode, rows, rect)| {
            PositionedBox::new(slot, mode, rows, rect.translate(shift.x, shift.y), ui_scale)
        })
        .collect();

    Ok(Wheel {
        anchor: anchor.offset(shift.x, shift.y),
        shift,
        ui_scale,
        boxes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Insets;

    fn active(specs: &[(Mode, usize)]) -> Vec<ActiveMode> {
        specs
            .iter()
            .enumerate()
            .map(|(i, &(mode, count))| ActiveMode {
                mode,
                name: "Mode",
                short_name: "M",
                tools: (0..count).collect(),
                hotkey: i as u8 + 1,
            })
            .collect()
    }

    fn first_n(n: usize) -> Vec<ActiveMode> {
        let specs: Vec<_> = Mode::iter().take(n).map(|m| (m, 4)).collect();
        active(&specs)
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    fn roomy() -> Viewport {
        Viewport::new(2000.0, 2000.0, Insets::default())
    }

    fn unbounded() -> Viewport {
        Viewport::new(1e6, 1e6, Insets::new(-1e6, 0.0, 0.0, -1e6))
    }

    #[test]
    fn slots_follow_layout_table() {
        for n in 1..=6 {
            let wheel = arrange(&first_n(n), Point::new(1000.0, 1000.0), &roomy(), 1.0).unwrap();
            let slots: Vec<_> = wheel.boxes.iter().map(|b| b.slot).collect();
            assert_eq!(slots, BOX_LAYOUTS[n - 1], "layout for {} modes", n);
        }
    }

    #[test]
    fn empty_and_oversized_inputs_fail() {
        assert_eq!(
            arrange(&[], Point::new(0.0, 0.0), &roomy(), 1.0),
            Err(LayoutError::NoActiveModes)
        );
        let mut seven = first_n(6);
        seven.push(seven[0].clone());
        assert_eq!(
            arrange(&seven, Point::new(0.0, 0.0), &roomy(), 1.0),
            Err(LayoutError::TooManyModes(7))
        );
    }

    #[test]
    fn draw_edit_object_take_upper_slots() {
        let modes = active(&[(Mode::Draw, 12), (Mode::Edit, 8), (Mode::Object, 8)]);
        let wheel = arrange(&modes, Point::new(1000.0, 1000.0), &roomy(), 1.0).unwrap();
        let assigned: Vec<_> = wheel.boxes.iter().map(|b| (b.slot, b.mode)).collect();
        assert_eq!(
            assigned,
            vec![
                (Slot::UpperLeft, Mode::Draw),
                (Slot::Top, Mode::Edit),
                (Slot::UpperRight, Mode::Object)
            ]
        );
    }

    #[test]
    fn rows_round_up() {
        let modes = active(&[(Mode::Draw, 5), (Mode::Edit, 9), (Mode::Object, 4)]);
        let wheel = arrange(&modes, Point::new(1000.0, 1000.0), &roomy(), 1.0).unwrap();
        let rows: Vec<_> = wheel.boxes.iter().map(|b| b.rows).collect();
        assert_eq!(rows, vec![2, 3, 1]);
        assert_eq!(wheel.boxes[0].rect.height, 2.0 * 4.0 + 2.0 * 37.0 + 18.0);
        assert_eq!(wheel.boxes[1].rect.height, 2.0 * 4.0 + 3.0 * 37.0 + 18.0);
        assert_eq!(wheel.boxes[1].rect.width, 156.0);
    }

    #[test]
    fn boxes_sit_on_polar_template() {
        let anchor = Point::new(1000.0, 1000.0);
        let wheel = arrange(&first_n(6), anchor, &roomy(), 1.0).unwrap();
        let radius: f64 = 156.0 - 65.0;
        let dx = 3.5f64.to_radians().cos() * radius;
        let dy = 3.5f64.to_radians().sin() * radius;
        let h = wheel.boxes[0].rect.height;

        let top = wheel.box_in(Slot::Top).unwrap().rect;
        assert_eq!((top.left, top.bottom), (1000.0 - 78.0, 1000.0 + 45.0));

        let bottom = wheel.box_in(Slot::Bottom).unwrap().rect;
        assert_eq!((bottom.left, bottom.top()), (1000.0 - 78.0, 1000.0 - 45.0));

        let upper_left = wheel.box_in(Slot::UpperLeft).unwrap().rect;
        assert_close(upper_left.right(), 1000.0 - dx);
        assert_close(upper_left.top(), 1000.0 + dy + h);

        let lower_right = wheel.box_in(Slot::LowerRight).unwrap().rect;
        assert_close(lower_right.left, 1000.0 + dx);
        assert_close(lower_right.top(), 1000.0 - dy);
    }

    #[test]
    fn fitting_wheel_is_not_shifted() {
        let anchor = Point::new(1000.0, 1000.0);
        let wheel = arrange(&first_n(6), anchor, &roomy(), 1.5).unwrap();
        assert_eq!(wheel.shift, Point::default());
        assert_eq!(wheel.anchor, anchor);
        assert_eq!(
            wheel,
            arrange(&first_n(6), anchor, &unbounded(), 1.5).unwrap()
        );
    }

    #[test]
    fn clamping_is_one_rigid_shift() {
        let anchor = Point::new(20.0, 30.0);
        let viewport = Viewport::new(1200.0, 900.0, Insets::new(40.0, 3.0, 52.0, 102.0));
        let clamped = arrange(&first_n(5), anchor, &viewport, 1.0).unwrap();
        let free = arrange(&first_n(5), anchor, &unbounded(), 1.0).unwrap();

        let shift = clamped.shift;
        assert!(shift.x > 0.0 && shift.y > 0.0);
        assert_eq!(clamped.anchor, anchor.offset(shift.x, shift.y));
        for (c, f) in clamped.boxes.iter().zip(&free.boxes) {
            assert_eq!(c.rect, f.rect.translate(shift.x, shift.y));
        }

        let bounds = clamped.bounds().unwrap();
        assert_close(bounds.left, 40.0);
        assert_close(bounds.bottom, 102.0);
    }

    #[test]
    fn wheel_near_top_right_corner_is_pushed_back() {
        let anchor = Point::new(1180.0, 880.0);
        let viewport = Viewport::new(1200.0, 900.0, Insets::new(40.0, 30.0, 52.0, 102.0));
        let clamped = arrange(&first_n(5), anchor, &viewport, 1.0).unwrap();
        let free = arrange(&first_n(5), anchor, &unbounded(), 1.0).unwrap();

        let shift = clamped.shift;
        assert!(shift.x < 0.0 && shift.y < 0.0);
        assert_eq!(clamped.anchor, anchor.offset(shift.x, shift.y));
        for (c, f) in clamped.boxes.iter().zip(&free.boxes) {
            assert_eq!(c.rect, f.rect.translate(shift.x, shift.y));
        }

        let bounds = clamped.bounds().unwrap();
        assert_close(bounds.right(), 1170.0);
        assert_close(bounds.top(), 848.0);
        assert!(bounds.left > 40.0);
        assert!(bounds.bottom > 102.0);
    }

    #[test]
    fn oversized_wheel_pins_to_right_and_top() {
        let viewport = Viewport::new(300.0, 200.0, Insets::new(3.0, 3.0, 2.0, 2.0));
        let wheel = arrange(&first_n(6), Point::new(150.0, 100.0), &viewport, 1.0).unwrap();
        let bounds = wheel.bounds().unwrap();
        assert_close(bounds.right(), 297.0);
        assert_close(bounds.top(), 198.0);
        assert!(bounds.left < 3.0);
    }

    #[test]
    fn buttons_fill_grid_per_slot() {
        let modes = active(&[
            (Mode::Draw, 5),
            (Mode::Edit, 5),
            (Mode::Object, 5),
            (Mode::Weight, 5),
        ]);
        let wheel = arrange(&modes, Point::new(1000.0, 1000.0), &roomy(), 1.0).unwrap();

        let upper_left = wheel.box_in(Slot::UpperLeft).unwrap();
        let columns: Vec<_> = upper_left.buttons.iter().map(|b| b.column).collect();
        assert_eq!(columns, vec![3, 2, 1, 0, 3]);
        let first = &upper_left.buttons[0];
        assert_close(first.rect.top(), upper_left.rect.bottom + 4.0 + 37.0);
        assert_close(first.rect.left, upper_left.rect.left + 4.0 + 3.0 * 37.0);
        assert_close(upper_left.buttons[4].rect.bottom, first.rect.top());

        let bottom = wheel.box_in(Slot::Bottom).unwrap();
        let columns: Vec<_> = bottom.buttons.iter().map(|b| b.column).collect();
        assert_eq!(columns, vec![0, 1, 2, 3, 0]);
        assert_eq!(bottom.buttons[0].rect.top(), bottom.rect.top() - 4.0);
        assert_eq!(bottom.buttons[4].rect.top(), bottom.rect.top() - 4.0 - 37.0);

        let icon = bottom.buttons[0].icon;
        assert_eq!(icon.width, 32.0);
        assert_eq!(icon.left, bottom.buttons[0].rect.left + 2.0);
        assert_eq!(icon.top(), bottom.buttons[0].rect.top() - 2.0);
    }

    #[test]
    fn separators_follow_row_and_column() {
        let modes = active(&[(Mode::Draw, 9), (Mode::Edit, 9)]);
        let wheel = arrange(&modes, Point::new(1000.0, 1000.0), &roomy(), 1.0).unwrap();

        // Top opens upward: the last row has no top separator.
        let top = wheel.box_in(Slot::Top).unwrap();
        let flags: Vec<_> = top
            .buttons
            .iter()
            .map(|b| (b.separator_right, b.separator_top))
            .collect();
        assert_eq!(flags[0], (true, true));
        assert_eq!(flags[3], (false, false));
        assert_eq!(flags[4], (true, true));
        assert_eq!(flags[8], (true, false));

        let bottom = wheel.box_in(Slot::Bottom).unwrap();
        assert!(!bottom.buttons[0].separator_top);
        assert!(bottom.buttons[4].separator_top);
        assert!(bottom.buttons[8].separator_top);
    }

    #[test]
    fn title_anchors() {
        let wheel = arrange(&first_n(2), Point::new(1000.0, 1000.0), &roomy(), 2.0).unwrap();
        let top = wheel.box_in(Slot::Top).unwrap();
        assert_eq!(top.title.x, top.rect.left + 8.0);
        assert_eq!(top.title.y, top.rect.top() - 8.0 - 36.0 + 14.0);

        let bottom = wheel.box_in(Slot::Bottom).unwrap();
        assert_eq!(bottom.title.y, bottom.rect.bottom + 8.0 + 3.0);
    }

    #[test]
    fn hotkeys_map_to_modes() {
        let wheel = arrange(&first_n(3), Point::new(1000.0, 1000.0), &roomy(), 1.0).unwrap();
        assert_eq!(wheel.mode_for_hotkey(2), Some(Mode::Draw));
        assert_eq!(wheel.mode_for_hotkey(4), None);
    }
}
