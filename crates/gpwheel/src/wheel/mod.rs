use crate::catalog::Mode;
use serde::Serialize;

pub mod hit;
pub mod layout;
pub mod preview;

pub use hit::{Hit, hit_test, pointer_angle};
pub use layout::{LayoutError, PositionedBox, PositionedButton, Slot, Wheel, arrange};
pub use preview::preview_grid;

pub const BUTTON_IMG_SIZE: f64 = 32.0;
pub const BUTTON_IMG_PADDING: f64 = 2.0;
pub const BUTTON_SIZE: f64 = BUTTON_IMG_SIZE + 2.0 * BUTTON_IMG_PADDING + 1.0;
pub const BOX_PADDING: f64 = 4.0;
pub const BUTTONS_PER_ROW: usize = 4;
pub const TITLE_HEIGHT: f64 = 18.0;
pub const BOX_SPACING: f64 = -65.0; // boxes overlap the wheel radius by this much
pub const BOX_ANGLE_DEG: f64 = 3.5; // skew between opposite boxes
pub const DEADZONE: f64 = 3.0; // per axis, in pixels
pub const SLOT_COUNT: usize = 6;
pub const SECTOR_COUNT: usize = 8;
pub const HINT_WIDTH: f64 = 100.0;
pub const HINT_HEIGHT: f64 = 20.0;

/// A mode with at least one enabled tool, as shown in one box of the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveMode {
    pub mode: Mode,
    pub name: &'static str,
    pub short_name: &'static str,
    /// Enabled tool indices, in the catalog's tool order.
    pub tools: Vec<usize>,
    /// 1-based display rank, also the number key that commits this mode.
    pub hotkey: u8,
}
