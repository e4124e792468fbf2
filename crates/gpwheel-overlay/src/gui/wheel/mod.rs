pub mod host;
pub mod view;

pub use host::OverlayHost;
pub use view::draw;

/// Radius of the center wheel, before ui scale.
pub const WHEEL_RADIUS: f64 = 19.0;
pub const DIRECTION_DOT_RADIUS: f64 = 3.0;
pub const BOX_CORNER_RADIUS: f64 = 4.0;
pub const TITLE_FONT_SIZE: f64 = 11.0;
pub const HINT_FONT_SIZE: f64 = 11.0;
pub const ICON_TEXT_FONT_SIZE: f64 = 9.0;
