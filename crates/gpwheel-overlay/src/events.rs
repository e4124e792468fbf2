use gpwheel::catalog::{BrushAsset, Mode};

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Show,
    Hide,
    /// The host switched to another mode.
    HostMode(Mode),
    /// Whether the host has a stroke object to edit.
    Subject(bool),
    /// The host's active brush changed.
    Brush(BrushAsset),
    ConfigReload,
}
