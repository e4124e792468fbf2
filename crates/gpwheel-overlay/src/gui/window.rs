use gpwheel::geometry::Point;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, Layer, LayerShell};

/// Pointer position in widget coordinates (y down).
pub fn get_cursor_position(window: &gtk::ApplicationWindow) -> Option<(f64, f64)> {
    gdk::Display::default()
        .and_then(|d| d.default_seat())
        .and_then(|s| s.pointer())
        .zip(window.surface())
        .and_then(|(p, s)| s.device_position(&p))
        .map(|(x, y, _)| (x, y))
}

pub fn init_layer_shell(window: &gtk::ApplicationWindow) {
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some("gpwheel"));
    window.set_exclusive_zone(-1);
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::OnDemand);
}

/// Size of the monitor the window is on, or of the first monitor before it is mapped.
pub fn monitor_size(window: &gtk::ApplicationWindow) -> Option<(f64, f64)> {
    let display = gdk::Display::default()?;
    let monitor = window
        .surface()
        .and_then(|s| display.monitor_at_surface(&s))
        .or_else(|| {
            display
                .monitors()
                .item(0)
                .and_then(|item| item.downcast::<gdk::Monitor>().ok())
        })?;
    let geometry = monitor.geometry();
    Some((geometry.width() as f64, geometry.height() as f64))
}

/// Converts widget coordinates to the wheel's y-up space.
pub fn to_wheel_space(x: f64, y: f64, height: f64) -> Point {
    Point::new(x, height - y)
}

/// Converts a y-up coordinate back to widget space.
pub fn to_widget_y(y: f64, height: f64) -> f64 {
    height - y
}
