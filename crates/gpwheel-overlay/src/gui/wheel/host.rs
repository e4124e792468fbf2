use crate::config::OverlayConfig;
use crate::gui::window;
use gpwheel::catalog::{AssetPath, BrushAsset, Mode};
use gpwheel::geometry::Viewport;
use gpwheel::session::{Action, ActionError, Host};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use std::io::{self, Write};

/// Runs the wheel on a fullscreen layer-shell window and reports actions on stdout.
pub struct OverlayHost {
    window: gtk::ApplicationWindow,
    drawing_area: gtk::DrawingArea,
    config: OverlayConfig,
    mode: Option<Mode>,
    subject: bool,
    active_brush: Option<BrushAsset>,
    out: Box<dyn Write>,
}

impl OverlayHost {
    pub fn new(
        window: gtk::ApplicationWindow,
        drawing_area: gtk::DrawingArea,
        config: OverlayConfig,
    ) -> Self {
        Self {
            window,
            drawing_area,
            config,
            mode: None,
            subject: true,
            active_brush: None,
            out: Box::new(io::stdout()),
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: OverlayConfig) {
        self.config = config;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = Some(mode);
    }

    pub fn set_subject(&mut self, subject: bool) {
        self.subject = subject;
    }

    pub fn set_active_brush(&mut self, asset: BrushAsset) {
        self.active_brush = Some(asset);
    }

    /// Height used to flip between widget and wheel coordinates.
    pub fn height(&self) -> f64 {
        self.viewport().height
    }
}

impl Host for OverlayHost {
    type Indicator = Option<gdk::Cursor>;

    fn viewport(&self) -> Viewport {
        let (width, height) = match (self.drawing_area.width(), self.drawing_area.height()) {
            (w, h) if w > 0 && h > 0 => (w as f64, h as f64),
            _ => window::monitor_size(&self.window).unwrap_or_default(),
        };
        Viewport::new(width, height, self.config.insets())
    }

    fn ui_scale(&self) -> f64 {
        self.config.ui_scale
    }

    fn has_subject(&self) -> bool {
        self.subject
    }

    fn current_mode(&self) -> Option<Mode> {
        self.mode
    }

    fn brush_assets(&self) -> bool {
        self.config.brush_assets
    }

    fn active_brush(&self) -> Option<AssetPath> {
        self.active_brush.as_ref().map(|a| a.path.clone())
    }

    fn suppress_indicator(&mut self) -> Self::Indicator {
        let previous = self.window.cursor();
        self.window.set_cursor_from_name(Some("default"));
        previous
    }

    fn restore_indicator(&mut self, indicator: Self::Indicator) {
        self.window.set_cursor(indicator.as_ref());
    }

    fn attach(&mut self) {
        self.window.set_visible(true);
        self.window.present();
    }

    fn detach(&mut self) {
        self.window.set_visible(false);
    }

    fn request_redraw(&mut self) {
        self.drawing_area.queue_draw();
    }

    fn issue(&mut self, action: &Action) -> Result<(), ActionError> {
        let line = serde_json::to_string(action)?;
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        if action.switches_mode() {
            self.mode = Some(action.mode());
        }
        Ok(())
    }
}
