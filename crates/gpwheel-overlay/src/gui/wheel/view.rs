use super::{
    BOX_CORNER_RADIUS, DIRECTION_DOT_RADIUS, HINT_FONT_SIZE, ICON_TEXT_FONT_SIZE,
    TITLE_FONT_SIZE, WHEEL_RADIUS,
};
use crate::gui::icons::{ICON_SIZE, IconCache};
use crate::gui::theme::{WheelColors, with_alpha};
use crate::gui::window::to_widget_y;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use gpwheel::catalog::Catalog;
use gpwheel::geometry::{Point, Rect};
use gpwheel::session::Frame;
use gpwheel::wheel::{
    BOX_PADDING, HINT_HEIGHT, HINT_WIDTH, PositionedBox, PositionedButton, Slot, TITLE_HEIGHT,
};
use palette::Srgba;
use std::f64::consts::PI;

/// Draws in widget space from wheel-space (y up) geometry.
struct Painter<'a> {
    cr: &'a Context,
    height: f64,
    scale: f64,
}

impl Painter<'_> {
    fn point(&self, p: Point) -> (f64, f64) {
        (p.x, to_widget_y(p.y, self.height))
    }

    /// Top-left corner plus size.
    fn rect(&self, r: &Rect) -> (f64, f64, f64, f64) {
        (r.left, to_widget_y(r.top(), self.height), r.width, r.height)
    }

    fn source(&self, color: Srgba<f64>) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }

    fn rounded_rect(&self, r: &Rect, radius: f64) {
        let (x, y, w, h) = self.rect(r);
        let radius = radius.min(w / 2.0).min(h / 2.0);
        self.cr.new_sub_path();
        self.cr.arc(x + w - radius, y + radius, radius, -PI / 2.0, 0.0);
        self.cr.arc(x + w - radius, y + h - radius, radius, 0.0, PI / 2.0);
        self.cr.arc(x + radius, y + h - radius, radius, PI / 2.0, PI);
        self.cr.arc(x + radius, y + radius, radius, PI, 1.5 * PI);
        self.cr.close_path();
    }

    fn circle(
        &self,
        center: (f64, f64),
        radius: f64,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        self.source(color);
        self.cr.new_sub_path();
        self.cr.arc(center.0, center.1, radius, 0.0, 2.0 * PI);
        self.cr.fill()
    }

    fn line(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        self.source(color);
        self.cr.set_line_width(1.0);
        // snap to pixel centers
        self.cr.move_to(from.0.floor() + 0.5, from.1.floor() + 0.5);
        self.cr.line_to(to.0.floor() + 0.5, to.1.floor() + 0.5);
        self.cr.stroke()
    }

    fn text_at(
        &self,
        text: &str,
        at: (f64, f64),
        size: f64,
        bold: bool,
    ) -> Result<(), cairo::Error> {
        let weight = if bold {
            cairo::FontWeight::Bold
        } else {
            cairo::FontWeight::Normal
        };
        self.cr.select_font_face("Sans", cairo::FontSlant::Normal, weight);
        self.cr.set_font_size(size * self.scale);
        self.cr.move_to(at.0, at.1);
        self.cr.show_text(text)
    }

    fn text_centered(&self, text: &str, center: (f64, f64), size: f64) -> Result<(), cairo::Error> {
        self.cr
            .select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        self.cr.set_font_size(size * self.scale);
        let ext = self.cr.text_extents(text)?;
        self.cr.move_to(
            center.0 - ext.width() / 2.0 - ext.x_bearing(),
            center.1 + ext.height() / 2.0,
        );
        self.cr.show_text(text)
    }
}

struct BoxRenderer<'a> {
    positioned: &'a PositionedBox,
    hovered: bool,
    hovered_tool: Option<usize>,
}

impl BoxRenderer<'_> {
    fn draw(
        &self,
        p: &Painter,
        catalog: &Catalog,
        icons: &IconCache,
        brush_assets: bool,
        colors: &WheelColors,
    ) -> Result<(), cairo::Error> {
        self.draw_background(p, colors)?;
        for button in &self.positioned.buttons {
            self.draw_button(p, button, catalog, icons, brush_assets, colors)?;
        }
        self.draw_title(p, colors)
    }

    fn title_band(&self, scale: f64) -> Rect {
        let b = &self.positioned.rect;
        let band = TITLE_HEIGHT * scale + BOX_PADDING * scale;
        if self.positioned.upward {
            Rect::new(b.left, b.top() - band, b.width, band)
        } else {
            Rect::new(b.left, b.bottom, b.width, band)
        }
    }

    fn draw_background(&self, p: &Painter, colors: &WheelColors) -> Result<(), cairo::Error> {
        let radius = BOX_CORNER_RADIUS * p.scale;
        let (fill, title) = if self.hovered {
            (colors.box_hovered, colors.title_hovered)
        } else {
            (colors.box_bg, colors.title_bg)
        };

        p.rounded_rect(&self.positioned.rect, radius);
        p.source(fill);
        p.cr.fill()?;

        p.cr.save()?;
        p.rounded_rect(&self.positioned.rect, radius);
        p.cr.clip();
        let (x, y, w, h) = p.rect(&self.title_band(p.scale));
        p.cr.rectangle(x, y, w, h);
        p.source(title);
        p.cr.fill()?;
        p.cr.restore()
    }

    fn draw_button(
        &self,
        p: &Painter,
        button: &PositionedButton,
        catalog: &Catalog,
        icons: &IconCache,
        brush_assets: bool,
        colors: &WheelColors,
    ) -> Result<(), cairo::Error> {
        if self.hovered_tool == Some(button.tool) {
            p.rounded_rect(&button.rect, BOX_CORNER_RADIUS * p.scale / 2.0);
            p.source(colors.button_hovered);
            p.cr.fill()?;
        }

        let separator = with_alpha(colors.separator, 0.8);
        let (x, y, w, h) = p.rect(&button.rect);
        if button.separator_right {
            // boxes right of the wheel sit one pixel further out
            let nudge = match self.positioned.slot {
                Slot::UpperRight | Slot::LowerRight => 1.0,
                _ => 0.0,
            };
            p.line((x + w - nudge, y + 3.0), (x + w - nudge, y + h - 3.0), separator)?;
        }
        if button.separator_top {
            let b = &self.positioned.rect;
            let pad = BOX_PADDING * p.scale;
            p.line((b.left + pad, y), (b.right() - pad, y), separator)?;
        }

        let Some(tool) = catalog.tool(self.positioned.mode, button.tool) else {
            return Ok(());
        };
        match icons.get(tool.display_icon(brush_assets)) {
            Some(pixbuf) => draw_icon(p, pixbuf, &button.icon),
            None => {
                p.source(colors.text);
                let (ix, iy, iw, ih) = p.rect(&button.icon);
                let label: String = tool.display_name(brush_assets).chars().take(4).collect();
                p.text_centered(&label, (ix + iw / 2.0, iy + ih / 2.0), ICON_TEXT_FONT_SIZE)
            }
        }
    }

    fn draw_title(&self, p: &Painter, colors: &WheelColors) -> Result<(), cairo::Error> {
        let (x, y) = p.point(self.positioned.title);
        p.source(colors.text);
        p.text_at(self.positioned.name, (x, y), TITLE_FONT_SIZE, self.hovered)?;

        let hotkey = self.positioned.hotkey.to_string();
        let ext = p.cr.text_extents(&hotkey)?;
        let right = self.positioned.rect.right() - BOX_PADDING * p.scale;
        p.source(with_alpha(colors.text, 0.5));
        p.text_at(&hotkey, (right - ext.x_advance(), y), TITLE_FONT_SIZE, false)
    }
}

fn draw_icon(p: &Painter, pixbuf: &Pixbuf, target: &Rect) -> Result<(), cairo::Error> {
    let (x, y, w, _) = p.rect(target);
    let icon_scale = w / ICON_SIZE as f64;

    p.cr.save()?;
    p.cr.translate(x, y);
    p.cr.scale(icon_scale, icon_scale);
    p.cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    p.cr.paint()?;
    p.cr.restore()
}

fn draw_center(p: &Painter, frame: &Frame, colors: &WheelColors) -> Result<(), cairo::Error> {
    let anchor = frame.wheel.anchor;
    let center = p.point(anchor);
    let radius = WHEEL_RADIUS * p.scale;
    p.circle(center, radius, colors.wheel)?;

    // one dot on the rim toward each box
    for b in &frame.wheel.boxes {
        let mid = Point::new(
            b.rect.left + b.rect.width / 2.0,
            b.rect.bottom + b.rect.height / 2.0,
        );
        let (dx, dy) = (mid.x - anchor.x, mid.y - anchor.y);
        let len = dx.hypot(dy);
        if len == 0.0 {
            continue;
        }
        let rim = (radius - DIRECTION_DOT_RADIUS * p.scale * 1.5) / len;
        let color = if frame.hit.mode == Some(b.mode) {
            colors.accent
        } else {
            with_alpha(colors.text, 0.35)
        };
        p.circle(
            (center.0 + dx * rim, center.1 - dy * rim),
            DIRECTION_DOT_RADIUS * p.scale * 0.6,
            color,
        )?;
    }

    if let Some(angle) = frame.angle {
        let rad = angle.to_radians();
        let reach = radius - DIRECTION_DOT_RADIUS * p.scale;
        p.circle(
            (center.0 + reach * rad.cos(), center.1 - reach * rad.sin()),
            DIRECTION_DOT_RADIUS * p.scale,
            colors.accent,
        )?;
    }
    Ok(())
}

fn draw_hint(p: &Painter, frame: &Frame, colors: &WheelColors) -> Result<(), cairo::Error> {
    let Some(hint) = frame.hint else {
        return Ok(());
    };
    let (w, h) = (HINT_WIDTH * p.scale, HINT_HEIGHT * p.scale);
    let anchor = frame.wheel.anchor;
    let rect = Rect::from_top_left(
        anchor.x - w / 2.0,
        anchor.y - (WHEEL_RADIUS + 6.0) * p.scale,
        w,
        h,
    );

    p.rounded_rect(&rect, BOX_CORNER_RADIUS * p.scale);
    p.source(colors.hint_bg);
    p.cr.fill()?;

    let (x, y, rw, rh) = p.rect(&rect);
    p.source(colors.text);
    p.text_centered(hint, (x + rw / 2.0, y + rh / 2.0), HINT_FONT_SIZE)
}

/// Renders one frame of an open wheel. `height` is the widget height.
pub fn draw(
    cr: &Context,
    frame: &Frame,
    height: f64,
    catalog: &Catalog,
    icons: &IconCache,
    colors: &WheelColors,
) -> Result<(), cairo::Error> {
    let p = Painter {
        cr,
        height,
        scale: frame.wheel.ui_scale,
    };

    for positioned in &frame.wheel.boxes {
        let hovered = frame.hit.mode == Some(positioned.mode);
        BoxRenderer {
            positioned,
            hovered,
            hovered_tool: frame.hit.tool.filter(|_| hovered),
        }
        .draw(&p, catalog, icons, frame.brush_assets, colors)?;
    }

    draw_center(&p, frame, colors)?;
    draw_hint(&p, frame, colors)
}
