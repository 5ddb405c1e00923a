use super::{AURA_LAYERS, LABEL_STROKE_WIDTH, RIM_WIDTH, Scene, TEXT_FILL};
use crate::gui::theme::ThemeColors;
use cairo::{Context, RadialGradient};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;
use wheelwright::geometry::{Point, Projection, Viewport};
use wheelwright::labels::{Glow, SlotLabel};
use wheelwright::machine::ScreenStateMachine;
use wheelwright::slot::{SLOT_ARC, SlotIndex};
use wheelwright::wheel::WHEEL_CENTER;

const HUB_RADIUS: f64 = 0.15;

fn set_color(cr: &Context, color: Srgba<f64>, opacity: f64) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a * opacity);
}

/// Draws the wheel plane as seen through the camera. World angles turn
/// counter-clockwise, so they are negated on the y-down cairo surface.
struct WheelRenderer<'a> {
    projection: Projection,
    center: Point,
    /// Pixels per world unit in the wheel plane.
    px: f64,
    colors: &'a ThemeColors,
}

impl WheelRenderer<'_> {
    fn draw_aura(
        &self,
        cr: &Context,
        width: f64,
        machine: &ScreenStateMachine,
    ) -> Result<(), cairo::Error> {
        for (layer, (size, color)) in AURA_LAYERS.iter().zip(self.colors.aura).enumerate() {
            let radius = size * width * machine.aura_pulse(layer) * self.px / 2.0;
            let (r, g, b, a) = color.into_components();
            let (cx, cy) = (self.center.x, self.center.y);
            let gradient = RadialGradient::new(cx, cy, 0.0, cx, cy, radius);
            gradient.add_color_stop_rgba(0.0, r, g, b, a);
            gradient.add_color_stop_rgba(1.0, r, g, b, 0.0);

            cr.set_source(&gradient)?;
            cr.arc(cx, cy, radius, 0.0, 2.0 * PI);
            cr.fill()?;
        }
        Ok(())
    }

    fn draw_image(
        &self,
        cr: &Context,
        pixbuf: &Pixbuf,
        width: f64,
        angle: f64,
    ) -> Result<(), cairo::Error> {
        let (iw, ih) = (pixbuf.width() as f64, pixbuf.height() as f64);
        let scale = width * self.px / iw;

        cr.save()?;
        cr.translate(self.center.x, self.center.y);
        cr.rotate(-angle);
        cr.scale(scale, scale);
        cr.set_source_pixbuf(pixbuf, -iw / 2.0, -ih / 2.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_spokes(&self, cr: &Context, radius: f64, angle: f64) -> Result<(), cairo::Error> {
        let outer = radius * self.px;
        set_color(cr, self.colors.rim, 1.0);
        cr.set_line_width((RIM_WIDTH * self.px).max(1.0));

        cr.arc(self.center.x, self.center.y, outer, 0.0, 2.0 * PI);
        cr.stroke()?;
        cr.arc(self.center.x, self.center.y, outer * HUB_RADIUS, 0.0, 2.0 * PI);
        cr.stroke()?;

        for slot in SlotIndex::all() {
            let a = slot.get() as f64 * SLOT_ARC + angle;
            let (sin, cos) = a.sin_cos();
            cr.move_to(
                self.center.x + cos * outer * HUB_RADIUS,
                self.center.y - sin * outer * HUB_RADIUS,
            );
            cr.line_to(self.center.x + cos * outer, self.center.y - sin * outer);
        }
        cr.stroke()
    }

    fn draw_glow(&self, cr: &Context, glow: &Glow) -> Result<(), cairo::Error> {
        let (Some(at), Some(px)) = (
            self.projection.project(glow.center),
            self.projection.scale_at(glow.center.z),
        ) else {
            return Ok(());
        };
        let (r, g, b, a) = self.colors.glow.into_components();
        let gradient = RadialGradient::new(0.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        gradient.add_color_stop_rgba(0.0, r, g, b, a);
        gradient.add_color_stop_rgba(0.6, r, g, b, a * 0.5);
        gradient.add_color_stop_rgba(1.0, r, g, b, 0.0);

        cr.save()?;
        cr.translate(at.x, at.y);
        cr.rotate(-glow.rotation);
        cr.scale(glow.width * px / 2.0, glow.height * px / 2.0);
        cr.set_source(&gradient)?;
        cr.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
        cr.fill()?;
        cr.restore()
    }

    fn draw_label(
        &self,
        cr: &Context,
        label: &SlotLabel,
        text: &str,
    ) -> Result<(), cairo::Error> {
        let (Some(at), Some(px)) = (
            self.projection.project(label.center),
            self.projection.scale_at(label.center.z),
        ) else {
            return Ok(());
        };

        cr.save()?;
        cr.translate(at.x, at.y);
        cr.rotate(-label.rotation);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(label.height * px * TEXT_FILL);

        let ext = cr.text_extents(text)?;
        // shrink long texts into the label box
        let fit = (label.width * px / ext.width()).min(1.0);
        cr.scale(fit, fit);
        cr.move_to(
            -ext.width() / 2.0 - ext.x_bearing(),
            -ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.text_path(text);

        set_color(cr, self.colors.label_stroke, label.opacity);
        cr.set_line_width(LABEL_STROKE_WIDTH);
        cr.stroke_preserve()?;
        set_color(cr, self.colors.label, label.opacity);
        cr.fill()?;
        cr.restore()
    }
}

pub fn draw(
    cr: &Context,
    scene: &Scene,
    colors: &ThemeColors,
    viewport: Viewport,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.background, 1.0);
    cr.paint()?;

    let machine = &scene.machine;
    let (Some(bounds), Some(angle)) = (machine.wheel().bounds(), machine.wheel().angle()) else {
        return Ok(());
    };
    let projection = machine.projection(viewport);
    let (Some(center), Some(px)) = (
        projection.project(WHEEL_CENTER),
        projection.scale_at(WHEEL_CENTER.z),
    ) else {
        return Ok(());
    };

    let renderer = WheelRenderer {
        projection,
        center,
        px,
        colors,
    };

    renderer.draw_aura(cr, bounds.width, machine)?;
    match scene.image() {
        Some(pixbuf) => renderer.draw_image(cr, pixbuf, bounds.width, angle)?,
        None => renderer.draw_spokes(cr, bounds.radius(), angle)?,
    }

    if let Some(glow) = machine.labels().glow()
        && glow.visible
    {
        renderer.draw_glow(cr, glow)?;
    }

    let book = scene.book.borrow();
    for label in machine.labels().labels().iter().filter(|l| l.visible) {
        renderer.draw_label(cr, label, &book.get(label.slot).label)?;
    }
    Ok(())
}
