use crate::clock::Tick;
use crate::geometry::Vec3;
use crate::screen::Screen;
use crate::slot::{SLOT_ARC, SlotIndex};
use crate::wheel::WheelBounds;
use std::f64::consts::PI;

/// Angular offset between a slot's spoke and its label.
pub const LABEL_OFFSET: f64 = PI / 10.0;
pub const FADE_RATE: f64 = 0.025;
/// Labels below this opacity are not drawn at all.
pub const VISIBILITY_EPSILON: f64 = 0.01;
pub const GLOW_SCALE: f64 = 1.5;

const RADIUS_FACTOR: f64 = 0.5;
const WIDTH_FACTOR: f64 = 0.15;
const HEIGHT_FACTOR: f64 = 0.04;
const MIN_RADIUS: f64 = 0.5;
const MIN_WIDTH: f64 = 0.5;
const MIN_HEIGHT: f64 = 0.15;

/// Label placement derived from the wheel size, so text scales with the wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    pub radius: f64,
    pub width: f64,
    pub height: f64,
}

impl LabelLayout {
    pub fn from_bounds(bounds: WheelBounds) -> Self {
        Self {
            radius: (bounds.radius() * RADIUS_FACTOR).max(MIN_RADIUS),
            width: (bounds.width * WIDTH_FACTOR).max(MIN_WIDTH),
            height: (bounds.width * HEIGHT_FACTOR).max(MIN_HEIGHT),
        }
    }

    pub fn angle(slot: SlotIndex, wheel_angle: f64) -> f64 {
        slot.get() as f64 * SLOT_ARC + wheel_angle - LABEL_OFFSET
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLabel {
    pub slot: SlotIndex,
    pub center: Vec3,
    /// Counter-clockwise rotation of the text baseline, in radians.
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    pub visible: bool,
    pub opacity: f64,
}

/// The highlight halo behind one label. `instance` changes every time the
/// glow is recreated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub slot: SlotIndex,
    pub instance: u64,
    pub center: Vec3,
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    pub visible: bool,
}

impl Glow {
    fn follow(&mut self, label: &SlotLabel) {
        self.center = label.center;
        self.rotation = label.rotation;
        self.width = label.width * GLOW_SCALE;
        self.height = label.height * GLOW_SCALE;
        self.visible = label.visible;
    }
}

/// Owns label placement, the shared fade progress, and the single highlight
/// glow.
#[derive(Debug, Clone, Default)]
pub struct LabelVisibilityController {
    layout: Option<LabelLayout>,
    labels: Vec<SlotLabel>,
    fade: f64,
    glow: Option<Glow>,
    glows_created: u64,
}

impl LabelVisibilityController {
    pub fn attach(&mut self, bounds: WheelBounds) {
        self.layout = Some(LabelLayout::from_bounds(bounds));
    }

    pub fn is_ready(&self) -> bool {
        self.layout.is_some()
    }

    pub fn fade(&self) -> f64 {
        self.fade
    }

    pub fn set_fade(&mut self, fade: f64) {
        self.fade = fade.clamp(0.0, 1.0);
    }

    pub fn labels(&self) -> &[SlotLabel] {
        &self.labels
    }

    pub fn label(&self, slot: SlotIndex) -> Option<&SlotLabel> {
        self.labels.get(slot.get())
    }

    pub fn glow(&self) -> Option<&Glow> {
        self.glow.as_ref()
    }

    /// Fades in while the camera sits at the main-screen close-up, and resets
    /// whenever the main screen is not showing.
    pub fn update_fade(&mut self, screen: Screen, camera_settled: bool, tick: &Tick) {
        if screen != Screen::Main {
            self.fade = 0.0;
        } else if camera_settled && self.fade < 1.0 {
            self.fade = (self.fade + tick.step(FADE_RATE)).min(1.0);
        }
    }

    /// Places every label around `center` for the given wheel angle.
    pub fn layout(&mut self, wheel_angle: f64, center: Vec3) {
        let Some(layout) = self.layout else {
            return;
        };
        let (visible, opacity) = (self.fade > VISIBILITY_EPSILON, self.fade);

        self.labels = SlotIndex::all()
            .map(|slot| {
                let rotation = LabelLayout::angle(slot, wheel_angle);
                SlotLabel {
                    slot,
                    center: Vec3::new(
                        center.x + layout.radius * rotation.cos(),
                        center.y + layout.radius * rotation.sin(),
                        center.z,
                    ),
                    rotation,
                    width: layout.width,
                    height: layout.height,
                    visible,
                    opacity,
                }
            })
            .collect();
    }

    /// Drops the current glow and creates a fresh one on `slot`.
    pub fn highlight(&mut self, slot: SlotIndex) {
        self.glow = None;
        if self.layout.is_none() {
            return;
        }

        self.glows_created += 1;
        let mut glow = Glow {
            slot,
            instance: self.glows_created,
            center: Vec3::default(),
            rotation: 0.0,
            width: 0.0,
            height: 0.0,
            visible: false,
        };
        if let Some(label) = self.labels.get(slot.get()) {
            glow.follow(label);
        }
        self.glow = Some(glow);
    }

    /// Keeps the glow glued to its label after a layout pass.
    pub fn track_glow(&mut self) {
        if let Some(glow) = &mut self.glow
            && let Some(label) = self.labels.get(glow.slot.get())
        {
            glow.follow(label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{REST_ANGLE, WHEEL_CENTER};

    fn tick() -> Tick {
        Tick {
            frame: 1,
            scale: 1.0,
        }
    }

    fn ready() -> LabelVisibilityController {
        let mut labels = LabelVisibilityController::default();
        labels.attach(WheelBounds::new(3.0));
        labels.layout(REST_ANGLE, WHEEL_CENTER);
        labels
    }

    #[test]
    fn test_layout_scales_with_wheel() {
        let layout = LabelLayout::from_bounds(WheelBounds::new(3.0));
        assert!((layout.radius - 0.75).abs() < 1e-12);
        assert!((layout.width - 0.5).abs() < 1e-12);
        assert!((layout.height - 0.15).abs() < 1e-12);

        let big = LabelLayout::from_bounds(WheelBounds::new(20.0));
        assert!((big.radius - 5.0).abs() < 1e-12);
        assert!((big.width - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_label_faces_camera_at_rest() {
        let labels = ready();
        let first = labels.label(SlotIndex::FIRST).unwrap();
        assert!(first.rotation.abs() < 1e-12);
        assert!((first.center.x - 0.75).abs() < 1e-12);
        assert!(first.center.y.abs() < 1e-12);
        assert_eq!(labels.labels().len(), 10);
    }

    #[test]
    fn test_fade_rules() {
        let mut labels = ready();
        labels.update_fade(Screen::Main, false, &tick());
        assert_eq!(labels.fade(), 0.0);

        for _ in 0..100 {
            let before = labels.fade();
            labels.update_fade(Screen::Main, true, &tick());
            assert!(labels.fade() >= before);
            assert!(labels.fade() <= 1.0);
        }
        assert_eq!(labels.fade(), 1.0);

        labels.update_fade(Screen::Start, true, &tick());
        assert_eq!(labels.fade(), 0.0);
    }

    #[test]
    fn test_visibility_follows_fade() {
        let mut labels = ready();
        assert!(labels.labels().iter().all(|l| !l.visible));

        labels.set_fade(0.4);
        labels.layout(REST_ANGLE, WHEEL_CENTER);
        assert!(labels.labels().iter().all(|l| l.visible && l.opacity == 0.4));
    }

    #[test]
    fn test_glow_recreated_on_highlight() {
        let mut labels = ready();
        labels.highlight(SlotIndex::FIRST);
        let first = *labels.glow().unwrap();

        labels.highlight(SlotIndex::FIRST.next());
        let second = *labels.glow().unwrap();
        assert_ne!(first.instance, second.instance);
        assert_eq!(second.slot.get(), 1);

        let label = labels.label(second.slot).unwrap();
        assert_eq!(second.center, label.center);
        assert!((second.width - label.width * GLOW_SCALE).abs() < 1e-12);
    }

    #[test]
    fn test_glow_tracks_rotation() {
        let mut labels = ready();
        labels.highlight(SlotIndex::FIRST);
        labels.layout(REST_ANGLE + 0.3, WHEEL_CENTER);
        labels.track_glow();

        let glow = labels.glow().unwrap();
        assert_eq!(glow.center, labels.label(SlotIndex::FIRST).unwrap().center);
    }

    #[test]
    fn test_no_glow_before_attach() {
        let mut labels = LabelVisibilityController::default();
        labels.highlight(SlotIndex::FIRST);
        assert!(labels.glow().is_none());
        labels.layout(0.0, WHEEL_CENTER);
        assert!(labels.labels().is_empty());
    }
}
