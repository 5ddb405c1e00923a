use crate::geometry::{Point, Projection, Viewport};
use crate::intent::Intent;
use crate::labels::SlotLabel;
use crate::screen::Screen;
use crate::slot::{SLOT_COUNT, SlotIndex};
use strum::{Display, EnumIter, EnumString};

/// Keys with a meaning for the wheel. Parsed from both DOM-style and GDK key
/// names; anything else is left to other listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Key {
    #[strum(to_string = "Enter", serialize = "Return", serialize = "KP_Enter")]
    Enter,
    #[strum(to_string = "ArrowLeft", serialize = "Left", serialize = "KP_Left")]
    ArrowLeft,
    #[strum(to_string = "ArrowRight", serialize = "Right", serialize = "KP_Right")]
    ArrowRight,
    #[strum(to_string = "Escape")]
    Escape,
}

/// Horizontal thirds of the viewport, used for coarse touch navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Left,
    Center,
    Right,
}

impl Region {
    pub fn of(x: f64, width: f64) -> Self {
        let third = width / 3.0;
        if x < third {
            Region::Left
        } else if x > 2.0 * third {
            Region::Right
        } else {
            Region::Center
        }
    }
}

/// What the router needs to know about the machine to resolve an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteContext {
    pub screen: Screen,
    pub highlighted: SlotIndex,
}

/// A label's on-screen footprint: a rectangle rotated with the label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelTarget {
    pub slot: SlotIndex,
    pub center: Point,
    pub half_width: f64,
    pub half_height: f64,
    pub rotation: f64,
}

impl LabelTarget {
    pub fn project(label: &SlotLabel, projection: &Projection) -> Option<Self> {
        let scale = projection.scale_at(label.center.z)?;
        Some(Self {
            slot: label.slot,
            center: projection.project(label.center)?,
            half_width: label.width * scale / 2.0,
            half_height: label.height * scale / 2.0,
            rotation: label.rotation,
        })
    }

    pub fn contains(&self, point: Point) -> bool {
        // back into the label's own frame; screen y points down
        let (dx, dy) = (point.x - self.center.x, self.center.y - point.y);
        let (sin, cos) = self.rotation.sin_cos();
        let local_x = dx * cos + dy * sin;
        let local_y = -dx * sin + dy * cos;
        local_x.abs() <= self.half_width && local_y.abs() <= self.half_height
    }
}

/// Maps raw keyboard and pointer events onto intents.
#[derive(Debug, Clone)]
pub struct InputRouter {
    touch_regions: bool,
    select: [Intent; SLOT_COUNT],
}

impl InputRouter {
    pub fn new(touch_regions: bool) -> Self {
        Self {
            touch_regions,
            select: std::array::from_fn(|i| Intent::Select(SlotIndex::wrapping(i))),
        }
    }

    pub fn touch_regions(&self) -> bool {
        self.touch_regions
    }

    pub fn set_touch_regions(&mut self, enabled: bool) {
        self.touch_regions = enabled;
    }

    fn select(&self, slot: SlotIndex) -> Intent {
        self.select[slot.get()]
    }

    pub fn route_key(&self, key: Key, ctx: RouteContext) -> Option<Intent> {
        match (ctx.screen, key) {
            (Screen::Start, Key::Enter) => Some(Intent::Advance),
            (Screen::Main, Key::Enter) => Some(self.select(ctx.highlighted)),
            (Screen::Main, Key::Escape) => Some(Intent::Back),
            (Screen::Main, Key::ArrowLeft) => Some(Intent::RotatePrev),
            (Screen::Main, Key::ArrowRight) => Some(Intent::RotateNext),
            (Screen::Detail, Key::Escape) => Some(Intent::Close),
            _ => None,
        }
    }

    /// Resolves a pointer-down. On the main screen the viewport thirds win;
    /// elsewhere, or with regions disabled, the press is hit-tested against
    /// the visible labels.
    pub fn route_pointer(
        &self,
        at: Point,
        viewport: Viewport,
        ctx: RouteContext,
        targets: &[LabelTarget],
    ) -> Option<Intent> {
        if self.touch_regions && ctx.screen == Screen::Main {
            return Some(match Region::of(at.x, viewport.width) {
                Region::Left => Intent::RotatePrev,
                Region::Right => Intent::RotateNext,
                Region::Center => self.select(ctx.highlighted),
            });
        }
        self.hit_test(at, targets)
    }

    pub fn hit_test(&self, at: Point, targets: &[LabelTarget]) -> Option<Intent> {
        targets
            .iter()
            .find(|target| target.contains(at))
            .map(|target| self.select(target.slot))
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(true)
    }
}
