use crate::clock::Tick;
use crate::geometry::Vec3;

/// Where the camera idles on the start screen.
pub const START_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);
/// Close-up on the highlighted side of the wheel.
pub const MAIN_POSITION: Vec3 = Vec3::new(0.75, 0.0, 1.0);
/// Distance under which a move snaps onto its target.
pub const ARRIVAL_THRESHOLD: f64 = 0.08;
const LERP_SPEED: f64 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq)]
struct CameraMove {
    start: Vec3,
    target: Vec3,
}

impl CameraMove {
    /// Fraction of the journey already covered from `position`.
    fn travelled(&self, position: Vec3) -> f64 {
        let span = self.start.distance_to(self.target);
        if span > f64::EPSILON {
            self.start.distance_to(position) / span
        } else {
            1.0
        }
    }
}

/// Eases the camera towards a target, accelerating as the journey progresses.
#[derive(Debug, Clone)]
pub struct CameraAnimator {
    position: Vec3,
    active: Option<CameraMove>,
}

impl CameraAnimator {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            active: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Option<Vec3> {
        self.active.map(|m| m.target)
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn distance_to(&self, point: Vec3) -> f64 {
        self.position.distance_to(point)
    }

    /// Starts moving towards `target`. Ignored (returns `false`) while a
    /// previous move is still running; moves are never queued.
    pub fn begin_move(&mut self, target: Vec3) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(CameraMove {
            start: self.position,
            target,
        });
        true
    }

    /// Advances the running move. Returns `true` exactly once per move, on
    /// the tick the camera lands on its target.
    pub fn tick(&mut self, tick: &Tick) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if self.position.distance_to(active.target) >= ARRIVAL_THRESHOLD {
            let t = (LERP_SPEED + active.travelled(self.position) * LERP_SPEED).min(1.0);
            self.position = self.position.lerp(active.target, tick.blend(t));
        }

        if self.position.distance_to(active.target) < ARRIVAL_THRESHOLD {
            self.position = active.target;
            self.active = None;
            return true;
        }
        false
    }
}

impl Default for CameraAnimator {
    fn default() -> Self {
        Self::new(START_POSITION)
    }
}
