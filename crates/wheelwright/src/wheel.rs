use crate::clock::Tick;
use crate::geometry::Vec3;
use crate::slot::SLOT_ARC;
use std::f64::consts::PI;

/// Canonical orientation the wheel settles into when leaving the start screen.
pub const REST_ANGLE: f64 = PI / 10.0;
pub const WHEEL_CENTER: Vec3 = Vec3::new(0.0, 0.0, 0.0);
const AMBIENT_SPIN: f64 = -0.0008;
const SETTLE_RATE: f64 = 0.04;
const STEP_RATE: f64 = 0.08;

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Wheel dimensions in world units, read once when the asset becomes available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelBounds {
    pub width: f64,
}

impl WheelBounds {
    pub fn new(width: f64) -> Self {
        Self { width }
    }

    pub fn radius(&self) -> f64 {
        self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationKind {
    /// Back to [`REST_ANGLE`] after the start screen.
    Settle,
    /// One slot arc in either direction.
    Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Clockwise,
    CounterClockwise,
}

impl StepDirection {
    fn sign(self) -> f64 {
        match self {
            Self::Clockwise => -1.0,
            Self::CounterClockwise => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAnimation {
    pub kind: RotationKind,
    pub start: f64,
    pub target: f64,
    pub progress: f64,
}

impl RotationAnimation {
    fn new(kind: RotationKind, start: f64, target: f64) -> Self {
        Self {
            kind,
            start,
            target,
            progress: 0.0,
        }
    }

    fn rate(&self) -> f64 {
        match self.kind {
            RotationKind::Settle => SETTLE_RATE,
            RotationKind::Step => STEP_RATE,
        }
    }

    /// Advances progress and returns the eased angle, or `None` once the
    /// target has been reached.
    fn advance(&mut self, tick: &Tick) -> Option<f64> {
        self.progress += tick.step(self.rate());
        (self.progress < 1.0)
            .then(|| self.start + (self.target - self.start) * ease_out_cubic(self.progress))
    }
}

/// Rotation state of a loaded wheel. A single animation slot keeps settle and
/// step mutually exclusive, and ambient spin only applies while it is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelRotation {
    pub angle: f64,
    pub spinning: bool,
    pub animation: Option<RotationAnimation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationRejected {
    /// The wheel asset has not been attached yet.
    NotLoaded,
    /// Another settle or step is still running.
    Busy,
}

#[derive(Debug, Clone)]
struct Wheel {
    bounds: WheelBounds,
    rotation: WheelRotation,
}

/// Owns the wheel angle. Every operation is a no-op until a wheel is attached.
#[derive(Debug, Clone, Default)]
pub struct WheelAnimator {
    wheel: Option<Wheel>,
}

impl WheelAnimator {
    pub fn attach(&mut self, bounds: WheelBounds, spinning: bool) {
        self.wheel = Some(Wheel {
            bounds,
            rotation: WheelRotation {
                angle: REST_ANGLE,
                spinning,
                animation: None,
            },
        });
    }

    pub fn is_loaded(&self) -> bool {
        self.wheel.is_some()
    }

    pub fn bounds(&self) -> Option<WheelBounds> {
        self.wheel.as_ref().map(|w| w.bounds)
    }

    pub fn rotation(&self) -> Option<&WheelRotation> {
        self.wheel.as_ref().map(|w| &w.rotation)
    }

    pub fn angle(&self) -> Option<f64> {
        self.rotation().map(|r| r.angle)
    }

    pub fn animation(&self) -> Option<RotationAnimation> {
        self.rotation().and_then(|r| r.animation)
    }

    pub fn is_animating(&self) -> bool {
        self.animation().is_some()
    }

    pub fn is_stepping(&self) -> bool {
        self.animation()
            .is_some_and(|a| a.kind == RotationKind::Step)
    }

    pub fn is_spinning(&self) -> bool {
        self.rotation().is_some_and(|r| r.spinning)
    }

    pub fn set_spinning(&mut self, spinning: bool) {
        if let Some(wheel) = &mut self.wheel {
            wheel.rotation.spinning = spinning;
        }
    }

    /// Rotates back to [`REST_ANGLE`] and stops the ambient spin.
    pub fn begin_settle(&mut self) -> Result<(), RotationRejected> {
        let rotation = self.idle_rotation()?;
        rotation.spinning = false;
        rotation.animation = Some(RotationAnimation::new(
            RotationKind::Settle,
            rotation.angle,
            REST_ANGLE,
        ));
        Ok(())
    }

    /// Rotates by one slot arc. Rejected while any rotation is running, which
    /// keeps key repeat from queueing up several steps.
    pub fn begin_step(&mut self, direction: StepDirection) -> Result<(), RotationRejected> {
        let rotation = self.idle_rotation()?;
        let target = rotation.angle + direction.sign() * SLOT_ARC;
        rotation.animation = Some(RotationAnimation::new(
            RotationKind::Step,
            rotation.angle,
            target,
        ));
        Ok(())
    }

    fn idle_rotation(&mut self) -> Result<&mut WheelRotation, RotationRejected> {
        let wheel = self.wheel.as_mut().ok_or(RotationRejected::NotLoaded)?;
        match wheel.rotation.animation {
            Some(_) => Err(RotationRejected::Busy),
            None => Ok(&mut wheel.rotation),
        }
    }

    pub fn tick(&mut self, tick: &Tick) {
        let Some(wheel) = &mut self.wheel else {
            return;
        };
        let rotation = &mut wheel.rotation;

        match &mut rotation.animation {
            Some(animation) => match animation.advance(tick) {
                Some(angle) => rotation.angle = angle,
                None => {
                    rotation.angle = animation.target;
                    rotation.animation = None;
                }
            },
            None if rotation.spinning => rotation.angle += tick.step(AMBIENT_SPIN),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{AnimationClock, Timing};

    fn loaded(spinning: bool) -> WheelAnimator {
        let mut wheel = WheelAnimator::default();
        wheel.attach(WheelBounds::new(3.0), spinning);
        wheel
    }

    fn run_to_rest(wheel: &mut WheelAnimator, clock: &mut AnimationClock) -> usize {
        let mut ticks = 0;
        while wheel.is_animating() && ticks < 100 {
            wheel.tick(&clock.advance_frame());
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_absent_wheel_is_inert() {
        let mut wheel = WheelAnimator::default();
        let mut clock = AnimationClock::new(Timing::Frame);
        wheel.tick(&clock.advance_frame());
        wheel.set_spinning(true);
        assert_eq!(
            wheel.begin_step(StepDirection::Clockwise),
            Err(RotationRejected::NotLoaded)
        );
        assert_eq!(wheel.begin_settle(), Err(RotationRejected::NotLoaded));
        assert_eq!(wheel.angle(), None);
    }

    #[test]
    fn test_ambient_spin_drifts_backwards() {
        let mut wheel = loaded(true);
        let mut clock = AnimationClock::new(Timing::Frame);
        for _ in 0..10 {
            wheel.tick(&clock.advance_frame());
        }
        let angle = wheel.angle().unwrap();
        assert!((angle - (REST_ANGLE - 0.008)).abs() < 1e-9);
    }

    #[test]
    fn test_settle_lands_on_rest_angle() {
        let mut wheel = loaded(true);
        let mut clock = AnimationClock::new(Timing::Frame);
        for _ in 0..500 {
            wheel.tick(&clock.advance_frame());
        }
        wheel.begin_settle().unwrap();
        assert!(!wheel.is_spinning());

        let ticks = run_to_rest(&mut wheel, &mut clock);
        assert!((25..=26).contains(&ticks));
        assert_eq!(wheel.angle(), Some(REST_ANGLE));

        wheel.tick(&clock.advance_frame());
        assert_eq!(wheel.angle(), Some(REST_ANGLE));
    }

    #[test]
    fn test_step_rejects_overlap() {
        let mut wheel = loaded(false);
        let mut clock = AnimationClock::new(Timing::Frame);

        wheel.begin_step(StepDirection::Clockwise).unwrap();
        wheel.tick(&clock.advance_frame());
        let target = wheel.animation().map(|a| a.target);

        assert_eq!(
            wheel.begin_step(StepDirection::CounterClockwise),
            Err(RotationRejected::Busy)
        );
        assert_eq!(wheel.animation().map(|a| a.target), target);

        run_to_rest(&mut wheel, &mut clock);
        assert_eq!(wheel.angle(), Some(REST_ANGLE - SLOT_ARC));
    }

    #[test]
    fn test_step_and_settle_are_exclusive() {
        let mut wheel = loaded(true);
        wheel.begin_settle().unwrap();
        assert_eq!(
            wheel.begin_step(StepDirection::Clockwise),
            Err(RotationRejected::Busy)
        );
        assert!(!wheel.is_stepping());
    }

    #[test]
    fn test_spin_waits_for_animation() {
        let mut wheel = loaded(false);
        let mut clock = AnimationClock::new(Timing::Frame);
        wheel.begin_step(StepDirection::CounterClockwise).unwrap();
        wheel.set_spinning(true);

        run_to_rest(&mut wheel, &mut clock);
        assert_eq!(wheel.angle(), Some(REST_ANGLE + SLOT_ARC));

        wheel.tick(&clock.advance_frame());
        assert!(wheel.angle().unwrap() < REST_ANGLE + SLOT_ARC);
    }

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}
