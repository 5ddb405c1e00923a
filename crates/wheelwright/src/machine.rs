use crate::camera::{ARRIVAL_THRESHOLD, CameraAnimator, MAIN_POSITION, START_POSITION};
use crate::clock::{AnimationClock, REFERENCE_FRAME, Tick, Timing};
use crate::geometry::{Point, Projection, Viewport};
use crate::hints::ControlHints;
use crate::input::{InputRouter, Key, LabelTarget, RouteContext};
use crate::intent::Intent;
use crate::labels::LabelVisibilityController;
use crate::screen::{Screen, ScreenObserver};
use crate::slot::SlotIndex;
use crate::wheel::{StepDirection, WHEEL_CENTER, WheelAnimator, WheelBounds};
use std::time::Duration;

/// Delay between leaving the start screen and the labels starting to fade in.
pub const LABEL_REVEAL_DELAY: Duration = Duration::from_millis(400);
const AURA_SPEED: f64 = 0.016;

/// The panel showing a slot's content. It owns everything inside it; the
/// machine only opens and closes it.
pub trait DetailPanel {
    fn open(&mut self, slot: SlotIndex);
    /// Stop embedded media and remember where it was.
    fn close(&mut self);
}

/// Stand-in until the real panel exists.
#[derive(Debug, Default)]
pub struct DetachedPanel;

impl DetailPanel for DetachedPanel {
    fn open(&mut self, slot: SlotIndex) {
        log::debug!("No detail panel attached, ignoring open({})", slot);
    }

    fn close(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub timing: Timing,
    pub touch_regions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timing: Timing::Frame,
            touch_regions: true,
        }
    }
}

/// Result of feeding an intent to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed { from: Screen, to: Screen },
    /// Applied without leaving the current screen (wheel steps).
    Stayed,
    /// Not valid right now: wrong screen, or an animation is still running.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Reveal {
    Hidden,
    /// Nominal frames left before labels may fade in.
    Pending(f64),
    Shown,
}

/// Screen state plus every animation it coordinates. All mutation happens in
/// [`apply`](Self::apply) and [`tick`](Self::tick) on the UI thread.
pub struct ScreenStateMachine {
    screen: Screen,
    highlighted: SlotIndex,
    splash_visible: bool,
    splash_on_arrival: bool,
    reveal: Reveal,
    aura_phase: f64,
    clock: AnimationClock,
    camera: CameraAnimator,
    wheel: WheelAnimator,
    labels: LabelVisibilityController,
    hints: ControlHints,
    router: InputRouter,
    panel: Box<dyn DetailPanel>,
    observers: Vec<Box<dyn ScreenObserver>>,
}

impl ScreenStateMachine {
    pub fn new(settings: Settings) -> Self {
        Self {
            screen: Screen::Start,
            highlighted: SlotIndex::FIRST,
            splash_visible: true,
            splash_on_arrival: false,
            reveal: Reveal::Hidden,
            aura_phase: 0.0,
            clock: AnimationClock::new(settings.timing),
            camera: CameraAnimator::new(START_POSITION),
            wheel: WheelAnimator::default(),
            labels: LabelVisibilityController::default(),
            hints: ControlHints::default(),
            router: InputRouter::new(settings.touch_regions),
            panel: Box::new(DetachedPanel),
            observers: Vec::new(),
        }
    }

    pub fn set_panel(&mut self, panel: Box<dyn DetailPanel>) {
        self.panel = panel;
    }

    pub fn observe(&mut self, observer: Box<dyn ScreenObserver>) {
        self.observers.push(observer);
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.clock.set_timing(settings.timing);
        self.router.set_touch_regions(settings.touch_regions);
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn highlighted(&self) -> SlotIndex {
        self.highlighted
    }

    pub fn splash_visible(&self) -> bool {
        self.splash_visible
    }

    pub fn camera(&self) -> &CameraAnimator {
        &self.camera
    }

    pub fn wheel(&self) -> &WheelAnimator {
        &self.wheel
    }

    pub fn labels(&self) -> &LabelVisibilityController {
        &self.labels
    }

    pub fn hints(&self) -> &ControlHints {
        &self.hints
    }

    pub fn fade(&self) -> f64 {
        self.labels.fade()
    }

    /// Slow breathing factor around 1.0 for one layer of the halo behind the
    /// wheel. Layers pulse out of phase with each other.
    pub fn aura_pulse(&self, layer: usize) -> f64 {
        1.0 + 0.02 * (self.aura_phase * 1.7 + layer as f64 * 1.7).sin()
    }

    pub fn projection(&self, viewport: Viewport) -> Projection {
        Projection::new(self.camera.position(), viewport)
    }

    /// Called once the wheel asset is ready. Until then every wheel and label
    /// operation is a no-op.
    pub fn attach_wheel(&mut self, bounds: WheelBounds) {
        log::info!("Wheel attached ({:.2} units wide)", bounds.width);
        self.wheel.attach(bounds, self.screen == Screen::Start);
        self.labels.attach(bounds);
        if let Some(angle) = self.wheel.angle() {
            self.labels.layout(angle, WHEEL_CENTER);
        }
        self.highlighted = SlotIndex::FIRST;
        self.labels.highlight(self.highlighted);
    }

    fn route_context(&self) -> RouteContext {
        RouteContext {
            screen: self.screen,
            highlighted: self.highlighted,
        }
    }

    pub fn press_key(&mut self, key: Key) -> Transition {
        self.hints.press(key);
        match self.router.route_key(key, self.route_context()) {
            Some(intent) => self.apply(intent),
            None => Transition::Rejected,
        }
    }

    pub fn pointer_down(&mut self, at: Point, viewport: Viewport) -> Transition {
        let projection = self.projection(viewport);
        let targets: Vec<LabelTarget> = self
            .labels
            .labels()
            .iter()
            .filter(|label| label.visible)
            .filter_map(|label| LabelTarget::project(label, &projection))
            .collect();

        match self
            .router
            .route_pointer(at, viewport, self.route_context(), &targets)
        {
            Some(intent) => self.apply(intent),
            None => Transition::Rejected,
        }
    }

    pub fn apply(&mut self, intent: Intent) -> Transition {
        let transition = match (self.screen, intent) {
            (Screen::Start, Intent::Advance) => self.advance(),
            (Screen::Main, Intent::Back) => self.back(),
            (Screen::Main, Intent::Select(slot)) => self.select(slot),
            (Screen::Main, Intent::RotateNext) => self.rotate(StepDirection::Clockwise),
            (Screen::Main, Intent::RotatePrev) => self.rotate(StepDirection::CounterClockwise),
            (Screen::Detail, Intent::Close) => self.close(),
            _ => Transition::Rejected,
        };
        if transition == Transition::Rejected {
            log::trace!("Ignoring {:?} on {} screen", intent, self.screen);
        }
        transition
    }

    fn advance(&mut self) -> Transition {
        if !self.camera.begin_move(MAIN_POSITION) {
            return Transition::Rejected;
        }
        if let Err(reason) = self.wheel.begin_settle() {
            log::debug!("Wheel not settling: {:?}", reason);
        }
        self.wheel.set_spinning(false);
        self.splash_visible = false;
        self.splash_on_arrival = false;
        self.reveal = Reveal::Pending(
            LABEL_REVEAL_DELAY.as_secs_f64() / REFERENCE_FRAME.as_secs_f64(),
        );
        self.enter(Screen::Main)
    }

    fn back(&mut self) -> Transition {
        if !self.camera.begin_move(START_POSITION) {
            return Transition::Rejected;
        }
        self.wheel.set_spinning(true);
        self.highlighted = SlotIndex::FIRST;
        self.labels.highlight(self.highlighted);
        self.splash_on_arrival = true;
        self.reveal = Reveal::Hidden;
        self.enter(Screen::Start)
    }

    fn select(&mut self, slot: SlotIndex) -> Transition {
        self.panel.open(slot);
        self.enter(Screen::Detail)
    }

    fn rotate(&mut self, direction: StepDirection) -> Transition {
        if self.wheel.begin_step(direction).is_err() {
            return Transition::Rejected;
        }
        self.highlighted = match direction {
            StepDirection::Clockwise => self.highlighted.next(),
            StepDirection::CounterClockwise => self.highlighted.prev(),
        };
        self.labels.highlight(self.highlighted);
        Transition::Stayed
    }

    fn close(&mut self) -> Transition {
        self.panel.close();
        let transition = self.enter(Screen::Main);
        self.labels.set_fade(1.0);
        self.reveal = Reveal::Shown;
        self.relayout();
        transition
    }

    fn enter(&mut self, to: Screen) -> Transition {
        let from = std::mem::replace(&mut self.screen, to);
        log::info!("Screen {} -> {}", from, to);
        for observer in &mut self.observers {
            observer.screen_changed(from, to);
        }
        Transition::Changed { from, to }
    }

    fn relayout(&mut self) {
        if let Some(angle) = self.wheel.angle() {
            self.labels.layout(angle, WHEEL_CENTER);
            self.labels.track_glow();
        }
    }

    /// Advances one display refresh presented at `now`: camera, ambient
    /// effects, wheel, label fade and placement, glow, then the controls
    /// overlay.
    pub fn tick(&mut self, now: Duration) -> Tick {
        let tick = self.clock.advance(now);
        self.step(&tick);
        tick
    }

    /// Advances by one nominal frame regardless of wall-clock time.
    pub fn tick_frame(&mut self) -> Tick {
        let tick = self.clock.advance_frame();
        self.step(&tick);
        tick
    }

    fn step(&mut self, tick: &Tick) {
        if self.camera.tick(tick) && self.splash_on_arrival {
            self.splash_visible = true;
            self.splash_on_arrival = false;
        }

        self.aura_phase += tick.step(AURA_SPEED);

        self.wheel.tick(tick);

        if let Reveal::Pending(frames) = self.reveal {
            let left = frames - tick.scale;
            self.reveal = if left <= 0.0 {
                Reveal::Shown
            } else {
                Reveal::Pending(left)
            };
        }
        let camera_settled = self.reveal == Reveal::Shown
            && self.camera.distance_to(MAIN_POSITION) < ARRIVAL_THRESHOLD;
        self.labels.update_fade(self.screen, camera_settled, tick);

        self.relayout();

        self.hints.tick(tick);
    }
}

impl Default for ScreenStateMachine {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::VolumePolicy;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum PanelCall {
        Open(usize),
        Close,
    }

    #[derive(Clone, Default)]
    struct RecordingPanel(Rc<RefCell<Vec<PanelCall>>>);

    impl DetailPanel for RecordingPanel {
        fn open(&mut self, slot: SlotIndex) {
            self.0.borrow_mut().push(PanelCall::Open(slot.get()));
        }

        fn close(&mut self) {
            self.0.borrow_mut().push(PanelCall::Close);
        }
    }

    #[derive(Clone, Default)]
    struct RecordingObserver(Rc<RefCell<Vec<(Screen, Screen)>>>);

    impl ScreenObserver for RecordingObserver {
        fn screen_changed(&mut self, from: Screen, to: Screen) {
            self.0.borrow_mut().push((from, to));
        }
    }

    const VIEWPORT: Viewport = Viewport {
        width: 900.0,
        height: 600.0,
    };

    fn machine() -> ScreenStateMachine {
        let mut machine = ScreenStateMachine::default();
        machine.attach_wheel(WheelBounds::new(3.0));
        machine
    }

    /// Ticks until neither the camera nor the wheel is moving.
    fn settle(machine: &mut ScreenStateMachine) {
        for _ in 0..400 {
            if !machine.camera().is_animating() && !machine.wheel().is_animating() {
                return;
            }
            machine.tick_frame();
        }
        panic!("animations never finished");
    }

    fn on_main() -> ScreenStateMachine {
        let mut machine = machine();
        machine.apply(Intent::Advance);
        settle(&mut machine);
        machine
    }

    fn rotate_settled(machine: &mut ScreenStateMachine, intent: Intent, times: usize) {
        for _ in 0..times {
            assert_eq!(machine.apply(intent), Transition::Stayed);
            settle(machine);
        }
    }

    #[test]
    fn test_only_table_transitions() {
        let mut machine = machine();
        for intent in [
            Intent::Back,
            Intent::Close,
            Intent::RotateNext,
            Intent::Select(SlotIndex::FIRST),
        ] {
            assert_eq!(machine.apply(intent), Transition::Rejected);
            assert_eq!(machine.screen(), Screen::Start);
        }

        assert_eq!(
            machine.apply(Intent::Advance),
            Transition::Changed {
                from: Screen::Start,
                to: Screen::Main
            }
        );
        assert_eq!(machine.apply(Intent::Advance), Transition::Rejected);
        assert_eq!(machine.apply(Intent::Close), Transition::Rejected);
    }

    #[test]
    fn test_back_waits_for_camera() {
        let mut machine = machine();
        machine.apply(Intent::Advance);
        machine.tick_frame();
        assert_eq!(machine.apply(Intent::Back), Transition::Rejected);
        assert_eq!(machine.screen(), Screen::Main);

        settle(&mut machine);
        assert!(matches!(machine.apply(Intent::Back), Transition::Changed { .. }));
        assert_eq!(machine.screen(), Screen::Start);
        assert!(machine.wheel().is_spinning());
    }

    #[test]
    fn test_advance_waits_for_camera() {
        let mut machine = on_main();
        machine.apply(Intent::Back);
        assert_eq!(machine.apply(Intent::Advance), Transition::Rejected);
        settle(&mut machine);
        assert!(matches!(machine.apply(Intent::Advance), Transition::Changed { .. }));
    }

    #[test]
    fn test_redundant_step_keeps_target() {
        let mut machine = on_main();
        assert_eq!(machine.apply(Intent::RotateNext), Transition::Stayed);
        machine.tick_frame();
        let target = machine.wheel().animation().map(|a| a.target);

        assert_eq!(machine.apply(Intent::RotateNext), Transition::Rejected);
        assert_eq!(machine.apply(Intent::RotatePrev), Transition::Rejected);
        assert_eq!(machine.wheel().animation().map(|a| a.target), target);
        assert_eq!(machine.highlighted().get(), 1);
    }

    #[test]
    fn test_full_turn_wraps_highlight() {
        let mut machine = on_main();
        rotate_settled(&mut machine, Intent::RotateNext, 10);
        assert_eq!(machine.highlighted(), SlotIndex::FIRST);

        rotate_settled(&mut machine, Intent::RotatePrev, 3);
        assert_eq!(machine.highlighted().get(), 7);
        rotate_settled(&mut machine, Intent::RotatePrev, 7);
        assert_eq!(machine.highlighted(), SlotIndex::FIRST);
    }

    #[test]
    fn test_fade_is_monotonic_once_arrived() {
        let mut machine = machine();
        machine.apply(Intent::Advance);
        while machine.camera().is_animating() {
            machine.tick_frame();
        }

        let mut last = machine.fade();
        for _ in 0..200 {
            machine.tick_frame();
            assert!(machine.fade() >= last);
            assert!(machine.fade() <= 1.0);
            last = machine.fade();
        }
        assert_eq!(last, 1.0);
        assert!(machine.labels().labels().iter().all(|l| l.visible));
    }

    #[test]
    fn test_labels_wait_for_reveal_delay() {
        let mut machine = machine();
        machine.apply(Intent::Advance);
        for _ in 0..20 {
            machine.tick_frame();
            assert_eq!(machine.fade(), 0.0);
        }
    }

    #[test]
    fn test_detail_round_trip() {
        let panel = RecordingPanel::default();
        let mut machine = on_main();
        machine.set_panel(Box::new(panel.clone()));
        for _ in 0..60 {
            machine.tick_frame();
        }
        rotate_settled(&mut machine, Intent::RotateNext, 3);

        let center = Point::new(VIEWPORT.width / 2.0, VIEWPORT.height / 2.0);
        assert!(matches!(
            machine.pointer_down(center, VIEWPORT),
            Transition::Changed {
                to: Screen::Detail,
                ..
            }
        ));
        machine.tick_frame();
        assert_eq!(machine.fade(), 0.0);
        assert_eq!(machine.apply(Intent::RotateNext), Transition::Rejected);

        assert!(matches!(
            machine.press_key(Key::Escape),
            Transition::Changed {
                to: Screen::Main,
                ..
            }
        ));
        assert_eq!(machine.fade(), 1.0);
        assert!(machine.labels().labels().iter().all(|l| l.visible));
        assert_eq!(machine.highlighted().get(), 3);

        machine.tick_frame();
        assert_eq!(machine.fade(), 1.0);
        assert_eq!(
            *panel.0.borrow(),
            vec![PanelCall::Open(3), PanelCall::Close]
        );
    }

    #[test]
    fn test_back_resets_highlight() {
        let mut machine = on_main();
        rotate_settled(&mut machine, Intent::RotatePrev, 2);
        assert_eq!(machine.highlighted().get(), 8);

        machine.press_key(Key::Escape);
        assert_eq!(machine.highlighted(), SlotIndex::FIRST);
        assert_eq!(machine.labels().glow().map(|g| g.slot), Some(SlotIndex::FIRST));
    }

    #[test]
    fn test_pointer_regions() {
        let mut machine = on_main();
        let at = |x| Point::new(x, 300.0);

        assert_eq!(machine.pointer_down(at(50.0), VIEWPORT), Transition::Stayed);
        assert_eq!(machine.highlighted().get(), 9);
        settle(&mut machine);

        assert_eq!(machine.pointer_down(at(850.0), VIEWPORT), Transition::Stayed);
        assert_eq!(machine.highlighted(), SlotIndex::FIRST);
        settle(&mut machine);

        assert!(matches!(
            machine.pointer_down(at(450.0), VIEWPORT),
            Transition::Changed {
                to: Screen::Detail,
                ..
            }
        ));
    }

    #[test]
    fn test_precise_picking_selects_label() {
        let mut machine = ScreenStateMachine::new(Settings {
            timing: Timing::Frame,
            touch_regions: false,
        });
        machine.attach_wheel(WheelBounds::new(3.0));
        machine.apply(Intent::Advance);
        for _ in 0..200 {
            machine.tick_frame();
        }

        let label = *machine.labels().label(SlotIndex::FIRST).unwrap();
        let at = machine.projection(VIEWPORT).project(label.center).unwrap();
        assert_eq!(
            machine.pointer_down(at, VIEWPORT),
            Transition::Changed {
                from: Screen::Main,
                to: Screen::Detail
            }
        );
    }

    #[test]
    fn test_single_glow_follows_highlight() {
        let mut machine = on_main();
        let mut instance = machine.labels().glow().unwrap().instance;

        for intent in [
            Intent::RotateNext,
            Intent::RotateNext,
            Intent::RotatePrev,
            Intent::RotateNext,
        ] {
            machine.apply(intent);
            machine.apply(intent);
            settle(&mut machine);

            let glow = machine.labels().glow().unwrap();
            assert_eq!(glow.slot, machine.highlighted());
            assert_eq!(glow.instance, instance + 1);
            instance = glow.instance;
        }
    }

    #[test]
    fn test_splash_returns_on_arrival() {
        let mut machine = on_main();
        assert!(!machine.splash_visible());

        machine.apply(Intent::Back);
        assert!(!machine.splash_visible());
        machine.tick_frame();
        assert!(!machine.splash_visible());

        settle(&mut machine);
        assert!(machine.splash_visible());
    }

    #[test]
    fn test_missing_wheel_still_moves_camera() {
        let mut machine = ScreenStateMachine::default();
        assert!(matches!(machine.apply(Intent::Advance), Transition::Changed { .. }));
        settle(&mut machine);
        assert_eq!(machine.camera().position(), MAIN_POSITION);

        assert_eq!(machine.apply(Intent::RotateNext), Transition::Rejected);
        assert!(machine.labels().glow().is_none());
        assert!(machine.labels().labels().is_empty());

        machine.attach_wheel(WheelBounds::new(3.0));
        assert!(!machine.wheel().is_spinning());
        assert_eq!(machine.apply(Intent::RotateNext), Transition::Stayed);
    }

    #[test]
    fn test_observers_see_every_change() {
        let observer = RecordingObserver::default();
        let volume = VolumePolicy::new();
        let mut machine = machine();
        machine.observe(Box::new(observer.clone()));
        machine.observe(Box::new(volume.clone()));

        machine.press_key(Key::Enter);
        settle(&mut machine);
        assert_eq!(volume.level(), 0.2);
        machine.press_key(Key::Enter);
        assert_eq!(volume.level(), 0.1);
        machine.press_key(Key::Escape);
        machine.press_key(Key::Escape);
        assert_eq!(volume.level(), 1.0);

        assert_eq!(
            *observer.0.borrow(),
            vec![
                (Screen::Start, Screen::Main),
                (Screen::Main, Screen::Detail),
                (Screen::Detail, Screen::Main),
                (Screen::Main, Screen::Start),
            ]
        );
    }

    #[test]
    fn test_aura_breathes_gently() {
        let mut machine = machine();
        let start = machine.aura_pulse(0);
        for _ in 0..30 {
            machine.tick_frame();
            for layer in 0..3 {
                assert!((machine.aura_pulse(layer) - 1.0).abs() <= 0.02);
            }
        }
        assert_ne!(machine.aura_pulse(0), start);
    }

    #[test]
    fn test_ignored_keys_still_flash_hints() {
        let mut machine = machine();
        assert_eq!(machine.press_key(Key::ArrowRight), Transition::Rejected);
        assert!(machine.hints().is_lit(Key::ArrowRight));
        assert_eq!(machine.screen(), Screen::Start);
    }
}
