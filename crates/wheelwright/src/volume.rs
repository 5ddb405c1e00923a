use crate::screen::{Screen, ScreenObserver};
use std::cell::Cell;
use std::rc::Rc;

/// Background music level the audio player should use for each screen.
/// Clones share the same level, so one copy can be registered as an observer
/// while another is read by the player.
#[derive(Debug, Clone)]
pub struct VolumePolicy {
    level: Rc<Cell<f64>>,
}

impl VolumePolicy {
    pub fn new() -> Self {
        Self {
            level: Rc::new(Cell::new(Self::for_screen(Screen::Start))),
        }
    }

    pub fn for_screen(screen: Screen) -> f64 {
        match screen {
            Screen::Start => 1.0,
            Screen::Main => 0.2,
            Screen::Detail => 0.1,
        }
    }

    pub fn level(&self) -> f64 {
        self.level.get()
    }
}

impl Default for VolumePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenObserver for VolumePolicy {
    fn screen_changed(&mut self, _from: Screen, to: Screen) {
        let level = Self::for_screen(to);
        log::debug!("Music volume -> {:.0}% ({})", level * 100.0, to);
        self.level.set(level);
    }
}
