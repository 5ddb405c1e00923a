use crate::clock::Tick;
use crate::input::Key;

/// How long a pressed key stays lit in the controls overlay (~220 ms).
pub const FLASH_FRAMES: f64 = 13.0;

/// Flash state of the controls help overlay rows.
#[derive(Debug, Clone, Default)]
pub struct ControlHints {
    enter: f64,
    left: f64,
    right: f64,
}

impl ControlHints {
    fn remaining(&mut self, key: Key) -> Option<&mut f64> {
        match key {
            Key::Enter => Some(&mut self.enter),
            Key::ArrowLeft => Some(&mut self.left),
            Key::ArrowRight => Some(&mut self.right),
            Key::Escape => None,
        }
    }

    pub fn press(&mut self, key: Key) {
        if let Some(remaining) = self.remaining(key) {
            *remaining = FLASH_FRAMES;
        }
    }

    pub fn is_lit(&self, key: Key) -> bool {
        match key {
            Key::Enter => self.enter > 0.0,
            Key::ArrowLeft => self.left > 0.0,
            Key::ArrowRight => self.right > 0.0,
            Key::Escape => false,
        }
    }

    pub fn tick(&mut self, tick: &Tick) {
        for remaining in [&mut self.enter, &mut self.left, &mut self.right] {
            *remaining = (*remaining - tick.scale).max(0.0);
        }
    }
}
