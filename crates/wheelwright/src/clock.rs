use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::time::Duration;
use strum::{Display, EnumIter, EnumString};

/// Nominal display refresh every per-frame constant is tuned for.
pub const REFERENCE_FRAME: Duration = Duration::from_micros(16_667);
/// Upper bound on how many nominal frames one late tick may cover.
const MAX_FRAME_SCALE: f64 = 4.0;

/// How animation progress relates to time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Timing {
    /// Every tick advances animations by one fixed step, so durations follow
    /// the display's refresh rate.
    #[default]
    #[strum(to_string = "frame", serialize = "tick", serialize = "fixed")]
    Frame,
    /// Steps are scaled by the time since the previous tick.
    #[strum(to_string = "elapsed", serialize = "delta", serialize = "time")]
    Elapsed,
}

/// One display refresh worth of animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub frame: u64,
    /// Nominal frames covered by this tick (always 1.0 with [`Timing::Frame`]).
    pub scale: f64,
}

impl Tick {
    /// Scales an increment tuned for one nominal frame.
    pub fn step(&self, per_frame: f64) -> f64 {
        per_frame * self.scale
    }

    /// Scales an interpolation factor tuned for one nominal frame, so that
    /// `n` ticks of scale `1/n` blend as far as one tick of scale 1.
    pub fn blend(&self, per_frame: f64) -> f64 {
        1.0 - (1.0 - per_frame.clamp(0.0, 1.0)).powf(self.scale)
    }
}

/// Per-refresh tick source. Everything that animates advances only when the
/// clock does.
#[derive(Debug, Clone, Default)]
pub struct AnimationClock {
    timing: Timing,
    frame: u64,
    last: Option<Duration>,
}

impl AnimationClock {
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn set_timing(&mut self, timing: Timing) {
        self.timing = timing;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advances to the refresh presented at `now`, a monotonic timestamp.
    pub fn advance(&mut self, now: Duration) -> Tick {
        let delta = match self.last.replace(now) {
            Some(prev) => now.saturating_sub(prev),
            None => REFERENCE_FRAME,
        };
        self.frame += 1;

        let scale = match self.timing {
            Timing::Frame => 1.0,
            Timing::Elapsed => {
                (delta.as_secs_f64() / REFERENCE_FRAME.as_secs_f64()).min(MAX_FRAME_SCALE)
            }
        };

        Tick {
            frame: self.frame,
            scale,
        }
    }

    /// Advances by exactly one nominal frame.
    pub fn advance_frame(&mut self) -> Tick {
        let now = self
            .last
            .map_or(Duration::ZERO, |last| last + REFERENCE_FRAME);
        self.advance(now)
    }
}
