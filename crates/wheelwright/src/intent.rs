use crate::slot::{SlotIndex, SlotIndexError};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use thiserror::Error;

/// High-level requests produced by the input router, the control socket and
/// on-screen buttons. Whether an intent does anything depends on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Advance,
    Back,
    RotateNext,
    RotatePrev,
    Select(SlotIndex),
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Verb {
    #[strum(to_string = "advance", serialize = "start", serialize = "enter")]
    Advance,
    Back,
    #[strum(to_string = "next", serialize = "right")]
    Next,
    #[strum(to_string = "prev", serialize = "left")]
    Prev,
    #[strum(to_string = "select", serialize = "open")]
    Select,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIntentError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'select' needs a slot number")]
    MissingSlot,
    #[error("invalid slot number '{0}'")]
    InvalidSlot(String),
    #[error(transparent)]
    Slot(#[from] SlotIndexError),
    #[error("unexpected argument '{0}'")]
    Trailing(String),
}

impl FromStr for Intent {
    type Err = ParseIntentError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(ParseIntentError::Empty)?;
        let verb =
            Verb::from_str(head).map_err(|_| ParseIntentError::Unknown(head.to_string()))?;

        let intent = match verb {
            Verb::Advance => Intent::Advance,
            Verb::Back => Intent::Back,
            Verb::Next => Intent::RotateNext,
            Verb::Prev => Intent::RotatePrev,
            Verb::Close => Intent::Close,
            Verb::Select => {
                let raw = words.next().ok_or(ParseIntentError::MissingSlot)?;
                let index = raw
                    .parse::<usize>()
                    .map_err(|_| ParseIntentError::InvalidSlot(raw.to_string()))?;
                Intent::Select(SlotIndex::new(index)?)
            }
        };

        match words.next() {
            Some(extra) => Err(ParseIntentError::Trailing(extra.to_string())),
            None => Ok(intent),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Advance => write!(f, "{}", Verb::Advance),
            Intent::Back => write!(f, "{}", Verb::Back),
            Intent::RotateNext => write!(f, "{}", Verb::Next),
            Intent::RotatePrev => write!(f, "{}", Verb::Prev),
            Intent::Select(slot) => write!(f, "{} {}", Verb::Select, slot),
            Intent::Close => write!(f, "{}", Verb::Close),
        }
    }
}
