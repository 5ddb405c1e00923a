use strum::{Display, EnumIter, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Screen {
    /// Splash screen, wheel idling in the distance.
    #[default]
    Start,
    /// Camera close to the wheel, labels readable and navigable.
    Main,
    /// A slot's detail panel covers the wheel.
    Detail,
}

/// Receives every screen change, in the order the changes happen.
pub trait ScreenObserver {
    fn screen_changed(&mut self, from: Screen, to: Screen);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(Screen::Start.to_string(), "start");
        assert_eq!(<&'static str>::from(Screen::Detail), "detail");
    }
}
