use crate::content::SlotBook;
use gdk_pixbuf::Pixbuf;
use std::cell::RefCell;
use std::rc::Rc;
use wheelwright::machine::{ScreenStateMachine, Settings};
use wheelwright::wheel::WheelBounds;

/// Everything the renderer reads: the state machine, the slot texts and the
/// wheel image once it has been loaded.
pub struct Scene {
    pub machine: ScreenStateMachine,
    pub book: Rc<RefCell<SlotBook>>,
    image: Option<Pixbuf>,
}

impl Scene {
    pub fn new(settings: Settings, book: Rc<RefCell<SlotBook>>) -> Self {
        Self {
            machine: ScreenStateMachine::new(settings),
            book,
            image: None,
        }
    }

    /// Hands the loaded wheel to the machine. Without an image the wheel is
    /// drawn procedurally.
    pub fn attach_wheel(&mut self, width: f64, image: Option<Pixbuf>) {
        self.image = image;
        self.machine.attach_wheel(WheelBounds::new(width));
    }

    pub fn image(&self) -> Option<&Pixbuf> {
        self.image.as_ref()
    }
}
