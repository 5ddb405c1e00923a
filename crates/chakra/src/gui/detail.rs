use crate::content::SlotBook;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wheelwright::machine::DetailPanel;
use wheelwright::slot::SlotIndex;

/// Full-window panel with a slot's title and description. The close button
/// and any press outside the card call `on_close`; the screen change itself
/// is left to the state machine.
#[derive(Clone)]
pub struct DetailView {
    pub root: gtk::Box,
    title: gtk::Label,
    description: gtk::Label,
    book: Rc<RefCell<SlotBook>>,
    open_slot: Rc<Cell<Option<SlotIndex>>>,
}

impl DetailView {
    pub fn new(book: Rc<RefCell<SlotBook>>, on_close: impl Fn() + 'static) -> Self {
        let on_close = Rc::new(on_close);

        let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
        root.add_css_class("chakra-detail");
        root.set_hexpand(true);
        root.set_vexpand(true);
        root.set_visible(false);

        let close_button = gtk::Button::with_label("×");
        close_button.set_halign(gtk::Align::End);
        close_button.set_margin_top(18);
        close_button.set_margin_end(18);
        {
            let on_close = on_close.clone();
            close_button.connect_clicked(move |_| on_close());
        }
        root.append(&close_button);

        let card = gtk::Box::new(gtk::Orientation::Vertical, 18);
        card.add_css_class("chakra-detail-card");
        card.set_halign(gtk::Align::Center);
        card.set_valign(gtk::Align::Start);
        card.set_width_request(480);

        let title = gtk::Label::new(None);
        title.add_css_class("title");
        card.append(&title);

        let description = gtk::Label::new(None);
        description.add_css_class("description");
        description.set_wrap(true);
        description.set_max_width_chars(60);
        description.set_margin_top(24);
        card.append(&description);

        root.append(&card);

        let outside = gtk::GestureClick::new();
        {
            let (root_ref, card) = (root.clone(), card.clone());
            outside.connect_pressed(move |_, _, x, y| {
                let keep_open = root_ref.pick(x, y, gtk::PickFlags::DEFAULT).is_some_and(|w| {
                    &w == card.upcast_ref::<gtk::Widget>()
                        || w.is_ancestor(&card)
                        || w.is::<gtk::Button>()
                        || w.ancestor(gtk::Button::static_type()).is_some()
                });
                if !keep_open {
                    on_close();
                }
            });
        }
        root.add_controller(outside);

        Self {
            root,
            title,
            description,
            book,
            open_slot: Rc::new(Cell::new(None)),
        }
    }

    /// Re-reads the open slot's text, e.g. after a config reload.
    pub fn refresh(&self) {
        if let Some(slot) = self.open_slot.get() {
            self.fill(slot);
        }
    }

    fn fill(&self, slot: SlotIndex) {
        let book = self.book.borrow();
        let content = book.get(slot);
        self.title.set_label(&content.label);
        self.description.set_label(&content.description);
    }
}

impl DetailPanel for DetailView {
    fn open(&mut self, slot: SlotIndex) {
        self.fill(slot);
        self.open_slot.set(Some(slot));
        self.root.set_visible(true);
    }

    fn close(&mut self) {
        if let Some(slot) = self.open_slot.take() {
            log::debug!("Closing detail panel of slot {}", slot);
        }
        self.root.set_visible(false);
    }
}
