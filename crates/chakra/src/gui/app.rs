use crate::config::{self, Config, WheelConfig};
use crate::content::SlotBook;
use crate::events::AppEvent;
use crate::gui::detail::DetailView;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, Scene};
use crate::gui::window;
use crate::sys::assets;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wheelwright::geometry::{Point, Viewport};
use wheelwright::input::Key;
use wheelwright::intent::Intent;
use wheelwright::machine::ScreenStateMachine;
use wheelwright::screen::{Screen, ScreenObserver};

/// Widget state mirrored from the machine after every message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chrome {
    pub splash: bool,
    pub main: bool,
    pub enter_lit: bool,
    pub left_lit: bool,
    pub right_lit: bool,
}

impl Chrome {
    fn of(machine: &ScreenStateMachine) -> Self {
        let hints = machine.hints();
        Self {
            splash: machine.splash_visible(),
            main: machine.screen() == Screen::Main,
            enter_lit: hints.is_lit(Key::Enter),
            left_lit: hints.is_lit(Key::ArrowLeft),
            right_lit: hints.is_lit(Key::ArrowRight),
        }
    }
}

pub struct AppInit {
    pub config: Config,
    pub rx: async_channel::Receiver<AppEvent>,
    pub observers: Vec<Box<dyn ScreenObserver>>,
}

pub struct AppModel {
    pub scene: Rc<RefCell<Scene>>,
    pub detail: DetailView,
    pub chrome: Chrome,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Intent(Intent),
    Key(Key),
    PointerDown(Point),
    /// Frame clock time of the refresh about to be drawn.
    Frame(Duration),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Intent(intent) => AppMsg::Intent(intent),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Chakra"),
            add_css_class: "chakra-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key.name().and_then(|name| name.parse::<Key>().ok()) {
                        Some(key) => {
                            sender.input(AppMsg::Key(key));
                            glib::Propagation::Stop
                        }
                        None => glib::Propagation::Proceed,
                    }
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "chakra-scene",

                    add_controller = gtk::GestureClick {
                        connect_pressed[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::PointerDown(Point::new(x, y)));
                        }
                    }
                },

                add_overlay = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 18,
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::Center,
                    add_css_class: "chakra-splash",
                    #[watch]
                    set_visible: model.chrome.splash,

                    gtk::Label {
                        set_label: "Rigveda",
                        add_css_class: "title",
                    },
                    gtk::Label {
                        set_label: "Ten mandals around one wheel",
                    },
                    gtk::Button {
                        set_label: "Start",
                        set_halign: gtk::Align::Center,
                        connect_clicked[sender] => move |_| {
                            sender.input(AppMsg::Intent(Intent::Advance));
                        },
                    },
                },

                add_overlay = &gtk::Button {
                    set_label: "← Back",
                    set_halign: gtk::Align::Start,
                    set_valign: gtk::Align::Start,
                    set_margin_all: 18,
                    add_css_class: "chakra-back",
                    #[watch]
                    set_visible: model.chrome.main,
                    connect_clicked[sender] => move |_| {
                        sender.input(AppMsg::Intent(Intent::Back));
                    },
                },

                add_overlay = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 7,
                    set_halign: gtk::Align::End,
                    set_valign: gtk::Align::End,
                    set_margin_all: 18,
                    set_can_target: false,
                    add_css_class: "chakra-controls",
                    #[watch]
                    set_visible: model.chrome.main,

                    gtk::Label {
                        set_markup: "<b>Enter</b>: Select",
                        set_halign: gtk::Align::Start,
                        #[watch]
                        set_class_active: ("lit", model.chrome.enter_lit),
                    },
                    gtk::Label {
                        set_markup: "<b>← Left Arrow</b>: Previous",
                        set_halign: gtk::Align::Start,
                        #[watch]
                        set_class_active: ("lit", model.chrome.left_lit),
                    },
                    gtk::Label {
                        set_markup: "<b>→ Right Arrow</b>: Next",
                        set_halign: gtk::Align::Start,
                        #[watch]
                        set_class_active: ("lit", model.chrome.right_lit),
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            rx,
            observers,
        } = init;

        theme::load_css();
        window::init_window(&root, config.display.overlay);

        let book = Rc::new(RefCell::new(SlotBook::from_config(&config)));
        let mut scene = Scene::new(config.settings(), book.clone());
        for observer in observers {
            scene.machine.observe(observer);
        }

        let detail = {
            let sender = sender.clone();
            DetailView::new(book, move || sender.input(AppMsg::Intent(Intent::Close)))
        };
        scene.machine.set_panel(Box::new(detail.clone()));

        let chrome = Chrome::of(&scene.machine);
        let model = AppModel {
            scene: Rc::new(RefCell::new(scene)),
            detail,
            chrome,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        widgets.overlay.add_overlay(&model.detail.root);

        let scene_draw = model.scene.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let viewport = Viewport::new(width as f64, height as f64);
                if let Err(e) = wheel::draw(cr, &scene_draw.borrow(), &colors, viewport) {
                    log::error!("Drawing error: {}", e);
                }
            });

        {
            let sender = sender.clone();
            widgets.drawing_area.add_tick_callback(move |_, clock| {
                let micros = u64::try_from(clock.frame_time()).unwrap_or_default();
                sender.input(AppMsg::Frame(Duration::from_micros(micros)));
                glib::ControlFlow::Continue
            });
        }

        load_wheel(model.scene.clone(), config.wheel);

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Intent(intent) => {
                self.scene.borrow_mut().machine.apply(intent);
            }
            AppMsg::Key(key) => {
                self.scene.borrow_mut().machine.press_key(key);
            }
            AppMsg::PointerDown(at) => {
                let viewport = self.viewport();
                self.scene.borrow_mut().machine.pointer_down(at, viewport);
            }
            AppMsg::Frame(now) => {
                self.scene.borrow_mut().machine.tick(now);
            }
            AppMsg::ConfigReload => self.reload_config(),
        }

        self.chrome = Chrome::of(&self.scene.borrow().machine);
        self.drawing_area.queue_draw();
    }
}

impl AppModel {
    fn viewport(&self) -> Viewport {
        Viewport::new(
            self.drawing_area.width() as f64,
            self.drawing_area.height() as f64,
        )
    }

    fn reload_config(&mut self) {
        match config::load_config() {
            Ok(new_config) => {
                let mut scene = self.scene.borrow_mut();
                *scene.book.borrow_mut() = SlotBook::from_config(&new_config);
                scene.machine.apply_settings(new_config.settings());
                drop(scene);
                self.detail.refresh();
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
    }
}

/// Loads the wheel once the main loop is idle. Until then, and for good if
/// the configured image cannot be loaded, the wheel stays absent.
fn load_wheel(scene: Rc<RefCell<Scene>>, wheel: WheelConfig) {
    glib::idle_add_local_once(move || {
        let image = match &wheel.asset {
            Some(asset) => match assets::load_wheel_image(asset) {
                Ok(pixbuf) => Some(pixbuf),
                Err(e) => {
                    log::error!("Failed to load wheel image: {}", e);
                    return;
                }
            },
            None => None,
        };
        scene.borrow_mut().attach_wheel(wheel.width, image);
    });
}
