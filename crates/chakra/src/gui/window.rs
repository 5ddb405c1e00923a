use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, Layer, LayerShell};

/// Places the window on the overlay layer, covering the whole output.
/// Returns `false` when the compositor has no layer-shell support.
pub fn init_layer_shell(window: &gtk::ApplicationWindow) -> bool {
    if !gtk4_layer_shell::is_supported() {
        return false;
    }
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some("chakra"));
    window.set_exclusive_zone(-1);
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::Exclusive);
    true
}

pub fn init_window(window: &gtk::ApplicationWindow, overlay: bool) {
    if overlay && !init_layer_shell(window) {
        log::warn!("Layer shell not supported here, opening a regular window");
    }
    if !overlay {
        window.set_default_size(1280, 800);
    }
}
