use chakra::config;
use chakra::gui::app::{AppInit, AppModel};
use chakra::sys::{runtime, server};
use relm4::prelude::*;
use std::path::PathBuf;
use wheelwright::protocol::SOCKET_PATH;
use wheelwright::volume::VolumePolicy;

fn main() {
    env_logger::init();

    if let Err(e) = config::write_default_config() {
        log::warn!("Failed to write default config: {}", e);
    }
    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);
    let socket = PathBuf::from(SOCKET_PATH);

    // Start Background Services
    runtime::start_background_services(tx, socket.clone());

    let volume = VolumePolicy::new();
    let app = RelmApp::new("org.chakra.wheel");

    app.run::<AppModel>(AppInit {
        config,
        rx,
        observers: vec![Box::new(volume)],
    });

    server::remove_socket(&socket);
}
