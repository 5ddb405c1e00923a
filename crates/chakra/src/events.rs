use wheelwright::intent::Intent;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Intent(Intent),
    ConfigReload,
}
