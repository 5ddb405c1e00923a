pub mod app;
pub mod detail;
pub mod theme;
pub mod wheel;
pub mod window;
