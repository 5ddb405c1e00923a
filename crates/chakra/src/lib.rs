pub mod config;
pub mod content;
pub mod events;
pub mod gui;
pub mod sys;
