pub mod assets;
pub mod runtime;
pub mod server;
