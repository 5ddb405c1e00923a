pub mod camera;
pub mod clock;
pub mod geometry;
pub mod hints;
pub mod input;
pub mod intent;
pub mod labels;
pub mod machine;
pub mod protocol;
pub mod screen;
pub mod slot;
pub mod volume;
pub mod wheel;
