pub mod scene;
pub mod view;

pub use scene::Scene;
pub use view::draw;

/// Size of each halo layer behind the wheel, relative to the wheel width.
pub const AURA_LAYERS: [f64; 3] = [1.4, 1.87, 2.37];
/// Label text height as a fraction of the label box height.
pub const TEXT_FILL: f64 = 0.8;
pub const LABEL_STROKE_WIDTH: f64 = 3.0;
pub const RIM_WIDTH: f64 = 0.02;
