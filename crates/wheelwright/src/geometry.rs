use std::f64::consts::PI;

/// Vertical field of view of the scene camera.
pub const FIELD_OF_VIEW: f64 = 50.0 * PI / 180.0;
pub const NEAR_PLANE: f64 = 0.1;

/// A point in screen space (pixels, y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A point in world space (y grows upwards, the camera looks down -z).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(self, other: Vec3) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn lerp(self, target: Vec3, t: f64) -> Self {
        Self {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
            z: self.z + (target.z - self.z) * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Perspective projection of world points as seen from an eye position
/// looking straight down the -z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    eye: Vec3,
    focal: f64,
    viewport: Viewport,
}

impl Projection {
    pub fn new(eye: Vec3, viewport: Viewport) -> Self {
        let focal = (viewport.height / 2.0) / (FIELD_OF_VIEW / 2.0).tan();
        Self {
            eye,
            focal,
            viewport,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Pixels per world unit for geometry lying in the plane `z`.
    /// `None` when the plane is behind the near plane.
    pub fn scale_at(&self, z: f64) -> Option<f64> {
        let depth = self.eye.z - z;
        (depth > NEAR_PLANE).then(|| self.focal / depth)
    }

    pub fn project(&self, world: Vec3) -> Option<Point> {
        let scale = self.scale_at(world.z)?;
        let center = self.viewport.center();
        Some(Point::new(
            center.x + (world.x - self.eye.x) * scale,
            center.y - (world.y - self.eye.y) * scale,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec3::new(0.0, 0.0, 5.0);
        let b = Vec3::new(0.75, 0.0, 1.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!(close(mid.x, 0.375));
        assert!(close(mid.z, 3.0));
    }

    #[test]
    fn test_projection_centers_eye_axis() {
        let projection = Projection::new(Vec3::new(0.75, 0.0, 1.0), Viewport::new(900.0, 600.0));
        let p = projection.project(Vec3::new(0.75, 0.0, 0.0)).unwrap();
        assert!(close(p.x, 450.0));
        assert!(close(p.y, 300.0));
    }

    #[test]
    fn test_projection_orientation() {
        let projection = Projection::new(Vec3::new(0.0, 0.0, 5.0), Viewport::new(800.0, 600.0));
        let right_up = projection.project(Vec3::new(1.0, 1.0, 0.0)).unwrap();
        assert!(right_up.x > 400.0);
        assert!(right_up.y < 300.0);
    }

    #[test]
    fn test_projection_behind_eye() {
        let projection = Projection::new(Vec3::new(0.0, 0.0, 1.0), Viewport::new(800.0, 600.0));
        assert!(projection.project(Vec3::new(0.0, 0.0, 2.0)).is_none());
        assert!(projection.scale_at(0.95).is_none());
    }

    #[test]
    fn test_closer_eye_magnifies() {
        let viewport = Viewport::new(800.0, 600.0);
        let far = Projection::new(Vec3::new(0.0, 0.0, 5.0), viewport);
        let near = Projection::new(Vec3::new(0.0, 0.0, 1.0), viewport);
        assert!(near.scale_at(0.0).unwrap() > far.scale_at(0.0).unwrap());
    }
}
