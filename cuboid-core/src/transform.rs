/// Matrix builders for the face projection pipeline
use nalgebra::{Matrix3, Matrix4, Point2, Vector2, Vector3};

/// Below this the homogeneous coordinate is treated as behind the eye
const MIN_W: f32 = 1e-6;

/// Transform builder for 2D projective and 3D model transformations
pub struct Transform;

impl Transform {
    /// Rotation about the vertical (Y) axis
    pub fn rotation_y(degrees: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, degrees.to_radians(), 0.0))
    }

    /// Create a 3D translation matrix
    pub fn translation_3d(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a 2D translation matrix
    pub fn translation(dx: f32, dy: f32) -> Matrix3<f32> {
        Matrix3::new_translation(&Vector2::new(dx, dy))
    }

    /// Uniform 2D scale that leaves the homogeneous row alone
    pub fn scale(s: f32) -> Matrix3<f32> {
        Matrix3::new_nonuniform_scaling(&Vector2::new(s, s))
    }

    /// Translate before applying `m`
    pub fn pre_translate(m: &Matrix3<f32>, dx: f32, dy: f32) -> Matrix3<f32> {
        m * Self::translation(dx, dy)
    }

    /// Scale after applying `m`
    pub fn post_scale(m: &Matrix3<f32>, s: f32) -> Matrix3<f32> {
        Self::scale(s) * m
    }

    /// Translate after applying `m`
    pub fn post_translate(m: &Matrix3<f32>, dx: f32, dy: f32) -> Matrix3<f32> {
        Self::translation(dx, dy) * m
    }

    /// Map a point through a projective matrix. `None` when the point lands
    /// at or behind the eye.
    pub fn map_point(m: &Matrix3<f32>, point: &Point2<f32>) -> Option<Point2<f32>> {
        let h = m * Vector3::new(point.x, point.y, 1.0);
        if h.z <= MIN_W {
            return None;
        }
        Some(Point2::new(h.x / h.z, h.y / h.z))
    }
}
