/// Camera emulation and per-face projection
use nalgebra::{Matrix3, Point2, Vector2};

use crate::config::{DEFAULT_EYE_DISTANCE, SCALE_DOWN_FACTOR};
use crate::geometry::Size;
use crate::transform::Transform;

/// Single-axis camera looking down +Z from `eye_distance` in front of the
/// image plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera3D {
    pub eye_distance: f32,
}

impl Camera3D {
    pub fn new(eye_distance: f32) -> Self {
        Self { eye_distance }
    }

    /// Projective matrix for the image plane rotated about a vertical axis
    /// `pivot_depth` behind it. Identity at zero degrees.
    pub fn matrix(&self, rotation_degrees: f32, pivot_depth: f32) -> Matrix3<f32> {
        let model = Transform::translation_3d(0.0, 0.0, pivot_depth)
            * Transform::rotation_y(rotation_degrees)
            * Transform::translation_3d(0.0, 0.0, -pivot_depth);

        // Points on the plane have z = 0, so column 2 of the model drops out.
        let d = self.eye_distance;
        let m = Matrix3::new(
            model[(0, 0)],
            model[(0, 1)],
            model[(0, 3)],
            model[(1, 0)],
            model[(1, 1)],
            model[(1, 3)],
            model[(2, 0)] / d,
            model[(2, 1)] / d,
            1.0 + model[(2, 3)] / d,
        );

        let w = m[(2, 2)];
        if w.abs() > f32::EPSILON {
            m / w
        } else {
            m
        }
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new(DEFAULT_EYE_DISTANCE)
    }
}

/// Shrink factor for a face whose center sits `dist_from_center`
/// half-heights away from the container's vertical center.
pub fn depth_scale(dist_from_center: f32) -> f32 {
    1.0 - SCALE_DOWN_FACTOR * (1.0 - dist_from_center.cos())
}

/// Placement of one face for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale: f32,
    pub rotation_degrees: f32,
    /// Screen position of the face center
    pub translate: Vector2<f32>,
    /// Maps face-local pixels to container pixels
    pub matrix: Matrix3<f32>,
}

impl Projection {
    pub fn map(&self, point: &Point2<f32>) -> Option<Point2<f32>> {
        Transform::map_point(&self.matrix, point)
    }

    /// Projected corners in top-left, top-right, bottom-right, bottom-left order.
    pub fn corners(&self, size: Size) -> Option<[Point2<f32>; 4]> {
        Some([
            self.map(&Point2::new(0.0, 0.0))?,
            self.map(&Point2::new(size.width, 0.0))?,
            self.map(&Point2::new(size.width, size.height))?,
            self.map(&Point2::new(0.0, size.height))?,
        ])
    }
}

/// Computes the pseudo-3D transform of a flat face.
///
/// Holds no per-frame state: calling [`project`](Self::project) twice with the
/// same arguments yields the same matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaceProjector {
    camera: Camera3D,
}

impl FaceProjector {
    pub fn new(camera: Camera3D) -> Self {
        Self { camera }
    }

    pub fn project(
        &self,
        top_left: Point2<f32>,
        size: Size,
        container_height: f32,
        rotation_degrees: f32,
    ) -> Projection {
        let (center_x, center_y) = size.half();

        let half_height = container_height / 2.0;
        let dist_from_center = if half_height > 0.0 {
            (top_left.y + center_y - half_height) / half_height
        } else {
            0.0
        };
        let scale = depth_scale(dist_from_center);

        let rotation = self.camera.matrix(rotation_degrees, center_x);
        let matrix = Transform::pre_translate(&rotation, -center_x, -center_y);
        let matrix = Transform::post_scale(&matrix, scale);
        let translate = Vector2::new(top_left.x + center_x, top_left.y + center_y);
        let matrix = Transform::post_translate(&matrix, translate.x, translate.y);

        log::trace!(
            "projected face at ({:.1},{:.1}) scale={:.4} rotation={:+.0}",
            top_left.x,
            top_left.y,
            scale,
            rotation_degrees
        );

        Projection {
            scale,
            rotation_degrees,
            translate,
            matrix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_camera_identity_at_zero() {
        let camera = Camera3D::default();
        let m = camera.matrix(0.0, 150.0);
        assert!((m - Matrix3::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_depth_scale_values() {
        assert_eq!(depth_scale(0.0), 1.0);
        let edge = 1.0 - 0.15 * (1.0 - 1.0f32.cos());
        assert!(approx(depth_scale(1.0), edge));
        assert!(approx(depth_scale(-1.0), edge));
        assert!(approx(depth_scale(1.0), 0.93105));
    }

    #[test]
    fn test_centered_face_is_untouched() {
        let projector = FaceProjector::default();
        // Center y = 100 + 200 = 300, container half height = 300
        let p = projector.project(Point2::new(50.0, 100.0), Size::new(200.0, 400.0), 600.0, 0.0);
        assert_eq!(p.scale, 1.0);
        let corners = p.corners(Size::new(200.0, 400.0)).unwrap();
        assert!(approx(corners[0].x, 50.0) && approx(corners[0].y, 100.0));
        assert!(approx(corners[2].x, 250.0) && approx(corners[2].y, 500.0));
        assert!(approx(p.translate.x, 150.0) && approx(p.translate.y, 300.0));
    }

    #[test]
    fn test_off_center_face_shrinks_about_its_center() {
        let projector = FaceProjector::default();
        let size = Size::new(100.0, 100.0);
        // Center y = 150, half height = 75 -> one half-height below center
        let p = projector.project(Point2::new(0.0, 100.0), size, 150.0, 0.0);
        assert!(approx(p.scale, depth_scale(1.0)));
        let center = p.map(&Point2::new(50.0, 50.0)).unwrap();
        assert!(approx(center.x, 50.0) && approx(center.y, 150.0));
        let corners = p.corners(size).unwrap();
        assert!(approx(corners[1].x - corners[0].x, 100.0 * p.scale));
    }

    #[test]
    fn test_quarter_turn_collapses_width() {
        let projector = FaceProjector::default();
        let size = Size::new(300.0, 300.0);
        let flat = projector.project(Point2::new(0.0, 0.0), size, 300.0, 0.0);
        let turned = projector.project(Point2::new(0.0, 0.0), size, 300.0, 90.0);
        let width = |p: &Projection| {
            let c = p.corners(size).unwrap();
            (c[1].x - c[0].x).abs()
        };
        assert!(width(&turned) < 0.25 * width(&flat));
    }

    #[test]
    fn test_opposite_turns_mirror_about_center() {
        let projector = FaceProjector::default();
        let size = Size::new(200.0, 200.0);
        let right = projector.project(Point2::new(0.0, 0.0), size, 200.0, 45.0);
        let left = projector.project(Point2::new(0.0, 0.0), size, 200.0, -45.0);
        let r = right.map(&Point2::new(0.0, 100.0)).unwrap();
        let l = left.map(&Point2::new(200.0, 100.0)).unwrap();
        assert!(approx(r.x - 100.0, 100.0 - l.x));
        assert!(approx(r.y, l.y));
    }

    #[test]
    fn test_projection_is_repeatable() {
        let projector = FaceProjector::default();
        let a = projector.project(Point2::new(10.0, 20.0), Size::new(80.0, 60.0), 300.0, -90.0);
        let b = projector.project(Point2::new(10.0, 20.0), Size::new(80.0, 60.0), 300.0, -90.0);
        assert_eq!(a, b);
    }
}
