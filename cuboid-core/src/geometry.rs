/// Geometry primitives for face placement
use nalgebra::Point2;

/// Width and height in host pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Offset from the top-left corner to the center
    pub fn half(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned rectangle in container coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn top_left(&self) -> Point2<f32> {
        Point2::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.right - self.left, self.bottom - self.top)
    }
}

/// Place a face horizontally centered in the container.
///
/// The top edge sits `vertical_space` below the container top and the bottom
/// edge sits at `face_size.height`, so the laid-out height is
/// `face_size.height - vertical_space`.
pub fn position_face(container_width: f32, face_size: Size, vertical_space: f32) -> Rect {
    let left = (container_width - face_size.width) / 2.0;
    let top = vertical_space;
    let bottom = face_size.height.max(top);
    Rect::new(left, top, left + face_size.width, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_is_centered_horizontally() {
        let rect = position_face(500.0, Size::new(300.0, 400.0), 50.0);
        assert_eq!(rect, Rect::new(100.0, 50.0, 400.0, 400.0));
        assert_eq!(rect.size(), Size::new(300.0, 350.0));
    }

    #[test]
    fn test_bottom_never_above_top() {
        let rect = position_face(100.0, Size::new(40.0, 20.0), 50.0);
        assert_eq!(rect.top, 50.0);
        assert_eq!(rect.bottom, 50.0);
        assert_eq!(rect.size().height, 0.0);
    }
}
