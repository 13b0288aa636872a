/// ASCII compositor for projected faces
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use cuboid_core::{
    DrawCommand, FaceIndex, FaceSource, GlyphSurface, Projection, Rect, Surface, Transform,
};
use nalgebra::Point2;
use std::io::Write;

/// Foreground color per face index
const FACE_COLORS: [Color; 4] = [Color::Cyan, Color::Yellow, Color::Green, Color::Magenta];

/// Glyph used to outline a face whose surface is not available
const PLACEHOLDER: char = '.';

/// Character-cell canvas that draw commands are composited onto
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    face_buffer: Vec<Option<FaceIndex>>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            char_buffer: vec![' '; size],
            face_buffer: vec![None; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
        self.face_buffer.fill(None);
    }

    /// Composite one command; later commands overwrite earlier ones.
    pub fn draw_command<S>(&mut self, command: &DrawCommand, source: &S)
    where
        S: FaceSource<Surface = GlyphSurface>,
    {
        match command {
            DrawCommand::Projected { face, projection } => {
                if let Some(surface) = source.surface(*face) {
                    self.render_projected(*face, surface, projection);
                }
            }
            DrawCommand::Direct { face, bounds } => match source.surface(*face) {
                Some(surface) => self.render_direct(*face, surface, bounds),
                None => self.render_placeholder(*face, bounds),
            },
        }
    }

    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.char_buffer[y * self.width + x])
    }

    fn render_projected(&mut self, face: FaceIndex, surface: &GlyphSurface, projection: &Projection) {
        let Some(inverse) = projection.matrix.try_inverse() else {
            return;
        };
        let Some(corners) = projection.corners(surface.size()) else {
            return;
        };

        // Bounding box of the projected quad
        let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor() as i32;
        let max_x = corners.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;
        let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor() as i32;
        let max_y = corners.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Sample the surface at each covered cell center
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let cell = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                let Some(local) = Transform::map_point(&inverse, &cell) else {
                    continue;
                };
                if local.x < 0.0 || local.y < 0.0 || projection.map(&local).is_none() {
                    continue;
                }
                if let Some(glyph) = surface.glyph(local.x as usize, local.y as usize) {
                    self.put(x as usize, y as usize, glyph, face);
                }
            }
        }
    }

    fn render_direct(&mut self, face: FaceIndex, surface: &GlyphSurface, bounds: &Rect) {
        let left = bounds.left.round() as i32;
        let top = bounds.top.round() as i32;
        for (row, glyphs) in surface.rows().enumerate() {
            for (col, glyph) in glyphs.iter().enumerate() {
                let x = left + col as i32;
                let y = top + row as i32;
                if x >= 0 && y >= 0 {
                    self.put(x as usize, y as usize, *glyph, face);
                }
            }
        }
    }

    fn render_placeholder(&mut self, face: FaceIndex, bounds: &Rect) {
        let left = bounds.left.round().max(0.0) as usize;
        let top = bounds.top.round().max(0.0) as usize;
        let right = bounds.right.round().max(0.0) as usize;
        let bottom = bounds.bottom.round().max(0.0) as usize;
        for y in top..bottom {
            for x in left..right {
                let edge = y == top || y + 1 == bottom || x == left || x + 1 == right;
                self.put(x, y, if edge { PLACEHOLDER } else { ' ' }, face);
            }
        }
    }

    fn put(&mut self, x: usize, y: usize, glyph: char, face: FaceIndex) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        self.char_buffer[idx] = glyph;
        self.face_buffer[idx] = Some(face);
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = match self.face_buffer[idx] {
                    Some(face) => FACE_COLORS[face.get() % FACE_COLORS.len()],
                    None => Color::DarkGrey,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuboid_core::{FaceProjector, Size};

    struct OneFace {
        surface: Option<GlyphSurface>,
        bounds: Rect,
    }

    impl FaceSource for OneFace {
        type Surface = GlyphSurface;

        fn surface(&self, _face: FaceIndex) -> Option<&GlyphSurface> {
            self.surface.as_ref()
        }

        fn bounds(&self, _face: FaceIndex) -> Rect {
            self.bounds
        }

        fn container_size(&self) -> Size {
            Size::new(10.0, 6.0)
        }
    }

    fn face(i: usize) -> FaceIndex {
        FaceIndex::new(i).unwrap()
    }

    #[test]
    fn test_flat_projection_copies_surface() {
        let source = OneFace {
            surface: Some(GlyphSurface::from_lines(&["ab", "cd"])),
            bounds: Rect::new(4.0, 2.0, 6.0, 4.0),
        };
        // Center y = 3 = container half height, so no depth scaling
        let projection =
            FaceProjector::default().project(Point2::new(4.0, 2.0), Size::new(2.0, 2.0), 6.0, 0.0);
        let mut renderer = AsciiRenderer::new(10, 6);
        renderer.draw_command(
            &DrawCommand::Projected {
                face: face(0),
                projection,
            },
            &source,
        );
        assert_eq!(renderer.glyph(4, 2), Some('a'));
        assert_eq!(renderer.glyph(5, 2), Some('b'));
        assert_eq!(renderer.glyph(4, 3), Some('c'));
        assert_eq!(renderer.glyph(5, 3), Some('d'));
        assert_eq!(renderer.glyph(3, 2), Some(' '));
    }

    #[test]
    fn test_direct_draw_without_surface_outlines_bounds() {
        let source = OneFace {
            surface: None,
            bounds: Rect::new(1.0, 1.0, 4.0, 4.0),
        };
        let mut renderer = AsciiRenderer::new(10, 6);
        renderer.draw_command(
            &DrawCommand::Direct {
                face: face(1),
                bounds: source.bounds,
            },
            &source,
        );
        assert_eq!(renderer.glyph(1, 1), Some(PLACEHOLDER));
        assert_eq!(renderer.glyph(2, 2), Some(' '));
        assert_eq!(renderer.glyph(3, 3), Some(PLACEHOLDER));
        assert_eq!(renderer.glyph(4, 4), Some(' '));
    }

    #[test]
    fn test_clear_resets_buffers() {
        let source = OneFace {
            surface: Some(GlyphSurface::from_lines(&["z"])),
            bounds: Rect::new(0.0, 0.0, 1.0, 1.0),
        };
        let mut renderer = AsciiRenderer::new(3, 3);
        renderer.draw_command(
            &DrawCommand::Direct {
                face: face(2),
                bounds: source.bounds,
            },
            &source,
        );
        assert_eq!(renderer.glyph(0, 0), Some('z'));
        renderer.clear();
        assert_eq!(renderer.glyph(0, 0), Some(' '));
    }
}
