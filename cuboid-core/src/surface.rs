/// Pre-rendered flat images of the faces
use crate::geometry::Size;

/// A flat image the presentation layer can draw through a face matrix
pub trait Surface {
    fn size(&self) -> Size;
}

/// Character raster, one glyph per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSurface {
    width: usize,
    height: usize,
    glyphs: Vec<char>,
}

impl GlyphSurface {
    /// Build from text rows. Short rows are padded with spaces.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let width = lines
            .iter()
            .map(|line| line.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let height = lines.len();
        let mut glyphs = Vec::with_capacity(width * height);
        for line in lines {
            let row: Vec<char> = line.as_ref().chars().collect();
            glyphs.extend(row.iter().copied());
            glyphs.extend(std::iter::repeat(' ').take(width - row.len()));
        }
        Self {
            width,
            height,
            glyphs,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.glyphs.get(y * self.width + x).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks() panics on zero
        self.glyphs.chunks(self.width.max(1))
    }
}

impl Surface for GlyphSurface {
    fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}
