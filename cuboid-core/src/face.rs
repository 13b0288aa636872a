/// Face identity on the four-sided cube
use std::fmt;

use crate::config::{DEFAULT_FACE, FACE_COUNT};
use crate::error::{CuboidError, Result};

/// Index of a face, always in `0..FACE_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceIndex(usize);

impl FaceIndex {
    pub const DEFAULT: FaceIndex = FaceIndex(DEFAULT_FACE);

    pub fn new(index: usize) -> Result<Self> {
        if index < FACE_COUNT {
            Ok(Self(index))
        } else {
            Err(CuboidError::InvalidFace(index))
        }
    }

    /// All faces in index order
    pub fn all() -> impl Iterator<Item = FaceIndex> {
        (0..FACE_COUNT).map(FaceIndex)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// The face to the right, wrapping 3 -> 0
    pub fn next(self) -> Self {
        Self((self.0 + 1) % FACE_COUNT)
    }

    /// The face to the left, wrapping 0 -> 3
    pub fn prev(self) -> Self {
        if self.0 == 0 {
            Self(FACE_COUNT - 1)
        } else {
            Self(self.0 - 1)
        }
    }
}

impl Default for FaceIndex {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for FaceIndex {
    type Error = CuboidError;

    fn try_from(index: usize) -> Result<Self> {
        Self::new(index)
    }
}

impl From<FaceIndex> for usize {
    fn from(face: FaceIndex) -> usize {
        face.0
    }
}

impl fmt::Display for FaceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
