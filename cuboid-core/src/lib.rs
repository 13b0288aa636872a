/// Cuboid Core - rotating cube carousel engine
///
/// Platform-agnostic pieces of a four-faced cube carousel: swipe
/// classification, rotation state, and the per-frame projection of flat face
/// images into a pseudo-3D placement.

pub mod carousel;
pub mod config;
pub mod error;
pub mod face;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod projection;
pub mod sheet;
pub mod surface;
pub mod transform;
pub mod velocity;
pub mod widget;

// Re-export commonly used types
pub use carousel::CarouselState;
pub use config::{CuboidConfig, GestureThresholds, FACE_COUNT};
pub use error::{CuboidError, Result};
pub use face::FaceIndex;
pub use frame::{DrawCommand, FaceSource, FrameRenderer};
pub use geometry::{Rect, Size};
pub use gesture::{Fling, GestureClassifier, PointerEvent, PointerPhase, Swipe, TouchState};
pub use projection::{Camera3D, FaceProjector, Projection};
pub use surface::{GlyphSurface, Surface};
pub use transform::Transform;
pub use widget::{Cuboid, Host};
