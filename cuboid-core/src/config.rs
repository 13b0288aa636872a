/// Tuning constants and gesture thresholds
use crate::error::{CuboidError, Result};
use crate::face::FaceIndex;
use crate::geometry::Size;

/// Number of faces mounted on the cube
pub const FACE_COUNT: usize = 4;

/// Face shown when the widget is first created
pub const DEFAULT_FACE: usize = 3;

/// How much a face shrinks at one half-height away from the vertical center
pub const SCALE_DOWN_FACTOR: f32 = 0.15;

/// Distance from the container top to every face's top edge
pub const ITEM_VERTICAL_SPACE: f32 = 50.0;

/// Rotation applied to the outgoing face of a transition
pub const QUARTER_TURN_DEGREES: f32 = 90.0;

/// Default camera eye distance: 8 inches at 72 pixels per inch
pub const DEFAULT_EYE_DISTANCE: f32 = 8.0 * 72.0;

// Platform defaults in density-independent units.
const PAGING_TOUCH_SLOP_DP: f32 = 16.0;
const TOUCH_SLOP_DP: f32 = 8.0;
const MINIMUM_FLING_VELOCITY_DP: f32 = 50.0;
const MAXIMUM_FLING_VELOCITY_DP: f32 = 8000.0;

/// Distance and velocity gates for swipe classification.
///
/// Distances are in host pixels, velocities in pixels per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    /// Horizontal displacement at or below this is not a swipe
    pub min_swipe_distance: f32,
    /// Vertical deviation limit. Not consulted by classification.
    pub max_off_path_distance: f32,
    /// Exclusive lower bound on `|vx|`
    pub min_fling_velocity: f32,
    /// Exclusive upper bound on `|vx|`
    pub max_fling_velocity: f32,
}

impl GestureThresholds {
    /// Platform default thresholds scaled by the display density.
    pub fn scaled(density: f32) -> Self {
        Self {
            min_swipe_distance: PAGING_TOUCH_SLOP_DP * density,
            max_off_path_distance: TOUCH_SLOP_DP * density,
            min_fling_velocity: MINIMUM_FLING_VELOCITY_DP * density,
            max_fling_velocity: MAXIMUM_FLING_VELOCITY_DP * density,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_fling_velocity >= self.max_fling_velocity {
            return Err(CuboidError::InvalidThresholds {
                min: self.min_fling_velocity,
                max: self.max_fling_velocity,
            });
        }
        Ok(())
    }

    /// True when `|velocity_x|` lies strictly inside the fling window.
    pub fn velocity_in_range(&self, velocity_x: f32) -> bool {
        let speed = velocity_x.abs();
        speed > self.min_fling_velocity && speed < self.max_fling_velocity
    }
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self::scaled(1.0)
    }
}

/// Widget-level configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CuboidConfig {
    pub face_size: Size,
    pub item_vertical_space: f32,
    pub default_face: FaceIndex,
    pub thresholds: GestureThresholds,
    pub eye_distance: f32,
}

impl CuboidConfig {
    pub fn new(face_size: Size, thresholds: GestureThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self {
            face_size,
            thresholds,
            ..Self::default()
        })
    }
}

impl Default for CuboidConfig {
    fn default() -> Self {
        Self {
            face_size: Size::new(300.0, 400.0),
            item_vertical_space: ITEM_VERTICAL_SPACE,
            default_face: FaceIndex::DEFAULT,
            thresholds: GestureThresholds::default(),
            eye_distance: DEFAULT_EYE_DISTANCE,
        }
    }
}
