/// The cube carousel as a host widget sees it
use std::time::Duration;

use nalgebra::Point2;

use crate::carousel::CarouselState;
use crate::config::CuboidConfig;
use crate::error::Result;
use crate::frame::{DrawCommand, FaceSource, FrameRenderer};
use crate::geometry::{position_face, Rect};
use crate::gesture::{Fling, GestureClassifier, PointerEvent, Swipe};
use crate::projection::{Camera3D, FaceProjector};

/// Services the enclosing widget provides
pub trait Host: FaceSource {
    /// Ask for a relayout and redraw on the next frame
    fn request_layout(&mut self);
}

/// Gesture handling, rotation state and frame rendering wired together.
///
/// Input callbacks and [`draw`](Self::draw) must be called from the same
/// thread; nothing here locks.
#[derive(Debug, Clone)]
pub struct Cuboid {
    config: CuboidConfig,
    classifier: GestureClassifier,
    state: CarouselState,
    renderer: FrameRenderer,
}

impl Cuboid {
    /// Fails when the configured fling velocity window is empty.
    pub fn new(config: CuboidConfig) -> Result<Self> {
        config.thresholds.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: CuboidConfig) -> Self {
        let projector = FaceProjector::new(Camera3D::new(config.eye_distance));
        Self {
            classifier: GestureClassifier::new(config.thresholds),
            state: CarouselState::new(config.default_face),
            renderer: FrameRenderer::new(projector),
            config,
        }
    }

    pub fn config(&self) -> &CuboidConfig {
        &self.config
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Bounds shared by every face in a container of the given width
    pub fn layout(&self, container_width: f32) -> Rect {
        position_face(
            container_width,
            self.config.face_size,
            self.config.item_vertical_space,
        )
    }

    /// Every down starts tracking; the return value asks the host to route
    /// the rest of the gesture here.
    pub fn on_pointer_down(&mut self, position: Point2<f32>, time: Duration) -> bool {
        self.classifier.on_down(position, time)
    }

    /// Feed a raw pointer sample
    pub fn on_pointer<H: Host>(&mut self, event: &PointerEvent, host: &mut H) -> Swipe {
        let swipe = self.classifier.handle(event);
        self.apply(swipe, host);
        swipe
    }

    /// Resolve a gesture from a host-detected fling
    pub fn on_fling<H: Host>(&mut self, fling: &Fling, host: &mut H) -> Swipe {
        let swipe = self.classifier.on_fling(fling);
        self.apply(swipe, host);
        swipe
    }

    /// Drop the gesture in progress, e.g. when the host loses input focus
    pub fn cancel_gesture(&mut self) {
        self.classifier.cancel();
    }

    pub fn draw<H: Host>(&mut self, host: &H) -> Vec<DrawCommand> {
        self.renderer.render(&mut self.state, host)
    }

    fn apply<H: Host>(&mut self, swipe: Swipe, host: &mut H) {
        if self.state.advance(swipe) {
            host.request_layout();
        }
    }
}

impl Default for Cuboid {
    fn default() -> Self {
        Self::with_valid_config(CuboidConfig::default())
    }
}
