/// Per-frame orchestration: state in, draw commands out
use crate::carousel::CarouselState;
use crate::face::FaceIndex;
use crate::geometry::{Rect, Size};
use crate::projection::{FaceProjector, Projection};
use crate::surface::Surface;

/// Read-only view of the host's laid-out, pre-rendered faces
pub trait FaceSource {
    type Surface: Surface;

    /// The cached image of a face, if it has been rendered yet
    fn surface(&self, face: FaceIndex) -> Option<&Self::Surface>;

    fn bounds(&self, face: FaceIndex) -> Rect;

    fn container_size(&self) -> Size;
}

/// One compositing step for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Draw the face's surface through the projection matrix
    Projected {
        face: FaceIndex,
        projection: Projection,
    },
    /// No cached surface: draw the face unscaled in its bounds
    Direct { face: FaceIndex, bounds: Rect },
}

impl DrawCommand {
    pub fn face(&self) -> FaceIndex {
        match self {
            DrawCommand::Projected { face, .. } | DrawCommand::Direct { face, .. } => *face,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameRenderer {
    projector: FaceProjector,
}

impl FrameRenderer {
    pub fn new(projector: FaceProjector) -> Self {
        Self { projector }
    }

    /// Produce this frame's draw commands in compositing order.
    ///
    /// Steady state draws the current face flat. A transition frame draws the
    /// outgoing face at the state's rotation, then the incoming face flat,
    /// and commits the transition.
    pub fn render<S: FaceSource>(
        &self,
        state: &mut CarouselState,
        source: &S,
    ) -> Vec<DrawCommand> {
        let current = state.current_index();
        let bounds = source.bounds(current);
        let container_height = source.container_size().height;

        let Some(incoming) = state.next_index() else {
            return vec![self.face_command(source, current, bounds, container_height, 0.0)];
        };

        let commands = vec![
            self.face_command(
                source,
                current,
                bounds,
                container_height,
                state.rotation_degrees(),
            ),
            // Incoming face shares the outgoing face's placement
            self.face_command(source, incoming, bounds, container_height, 0.0),
        ];
        state.commit_transition();
        commands
    }

    fn face_command<S: FaceSource>(
        &self,
        source: &S,
        face: FaceIndex,
        bounds: Rect,
        container_height: f32,
        rotation_degrees: f32,
    ) -> DrawCommand {
        if source.surface(face).is_none() {
            log::warn!("face {} has no cached surface, drawing directly", face);
            return DrawCommand::Direct { face, bounds };
        }
        let projection = self.projector.project(
            bounds.top_left(),
            bounds.size(),
            container_height,
            rotation_degrees,
        );
        DrawCommand::Projected { face, projection }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Swipe;
    use crate::surface::GlyphSurface;

    struct Faces {
        surfaces: Vec<Option<GlyphSurface>>,
    }

    impl Faces {
        fn all_rendered() -> Self {
            Self {
                surfaces: (0..4)
                    .map(|i| Some(GlyphSurface::from_lines(&[i.to_string()])))
                    .collect(),
            }
        }
    }

    impl FaceSource for Faces {
        type Surface = GlyphSurface;

        fn surface(&self, face: FaceIndex) -> Option<&GlyphSurface> {
            self.surfaces[face.get()].as_ref()
        }

        fn bounds(&self, _face: FaceIndex) -> Rect {
            Rect::new(10.0, 50.0, 110.0, 150.0)
        }

        fn container_size(&self) -> Size {
            Size::new(120.0, 200.0)
        }
    }

    fn rotation_of(command: &DrawCommand) -> Option<f32> {
        match command {
            DrawCommand::Projected { projection, .. } => Some(projection.rotation_degrees),
            DrawCommand::Direct { .. } => None,
        }
    }

    #[test]
    fn test_steady_state_draws_one_flat_face() {
        let renderer = FrameRenderer::default();
        let mut state = CarouselState::default();
        let commands = renderer.render(&mut state, &Faces::all_rendered());
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].face().get(), 3);
        assert_eq!(rotation_of(&commands[0]), Some(0.0));
    }

    #[test]
    fn test_transition_frame_draws_outgoing_then_incoming() {
        let renderer = FrameRenderer::default();
        let faces = Faces::all_rendered();
        let mut state = CarouselState::default();
        state.advance(Swipe::Advance);

        let commands = renderer.render(&mut state, &faces);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].face().get(), 3);
        assert_eq!(rotation_of(&commands[0]), Some(90.0));
        assert_eq!(commands[1].face().get(), 0);
        assert_eq!(rotation_of(&commands[1]), Some(0.0));
        assert_eq!(state.current_index().get(), 0);
        assert!(!state.in_transition());

        let commands = renderer.render(&mut state, &faces);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].face().get(), 0);
        assert_eq!(rotation_of(&commands[0]), Some(0.0));
    }

    #[test]
    fn test_missing_current_surface_in_steady_frame() {
        let renderer = FrameRenderer::default();
        let mut faces = Faces::all_rendered();
        faces.surfaces[3] = None;
        let mut state = CarouselState::default();

        let commands = renderer.render(&mut state, &faces);
        assert_eq!(
            commands,
            vec![DrawCommand::Direct {
                face: FaceIndex::new(3).unwrap(),
                bounds: Rect::new(10.0, 50.0, 110.0, 150.0),
            }]
        );
    }

    #[test]
    fn test_missing_outgoing_surface_still_commits() {
        let renderer = FrameRenderer::default();
        let mut faces = Faces::all_rendered();
        faces.surfaces[3] = None;
        let mut state = CarouselState::default();
        state.advance(Swipe::Advance);

        let commands = renderer.render(&mut state, &faces);
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0],
            DrawCommand::Direct {
                face: FaceIndex::new(3).unwrap(),
                bounds: Rect::new(10.0, 50.0, 110.0, 150.0),
            }
        );
        assert_eq!(commands[1].face().get(), 0);
        assert_eq!(rotation_of(&commands[1]), Some(0.0));
        assert_eq!(state.current_index().get(), 0);
        assert!(!state.in_transition());
    }

    #[test]
    fn test_missing_surface_falls_back_to_direct_draw() {
        let renderer = FrameRenderer::default();
        let mut faces = Faces::all_rendered();
        faces.surfaces[2] = None;
        let mut state = CarouselState::default();
        state.advance(Swipe::Retreat);

        let commands = renderer.render(&mut state, &faces);
        assert!(matches!(commands[0], DrawCommand::Projected { .. }));
        assert_eq!(
            commands[1],
            DrawCommand::Direct {
                face: FaceIndex::new(2).unwrap(),
                bounds: Rect::new(10.0, 50.0, 110.0, 150.0),
            }
        );
        assert_eq!(state.current_index().get(), 2);
    }
}
