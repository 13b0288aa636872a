/// Which face is showing and which one is rotating in
use crate::config::QUARTER_TURN_DEGREES;
use crate::face::FaceIndex;
use crate::gesture::Swipe;

/// Carousel rotation state.
///
/// Mutated only through [`advance`](Self::advance) and
/// [`commit_transition`](Self::commit_transition). A transition stays pending
/// for exactly one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselState {
    current: FaceIndex,
    next: Option<FaceIndex>,
    rotation_degrees: f32,
}

impl CarouselState {
    pub fn new(current: FaceIndex) -> Self {
        Self {
            current,
            next: None,
            rotation_degrees: 0.0,
        }
    }

    pub fn current_index(&self) -> FaceIndex {
        self.current
    }

    pub fn next_index(&self) -> Option<FaceIndex> {
        self.next
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    pub fn in_transition(&self) -> bool {
        self.next.is_some()
    }

    /// Apply a classified swipe. Returns true when a transition was scheduled
    /// and the host should lay out and redraw.
    ///
    /// A swipe arriving while a transition is pending replaces it; the target
    /// is always computed from the current face.
    pub fn advance(&mut self, swipe: Swipe) -> bool {
        let (next, rotation) = match swipe {
            Swipe::None => return false,
            Swipe::Advance => (self.current.next(), QUARTER_TURN_DEGREES),
            Swipe::Retreat => (self.current.prev(), -QUARTER_TURN_DEGREES),
        };
        if let Some(pending) = self.next {
            log::debug!("replacing pending transition to face {}", pending);
        }
        self.next = Some(next);
        self.rotation_degrees = rotation;
        log::debug!(
            "transition {} -> {} at {:+.0} degrees",
            self.current,
            next,
            rotation
        );
        true
    }

    /// Make the incoming face current. No-op when nothing is pending.
    pub fn commit_transition(&mut self) {
        if let Some(next) = self.next.take() {
            log::debug!("committed face {}", next);
            self.current = next;
        }
    }
}

impl Default for CarouselState {
    fn default() -> Self {
        Self::new(FaceIndex::DEFAULT)
    }
}
