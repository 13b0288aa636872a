/// Swipe classification from raw pointer input
use std::time::Duration;

use nalgebra::{Point2, Vector2};

use crate::config::GestureThresholds;
use crate::velocity::VelocityTracker;

/// Per-gesture touch lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchState {
    #[default]
    Resting,
    Pressed,
    Dragging,
}

/// Outcome of a classified gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Swipe {
    #[default]
    None,
    /// Moved right: rotate to the next face
    Advance,
    /// Moved left: rotate to the previous face
    Retreat,
}

/// Phase of a raw pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// One pointer sample as delivered by the host's input layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point2<f32>,
    /// Monotonic timestamp of the sample
    pub time: Duration,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f32, y: f32, time: Duration) -> Self {
        Self {
            phase,
            position: Point2::new(x, y),
            time,
        }
    }
}

/// Terminal event of a gesture: where it ended and how fast it was moving
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fling {
    pub end: Point2<f32>,
    pub velocity: Vector2<f32>,
}

impl Fling {
    pub fn new(end_x: f32, end_y: f32, velocity_x: f32, velocity_y: f32) -> Self {
        Self {
            end: Point2::new(end_x, end_y),
            velocity: Vector2::new(velocity_x, velocity_y),
        }
    }
}

/// Direction is decided by position, the gate by `|vx|` alone.
/// Vertical deviation is not consulted.
pub fn classify(
    start_x: f32,
    end_x: f32,
    velocity_x: f32,
    thresholds: &GestureThresholds,
) -> Swipe {
    if !thresholds.velocity_in_range(velocity_x) {
        return Swipe::None;
    }
    if start_x > end_x && start_x - end_x > thresholds.min_swipe_distance {
        Swipe::Retreat
    } else if start_x < end_x && end_x - start_x > thresholds.min_swipe_distance {
        Swipe::Advance
    } else {
        Swipe::None
    }
}

/// Tracks one gesture at a time and turns it into a [`Swipe`].
///
/// Hosts that already detect flings call [`on_down`](Self::on_down) and
/// [`on_fling`](Self::on_fling); hosts delivering raw samples feed them all
/// through [`handle`](Self::handle).
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
    touch_state: TouchState,
    initial: Point2<f32>,
    tracker: VelocityTracker,
}

impl GestureClassifier {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            touch_state: TouchState::Resting,
            initial: Point2::origin(),
            tracker: VelocityTracker::new(),
        }
    }

    pub fn touch_state(&self) -> TouchState {
        self.touch_state
    }

    /// Start tracking a gesture. Always returns true: every down is tracked.
    pub fn on_down(&mut self, position: Point2<f32>, time: Duration) -> bool {
        self.initial = position;
        self.touch_state = TouchState::Pressed;
        self.tracker.clear();
        self.tracker.add(time, position);
        true
    }

    pub fn on_move(&mut self, position: Point2<f32>, time: Duration) {
        if self.touch_state == TouchState::Resting {
            return;
        }
        self.tracker.add(time, position);
        if self.touch_state == TouchState::Pressed
            && (position - self.initial).norm() > self.thresholds.max_off_path_distance
        {
            self.touch_state = TouchState::Dragging;
        }
    }

    /// Resolve the gesture from its terminal fling.
    pub fn on_fling(&mut self, fling: &Fling) -> Swipe {
        if self.touch_state == TouchState::Resting {
            return Swipe::None;
        }
        self.touch_state = TouchState::Resting;
        let swipe = classify(self.initial.x, fling.end.x, fling.velocity.x, &self.thresholds);
        log::debug!(
            "fling from x={:.1} to x={:.1} vx={:.1} classified as {:?}",
            self.initial.x,
            fling.end.x,
            fling.velocity.x,
            swipe
        );
        swipe
    }

    /// Abandon the current gesture without classifying it.
    pub fn cancel(&mut self) {
        self.touch_state = TouchState::Resting;
        self.tracker.clear();
    }

    /// Feed a raw pointer sample. Only `Up` can produce a non-`None` swipe.
    pub fn handle(&mut self, event: &PointerEvent) -> Swipe {
        match event.phase {
            PointerPhase::Down => {
                self.on_down(event.position, event.time);
                Swipe::None
            }
            PointerPhase::Move => {
                self.on_move(event.position, event.time);
                Swipe::None
            }
            PointerPhase::Up => {
                if self.touch_state == TouchState::Resting {
                    return Swipe::None;
                }
                self.tracker.add(event.time, event.position);
                let velocity = self.tracker.velocity();
                self.tracker.clear();
                if velocity.x.abs().max(velocity.y.abs()) <= self.thresholds.min_fling_velocity {
                    // Too slow to count as a fling at all
                    self.touch_state = TouchState::Resting;
                    return Swipe::None;
                }
                self.on_fling(&Fling {
                    end: event.position,
                    velocity,
                })
            }
        }
    }
}
