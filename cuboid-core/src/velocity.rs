/// Pointer velocity estimation over a short trailing window
use std::collections::VecDeque;
use std::time::Duration;

use nalgebra::{Point2, Vector2};

/// Samples older than this, relative to the newest one, are discarded
pub const VELOCITY_HORIZON: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(Duration, Point2<f32>)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn add(&mut self, time: Duration, position: Point2<f32>) {
        self.samples.push_back((time, position));
        let cutoff = time.saturating_sub(VELOCITY_HORIZON);
        while self.samples.len() > 1 {
            match self.samples.front() {
                Some((t, _)) if *t < cutoff => {
                    self.samples.pop_front();
                }
                _ => break,
            }
        }
    }

    /// Velocity in pixels per second between the oldest and newest sample
    /// inside the window. Zero when fewer than two samples span any time.
    pub fn velocity(&self) -> Vector2<f32> {
        let (Some((t0, p0)), Some((t1, p1))) = (self.samples.front(), self.samples.back()) else {
            return Vector2::zeros();
        };
        let dt = t1.saturating_sub(*t0).as_secs_f32();
        if dt <= 0.0 {
            return Vector2::zeros();
        }
        (p1 - p0) / dt
    }
}
