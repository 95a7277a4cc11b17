//! Frame scheduling and timing utilities.
//!
//! Provides portable pacing for the render and transmit loops without
//! async/await or platform-specific timers. The caller is responsible for
//! sleeping between ticks.

use embassy_time::{Duration, Instant};

use crate::Periodic;

/// Default render rate (60 FPS, a typical display refresh).
pub const DEFAULT_FPS: u32 = 60;

/// Default render frame duration based on [`DEFAULT_FPS`].
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Default transmit period (one universe every 25 ms).
pub const DEFAULT_TRANSMIT_PERIOD: Duration = Duration::from_millis(25);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Drift-corrected fixed-period driver for a [`Periodic`] task.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(transmitter, DEFAULT_TRANSMIT_PERIOD);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     std::thread::sleep(result.sleep_duration.into());
/// }
/// ```
pub struct FrameScheduler<P: Periodic> {
    task: P,
    next_frame: Option<Instant>,
    frame_duration: Duration,
}

impl<P: Periodic> FrameScheduler<P> {
    pub const fn new(task: P, frame_duration: Duration) -> Self {
        Self {
            task,
            next_frame: None,
            frame_duration,
        }
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    pub fn set_frame_duration(&mut self, frame_duration: Duration) {
        self.frame_duration = frame_duration;
    }

    /// Run the task once and return timing information.
    ///
    /// If the loop has fallen more than two frames behind, the schedule is
    /// reset to `now` instead of bursting through the backlog.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * 2;
        let scheduled = match self.next_frame {
            Some(next) if now <= next + max_drift => next,
            _ => now,
        };

        self.task.tick(now);

        let next_frame = scheduled + self.frame_duration;
        self.next_frame = Some(next_frame);

        let sleep_duration = if next_frame > now {
            next_frame - now
        } else {
            Duration::from_ticks(0)
        };

        FrameResult {
            next_deadline: next_frame,
            sleep_duration,
        }
    }

    /// Get a reference to the driven task.
    pub fn task(&self) -> &P {
        &self.task
    }

    /// Get a mutable reference to the driven task.
    pub fn task_mut(&mut self) -> &mut P {
        &mut self.task
    }
}
