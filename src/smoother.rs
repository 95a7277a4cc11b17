//! Temporal smoothing of the displayed profile
//!
//! Each tick moves every displayed value a fixed fraction of the way toward
//! the most recent profile, so sparse sensor updates turn into continuous motion.

use alloc::vec::Vec;

/// Exponential approach of the displayed profile toward the latest target
#[derive(Debug, Clone)]
pub struct ProfileSmoother {
    /// Fraction of the remaining distance covered per tick
    speed: f32,
    /// Displayed profile
    current: Vec<f32>,
    /// Latest profile (empty until the first sample arrives)
    target: Vec<f32>,
}

impl ProfileSmoother {
    pub const fn new(speed: f32) -> Self {
        Self {
            speed,
            current: Vec::new(),
            target: Vec::new(),
        }
    }

    pub const fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Displayed profile, `None` before the first target
    pub fn current(&self) -> Option<&[f32]> {
        (!self.current.is_empty()).then_some(self.current.as_slice())
    }

    /// Latest target, `None` before the first target
    pub fn target(&self) -> Option<&[f32]> {
        (!self.target.is_empty()).then_some(self.target.as_slice())
    }

    /// Replace the target profile.
    ///
    /// The first target (or one with a different length) also becomes the
    /// displayed profile immediately.
    pub fn set_target(&mut self, target: Vec<f32>) {
        if self.current.len() != target.len() {
            self.current.clone_from(&target);
        }
        self.target = target;
    }

    /// Advance one tick and return the displayed profile.
    ///
    /// No-op returning `None` until a target is set.
    pub fn tick(&mut self) -> Option<&[f32]> {
        if self.target.is_empty() {
            return None;
        }
        if self.speed >= 1.0 {
            self.current.copy_from_slice(&self.target);
        } else {
            for (current, target) in self.current.iter_mut().zip(&self.target) {
                *current += (*target - *current) * self.speed;
            }
        }
        Some(&self.current)
    }

    /// Forget both profiles
    pub fn reset(&mut self) {
        self.current.clear();
        self.target.clear();
    }
}
