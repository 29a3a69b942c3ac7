//! Gravity clock - level-indexed repeating timer driving automatic descent
//!
//! The clock does not call back into the game. The owner feeds it elapsed time with
//! [`GravityClock::advance`] and then drains due steps with [`GravityClock::take_step`],
//! so every descent happens at a tick boundary.

use crate::types::{FRAMES_PER_SECOND, GRAVITY_G, MAX_LEVEL};

const MICROS_PER_MS: u64 = 1_000;

/// Guideline speed for a level, in G. Levels outside 1..=20 are clamped.
pub fn gravity_g(level: u32) -> f64 {
    let idx = level.clamp(1, MAX_LEVEL) as usize - 1;
    GRAVITY_G[idx]
}

/// Descent interval for a level in milliseconds: `1000 / (G * 60)`
pub fn interval_ms(level: u32) -> f64 {
    1000.0 / (gravity_g(level) * FRAMES_PER_SECOND)
}

/// Descent interval in whole microseconds (never zero)
pub fn interval_us(level: u32) -> u64 {
    ((interval_ms(level) * MICROS_PER_MS as f64).round() as u64).max(1)
}

#[derive(Debug, Clone)]
pub struct GravityClock {
    level: u32,
    interval_us: u64,
    /// Divides the interval while soft drop is held
    speedup: u32,
    accumulated_us: u64,
    running: bool,
    paused: bool,
}

impl GravityClock {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            interval_us: interval_us(level),
            speedup: 1,
            accumulated_us: 0,
            running: false,
            paused: false,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Effective interval including any soft drop speedup
    pub fn effective_interval_us(&self) -> u64 {
        (self.interval_us / self.speedup.max(1) as u64).max(1)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Start counting a fresh interval
    pub fn start(&mut self) {
        self.running = true;
        self.accumulated_us = 0;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated_us = 0;
    }

    /// Recompute the interval for a new level.
    /// A running clock restarts its interval at the new rate and keeps running.
    pub fn set_level(&mut self, level: u32) {
        self.level = level;
        self.interval_us = interval_us(level);
        if self.running {
            self.accumulated_us = 0;
        }
    }

    /// Set the soft drop speedup (1 = normal gravity)
    pub fn set_speedup(&mut self, factor: u32) {
        self.speedup = factor.max(1);
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Feed elapsed time. Ignored while stopped or paused.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.running && !self.paused {
            self.accumulated_us = self
                .accumulated_us
                .saturating_add(elapsed_ms as u64 * MICROS_PER_MS);
        }
    }

    /// Consume one due descent step, if any.
    pub fn take_step(&mut self) -> bool {
        if !self.running || self.paused {
            return false;
        }
        let interval = self.effective_interval_us();
        if self.accumulated_us >= interval {
            self.accumulated_us -= interval;
            true
        } else {
            false
        }
    }
}

impl Default for GravityClock {
    fn default() -> Self {
        Self::new(1)
    }
}
