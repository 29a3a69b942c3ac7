//! Lock delay - the grace period between a piece landing and locking
//!
//! The timer is a small state machine: `Inactive` until the piece lands, `Active` while it
//! rests on something, and it reports expiry once the delay elapses (or, in move-reset mode,
//! once the reset budget is spent). What counts as a reset depends on [`LockDelayMode`].

use crate::types::{LockDelayMode, LOCK_DELAY_MS, MOVE_RESET_LIMIT};

/// Kind of successful action that may reset a running lock delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetTrigger {
    /// Moved one or more cells down
    Step,
    /// Moved sideways
    Shift,
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockDelayState {
    Inactive,
    Active { elapsed_ms: u32, move_count: u8 },
}

#[derive(Debug, Clone)]
pub struct LockDelay {
    mode: LockDelayMode,
    delay_ms: u32,
    reset_limit: u8,
    state: LockDelayState,
}

impl LockDelay {
    pub fn new(mode: LockDelayMode) -> Self {
        Self::with_limits(mode, LOCK_DELAY_MS, MOVE_RESET_LIMIT)
    }

    pub fn with_limits(mode: LockDelayMode, delay_ms: u32, reset_limit: u8) -> Self {
        Self {
            mode,
            delay_ms,
            reset_limit,
            state: LockDelayState::Inactive,
        }
    }

    pub fn mode(&self) -> LockDelayMode {
        self.mode
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn state(&self) -> LockDelayState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, LockDelayState::Active { .. })
    }

    pub fn elapsed_ms(&self) -> u32 {
        match self.state {
            LockDelayState::Active { elapsed_ms, .. } => elapsed_ms,
            LockDelayState::Inactive => 0,
        }
    }

    pub fn move_count(&self) -> u8 {
        match self.state {
            LockDelayState::Active { move_count, .. } => move_count,
            LockDelayState::Inactive => 0,
        }
    }

    /// The piece landed. Starting an already running timer keeps its progress.
    pub fn start(&mut self) {
        if !self.is_active() {
            self.state = LockDelayState::Active {
                elapsed_ms: 0,
                move_count: 0,
            };
        }
    }

    /// The piece can fall again, or it locked. Timer and move count are discarded.
    pub fn cancel(&mut self) {
        self.state = LockDelayState::Inactive;
    }

    /// Advance the running timer. Returns true once the delay has expired.
    pub fn advance(&mut self, elapsed: u32) -> bool {
        match &mut self.state {
            LockDelayState::Active { elapsed_ms, .. } => {
                *elapsed_ms = elapsed_ms.saturating_add(elapsed);
                *elapsed_ms >= self.delay_ms
            }
            LockDelayState::Inactive => false,
        }
    }

    /// Apply the reset policy after a successful move or rotation while the piece rests.
    ///
    /// Returns true if the piece must lock immediately (move-reset budget spent).
    pub fn on_action(&mut self, trigger: ResetTrigger) -> bool {
        let LockDelayState::Active {
            elapsed_ms,
            move_count,
        } = &mut self.state
        else {
            return false;
        };

        match self.mode {
            LockDelayMode::Infinity => {
                *elapsed_ms = 0;
                false
            }
            LockDelayMode::MoveReset => {
                *elapsed_ms = 0;
                *move_count = move_count.saturating_add(1);
                *move_count >= self.reset_limit
            }
            LockDelayMode::StepReset => {
                if trigger == ResetTrigger::Step {
                    *elapsed_ms = 0;
                }
                false
            }
        }
    }
}

impl Default for LockDelay {
    fn default() -> Self {
        Self::new(LockDelayMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_never_expires() {
        let mut delay = LockDelay::default();
        assert!(!delay.advance(10_000));
        assert!(!delay.on_action(ResetTrigger::Shift));
        assert_eq!(delay.state(), LockDelayState::Inactive);
    }

    #[test]
    fn test_expires_after_delay() {
        let mut delay = LockDelay::default();
        delay.start();
        assert!(!delay.advance(499));
        assert!(delay.advance(1));
    }

    #[test]
    fn test_start_keeps_running_progress() {
        let mut delay = LockDelay::default();
        delay.start();
        delay.advance(300);
        delay.start();
        assert_eq!(delay.elapsed_ms(), 300);
    }

    #[test]
    fn test_cancel_resets_everything() {
        let mut delay = LockDelay::default();
        delay.start();
        delay.advance(300);
        delay.on_action(ResetTrigger::Rotate);
        delay.cancel();
        assert!(!delay.is_active());
        assert_eq!(delay.move_count(), 0);
        delay.start();
        assert_eq!(delay.elapsed_ms(), 0);
    }

    #[test]
    fn test_move_reset_fifteenth_reset_forces_lock() {
        let mut delay = LockDelay::new(LockDelayMode::MoveReset);
        delay.start();
        for i in 1..15 {
            delay.advance(400);
            assert!(!delay.on_action(ResetTrigger::Shift), "reset {}", i);
            assert_eq!(delay.elapsed_ms(), 0);
        }
        assert!(delay.on_action(ResetTrigger::Rotate));
        assert_eq!(delay.move_count(), 15);
    }

    #[test]
    fn test_infinity_resets_without_cap() {
        let mut delay = LockDelay::new(LockDelayMode::Infinity);
        delay.start();
        for _ in 0..100 {
            delay.advance(499);
            assert!(!delay.on_action(ResetTrigger::Rotate));
        }
        assert!(!delay.advance(499));
    }

    #[test]
    fn test_step_reset_ignores_sideways_moves() {
        let mut delay = LockDelay::new(LockDelayMode::StepReset);
        delay.start();
        delay.advance(400);
        assert!(!delay.on_action(ResetTrigger::Shift));
        assert!(!delay.on_action(ResetTrigger::Rotate));
        assert_eq!(delay.elapsed_ms(), 400);
        assert!(delay.advance(100));
    }

    #[test]
    fn test_step_reset_restarts_on_step() {
        let mut delay = LockDelay::new(LockDelayMode::StepReset);
        delay.start();
        delay.advance(400);
        delay.on_action(ResetTrigger::Step);
        assert_eq!(delay.elapsed_ms(), 0);
    }
}
