//! Engine configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::LevelCurve;
use crate::types::{
    LockDelayMode, DEFAULT_PREVIEW_COUNT, LINES_PER_LEVEL, LOCK_DELAY_MS, MAX_LEVEL, MIN_LEVEL,
    MOVE_RESET_LIMIT, SOFT_DROP_FACTOR,
};

/// Why a configuration was rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max level {0} is outside 1..={}", MAX_LEVEL)]
    MaxLevelOutOfRange(u32),
    #[error("start level {start} is outside 1..={max}")]
    StartLevelOutOfRange { start: u32, max: u32 },
    #[error("lines per level must be positive")]
    ZeroLinesPerLevel,
    #[error("lock delay must be positive")]
    ZeroLockDelay,
    #[error("move reset limit must be positive")]
    ZeroMoveResetLimit,
    #[error("soft drop factor must be positive")]
    ZeroSoftDropFactor,
}

/// Rules and tuning for one engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Randomizer seed. `None` draws one from system entropy.
    pub seed: Option<u32>,
    pub start_level: u32,
    pub max_level: u32,
    pub lines_per_level: u32,
    pub lock_delay_mode: LockDelayMode,
    /// Flat lock delay. Level-scaled delays would hook in here.
    pub lock_delay_ms: u32,
    pub move_reset_limit: u8,
    pub soft_drop_factor: u32,
    /// Upcoming pieces carried by each snapshot
    pub preview_count: usize,
}

impl EngineConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.max_level) {
            return Err(ConfigError::MaxLevelOutOfRange(self.max_level));
        }
        if !(MIN_LEVEL..=self.max_level).contains(&self.start_level) {
            return Err(ConfigError::StartLevelOutOfRange {
                start: self.start_level,
                max: self.max_level,
            });
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if self.lock_delay_ms == 0 {
            return Err(ConfigError::ZeroLockDelay);
        }
        if self.move_reset_limit == 0 {
            return Err(ConfigError::ZeroMoveResetLimit);
        }
        if self.soft_drop_factor == 0 {
            return Err(ConfigError::ZeroSoftDropFactor);
        }
        Ok(())
    }

    pub fn level_curve(&self) -> LevelCurve {
        LevelCurve {
            start_level: self.start_level,
            lines_per_level: self.lines_per_level,
            max_level: self.max_level,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_level: MIN_LEVEL,
            max_level: MAX_LEVEL,
            lines_per_level: LINES_PER_LEVEL,
            lock_delay_mode: LockDelayMode::MoveReset,
            lock_delay_ms: LOCK_DELAY_MS,
            move_reset_limit: MOVE_RESET_LIMIT,
            soft_drop_factor: SOFT_DROP_FACTOR,
            preview_count: DEFAULT_PREVIEW_COUNT,
        }
    }
}
