//! Scoring module - guideline line-clear points, drop bonuses and leveling
//!
//! All functions here are pure. The game state decides when to call them.

use crate::types::{
    HARD_DROP_POINTS_PER_CELL, LINES_PER_LEVEL, LINE_SCORES, MAX_LEVEL,
    SOFT_DROP_POINTS_PER_CELL,
};

/// Points for clearing `lines` rows at `level`.
///
/// Single 100, Double 300, Triple 500, Tetris 800, times the level. Any other line count
/// scores 0; more than four at once cannot happen under standard play.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS_PER_CELL
    } else {
        SOFT_DROP_POINTS_PER_CELL
    };
    cells.saturating_mul(per_cell)
}

/// Leveling rule: one level per `lines_per_level` lines, counted from the start level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCurve {
    pub start_level: u32,
    pub lines_per_level: u32,
    pub max_level: u32,
}

impl LevelCurve {
    /// `min(max_level, start_level + total_lines / lines_per_level)`
    pub fn level_for(&self, total_lines: u32) -> u32 {
        let gained = total_lines / self.lines_per_level.max(1);
        self.start_level.saturating_add(gained).min(self.max_level)
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            start_level: 1,
            lines_per_level: LINES_PER_LEVEL,
            max_level: MAX_LEVEL,
        }
    }
}

/// Level for a line total under the default curve
pub fn calculate_level(total_lines: u32) -> u32 {
    LevelCurve::default().level_for(total_lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guideline_line_scores() {
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 300);
        assert_eq!(calculate_line_score(3, 1), 500);
        assert_eq!(calculate_line_score(4, 1), 800);
        assert_eq!(calculate_line_score(4, 2), 1600);
        assert_eq!(calculate_line_score(1, 7), 700);
    }

    #[test]
    fn test_malformed_line_counts_score_zero() {
        for level in [1, 5, 20] {
            assert_eq!(calculate_line_score(0, level), 0);
            assert_eq!(calculate_line_score(5, level), 0);
            assert_eq!(calculate_line_score(40, level), 0);
        }
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_drop_score(10, false), 10);
        assert_eq!(calculate_drop_score(10, true), 20);
        assert_eq!(calculate_drop_score(0, true), 0);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
        assert_eq!(calculate_level(190), 20);
        assert_eq!(calculate_level(10_000), 20);
    }

    #[test]
    fn test_level_curve_from_higher_start() {
        let curve = LevelCurve {
            start_level: 5,
            lines_per_level: 10,
            max_level: 20,
        };
        assert_eq!(curve.level_for(0), 5);
        assert_eq!(curve.level_for(35), 8);
        assert_eq!(curve.level_for(500), 20);
    }

    #[test]
    fn test_level_is_monotonic_in_lines() {
        let curve = LevelCurve::default();
        let mut last = curve.level_for(0);
        for lines in 1..400 {
            let level = curve.level_for(lines);
            assert!(level >= last);
            last = level;
        }
    }
}
