//! Rotation resolver - SRS rotation with ordered wall kick tests

use tracing::trace;

use crate::collision::collides;
use crate::grid::Grid;
use crate::pieces::{get_kicks, Tetromino};
use crate::types::RotateDirection;

/// A successful rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationOutcome {
    /// The piece in its new state and position
    pub piece: Tetromino,
    /// Position of the winning offset in the kick list (0 = basic rotation)
    pub kick_index: usize,
    pub offset: (i8, i8),
}

/// Try to rotate a piece with wall kicks.
///
/// Kick offsets are tested in table order and the first one that fits wins. Returns `None`
/// when every offset collides; the piece passed in is left untouched either way.
pub fn try_rotate(
    piece: &Tetromino,
    direction: RotateDirection,
    grid: &Grid,
) -> Option<RotationOutcome> {
    let to = piece.rotation.rotate(direction);
    let kicks = get_kicks(piece.kind, piece.rotation, direction);

    for (kick_index, &(dx, dy)) in kicks.iter().enumerate() {
        let x = piece.x + dx;
        let y = piece.y + dy;
        if collides(piece.kind, to, x, y, grid) {
            continue;
        }
        trace!(
            kind = piece.kind.as_str(),
            from = piece.rotation.as_str(),
            to = to.as_str(),
            kick_index,
            dx,
            dy,
            "rotation resolved"
        );
        return Some(RotationOutcome {
            piece: Tetromino {
                rotation: to,
                x,
                y,
                ..*piece
            },
            kick_index,
            offset: (dx, dy),
        });
    }

    None
}
