use super::grid::Grid;
use rand::Rng;
use ratatui::layout::Position;

/// The one food item on the board.
///
/// Placement does not look at the snake: the food may land on a body segment,
/// where it sits until the head passes over that cell again.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Food {
    pub(super) pos: Position,
}

impl Food {
    /// Put a new food item on a random interior cell
    pub(super) fn place<R: Rng>(rng: &mut R, grid: Grid) -> Food {
        Food {
            pos: grid.random_interior(rng),
        }
    }

    pub(super) fn position(&self) -> Position {
        self.pos
    }

    /// Replace an eaten food item with a fresh one
    pub(super) fn relocate<R: Rng>(&mut self, rng: &mut R, grid: Grid) {
        self.pos = grid.random_interior(rng);
    }
}
