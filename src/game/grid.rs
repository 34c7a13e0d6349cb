use rand::Rng;
use ratatui::layout::{Position, Positions, Rect, Size};

/// The playing field: a fixed-size grid whose outermost ring of cells is the
/// wall.  Everything inside the ring is the interior, where food may spawn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    /// Create a grid of the given size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is less than 3, as such a grid has no
    /// interior cells.
    pub(super) fn new(size: Size) -> Grid {
        assert!(
            size.width >= 3 && size.height >= 3,
            "grid must be at least 3×3 to have an interior"
        );
        Grid {
            width: size.width,
            height: size.height,
        }
    }

    pub(super) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// The cell at the middle of the grid
    pub(super) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Is `pos` on the grid's outermost ring?
    pub(super) fn is_border(self, pos: Position) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1
    }

    /// Uniformly sample a cell from the grid's interior
    pub(super) fn random_interior<R: Rng>(self, rng: &mut R) -> Position {
        Position {
            x: rng.random_range(1..self.width - 1),
            y: rng.random_range(1..self.height - 1),
        }
    }

    /// Iterate over every cell of the grid, border included
    pub(super) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }
}
