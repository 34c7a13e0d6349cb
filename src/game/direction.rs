use ratatui::layout::Position;

/// The four ways the snake can travel
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction, or `None` if
    /// that cell is not representable in grid coordinates
    pub(super) fn step(self, pos: Position) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = y.checked_sub(1)?,
            Direction::Down => y = y.checked_add(1)?,
            Direction::Left => x = x.checked_sub(1)?,
            Direction::Right => x = x.checked_add(1)?,
        }
        Some(Position { x, y })
    }

    pub(super) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
