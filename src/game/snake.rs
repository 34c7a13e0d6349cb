use super::direction::Direction;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.
///
/// All positions are in grid coordinates, relative to the top-left corner of
/// the arena.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head; never an element of `body`
    pub(super) head: Position,

    /// The positions of the body segments, oldest at the front
    pub(super) body: VecDeque<Position>,

    /// The direction in which the snake is currently facing
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a new snake with its head at `head`, facing in `direction`,
    /// with an empty body
    pub(super) fn new(head: Position, direction: Direction) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            direction,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.head
    }

    /// Return the glyph to use for drawing the snake's head, mouth open in
    /// the direction of travel
    pub(super) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
            Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
            Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        }
    }

    /// Return the positions of the cells in the snake's body
    pub(super) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Change the snake's direction to `direction`.  A turn straight into
    /// the snake's own neck (the exact opposite of the current direction) is
    /// ignored.
    pub(super) fn turn(&mut self, direction: Direction) {
        if direction != self.direction.reverse() {
            self.direction = direction;
        }
    }

    /// Move the snake forwards one cell: the head's cell becomes the newest
    /// body segment, and the head advances in the current direction.
    /// Collisions with the arena are the caller's concern; this returns
    /// `false` only if the new head coordinate would not be representable,
    /// which the caller likewise treats as a wall hit.
    pub(super) fn advance(&mut self) -> bool {
        let Some(pos) = self.direction.step(self.head) else {
            return false;
        };
        self.body.push_back(self.head);
        self.head = pos;
        true
    }

    /// Drop the oldest body segment if the body is longer than `max_len`.
    /// Called on every tick the snake does not eat, so the body stays capped
    /// at the current score.
    pub(super) fn trim(&mut self, max_len: u32) {
        if self.body.len() > usize::try_from(max_len).unwrap_or(usize::MAX) {
            let _ = self.body.pop_front();
        }
    }
}
