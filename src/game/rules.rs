//! Collision & scoring predicates, evaluated once per tick after the snake
//! has moved.  All of them are pure functions of entity state.
use super::grid::Grid;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// Did the head land on the arena's border ring?
pub(super) fn hits_border(head: Position, grid: Grid) -> bool {
    grid.is_border(head)
}

/// Did the head land on one of the snake's own body segments?
pub(super) fn hits_body(head: Position, body: &VecDeque<Position>) -> bool {
    body.contains(&head)
}

/// Did the head land on the food?
pub(super) fn eats_food(head: Position, food: Position) -> bool {
    head == food
}
