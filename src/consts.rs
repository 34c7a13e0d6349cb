//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(500);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Size of the arena, border ring included
pub(crate) const GRID_SIZE: Size = Size {
    width: 32,
    height: 16,
};

/// The score (and thus the body-length cap) at the start of a game
pub(crate) const STARTING_SCORE: u32 = 5;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the cells of the border ring
pub(crate) const BORDER_SYMBOL: char = '■';

/// Glyph for the snake's head when it's collided with the border or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::Red);

/// Style for the border ring
pub(crate) const BORDER_STYLE: Style = Style::new().fg(Color::White);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
