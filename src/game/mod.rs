mod direction;
mod food;
mod grid;
mod rules;
mod snake;
use self::direction::Direction;
use self::food::Food;
use self::grid::Grid;
use self::snake::Snake;
use crate::app::Screen;
use crate::command::Command;
use crate::config::Theme;
use crate::consts;
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};
use std::io;
use std::time::Instant;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    score: u32,
    snake: Snake,
    food: Food,
    grid: Grid,
    state: GameState,
    theme: Theme,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(theme: Theme) -> Self {
        Game::new_with_rng(theme, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(theme: Theme, mut rng: R) -> Game<R> {
        let grid = Grid::new(consts::GRID_SIZE);
        let snake = Snake::new(grid.center(), Direction::Right);
        let food = Food::place(&mut rng, grid);
        Game {
            rng,
            score: consts::STARTING_SCORE,
            snake,
            food,
            grid,
            state: GameState::Running,
            theme,
        }
    }

    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if self.running() {
            self.tick()
        } else {
            // The end screen has already been drawn; block until one final
            // key press, then leave.
            loop {
                if read()?.as_key_press_event().is_some() {
                    return Ok(Some(Screen::Quit));
                }
            }
        }
    }

    /// Poll for input until the tick deadline passes, then advance the
    /// simulation once.  Direction keys are applied to the snake as they
    /// arrive, so several presses within one tick coalesce into the single
    /// move at tick end, with the last valid change winning.
    fn tick(&mut self) -> io::Result<Option<Screen>> {
        let deadline = Instant::now() + consts::TICK_PERIOD;
        loop {
            let wait = deadline.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance();
                return Ok(None);
            }
            if let screen @ Some(_) = self.handle_event(read()?) {
                return Ok(screen);
            }
        }
    }

    fn advance(&mut self) {
        if !self.running() {
            return;
        }
        if !self.snake.advance() {
            self.state = GameState::GameOver;
            return;
        }
        let head = self.snake.head();
        if rules::hits_border(head, self.grid) || rules::hits_body(head, self.snake.body()) {
            self.state = GameState::GameOver;
        } else if rules::eats_food(head, self.food.position()) {
            self.score += 1;
            self.food.relocate(&mut self.rng, self.grid);
        } else {
            self.snake.trim(self.score);
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit => return Some(Screen::Quit),
            Command::Up => self.snake.turn(Direction::Up),
            Command::Down => self.snake.turn(Direction::Down),
            Command::Left => self.snake.turn(Direction::Left),
            Command::Right => self.snake.turn(Direction::Right),
        }
        None
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, arena_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(format!(" Score: {}", self.score), consts::SCORE_BAR_STYLE)
            .render(score_area, buf);

        let arena = center_rect(arena_area, self.grid.size());
        let mut canvas = Canvas { area: arena, buf };
        for pos in self.grid.positions() {
            if self.grid.is_border(pos) {
                canvas.draw_cell(pos, consts::BORDER_SYMBOL, self.theme.border);
            }
        }
        canvas.draw_cell(self.food.position(), consts::FOOD_SYMBOL, self.theme.food);
        canvas.draw_cell(self.snake.head(), self.snake.head_symbol(), self.theme.snake);
        for &pos in self.snake.body() {
            canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, self.theme.snake);
        }
        if self.state == GameState::GameOver {
            // Overwrite whatever the head ran into
            canvas.draw_cell(
                self.snake.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
            Span::from(format!(" Game over, Score: {}", self.score)).render(msg_area, buf);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn seeded_game() -> Game<ChaCha12Rng> {
        Game::new_with_rng(Theme::default(), ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    #[test]
    fn new_game() {
        let game = seeded_game();
        assert_eq!(game.snake.head(), Position::new(16, 8));
        assert_eq!(game.snake.direction, Direction::Right);
        assert!(game.snake.body().is_empty());
        assert_eq!(game.score, 5);
        assert!(game.running());
        assert!(!game.grid.is_border(game.food.position()));
    }

    #[test]
    fn tick_moves_head() {
        let mut game = seeded_game();
        game.food = Food {
            pos: Position::new(1, 1),
        };
        game.advance();
        assert_eq!(game.snake.head(), Position::new(17, 8));
        assert_eq!(game.snake.body(), &VecDeque::from([Position::new(16, 8)]));
        assert_eq!(game.score, 5);
        assert!(game.running());
    }

    #[test]
    fn body_caps_at_score() {
        let mut game = seeded_game();
        game.food = Food {
            pos: Position::new(1, 1),
        };
        for _ in 0..8 {
            game.advance();
        }
        assert_eq!(game.snake.head(), Position::new(24, 8));
        assert_eq!(
            game.snake.body(),
            &VecDeque::from([
                Position::new(19, 8),
                Position::new(20, 8),
                Position::new(21, 8),
                Position::new(22, 8),
                Position::new(23, 8),
            ])
        );
        assert!(game.running());
    }

    #[test]
    fn border_collision_ends_game() {
        let mut game = seeded_game();
        game.snake = Snake::new(Position::new(1, 8), Direction::Left);
        game.food = Food {
            pos: Position::new(5, 5),
        };
        game.advance();
        assert_eq!(game.snake.head(), Position::new(0, 8));
        assert!(!game.running());
        assert_eq!(game.score, 5);
        assert_eq!(game.food.position(), Position::new(5, 5));
        assert_eq!(game.snake.body(), &VecDeque::from([Position::new(1, 8)]));
    }

    #[test]
    fn body_collision_ends_game() {
        let mut game = seeded_game();
        game.snake = Snake {
            head: Position::new(5, 5),
            body: VecDeque::from([Position::new(6, 5)]),
            direction: Direction::Right,
        };
        game.food = Food {
            pos: Position::new(1, 1),
        };
        game.advance();
        assert_eq!(game.snake.head(), Position::new(6, 5));
        assert!(!game.running());
        assert_eq!(game.score, 5);
    }

    #[test]
    fn eating_grows_the_body() {
        let mut game = seeded_game();
        game.snake = Snake {
            head: Position::new(10, 8),
            body: VecDeque::from_iter((5..10).map(|x| Position::new(x, 8))),
            direction: Direction::Right,
        };
        game.food = Food {
            pos: Position::new(11, 8),
        };
        game.advance();
        assert_eq!(game.snake.head(), Position::new(11, 8));
        assert_eq!(game.score, 6);
        assert_eq!(game.snake.body().len(), 6);
        assert!(game.running());
        assert!(!game.grid.is_border(game.food.position()));
    }

    #[test]
    fn plain_tick_trims_the_tail() {
        let mut game = seeded_game();
        game.snake = Snake {
            head: Position::new(10, 8),
            body: VecDeque::from_iter((5..10).map(|x| Position::new(x, 8))),
            direction: Direction::Right,
        };
        game.food = Food {
            pos: Position::new(1, 1),
        };
        game.advance();
        assert_eq!(game.snake.head(), Position::new(11, 8));
        assert_eq!(
            game.snake.body(),
            &VecDeque::from_iter((6..11).map(|x| Position::new(x, 8)))
        );
        assert_eq!(game.score, 5);
    }

    #[test]
    fn direction_keys_coalesce() {
        let mut game = seeded_game();
        assert!(game
            .handle_event(Event::Key(KeyCode::Left.into()))
            .is_none());
        assert_eq!(game.snake.direction, Direction::Right);
        assert!(game.handle_event(Event::Key(KeyCode::Up.into())).is_none());
        assert_eq!(game.snake.direction, Direction::Up);
        assert!(game
            .handle_event(Event::Key(KeyCode::Down.into()))
            .is_none());
        assert_eq!(game.snake.direction, Direction::Up);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut game = seeded_game();
        let r = game.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(matches!(r, Some(Screen::Quit)));
    }

    #[test]
    fn draw_running() {
        let mut game = seeded_game();
        game.food = Food {
            pos: Position::new(20, 4),
        };
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            " Score: 5",
            "",
            "",
            "",
            "                        ■■■■■■■■■■■■■■■■■■■■■■■■■■■■■■■■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                   ●          ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■               <              ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■■■■■■■■■■■■■■■■■■■■■■■■■■■■■■■■",
            "",
            "",
            "",
            "",
        ]);
        expected.set_style(Rect::new(0, 0, 80, 1), consts::SCORE_BAR_STYLE);
        expected.set_style(Rect::new(24, 4, 32, 1), consts::BORDER_STYLE);
        expected.set_style(Rect::new(24, 19, 32, 1), consts::BORDER_STYLE);
        expected.set_style(Rect::new(24, 5, 1, 14), consts::BORDER_STYLE);
        expected.set_style(Rect::new(55, 5, 1, 14), consts::BORDER_STYLE);
        expected.set_style(Rect::new(44, 8, 1, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(40, 12, 1, 1), consts::SNAKE_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn draw_game_over() {
        let mut game = seeded_game();
        game.food = Food {
            pos: Position::new(20, 4),
        };
        game.snake = Snake {
            head: Position::new(31, 8),
            body: VecDeque::from([
                Position::new(28, 8),
                Position::new(29, 8),
                Position::new(30, 8),
            ]),
            direction: Direction::Right,
        };
        game.state = GameState::GameOver;
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            " Score: 5",
            "",
            "",
            "",
            "                        ■■■■■■■■■■■■■■■■■■■■■■■■■■■■■■■■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                   ●          ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                           ⚬⚬⚬×",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■                              ■",
            "                        ■■■■■■■■■■■■■■■■■■■■■■■■■■■■■■■■",
            "",
            "",
            "",
            " Game over, Score: 5",
        ]);
        expected.set_style(Rect::new(0, 0, 80, 1), consts::SCORE_BAR_STYLE);
        expected.set_style(Rect::new(24, 4, 32, 1), consts::BORDER_STYLE);
        expected.set_style(Rect::new(24, 19, 32, 1), consts::BORDER_STYLE);
        expected.set_style(Rect::new(24, 5, 1, 14), consts::BORDER_STYLE);
        expected.set_style(Rect::new(55, 5, 1, 14), consts::BORDER_STYLE);
        expected.set_style(Rect::new(44, 8, 1, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(52, 12, 3, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(55, 12, 1, 1), consts::COLLISION_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
