use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::{GridSize, Theme, BORDER_HALF_BLOCK, GLYPH_HALF_UPPER};
use crate::game::GameState;
use crate::snake::Position;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::render_game_over_menu;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: &HudInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, hud_info);

    let Some(board_area) = board_rect(play_area, state.bounds()) else {
        render_too_small(frame, play_area, state.bounds());
        return;
    };

    let theme = hud_info.theme;
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg));

    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_cells(frame, inner, state, theme);

    if state.is_game_over() {
        render_game_over_menu(
            frame,
            board_area,
            state.score,
            hud_info.previous_high_score,
            state.death_reason,
            theme,
        );
    }
}

/// Number of terminal rows used by the board interior. Each terminal row
/// shows two grid rows.
#[must_use]
pub fn board_rows(bounds: GridSize) -> u16 {
    bounds.height.div_ceil(2)
}

/// Returns the bordered board rectangle centered in `area`, or `None` when
/// the board does not fit.
#[must_use]
pub fn board_rect(area: Rect, bounds: GridSize) -> Option<Rect> {
    let width = bounds.width.checked_add(2)?;
    let height = board_rows(bounds).checked_add(2)?;
    if width > area.width || height > area.height {
        return None;
    }

    Some(Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    })
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let bounds = state.bounds();
    let colors = cell_colors(state, theme);
    let buffer = frame.buffer_mut();

    for row in 0..board_rows(bounds).min(inner.height) {
        for column in 0..bounds.width.min(inner.width) {
            let top = colors.at(column, row * 2);
            let bottom = colors.at(column, row * 2 + 1);

            buffer.set_string(
                inner.x + column,
                inner.y + row,
                GLYPH_HALF_UPPER,
                Style::new().fg(top).bg(bottom),
            );
        }
    }
}

/// Per-cell colors for one frame, row-major.
struct CellColors {
    bounds: GridSize,
    colors: Vec<Color>,
}

impl CellColors {
    fn paint(&mut self, position: Position, color: Color) {
        if let Some(index) = self.index(position) {
            self.colors[index] = color;
        }
    }

    fn at(&self, column: u16, row: u16) -> Color {
        let position = Position {
            x: i32::from(column),
            y: i32::from(row),
        };

        // Half-block rows past an odd grid height fall outside the board.
        self.index(position)
            .map_or(Color::Reset, |index| self.colors[index])
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !position.is_within_bounds(self.bounds) {
            return None;
        }

        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        Some(y * usize::from(self.bounds.width) + x)
    }
}

fn cell_colors(state: &GameState, theme: &Theme) -> CellColors {
    let bounds = state.bounds();
    let mut colors = CellColors {
        bounds,
        colors: vec![theme.board_bg; bounds.total_cells()],
    };

    if let Some(food) = state.food {
        colors.paint(food, theme.food);
    }

    for segment in state.snake.segments().skip(1) {
        colors.paint(*segment, theme.snake_body);
    }
    colors.paint(state.snake.head(), theme.snake_head);

    colors
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, bounds: GridSize) {
    let needed = format!(
        "Terminal too small: need {}x{}",
        bounds.width.saturating_add(2),
        board_rows(bounds).saturating_add(3)
    );

    frame.render_widget(
        Paragraph::new(Line::from(needed))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    use crate::config::{GameConfig, GridSize, THEME_CLASSIC};
    use crate::game::GameState;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};
    use crate::ui::hud::HudInfo;

    use super::{board_rect, board_rows, render};

    fn draw(state: &GameState, width: u16, height: u16) -> Buffer {
        let mut terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test terminal should build");
        let info = HudInfo {
            high_score: 120,
            previous_high_score: 120,
            theme: &THEME_CLASSIC,
        };

        terminal
            .draw(|frame| render(frame, state, &info))
            .expect("drawing to a test backend should succeed");
        terminal.backend().buffer().clone()
    }

    fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn board_rows_round_up() {
        assert_eq!(board_rows(GridSize { width: 40, height: 30 }), 15);
        assert_eq!(board_rows(GridSize { width: 5, height: 5 }), 3);
    }

    #[test]
    fn board_is_centered_or_absent() {
        let bounds = GridSize {
            width: 40,
            height: 30,
        };

        assert_eq!(
            board_rect(Rect::new(0, 1, 60, 23), bounds),
            Some(Rect::new(9, 4, 42, 17))
        );
        assert_eq!(board_rect(Rect::new(0, 0, 41, 40), bounds), None);
        assert_eq!(board_rect(Rect::new(0, 0, 80, 16), bounds), None);
    }

    #[test]
    fn snake_head_and_food_are_painted() {
        let mut state = GameState::new_with_seed(GameConfig::default(), 1);
        state.food = Some(Position { x: 0, y: 0 });
        state.snake = Snake::from_segments(
            vec![Position { x: 20, y: 15 }, Position { x: 20, y: 14 }],
            Direction::Down,
        );

        let buffer = draw(&state, 60, 24);
        let board = board_rect(Rect::new(0, 1, 60, 23), state.bounds()).expect("board fits");
        let (inner_x, inner_y) = (board.x + 1, board.y + 1);

        let food_cell = &buffer[(inner_x, inner_y)];
        assert_eq!(food_cell.fg, THEME_CLASSIC.food);
        assert_eq!(food_cell.bg, THEME_CLASSIC.board_bg);

        // Grid rows 14 and 15 share terminal row 7: body on top, head below.
        let snake_cell = &buffer[(inner_x + 20, inner_y + 7)];
        assert_eq!(snake_cell.fg, THEME_CLASSIC.snake_body);
        assert_eq!(snake_cell.bg, THEME_CLASSIC.snake_head);
    }

    #[test]
    fn hud_shows_score_and_high_score() {
        let mut state = GameState::new_with_seed(GameConfig::default(), 2);
        state.score = 30;

        let text = screen_text(&draw(&state, 60, 24));

        assert!(text.contains("Score: 30"));
        assert!(text.contains("High: 120"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn game_over_overlay_is_drawn() {
        let mut state = GameState::new_with_seed(GameConfig::default(), 3);
        state.snake = Snake::new(Position { x: 39, y: 3 }, Direction::Right);
        state.tick();
        assert!(state.is_game_over());

        let text = screen_text(&draw(&state, 60, 24));

        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Press R to restart"));
    }

    #[test]
    fn small_terminal_gets_a_notice() {
        let state = GameState::new_with_seed(GameConfig::default(), 4);

        let text = screen_text(&draw(&state, 36, 10));

        assert!(text.contains("too small"));
    }

    #[test]
    fn widest_accepted_board_reports_size_without_overflow() {
        let config = GameConfig {
            width: u16::MAX,
            height: 4,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
        let state = GameState::new_with_seed(config, 5);

        let text = screen_text(&draw(&state, 60, 24));

        assert!(text.contains("Terminal too small: need 65535x5"));
    }
}
