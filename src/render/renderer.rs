use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Cell, GamePhase, GameState};
use crate::record::{RecordStore, ScoreBoard};

pub const HEADER_HEIGHT: u16 = 3;
pub const CONTROLS_HEIGHT: u16 = 3;

/// Terminal columns used by one field cell
const COLUMNS_PER_CELL: u16 = 2;

const BODY_GREEN: Color = Color::Rgb(76, 175, 80);

/// Clickable buttons in the control strip under the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Up,
    Down,
    Right,
    Pause,
    Restart,
}

impl Button {
    const ALL: [Button; 6] = [
        Button::Left,
        Button::Up,
        Button::Down,
        Button::Right,
        Button::Pause,
        Button::Restart,
    ];

    fn width(&self) -> u16 {
        match self {
            Button::Pause | Button::Restart => 11,
            _ => 5,
        }
    }
}

/// Where each control button sits on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPad {
    buttons: Vec<(Button, Rect)>,
}

impl ControlPad {
    pub fn layout(area: Rect) -> Self {
        let areas = Layout::horizontal(Button::ALL.map(|button| Constraint::Length(button.width())))
            .flex(Flex::Center)
            .spacing(1)
            .split(area);

        Self {
            buttons: Button::ALL.into_iter().zip(areas.iter().copied()).collect(),
        }
    }

    pub fn buttons(&self) -> &[(Button, Rect)] {
        &self.buttons
    }

    /// The button under a terminal position, if any
    pub fn button_at(&self, column: u16, row: u16) -> Option<Button> {
        self.buttons
            .iter()
            .find(|(_, rect)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(button, _)| *button)
    }
}

/// Screen regions for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub board: Rect,
    pub controls: ControlPad,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Split the terminal into header, board and control strip
    pub fn layout(area: Rect) -> ScreenLayout {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(CONTROLS_HEIGHT),
            ])
            .split(area);

        ScreenLayout {
            header: chunks[0],
            board: chunks[1],
            controls: ControlPad::layout(chunks[2]),
        }
    }

    /// How many cells per side fit in a terminal of the given size
    pub fn field_capacity(columns: u16, rows: u16) -> i32 {
        let across = columns.saturating_sub(2) / COLUMNS_PER_CELL;
        let down = rows.saturating_sub(HEADER_HEIGHT + CONTROLS_HEIGHT + 2);
        i32::from(across.min(down))
    }

    pub fn render<S: RecordStore>(&self, frame: &mut Frame, state: &GameState, board: &ScoreBoard<S>) {
        let layout = Self::layout(frame.area());

        let stats = self.render_stats(state, board);
        frame.render_widget(stats, layout.header);

        let tiles = u16::try_from(state.tile_count()).unwrap_or(0);
        let field_area = centered(
            layout.board,
            tiles * COLUMNS_PER_CELL + 2,
            tiles + 2,
        );
        let grid = self.render_grid(state);
        frame.render_widget(grid, field_area);

        if state.phase == GamePhase::Over {
            let popup = centered(layout.board, 36, 9);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(state, board), popup);
        }

        self.render_controls(frame, &layout.controls, state);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::new();
        let tiles = state.tile_count();

        for row in 0..tiles {
            let mut spans = Vec::new();

            for column in 0..tiles {
                let cell = Cell::from_tile(column, row, state.cell_size);

                // Food is painted over the snake when they share a cell
                let span = if cell == state.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if cell == state.snake.head() {
                    Span::styled(
                        "[]",
                        Style::default()
                            .fg(Color::White)
                            .bg(Color::Blue)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.body.contains(&cell) {
                    Span::styled("[]", Style::default().fg(Color::White).bg(BODY_GREEN))
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        let title = if state.phase == GamePhase::Paused {
            " Snake (paused) "
        } else {
            " Snake "
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
    }

    fn render_stats<S: RecordStore>(&self, state: &GameState, board: &ScoreBoard<S>) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Record: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                board.record().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}ms", state.speed_ms),
                Style::default().fg(Color::White),
            ),
        ];

        if state.phase == GamePhase::Paused {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(vec![Line::from(""), Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over<S: RecordStore>(&self, state: &GameState, board: &ScoreBoard<S>) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Your score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if board.beat_record() {
            text.push(Line::from(vec![Span::styled(
                "New record!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]));
        } else {
            text.push(Line::from(""));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, frame: &mut Frame, pad: &ControlPad, state: &GameState) {
        for (button, area) in pad.buttons() {
            let (label, color) = match button {
                Button::Left => ("←", Color::Cyan),
                Button::Up => ("↑", Color::Cyan),
                Button::Down => ("↓", Color::Cyan),
                Button::Right => ("→", Color::Cyan),
                Button::Pause if state.phase == GamePhase::Paused => ("Resume", Color::Green),
                Button::Pause => ("Pause", Color::Yellow),
                Button::Restart => ("Restart", Color::Red),
            };

            let widget = Paragraph::new(Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Gray)),
            );
            frame.render_widget(widget, *area);
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rect centred in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, GameEngine, Snake};
    use crate::record::MemoryRecordStore;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn draw_buffer(state: &GameState, board: &ScoreBoard<MemoryRecordStore>) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, state, board))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn draw(state: &GameState, board: &ScoreBoard<MemoryRecordStore>) -> String {
        draw_buffer(state, board)
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    /// Terminal position of the left column of a field cell
    fn screen_position(state: &GameState, cell: Cell) -> (u16, u16) {
        let tiles = state.tile_count() as u16;
        let board = Renderer::layout(Rect::new(0, 0, 60, 30)).board;
        let field = centered(board, tiles * COLUMNS_PER_CELL + 2, tiles + 2);
        let column = (cell.x / state.cell_size) as u16;
        let row = (cell.y / state.cell_size) as u16;
        (field.x + 1 + column * COLUMNS_PER_CELL, field.y + 1 + row)
    }

    fn small_state() -> GameState {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        engine.reset()
    }

    #[test]
    fn test_header_shows_score_and_record() {
        let mut state = small_state();
        state.score = 4;
        let board = ScoreBoard::open(MemoryRecordStore::with_record(11));

        let screen = draw(&state, &board);
        assert!(screen.contains("Score: 4"));
        assert!(screen.contains("Record: 11"));
        assert!(screen.contains("Speed: 200ms"));
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_snake_and_food_are_drawn() {
        let mut state = small_state();
        state.snake = Snake::from_segments(
            vec![Cell::new(60, 60), Cell::new(40, 60)],
            Direction::Right,
        );
        state.food = Cell::new(0, 0);
        let board = ScoreBoard::open(MemoryRecordStore::new());

        let buffer = draw_buffer(&state, &board);
        let screen: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert_eq!(screen.matches("[]").count(), 2);
        assert_eq!(screen.matches('●').count(), 1);

        let head = screen_position(&state, Cell::new(60, 60));
        assert_eq!(buffer[head].symbol(), "[");
        assert_eq!(buffer[head].bg, Color::Blue);
        assert_eq!(buffer[(head.0 + 1, head.1)].bg, Color::Blue);

        let body = screen_position(&state, Cell::new(40, 60));
        assert_eq!(buffer[body].symbol(), "[");
        assert_eq!(buffer[body].bg, BODY_GREEN);
        assert_ne!(buffer[body].bg, buffer[head].bg);

        let food = screen_position(&state, Cell::new(0, 0));
        assert_eq!(buffer[food].symbol(), "●");
        assert_eq!(buffer[food].fg, Color::Red);
    }

    #[test]
    fn test_pause_is_visible() {
        let mut state = small_state();
        state.toggle_pause();
        let board = ScoreBoard::open(MemoryRecordStore::new());

        let screen = draw(&state, &board);
        assert!(screen.contains("PAUSED"));
        assert!(screen.contains("Resume"));
    }

    #[test]
    fn test_game_over_popup() {
        let mut state = small_state();
        state.score = 3;
        state.phase = GamePhase::Over;
        let mut board = ScoreBoard::open(MemoryRecordStore::with_record(1));
        board.on_game_over(3).unwrap();

        let screen = draw(&state, &board);
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Your score: 3"));
        assert!(screen.contains("New record!"));
    }

    #[test]
    fn test_field_capacity() {
        assert_eq!(Renderer::field_capacity(60, 30), 22);
        assert_eq!(Renderer::field_capacity(22, 60), 10);
        assert_eq!(Renderer::field_capacity(4, 4), 0);
    }

    #[test]
    fn test_control_pad_hit_testing() {
        let layout = Renderer::layout(Rect::new(0, 0, 60, 30));
        let pad = &layout.controls;
        assert_eq!(pad.buttons().len(), 6);

        for (button, rect) in pad.buttons() {
            assert_eq!(pad.button_at(rect.x, rect.y), Some(*button));
            assert_eq!(
                pad.button_at(rect.x + rect.width - 1, rect.y + rect.height - 1),
                Some(*button)
            );
        }

        assert_eq!(pad.button_at(0, 0), None);
        assert!(layout.board.y >= HEADER_HEIGHT);
    }
}
