use std::time::Duration;

use super::direction::Direction;

/// A grid-aligned position on the field, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell at tile coordinates (column, row)
    pub fn from_tile(column: i32, row: i32, cell_size: i32) -> Self {
        Self::new(column * cell_size, row * cell_size)
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighbouring cell one step in `direction`
    pub fn stepped(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta(cell_size);
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Cell, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Cell>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty());
        Self { body, direction }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Check if cell collides with the snake body (excluding head).
    ///
    /// The tail counts even when it is about to move away this tick.
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body[1..].contains(&cell)
    }

    /// Prepend `new_head`, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the field
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Where the game loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Paused,
    Over,
}

/// Complete game state for one session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub field_size: i32,
    pub cell_size: i32,
    pub score: u32,
    /// Current tick period in milliseconds
    pub speed_ms: u64,
    pub phase: GamePhase,
    /// Set once a turn is accepted, cleared at the end of the next tick
    pub changing_direction: bool,
}

impl GameState {
    pub fn new(snake: Snake, food: Cell, field_size: i32, cell_size: i32, speed_ms: u64) -> Self {
        Self {
            snake,
            food,
            field_size,
            cell_size,
            score: 0,
            speed_ms,
            phase: GamePhase::Running,
            changing_direction: false,
        }
    }

    /// Check if a cell is within the field
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.field_size && cell.y >= 0 && cell.y < self.field_size
    }

    pub fn tile_count(&self) -> i32 {
        self.field_size / self.cell_size
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Apply a turn request from the keyboard or an on-screen button.
    ///
    /// At most one turn is accepted per tick, and only onto the other axis.
    /// Returns whether the request was taken.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.changing_direction || self.phase == GamePhase::Over {
            return false;
        }
        if !self.snake.direction.is_perpendicular(direction) {
            return false;
        }

        self.snake.direction = direction;
        self.changing_direction = true;
        true
    }

    /// Flip between running and paused; a finished game stays over
    pub fn toggle_pause(&mut self) -> GamePhase {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::Over => GamePhase::Over,
        };
        self.phase
    }
}
