use super::{
    config::GameConfig,
    direction::Direction,
    state::{Cell, CollisionType, GamePhase, GameState, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game is paused or over; nothing changed
    Skipped,
    /// The snake moved one cell
    Moved {
        /// Whether the snake ate food this tick
        ate_food: bool,
        /// Whether the tick period got shorter, so the timer must restart
        speed_changed: bool,
    },
    /// The next head cell was blocked and the game ended
    GameOver(CollisionType),
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Start a fresh game
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(self.config.start_cell(), Direction::Right);
        let food = self.spawn_food();

        GameState::new(
            snake,
            food,
            self.config.field_size,
            self.config.cell_size,
            self.config.initial_speed_ms,
        )
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> StepOutcome {
        if state.phase != GamePhase::Running {
            return StepOutcome::Skipped;
        }

        let new_head = state
            .snake
            .head()
            .stepped(state.snake.direction, state.cell_size);

        // Checked against the body as it is now, before the tail moves
        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.phase = GamePhase::Over;
            return StepOutcome::GameOver(collision_type);
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);

        let mut speed_changed = false;
        if ate_food {
            state.score += 1;
            state.food = self.spawn_food();

            let faster = self.config.sped_up(state.speed_ms);
            speed_changed = faster != state.speed_ms;
            state.speed_ms = faster;
        }

        state.changing_direction = false;

        StepOutcome::Moved {
            ate_food,
            speed_changed,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, cell: Cell) -> Option<CollisionType> {
        if !state.is_in_bounds(cell) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(cell) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a uniformly random cell; the snake may already be on it
    pub fn spawn_food(&mut self) -> Cell {
        let tiles = self.config.tile_count();
        let column = self.rng.gen_range(0..tiles);
        let row = self.rng.gen_range(0..tiles);
        Cell::from_tile(column, row, self.config.cell_size)
    }
}
