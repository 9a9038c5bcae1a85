use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use tracing::{debug, error, info};

use super::scheduler::TickScheduler;
use crate::game::{GameEngine, GamePhase, GameState, StepOutcome};
use crate::input::{InputAction, InputHandler};
use crate::record::{RecordStore, ScoreBoard};
use crate::render::Renderer;

/// Interactive play in the terminal
pub struct HumanMode<S: RecordStore> {
    engine: GameEngine,
    state: GameState,
    scoreboard: ScoreBoard<S>,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    needs_redraw: bool,
    /// Terminal area of the last drawn frame, used for mouse hit testing
    screen: Rect,
}

impl<S: RecordStore> HumanMode<S> {
    pub fn new(mut engine: GameEngine, scoreboard: ScoreBoard<S>) -> Self {
        let state = engine.reset();

        Self {
            engine,
            state,
            scoreboard,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            needs_redraw: true,
            screen: Rect::default(),
        }
    }

    pub fn scoreboard(&self) -> &ScoreBoard<S> {
        &self.scoreboard
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut ticker = TickScheduler::idle();
        ticker.start(self.state.tick_period());
        info!(speed_ms = self.state.speed_ms, "game started");

        loop {
            if self.needs_redraw {
                let completed = terminal
                    .draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.scoreboard);
                    })
                    .context("Failed to draw frame")?;
                self.screen = completed.area;
                self.needs_redraw = false;
            }

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, &mut ticker),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = ticker.tick() => {
                    self.update_game(&mut ticker);
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            record = self.scoreboard.record(),
            games = self.scoreboard.games_played,
            "leaving"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ticker: &mut TickScheduler) {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => {
                let layout = Renderer::layout(self.screen);
                self.input_handler.handle_mouse_event(mouse, &layout.controls)
            }
            Event::Resize(..) => {
                self.needs_redraw = true;
                InputAction::None
            }
            _ => InputAction::None,
        };

        self.apply_action(action, ticker);
    }

    fn apply_action(&mut self, action: InputAction, ticker: &mut TickScheduler) {
        match action {
            InputAction::Turn(direction) => {
                if self.state.request_direction(direction) {
                    debug!(?direction, "turn accepted");
                }
            }
            InputAction::TogglePause => {
                let phase = self.state.toggle_pause();
                debug!(?phase, "pause toggled");
                self.needs_redraw = true;
            }
            InputAction::Restart => {
                self.reset_game(ticker);
            }
            InputAction::Quit => {
                self.should_quit = true;
            }
            InputAction::None => {}
        }
    }

    fn update_game(&mut self, ticker: &mut TickScheduler) {
        match self.engine.step(&mut self.state) {
            StepOutcome::Skipped => return,
            StepOutcome::Moved {
                ate_food,
                speed_changed,
            } => {
                if ate_food {
                    debug!(score = self.state.score, "food eaten");
                }
                if speed_changed {
                    debug!(speed_ms = self.state.speed_ms, "speeding up");
                    ticker.start(self.state.tick_period());
                }
            }
            StepOutcome::GameOver(collision) => {
                ticker.cancel();
                info!(score = self.state.score, ?collision, "game over");

                if let Err(err) = self.scoreboard.on_game_over(self.state.score) {
                    error!(?err, "failed to persist the new record");
                }
            }
        }

        self.needs_redraw = true;
    }

    fn reset_game(&mut self, ticker: &mut TickScheduler) {
        self.state = self.engine.reset();
        self.scoreboard.on_game_start();
        ticker.start(self.state.tick_period());
        self.needs_redraw = true;
        info!("game restarted");
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
