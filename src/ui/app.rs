use crate::ai::{Agent, BfsReport, SearchAgent, SearchEngine};
use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{GameOutcome, GameState, Player, CENTER_COL, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use std::io;

/// Depths offered by the `d` key.
pub const MAX_UI_DEPTH: usize = 6;

pub struct App {
    game_state: GameState,
    agent: SearchAgent,
    engine_player: Player,
    engine_enabled: bool,
    selected_column: usize,
    show_info: bool,
    /// Breadth-first estimate for the current position, kept while the info
    /// panel is open.
    estimate: Option<BfsReport>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let mut agent = SearchAgent::new(config.search.clone());
        agent.set_depth(config.search.max_depth.clamp(1, MAX_UI_DEPTH));
        App {
            game_state: GameState::initial(),
            agent,
            engine_player: config.game.engine_player,
            engine_enabled: config.game.engine_enabled,
            selected_column: CENTER_COL,
            show_info: false,
            estimate: None,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            if self.engine_to_move() {
                self.engine_move();
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn engine_depth(&self) -> usize {
        self.agent.depth()
    }

    pub fn engine_enabled(&self) -> bool {
        self.engine_enabled
    }

    pub fn engine_player(&self) -> Player {
        self.engine_player
    }

    pub fn engine(&self) -> &SearchEngine {
        self.agent.engine()
    }

    pub fn estimate(&self) -> Option<&BfsReport> {
        self.estimate.as_ref()
    }

    /// Recompute the panel's estimate: scored for the engine, expanding from
    /// the side to move, at the engine's current depth.
    fn refresh_estimate(&mut self) {
        let estimate = self.show_info.then(|| {
            self.agent.engine().bfs_evaluate(
                &self.game_state.position(),
                self.engine_player,
                self.game_state.current_player(),
            )
        });
        self.estimate = estimate;
    }

    /// True when it is the engine's turn and it is allowed to play.
    fn engine_to_move(&self) -> bool {
        self.engine_enabled
            && !self.game_state.is_terminal()
            && self.game_state.current_player() == self.engine_player
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column);
            }
            KeyCode::Char(c @ '1'..='7') => {
                let col = c as usize - '1' as usize;
                self.selected_column = col;
                self.drop_piece(col);
            }
            KeyCode::Char('r') => {
                self.game_state.reset();
                self.selected_column = CENTER_COL;
                self.refresh_estimate();
                self.message = Some("New game started!".to_string());
            }
            KeyCode::Char('a') => {
                self.engine_enabled = !self.engine_enabled;
                self.message = Some(format!(
                    "Engine {}",
                    if self.engine_enabled { "enabled" } else { "disabled" }
                ));
            }
            KeyCode::Char('d') => {
                let depth = self.agent.depth() % MAX_UI_DEPTH + 1;
                self.agent.set_depth(depth);
                self.refresh_estimate();
                self.message = Some(format!("Engine depth set to {depth}"));
            }
            KeyCode::Char('i') => {
                self.show_info = !self.show_info;
                self.refresh_estimate();
            }
            _ => {}
        }
    }

    /// Drop the human's piece in `col`
    fn drop_piece(&mut self, col: usize) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if self.engine_to_move() {
            self.message = Some("Wait for the engine to move.".to_string());
            return;
        }

        match self.game_state.apply_move_mut(col) {
            Ok(()) => {
                self.refresh_estimate();
                self.announce_outcome();
            }
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn(_)) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    /// Let the engine play for its side.
    fn engine_move(&mut self) {
        let col = match self.agent.select_action(&self.game_state) {
            Ok(col) => col,
            Err(e) => {
                self.message = Some(format!("Engine failed to move: {e}"));
                self.engine_enabled = false;
                return;
            }
        };
        match self.game_state.apply_move_mut(col) {
            Ok(()) => {
                self.message = Some(format!("Engine played column {}", col + 1));
                self.refresh_estimate();
                self.announce_outcome();
            }
            Err(e) => {
                self.message = Some(format!("Engine failed to move: {e}"));
                self.engine_enabled = false;
            }
        }
    }

    fn announce_outcome(&mut self) {
        if let Some(outcome) = self.game_state.outcome() {
            self.message = Some(match outcome {
                GameOutcome::Winner(player) => format!("{} wins!", player.name()),
                GameOutcome::Draw => "It's a draw!".to_string(),
            });
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            self,
            self.selected_column,
            &self.message,
            self.show_info,
        );
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
