use crate::game::{Dimensions, GameOutcome, GameSession, MoveError, PlayError, Player};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App {
    session: GameSession,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(dimensions: Dimensions, first_player: Player) -> Self {
        App {
            session: GameSession::new(dimensions, first_player),
            selected_column: dimensions.columns / 2, // Start in middle
            should_quit: false,
            message: None,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
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
                let last = self.session.board().dimensions().columns.saturating_sub(1);
                if self.selected_column < last {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.session.reset();
                self.selected_column = self.session.board().dimensions().columns / 2;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.session.play(self.selected_column) {
            Ok(Some(GameOutcome::Winner(player))) => {
                self.message = Some(format!("{} wins!", player.name()));
            }
            Ok(Some(GameOutcome::Draw)) => {
                self.message = Some("It's a draw!".to_string());
            }
            Ok(None) => {}
            Err(PlayError::Move(MoveError::ColumnFull { .. })) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(PlayError::Move(MoveError::InvalidColumn { .. })) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(PlayError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.session, self.selected_column, &self.message);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Dimensions::default(), Player::Player1)
    }
}
