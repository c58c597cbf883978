use crate::config::SetupConfig;
use crate::error::MoveError;
use crate::game::{GameSession, Outcome};
use crate::ui::game_view;
use crate::ui::setup_view::{self, SetupForm};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use std::io;
use tracing::debug;

/// A running game plus the UI-only state around it.
#[derive(Debug)]
struct Playing {
    session: GameSession,
    selected_column: usize,
    message: Option<String>,
}

impl Playing {
    fn new(session: GameSession) -> Self {
        let selected_column = session.board().columns() / 2; // Start in middle
        Playing {
            session,
            selected_column,
            message: None,
        }
    }
}

#[derive(Debug)]
enum Screen {
    Setup(SetupForm),
    Playing(Playing),
}

pub struct App {
    screen: Screen,
    setup_defaults: SetupConfig,
    should_quit: bool,
    /// Size of the last drawn frame, used to map mouse clicks.
    frame_area: Rect,
}

impl App {
    pub fn new(setup_defaults: SetupConfig) -> Self {
        App {
            screen: Screen::Setup(SetupForm::from_config(&setup_defaults)),
            setup_defaults,
            should_quit: false,
            frame_area: Rect::default(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The running session, if setup has been completed
    pub fn session(&self) -> Option<&GameSession> {
        match &self.screen {
            Screen::Playing(playing) => Some(&playing.session),
            Screen::Setup(_) => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.screen {
            Screen::Playing(playing) => playing.message.as_deref(),
            Screen::Setup(form) => form.error.as_deref(),
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| {
                    self.frame_area = f.area();
                    self.render(f);
                })
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match &mut self.screen {
            Screen::Setup(form) => match key.code {
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Tab | KeyCode::Down => form.focus_next(),
                KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
                KeyCode::Backspace => form.backspace(),
                KeyCode::Char(c) => form.insert_char(c),
                KeyCode::Enter => {
                    if let Some(session) = form.submit() {
                        self.screen = Screen::Playing(Playing::new(session));
                    }
                }
                _ => {}
            },
            Screen::Playing(playing) => {
                // Clear message on any key press
                playing.message = None;

                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                    KeyCode::Char('s') => self.back_to_setup(),
                    KeyCode::Left => {
                        playing.selected_column = playing.selected_column.saturating_sub(1);
                    }
                    KeyCode::Right => {
                        let last = playing.session.board().columns() - 1;
                        playing.selected_column = (playing.selected_column + 1).min(last);
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        let column = playing.selected_column;
                        Self::drop_or_acknowledge(playing, column);
                    }
                    KeyCode::Char('r') => {
                        playing.session.reset();
                        playing.message = Some("New game started!".to_string());
                    }
                    KeyCode::Char(c @ '1'..='9') => {
                        let column = c as usize - '1' as usize;
                        if column < playing.session.board().columns() {
                            playing.selected_column = column;
                        }
                        Self::drop_or_acknowledge(playing, column);
                    }
                    _ => {}
                }
            }
        }
    }

    /// Left click on a board column drops there
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let area = self.frame_area;
        if let Screen::Playing(playing) = &mut self.screen {
            let geometry =
                game_view::board_geometry(area, &playing.session, playing.selected_column);
            if let Some(column) = geometry.column_at(mouse.column, mouse.row) {
                playing.message = None;
                playing.selected_column = column;
                Self::drop_or_acknowledge(playing, column);
            }
        }
    }

    /// Record the frame size the next mouse event should be mapped against
    pub fn set_frame_area(&mut self, area: Rect) {
        self.frame_area = area;
    }

    fn back_to_setup(&mut self) {
        let mut form = SetupForm::from_config(&self.setup_defaults);
        if let Screen::Playing(playing) = &self.screen {
            // Keep what was played with, not the startup defaults
            let board = playing.session.board();
            let [p1, p2] = playing.session.players();
            form.rows = board.rows().to_string();
            form.columns = board.columns().to_string();
            form.player1_color = p1.color.to_hex();
            form.player2_color = p2.color.to_hex();
        }
        self.screen = Screen::Setup(form);
    }

    /// Drop into `column`, or start the next round if this one is over
    fn drop_or_acknowledge(playing: &mut Playing, column: usize) {
        if playing.session.outcome().is_some() {
            playing.session.reset();
            playing.message = Some("New game started!".to_string());
            return;
        }

        match playing.session.drop_piece(column) {
            Ok(result) => {
                playing.message = result.outcome.map(|outcome| match outcome {
                    Outcome::Win(id) => format!("{id} wins! Press Enter to play again."),
                    Outcome::Draw => "It's a draw! Press Enter to play again.".to_string(),
                });
            }
            Err(err) => {
                debug!(%err, "move rejected");
                playing.message = Some(match err {
                    MoveError::ColumnFull(c) => format!("Column {} is full!", c + 1),
                    MoveError::ColumnOutOfRange { .. } => "Invalid column!".to_string(),
                    MoveError::RoundOver => "Game is over!".to_string(),
                });
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        match &self.screen {
            Screen::Setup(form) => setup_view::render(frame, form),
            Screen::Playing(playing) => game_view::render(
                frame,
                &playing.session,
                playing.selected_column,
                &playing.message,
            ),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(SetupConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CellState, Phase, PlayerId};
    use crossterm::event::KeyEventState;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn started() -> App {
        let mut app = App::default();
        app.handle_key(key(KeyCode::Enter));
        assert!(app.session().is_some());
        app
    }

    fn screen_text(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_starts_on_setup_screen() {
        let app = App::default();
        assert!(app.session().is_none());
        let text = screen_text(&app, 80, 20);
        assert!(text.contains("Number of Rows"));
        assert!(text.contains("Player 2 Color"));
    }

    #[test]
    fn test_setup_rejects_duplicate_colors() {
        let mut app = App::new(SetupConfig {
            player2_color: "#ff0000".to_string(),
            ..SetupConfig::default()
        });
        app.handle_key(key(KeyCode::Enter));
        assert!(app.session().is_none());
        assert!(app.message().unwrap().contains("different colors"));
    }

    #[test]
    fn test_setup_editing_changes_board_size() {
        let mut app = App::default();
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('4')));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('5')));
        app.handle_key(key(KeyCode::Enter));

        let session = app.session().unwrap();
        assert_eq!(session.board().rows(), 4);
        assert_eq!(session.board().columns(), 5);
    }

    #[test]
    fn test_digit_keys_drop_pieces() {
        let mut app = started();
        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Char('2')));

        let board = app.session().unwrap().board();
        assert_eq!(board.get(0, 5), Some(CellState::Occupied(PlayerId::One)));
        assert_eq!(board.get(1, 5), Some(CellState::Occupied(PlayerId::Two)));
    }

    #[test]
    fn test_arrows_and_enter_drop_in_selected_column() {
        let mut app = started();
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Enter));
        let board = app.session().unwrap().board();
        assert_eq!(board.get(2, 5), Some(CellState::Occupied(PlayerId::One)));
    }

    #[test]
    fn test_full_column_message_keeps_turn() {
        let mut app = started();
        for _ in 0..6 {
            app.handle_key(key(KeyCode::Char('4')));
        }
        app.handle_key(key(KeyCode::Char('4')));
        assert_eq!(app.message(), Some("Column 4 is full!"));
        assert_eq!(
            app.session().unwrap().current_player().id,
            PlayerId::One
        );
    }

    #[test]
    fn test_win_then_acknowledge_resets() {
        let mut app = started();
        for c in ['1', '2', '1', '2', '1', '2', '1'] {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(
            app.session().unwrap().phase(),
            Phase::RoundOver(Outcome::Win(PlayerId::One))
        );
        assert_eq!(app.message(), Some("Player 1 wins! Press Enter to play again."));
        assert!(screen_text(&app, 80, 24).contains("Player 1 wins!"));

        app.handle_key(key(KeyCode::Enter));
        let session = app.session().unwrap();
        assert_eq!(session.phase(), Phase::AwaitingMove);
        assert_eq!(session.current_player().id, PlayerId::One);
        assert!(session.board().cells().all(|c| c.state() == CellState::Empty));
    }

    #[test]
    fn test_mouse_click_drops_in_column() {
        let mut app = started();
        let area = Rect::new(0, 0, 80, 24);
        app.set_frame_area(area);

        let geometry = game_view::board_geometry(area, app.session().unwrap(), 3);
        // Middle of the sixth column, on the first board row
        let x = geometry.area.x + 3 + 5 * 3 + 1;
        let y = geometry.area.y + 2;
        app.handle_mouse(click(x, y));

        let board = app.session().unwrap().board();
        assert_eq!(board.get(5, 5), Some(CellState::Occupied(PlayerId::One)));
    }

    #[test]
    fn test_mouse_click_outside_board_is_ignored() {
        let mut app = started();
        app.set_frame_area(Rect::new(0, 0, 80, 24));
        app.handle_mouse(click(0, 0));
        app.handle_mouse(click(79, 10));
        let session = app.session().unwrap();
        assert!(session.board().cells().all(|c| c.state() == CellState::Empty));
    }

    #[test]
    fn test_back_to_setup_keeps_current_values() {
        let mut app = App::new(SetupConfig {
            rows: 5,
            ..SetupConfig::default()
        });
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('s')));
        assert!(app.session().is_none());
        assert!(screen_text(&app, 80, 20).contains("[5"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::default();
        app.handle_key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
        assert!(app.should_quit());

        let mut app = started();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }
}
