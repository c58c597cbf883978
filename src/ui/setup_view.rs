use crate::config::SetupConfig;
use crate::game::{GameSession, PlayerColor};
use crate::ui::game_view::color_of;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Rows,
    Columns,
    Player1Color,
    Player2Color,
    Start,
}

impl Field {
    const ORDER: [Field; 5] = [
        Field::Rows,
        Field::Columns,
        Field::Player1Color,
        Field::Player2Color,
        Field::Start,
    ];

    fn label(self) -> &'static str {
        match self {
            Field::Rows => "Number of Rows",
            Field::Columns => "Number of Columns",
            Field::Player1Color => "Player 1 Color",
            Field::Player2Color => "Player 2 Color",
            Field::Start => "Start Game",
        }
    }

    fn position(self) -> usize {
        Field::ORDER.iter().position(|&f| f == self).unwrap_or(0)
    }
}

/// Editable setup values, kept as text until submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupForm {
    pub rows: String,
    pub columns: String,
    pub player1_color: String,
    pub player2_color: String,
    pub focus: Field,
    pub error: Option<String>,
}

impl SetupForm {
    pub fn from_config(config: &SetupConfig) -> Self {
        SetupForm {
            rows: config.rows.to_string(),
            columns: config.columns.to_string(),
            player1_color: config.player1_color.clone(),
            player2_color: config.player2_color.clone(),
            focus: Field::Rows,
            error: None,
        }
    }

    pub fn focus_next(&mut self) {
        let next = (self.focus.position() + 1) % Field::ORDER.len();
        self.focus = Field::ORDER[next];
    }

    pub fn focus_prev(&mut self) {
        let len = Field::ORDER.len();
        let prev = (self.focus.position() + len - 1) % len;
        self.focus = Field::ORDER[prev];
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Rows => Some(&mut self.rows),
            Field::Columns => Some(&mut self.columns),
            Field::Player1Color => Some(&mut self.player1_color),
            Field::Player2Color => Some(&mut self.player2_color),
            Field::Start => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let numeric = matches!(self.focus, Field::Rows | Field::Columns);
        if numeric && !c.is_ascii_digit() {
            return;
        }
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Try to start a session from the current values. On failure the
    /// reason is kept in `error` for display.
    pub fn submit(&mut self) -> Option<GameSession> {
        let result = parse_dimension("rows", &self.rows).and_then(|rows| {
            let columns = parse_dimension("columns", &self.columns)?;
            GameSession::start(rows, columns, &self.player1_color, &self.player2_color)
                .map_err(|e| e.to_string())
        });

        match result {
            Ok(session) => {
                self.error = None;
                Some(session)
            }
            Err(reason) => {
                warn!(%reason, "setup rejected");
                self.error = Some(reason);
                None
            }
        }
    }
}

fn parse_dimension(name: &str, text: &str) -> Result<usize, String> {
    text.trim()
        .parse()
        .map_err(|_| format!("{name} must be a whole number, got '{text}'"))
}

pub fn render(frame: &mut Frame, form: &SetupForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(7),    // Fields
            Constraint::Length(3), // Error
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    let title = Paragraph::new("New Game")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));
    frame.render_widget(title, chunks[0]);

    render_fields(frame, form, chunks[1]);

    let error = Paragraph::new(form.error.as_deref().unwrap_or(""))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(error, chunks[2]);

    let controls = Paragraph::new("Tab/↑/↓: Field  |  Type to edit  |  Enter: Start  |  Esc: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(controls, chunks[3]);
}

fn render_fields(frame: &mut Frame, form: &SetupForm, area: Rect) {
    let mut lines = Vec::new();

    for field in Field::ORDER {
        let focused = field == form.focus;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut spans = vec![Span::styled(format!("{marker}{:<18}", field.label()), label_style)];
        let value = match field {
            Field::Rows => Some(&form.rows),
            Field::Columns => Some(&form.columns),
            Field::Player1Color => Some(&form.player1_color),
            Field::Player2Color => Some(&form.player2_color),
            Field::Start => None,
        };

        if let Some(value) = value {
            spans.push(Span::raw(format!("[{value:<8}]")));
            if matches!(field, Field::Player1Color | Field::Player2Color) {
                // Preview swatch, only when the text parses
                if let Ok(color) = value.parse::<PlayerColor>() {
                    spans.push(Span::styled(" ●", Style::default().fg(color_of(color))));
                }
            }
        }
        lines.push(Line::from(spans));
    }

    let fields = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(fields, area);
}
