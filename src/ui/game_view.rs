use crate::game::{CellState, GameSession, Outcome, Phase, PlayerColor};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of one board cell in terminal columns.
const CELL_WIDTH: u16 = 3;
/// Characters before the first cell on each board line ("  ║").
const LEFT_PAD: u16 = 3;
/// Characters after the last cell (" ║").
const RIGHT_PAD: u16 = 2;
/// Lines above the first board row: column numbers and the top border.
const HEADER_LINES: u16 = 2;

/// Where the board lands on screen, so mouse clicks can be mapped back to
/// columns with the same arithmetic that drew it. Boards wider than the
/// terminal show a window of columns that always contains the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub area: Rect,
    pub rows: usize,
    pub first_column: usize,
    pub visible_columns: usize,
    pub columns: usize,
}

impl BoardGeometry {
    fn new(board_area: Rect, rows: usize, columns: usize, selected_column: usize) -> Self {
        let fit = (board_area.width.saturating_sub(LEFT_PAD + RIGHT_PAD) / CELL_WIDTH).max(1);
        let visible_columns = columns.min(fit as usize);
        let selected_column = selected_column.min(columns - 1);
        let first_column = (selected_column + 1).saturating_sub(visible_columns);

        let width = LEFT_PAD + CELL_WIDTH * visible_columns as u16 + RIGHT_PAD;
        let height = HEADER_LINES + rows as u16 + 2;
        let width = width.min(board_area.width);
        let height = height.min(board_area.height);
        let x = board_area.x + (board_area.width - width) / 2;
        BoardGeometry {
            area: Rect::new(x, board_area.y, width, height),
            rows,
            first_column,
            visible_columns,
            columns,
        }
    }

    /// Board columns currently on screen
    pub fn visible(&self) -> std::ops::Range<usize> {
        self.first_column..self.first_column + self.visible_columns
    }

    /// Column under a click at (x, y), counting the number line and every
    /// board row as part of the column.
    pub fn column_at(&self, x: u16, y: u16) -> Option<usize> {
        let first_line = self.area.y;
        let last_line = self.area.y + HEADER_LINES + self.rows as u16;
        if y < first_line || y > last_line {
            return None;
        }
        let cells_start = self.area.x + LEFT_PAD;
        if x < cells_start {
            return None;
        }
        let offset = ((x - cells_start) / CELL_WIDTH) as usize;
        (offset < self.visible_columns).then_some(self.first_column + offset)
    }
}

fn split(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Geometry of the board for a frame of size `area`.
pub fn board_geometry(area: Rect, session: &GameSession, selected_column: usize) -> BoardGeometry {
    let board = session.board();
    BoardGeometry::new(split(area)[1], board.rows(), board.columns(), selected_column)
}

pub fn render(
    frame: &mut Frame,
    session: &GameSession,
    selected_column: usize,
    message: &Option<String>,
) {
    let [header, _, message_area, controls] = split(frame.area());
    let geometry = board_geometry(frame.area(), session, selected_column);

    render_header(frame, session, header);
    render_board(frame, session, selected_column, geometry);
    render_message(frame, message, message_area);
    render_controls(frame, session.phase(), controls);
}

pub fn color_of(color: PlayerColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn render_header(frame: &mut Frame, session: &GameSession, area: Rect) {
    let (status, color) = match session.phase() {
        Phase::AwaitingMove => {
            let player = session.current_player();
            (format!("{}'s turn", player.id), color_of(player.color))
        }
        Phase::RoundOver(Outcome::Win(id)) => (
            format!("{} wins!", id),
            color_of(session.player(id).color),
        ),
        Phase::RoundOver(Outcome::Draw) => ("It's a draw!".to_string(), Color::White),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    session: &GameSession,
    selected_column: usize,
    geometry: BoardGeometry,
) {
    let snapshot = session.board_snapshot();
    let run = session.winning_run();
    let visible = geometry.visible();
    let inner_width = CELL_WIDTH as usize * visible.len() + 1;
    let selecting = session.phase() == Phase::AwaitingMove;
    let mut lines = Vec::new();

    // Column numbers with selection indicator, arrows when clipped
    let left_hint = if visible.start > 0 { "◀  " } else { "   " };
    let mut col_line = vec![Span::raw(left_hint)];
    for col in visible.clone() {
        let label = format!("{:^3}", col + 1);
        if selecting && col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    if visible.end < geometry.columns {
        col_line.push(Span::raw(" ▶"));
    }
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(inner_width))));

    for row in 0..snapshot.rows() {
        let mut row_spans = vec![Span::raw("  ║")];
        for cell in &snapshot.row(row)[visible.clone()] {
            let in_run = run.is_some_and(|r| r.contains(cell.position()));
            row_spans.push(cell_span(session, cell.state(), in_run));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(inner_width))));

    if selecting {
        let mut indicator_line = vec![Span::raw("   ")];
        for col in visible.clone() {
            if col == selected_column {
                indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
            } else {
                indicator_line.push(Span::raw("   "));
            }
        }
        lines.push(Line::from(indicator_line));
    }

    frame.render_widget(Paragraph::new(lines), geometry.area);
}

fn cell_span(session: &GameSession, state: CellState, in_run: bool) -> Span<'static> {
    match state {
        CellState::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
        CellState::Occupied(id) => {
            let style = Style::default().fg(color_of(session.player(id).color));
            if in_run {
                Span::styled(" ◆ ", style.add_modifier(Modifier::BOLD))
            } else {
                Span::styled(" ● ", style)
            }
        }
    }
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, phase: Phase, area: Rect) {
    let line = match phase {
        Phase::AwaitingMove => {
            "←/→: Move  |  1-9/Enter/Click: Drop  |  R: Restart  |  S: Setup  |  Q: Quit"
        }
        Phase::RoundOver(_) => "Enter/Space/Click: Play again  |  S: Setup  |  Q: Quit",
    };

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
