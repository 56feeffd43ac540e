use crate::ai::{BfsReport, Heuristic, WindowHeuristic};
use crate::game::{Board, Cell, GameState, Player, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::App;

pub fn render(
    frame: &mut Frame,
    app: &App,
    selected_column: usize,
    message: &Option<String>,
    show_info: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(11),   // Board (+ info)
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    if show_info {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        render_board(frame, app.game_state().board(), selected_column, cols[0]);
        render_info(frame, app, cols[1]);
    } else {
        render_board(frame, app.game_state().board(), selected_column, chunks[1]);
    }

    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let game_state = app.game_state();
    let current_player = game_state.current_player();

    let mode = if app.engine_enabled() {
        format!(
            "Engine: {} (depth {})",
            app.engine_player().name(),
            app.engine_depth()
        )
    } else {
        "Engine: off".to_string()
    };

    let status = if game_state.is_terminal() {
        format!("{}  |  {}", game_state.status(), mode)
    } else {
        format!("Current Player: {}  |  {}", current_player.name(), mode)
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(current_player))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, board: &Board, selected_column: usize, area: Rect) {
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        let label = format!(" {} ", col + 1);
        if col == selected_column {
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
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔═════════════════════╗"));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..COLS {
            let (symbol, color) = match board.get(row, col) {
                Cell::Empty => (" . ", Color::DarkGray),
                Cell::Red => (" ● ", Color::Red),
                Cell::Yellow => (" ● ", Color::Yellow),
            };
            row_spans.push(Span::styled(symbol, Style::default().fg(color)));
        }
        row_spans.push(Span::raw("║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚═════════════════════╝"));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

/// Position analysis: score, legal moves, last move and the breadth-first
/// estimate, all from the engine's side.
fn render_info(frame: &mut Frame, app: &App, area: Rect) {
    let lines = info_lines(app.game_state(), app.engine_player(), app.estimate());
    let info = Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title("Game Info"));
    frame.render_widget(info, area);
}

fn info_lines(
    state: &GameState,
    engine_player: Player,
    estimate: Option<&BfsReport>,
) -> Vec<String> {
    let score = WindowHeuristic.evaluate(&state.position(), engine_player);
    let legal: Vec<String> = state
        .legal_actions()
        .iter()
        .map(|col| (col + 1).to_string())
        .collect();
    let last = match state.last_move() {
        Some(m) => format!(
            "{} at row {}, column {}",
            m.player.name(),
            m.row + 1,
            m.col + 1
        ),
        None => "none".to_string(),
    };
    let estimate = match estimate {
        Some(report) => format!(
            "{} ({} nodes)",
            report
                .best_score
                .map_or_else(|| "-".to_string(), |s| s.to_string()),
            report.expanded
        ),
        None => "-".to_string(),
    };

    vec![
        format!("Moves played: {}", state.moves_played()),
        format!("Position score: {score}"),
        format!("Valid moves: {}", legal.join(" ")),
        format!("Last move: {last}"),
        format!("BFS estimate: {estimate}"),
    ]
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("←/→: Move  |  Enter or 1-7: Drop  |  R: Restart  |  Q: Quit");
    let line2 = Line::from("A: Toggle engine  |  D: Engine depth (1-6)  |  I: Game info");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_lines_describe_the_position() {
        let state = GameState::initial().apply_move(3).unwrap();
        let report = BfsReport {
            best_score: Some(12),
            expanded: 7,
            discovered: 8,
        };
        let lines = info_lines(&state, Player::Yellow, Some(&report));
        assert_eq!(lines[0], "Moves played: 1");
        assert_eq!(lines[1], "Position score: -70");
        assert_eq!(lines[2], "Valid moves: 1 2 3 4 5 6 7");
        assert_eq!(lines[3], "Last move: Red at row 6, column 4");
        assert_eq!(lines[4], "BFS estimate: 12 (7 nodes)");
    }

    #[test]
    fn info_lines_without_estimate() {
        let lines = info_lines(&GameState::initial(), Player::Yellow, None);
        assert_eq!(lines[3], "Last move: none");
        assert_eq!(lines[4], "BFS estimate: -");
    }
}
