//! Terminal UI rendering with ratatui

use crate::board::{Cell, COLS};
use crate::game::{Game, GameState};
use crate::menu::Menu;
use crate::settings::Settings;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// Total width needed: board(22) + stats(18) = 40
const GAME_WIDTH: u16 = 40;
/// Board(20) + 2 for borders
const GAME_HEIGHT: u16 = 22;

/// Render the difficulty selection screen
pub fn render_menu(frame: &mut Frame, menu: &Menu) {
    let area = center_rect(frame.area(), 40, 16);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    let title = Paragraph::new(vec![
        Line::raw(""),
        Line::styled("BLOCKFALL", Style::default().fg(Color::Cyan).bold()),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    let block = Block::default()
        .title(" Difficulty ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);

    let mut lines = vec![Line::raw("")];
    for (i, difficulty) in menu.items().iter().enumerate() {
        let is_selected = i == menu.selected;
        let (prefix, style) = if is_selected {
            ("▶ ", Style::default().fg(Color::Yellow).bold())
        } else {
            ("  ", Style::default().fg(Color::White))
        };
        lines.push(Line::styled(format!("{}{}", prefix, difficulty.name()), style));
        if is_selected {
            lines.push(Line::styled(
                difficulty.description(),
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            lines.push(Line::raw(""));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "↑↓ Select | Enter Start | Q Quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render a running, paused or finished game
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Board (10*2 + 2 for borders)
            Constraint::Length(18), // Stats
        ])
        .split(game_area);

    render_board(frame, layout[0], game, settings);
    render_stats(frame, layout[1], game, settings);

    match game.state {
        GameState::Paused => {
            let subtitle = format!("Press {} to resume", key_label(&settings.keys.pause));
            render_overlay(frame, area, "PAUSED", &subtitle);
        }
        GameState::GameOver => {
            let subtitle = format!(
                "Score: {} | {}",
                game.score.points,
                key_label(&settings.keys.restart)
            );
            render_overlay(frame, area, "GAME OVER", &subtitle);
        }
        GameState::Running | GameState::NotStarted => {}
    }
}

/// Display form of a binding list, e.g. `["q", "Esc"]` becomes `Q/Esc`
fn key_label(keys: &[String]) -> String {
    keys.iter()
        .map(|key| match key.to_lowercase().as_str() {
            "left" => "←".to_string(),
            "right" => "→".to_string(),
            "up" => "↑".to_string(),
            "down" => "↓".to_string(),
            "space" => "Space".to_string(),
            "enter" => "Enter".to_string(),
            "tab" => "Tab".to_string(),
            "esc" | "escape" => "Esc".to_string(),
            _ => key.to_uppercase(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the well: locked cells, the falling piece and its projection
fn render_board(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let (block_char, ghost_char) = settings.visual.block_chars();

    let title = format!(" {} ", game.difficulty().name());
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let piece_cells = game
        .current_piece
        .as_ref()
        .map(|piece| piece.cells())
        .unwrap_or_default();
    let piece_color = game
        .current_piece
        .as_ref()
        .map(|piece| piece.piece_type.color())
        .unwrap_or(Color::Reset);
    let ghost_cells = if settings.visual.show_ghost {
        game.ghost_cells()
    } else {
        Vec::new()
    };

    let lines: Vec<Line> = game
        .board
        .rows()
        .map(|(row, cells)| {
            let spans: Vec<Span> = (0..COLS)
                .map(|col| {
                    let pos = (row as i32, col as i32);
                    if piece_cells.contains(&pos) {
                        Span::styled(block_char, Style::default().fg(piece_color))
                    } else if let Cell::Filled(color) = cells[col] {
                        Span::styled(block_char, Style::default().fg(color))
                    } else if ghost_cells.contains(&pos) {
                        Span::styled(ghost_char, Style::default().fg(Color::Gray).dim())
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_stats(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));
    let best = settings.best_scores.get(game.difficulty()).max(game.score.points);

    let mut lines = vec![
        label("SCORE"),
        Line::from(Span::styled(
            format!("{}", game.score.points),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        label("LINES"),
        Line::from(Span::styled(
            format!("{}", game.score.lines),
            Style::default().fg(Color::Green),
        )),
        Line::raw(""),
        label("BEST"),
        Line::from(Span::styled(format!("{}", best), Style::default().fg(Color::Cyan))),
        Line::raw(""),
    ];

    let keys = &settings.keys;
    let move_keys: Vec<String> = keys.move_left.iter().chain(&keys.move_right).cloned().collect();
    let hints = [
        (key_label(&move_keys), "Move"),
        (key_label(&keys.rotate), "Rotate"),
        (key_label(&keys.soft_drop), "Drop"),
        (key_label(&keys.pause), "Pause"),
        (key_label(&keys.restart), "Restart"),
        (key_label(&keys.quit), "Quit"),
    ];
    lines.extend(hints.into_iter().map(|(key, action)| {
        Line::styled(format!("{:<4} {}", key, action), Style::default().fg(Color::DarkGray))
    }));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_area = center_rect(area, 28, 5);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle.to_string(), Style::default().fg(Color::Gray)),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_menu_renders_presets() {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).expect("test backend");
        let menu = Menu::new(Some(Difficulty::Medium));
        terminal
            .draw(|frame| render_menu(frame, &menu))
            .expect("draw");
        let text = screen_text(&terminal);
        assert!(text.contains("Easy"));
        assert!(text.contains("Medium"));
        assert!(text.contains("Hard"));
    }

    #[test]
    fn test_game_over_overlay_shows_score() {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).expect("test backend");
        let mut game = Game::with_seed(5);
        game.start(Difficulty::Easy);
        game.score.points = 300;
        game.state = GameState::GameOver;
        let settings = Settings::default();
        terminal
            .draw(|frame| render_game(frame, &game, &settings))
            .expect("draw");
        let text = screen_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Score: 300"));
    }

    #[test]
    fn test_key_label() {
        let keys = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(key_label(&keys(&["q", "Esc"])), "Q/Esc");
        assert_eq!(key_label(&keys(&["Left", "Right"])), "←/→");
        assert_eq!(key_label(&keys(&["Space"])), "Space");
    }

    #[test]
    fn test_hints_follow_bindings() {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).expect("test backend");
        let mut game = Game::with_seed(5);
        game.start(Difficulty::Medium);
        game.command(crate::game::Command::TogglePause);
        let mut settings = Settings::default();
        settings.keys.pause = vec!["x".to_string()];
        settings.keys.restart = vec!["r".to_string()];
        terminal
            .draw(|frame| render_game(frame, &game, &settings))
            .expect("draw");
        let text = screen_text(&terminal);
        assert!(text.contains("Press X to resume"));
        assert!(text.contains("X    Pause"));
        assert!(text.contains("R    Restart"));
        assert!(!text.contains("P    Pause"));
    }
}
