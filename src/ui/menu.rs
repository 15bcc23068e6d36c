use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::Theme;
use crate::game::DeathReason;

/// Draws the game-over screen as a centered popup over the board.
///
/// `previous_high_score` is the best score before this game, so a beaten
/// record can be announced.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    previous_high_score: u32,
    death_reason: Option<DeathReason>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 80, 80);
    frame.render_widget(Clear, popup);

    let is_new_high = score > previous_high_score;
    let mut lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(theme.overlay_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!(
            "High score: {}",
            score.max(previous_high_score)
        )),
    ];

    if let Some(reason) = death_reason {
        lines.push(Line::from(match reason {
            DeathReason::WallCollision => "Cause: hit wall",
            DeathReason::SelfCollision => "Cause: hit yourself",
        }));
    }
    if is_new_high {
        lines.push(Line::from("New high score!").style(Style::default().fg(theme.snake_head)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("Press R to restart"));
    lines.push(Line::from("[Q]/[Esc] Quit").style(Style::default().fg(theme.hud_text)));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
