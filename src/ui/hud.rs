use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::GameState;

const HUD_MARGIN_X: u16 = 1;
const FIELD_GAP: &str = "  ";

/// Values the HUD shows that live outside the game state.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    /// Best score including the current session.
    pub high_score: u32,
    /// Best score before the current game started.
    pub previous_high_score: u32,
    pub theme: &'a Theme,
}

/// Renders the one-line HUD and returns the remaining area below it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    info: &HudInfo<'_>,
) -> Rect {
    let [hud_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    let hud_area = inset_horizontal(hud_area, HUD_MARGIN_X);

    let length_text = format!("Length: {}", state.snake.len());
    let length_width = u16::try_from(length_text.width()).unwrap_or(u16::MAX);
    let [score_area, length_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(length_width)])
            .areas(hud_area);

    frame.render_widget(
        Paragraph::new(score_line(
            state.score,
            info.high_score,
            usize::from(score_area.width),
            info.theme,
        ))
        .alignment(Alignment::Left),
        score_area,
    );

    frame.render_widget(
        Paragraph::new(Line::from(length_text))
            .alignment(Alignment::Right)
            .style(Style::default().fg(info.theme.hud_text)),
        length_area,
    );

    play_area
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

/// `Score: N  High: M`, falling back to one-letter labels when narrow.
fn score_line(score: u32, high_score: u32, available_width: usize, theme: &Theme) -> Line<'static> {
    let compact = score_line_width(score, high_score, false) > available_width;
    let (score_label, high_label) = if compact { ("S", "H") } else { ("Score", "High") };

    let label_style = Style::default().fg(theme.hud_text);
    let value_style = Style::default()
        .fg(theme.hud_value)
        .add_modifier(Modifier::BOLD);
    let high_style = if score > 0 && score >= high_score {
        value_style.fg(theme.snake_head)
    } else {
        value_style
    };

    Line::from(vec![
        Span::styled(format!("{score_label}: "), label_style),
        Span::styled(score.to_string(), value_style),
        Span::raw(FIELD_GAP),
        Span::styled(format!("{high_label}: "), label_style),
        Span::styled(high_score.to_string(), high_style),
    ])
}

fn score_line_width(score: u32, high_score: u32, compact: bool) -> usize {
    let (score_label, high_label) = if compact { ("S", "H") } else { ("Score", "High") };
    format!("{score_label}: {score}{FIELD_GAP}{high_label}: {high_score}").width()
}
