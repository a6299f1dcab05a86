//! The detail panel showing the selected issue's metadata and body
//! (spec §4.4): author, dates (`YYYY-MM-DD`), labels as colored chips,
//! assignees, then the body as raw markdown or rendered.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::markdown;
use crate::state::State;
use crate::theme::ThemeColors;

/// A small fixed palette that label chips cycle through, keyed by a
/// deterministic hash of the label name so the same label always gets the
/// same color within one run.
const CHIP_COLORS: [Color; 6] = [
    Color::Rgb(0xe0, 0x6c, 0x75),
    Color::Rgb(0xe5, 0xc0, 0x7b),
    Color::Rgb(0x98, 0xc3, 0x79),
    Color::Rgb(0x56, 0xb6, 0xc2),
    Color::Rgb(0x61, 0xaf, 0xef),
    Color::Rgb(0xc6, 0x78, 0xdd),
];

fn chip_color(label: &str) -> Color {
    let hash = label.bytes().fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    CHIP_COLORS[hash as usize % CHIP_COLORS.len()]
}

pub fn draw(frame: &mut Frame, area: Rect, state: &State, theme: &ThemeColors) {
    let Some(issue) = state.selected_issue() else {
        let paragraph = Paragraph::new("No open issues")
            .block(Block::default().borders(Borders::ALL).title(" Detail "));
        frame.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![
        Line::styled(issue.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Line::styled(
            format!(
                "#{} opened by {}  |  created {}  |  updated {}",
                issue.number,
                issue.author_login,
                issue.created_at.format("%Y-%m-%d"),
                issue.updated_at.format("%Y-%m-%d"),
            ),
            Style::default().fg(theme.muted),
        ),
    ];

    if !issue.labels.is_empty() {
        let mut spans = vec![Span::styled("labels: ", Style::default().fg(theme.muted))];
        for label in &issue.labels {
            spans.push(Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::Black).bg(chip_color(label)),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    if !issue.assignees.is_empty() {
        lines.push(Line::styled(
            format!("assignees: {}", issue.assignees.join(", ")),
            Style::default().fg(theme.muted),
        ));
    }

    lines.push(Line::from(""));
    lines.extend(markdown::render(&issue.body, state.markdown_enabled));

    let title = format!(" Detail{} ", if state.markdown_enabled { " [md]" } else { "" });
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((state.detail_scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chip_color_is_deterministic() {
        assert_eq!(chip_color("bug"), chip_color("bug"));
    }
}
