//! The comments drill-down view (spec §4.4).

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::markdown;
use crate::state::{DrillDownState, State};
use crate::theme::ThemeColors;

pub fn draw(frame: &mut Frame, area: Rect, state: &State, drill: &DrillDownState, theme: &ThemeColors) {
    let mut lines = Vec::new();

    if drill.loading {
        lines.push(Line::styled("Loading comments...", Style::default().fg(theme.muted)));
    } else if drill.comments.is_empty() {
        lines.push(Line::styled("No comments", Style::default().fg(theme.muted)));
    } else {
        for comment in &drill.comments {
            lines.push(Line::styled(
                format!("{} -- {}", comment.author_login, comment.created_at.to_rfc3339()),
                Style::default().add_modifier(Modifier::BOLD).fg(theme.accent),
            ));
            lines.extend(markdown::render(&comment.body, state.markdown_enabled));
            lines.push(Line::from(""));
        }
    }

    let title = format!(" Comments on #{} (esc to go back) ", drill.issue_number);
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((drill.scroll as u16, 0));
    frame.render_widget(paragraph, area);
}
