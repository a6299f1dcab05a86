//! Draws the whole frame for a given [`State`] (spec §4.4).

mod comments;
mod detail;
mod list;
mod overlays;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::state::{BaseView, State};
use crate::theme::ThemeColors;

pub fn draw(frame: &mut Frame, state: &State, theme: &ThemeColors) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    match &state.base {
        BaseView::IssueList => draw_issue_list(frame, chunks[0], state, theme),
        BaseView::CommentsDrillDown(drill) => {
            comments::draw(frame, chunks[0], state, drill, theme)
        }
    }

    draw_status_bar(frame, chunks[1], state, theme);

    if let Some(overlay) = &state.overlay {
        overlays::draw(frame, area, overlay, theme);
    }
}

fn draw_issue_list(frame: &mut Frame, area: Rect, state: &State, theme: &ThemeColors) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    list::draw(frame, columns[0], state, theme);
    detail::draw(frame, columns[1], state, theme);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, state: &State, theme: &ThemeColors) {
    use ratatui::style::Style;
    use ratatui::text::Line;
    use ratatui::widgets::Paragraph;

    let text = if let Some(status) = &state.status {
        let color = if status.is_error { theme.fail } else { theme.accent };
        Line::styled(status.text.clone(), Style::default().fg(color))
    } else {
        Line::styled(
            format!("{}  |  ? for help  |  q to quit", state.repo),
            Style::default().fg(theme.muted),
        )
    };
    frame.render_widget(Paragraph::new(text), area);
}
