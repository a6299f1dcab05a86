//! The issue list panel (spec §4.4), rendering the configured
//! `display.columns` subset in order.

use ghmirror_config::Column;
use ghmirror_core::Issue;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::state::State;
use crate::theme::ThemeColors;

fn render_column(issue: &Issue, column: Column) -> String {
    match column {
        Column::Number => format!("#{:<5}", issue.number),
        Column::Title => issue.title.clone(),
        Column::Author => issue.author_login.clone(),
        Column::Date => issue.updated_at.format("%Y-%m-%d").to_string(),
        Column::Comments => format!("{}c", issue.comment_count),
    }
}

pub fn draw(frame: &mut Frame, area: Rect, state: &State, theme: &ThemeColors) {
    let items: Vec<ListItem> = state
        .issues
        .iter()
        .map(|issue| {
            let text = state
                .columns
                .iter()
                .map(|col| render_column(issue, *col))
                .collect::<Vec<_>>()
                .join("  ");
            ListItem::new(Line::styled(text, Style::default()))
        })
        .collect();

    let title = format!(
        " Issues ({} open) -- sort: {:?} {} ",
        state.issues.len(),
        state.sort.field,
        if state.sort.descending { "desc" } else { "asc" }
    );

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !state.issues.is_empty() {
        list_state.select(Some(state.cursor));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn issue() -> Issue {
        Issue {
            number: 42,
            title: "Widget explodes".into(),
            body: String::new(),
            author_login: "octocat".into(),
            state: ghmirror_core::IssueState::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            comment_count: 3,
            labels: vec![],
            assignees: vec![],
            html_url: String::new(),
        }
    }

    #[test]
    fn renders_only_configured_columns_in_order() {
        let issue = issue();
        assert_eq!(render_column(&issue, Column::Number), "#42   ");
        assert_eq!(render_column(&issue, Column::Title), "Widget explodes");
        assert_eq!(render_column(&issue, Column::Author), "octocat");
        assert_eq!(render_column(&issue, Column::Comments), "3c");
    }
}
