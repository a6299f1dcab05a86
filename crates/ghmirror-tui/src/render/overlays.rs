//! Modal overlays: help, fatal error, refresh progress (spec §4.4).

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use crate::state::{ErrorModalState, Overlay, RefreshOverlayState, RefreshPhase};
use crate::theme::ThemeColors;

pub fn draw(frame: &mut Frame, area: Rect, overlay: &Overlay, theme: &ThemeColors) {
    match overlay {
        Overlay::HelpOverlay => draw_help(frame, area, theme),
        Overlay::ErrorModal(modal) => draw_error(frame, area, modal, theme),
        Overlay::RefreshOverlay(refresh) => draw_refresh(frame, area, refresh, theme),
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
    area
}

fn draw_help(frame: &mut Frame, area: Rect, theme: &ThemeColors) {
    let rect = centered(area, 50, 14);
    let lines = vec![
        Line::from("j/down, k/up    move selection"),
        Line::from("h/l             scroll detail / comments"),
        Line::from("enter           open comments"),
        Line::from("esc             back to list"),
        Line::from("s / S           cycle sort field / toggle direction"),
        Line::from("m               toggle markdown rendering"),
        Line::from("r / R           incremental refresh / full resync"),
        Line::from("q, ctrl-c       quit"),
        Line::from(""),
        Line::styled("press any key to close", Style::default().fg(theme.muted)),
    ];
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Help "))
            .wrap(Wrap { trim: false }),
        rect,
    );
}

fn draw_error(frame: &mut Frame, area: Rect, modal: &ErrorModalState, theme: &ThemeColors) {
    let rect = centered(area, 60, 8);
    let mut lines = vec![Line::styled(
        modal.title.clone(),
        Style::default().fg(theme.fail).add_modifier(Modifier::BOLD),
    ), Line::from(""), Line::from(modal.message.clone())];
    if let Some(guidance) = &modal.guidance {
        lines.push(Line::from(""));
        lines.push(Line::styled(guidance.clone(), Style::default().fg(theme.warn)));
    }
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Error "))
            .wrap(Wrap { trim: false }),
        rect,
    );
}

fn draw_refresh(frame: &mut Frame, area: Rect, refresh: &RefreshOverlayState, theme: &ThemeColors) {
    let rect = centered(area, 50, 5);
    frame.render_widget(Clear, rect);
    match refresh {
        RefreshOverlayState::InProgress { phase, current, total, started } => {
            let label = match phase {
                RefreshPhase::Issues => "Fetching issues",
                RefreshPhase::Comments => "Fetching comments",
            };
            let ratio = total
                .filter(|t| *t > 0)
                .map(|t| (*current as f64 / t as f64).clamp(0.0, 1.0))
                .unwrap_or(0.0);
            let elapsed = started.0.elapsed().as_secs();
            let counts = match total {
                Some(t) => format!("{current}/{t}"),
                None => format!("{current}"),
            };
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title(format!(" {label} ")))
                .gauge_style(Style::default().fg(theme.accent))
                .ratio(ratio)
                .label(format!("{counts}  ({elapsed}s)"));
            frame.render_widget(gauge, rect);
        }
        RefreshOverlayState::Summary(text) => {
            frame.render_widget(
                Paragraph::new(text.clone())
                    .block(Block::default().borders(Borders::ALL).title(" Refresh complete ")),
                rect,
            );
        }
    }
}
