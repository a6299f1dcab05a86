//! Markdown rendering for the detail panel / comments: the body either as
//! raw markdown or through a markdown renderer (toggle `m`). Rendering
//! failures fall back to raw text. Uses `pulldown-cmark`.

use pulldown_cmark::{Event as MdEvent, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Renders `body` as styled lines, or falls back to plain-text lines split
/// on newlines if rendering panics or otherwise fails.
pub fn render(body: &str, enabled: bool) -> Vec<Line<'static>> {
    if !enabled {
        return raw_lines(body);
    }
    std::panic::catch_unwind(|| render_markdown(body))
        .unwrap_or_else(|_| raw_lines(body))
}

fn raw_lines(body: &str) -> Vec<Line<'static>> {
    body.lines().map(|l| Line::from(l.to_string())).collect()
}

fn render_markdown(body: &str) -> Vec<Line<'static>> {
    let parser = Parser::new(body);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut style_stack: Vec<Style> = vec![Style::default()];

    let flush_line = |lines: &mut Vec<Line<'static>>, current: &mut Vec<Span<'static>>| {
        lines.push(Line::from(std::mem::take(current)));
    };

    for event in parser {
        match event {
            MdEvent::Start(Tag::Heading { level, .. }) => {
                if !current.is_empty() {
                    flush_line(&mut lines, &mut current);
                }
                let weight = match level {
                    HeadingLevel::H1 | HeadingLevel::H2 => Modifier::BOLD,
                    _ => Modifier::BOLD,
                };
                style_stack.push(Style::default().add_modifier(weight));
            }
            MdEvent::End(TagEnd::Heading(_)) => {
                style_stack.pop();
                flush_line(&mut lines, &mut current);
                lines.push(Line::from(""));
            }
            MdEvent::Start(Tag::Strong) => {
                style_stack.push(current_style(&style_stack).add_modifier(Modifier::BOLD));
            }
            MdEvent::End(TagEnd::Strong) => {
                style_stack.pop();
            }
            MdEvent::Start(Tag::Emphasis) => {
                style_stack.push(current_style(&style_stack).add_modifier(Modifier::ITALIC));
            }
            MdEvent::End(TagEnd::Emphasis) => {
                style_stack.pop();
            }
            MdEvent::Start(Tag::CodeBlock(_)) => {
                if !current.is_empty() {
                    flush_line(&mut lines, &mut current);
                }
                style_stack.push(current_style(&style_stack).add_modifier(Modifier::DIM));
            }
            MdEvent::End(TagEnd::CodeBlock) => {
                style_stack.pop();
                flush_line(&mut lines, &mut current);
            }
            MdEvent::Start(Tag::Item) => {
                if !current.is_empty() {
                    flush_line(&mut lines, &mut current);
                }
                current.push(Span::raw("  - "));
            }
            MdEvent::End(TagEnd::Item) => {
                flush_line(&mut lines, &mut current);
            }
            MdEvent::Start(Tag::Paragraph) => {}
            MdEvent::End(TagEnd::Paragraph) => {
                if !current.is_empty() {
                    flush_line(&mut lines, &mut current);
                }
                lines.push(Line::from(""));
            }
            MdEvent::Code(text) => {
                current.push(Span::styled(
                    text.to_string(),
                    current_style(&style_stack).add_modifier(Modifier::DIM),
                ));
            }
            MdEvent::Text(text) => {
                for (i, segment) in text.split('\n').enumerate() {
                    if i > 0 {
                        flush_line(&mut lines, &mut current);
                    }
                    if !segment.is_empty() {
                        current.push(Span::styled(segment.to_string(), current_style(&style_stack)));
                    }
                }
            }
            MdEvent::SoftBreak | MdEvent::HardBreak => {
                flush_line(&mut lines, &mut current);
            }
            _ => {}
        }
    }
    if !current.is_empty() {
        flush_line(&mut lines, &mut current);
    }
    lines
}

fn current_style(stack: &[Style]) -> Style {
    *stack.last().unwrap_or(&Style::default())
}
