use crate::constants::MESSAGE_INDENT;
use crate::message::{Message, Sender};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// Lines for a log view `height` rows tall whose bottom row is the last line
/// of entry `anchor`. Only the entries that land in the window are rendered.
/// When everything up to the anchor is shorter than the view, the window
/// starts at the top and fills with later entries instead.
pub fn visible_lines(
    entries: &[Message],
    anchor: usize,
    width: u16,
    height: u16,
    show_timestamps: bool,
) -> Vec<Line<'static>> {
    let height = height as usize;
    if entries.is_empty() || height == 0 {
        return Vec::new();
    }
    let anchor = anchor.min(entries.len() - 1);

    // Walk back from the anchor, collecting lines bottom-up
    let mut lines: Vec<Line<'static>> = Vec::new();
    for message in entries[..=anchor].iter().rev() {
        if lines.len() >= height {
            break;
        }
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, width, show_timestamps).into_iter().rev());
    }
    lines.reverse();

    if lines.len() >= height {
        return lines.split_off(lines.len() - height);
    }

    for message in &entries[anchor + 1..] {
        if lines.len() >= height {
            break;
        }
        lines.push(Line::from(""));
        lines.extend(render_message(message, width, show_timestamps));
    }
    lines.truncate(height);
    lines
}

pub fn render_message(message: &Message, width: u16, show_timestamps: bool) -> Vec<Line<'static>> {
    let style = base_style(message.sender);
    let indent = if message.from_user() { MESSAGE_INDENT } else { "" };
    let mut lines = Vec::new();

    let mut header = vec![
        Span::styled(indent.to_string(), style),
        Span::styled("┌─ ".to_string(), style),
        Span::styled(label(message.sender).to_string(), style.add_modifier(Modifier::BOLD)),
    ];
    if show_timestamps {
        header.push(Span::styled(" ", style));
        header.push(Span::styled(
            message.timestamp.format("%H:%M").to_string(),
            style.add_modifier(Modifier::DIM),
        ));
    }
    lines.push(Line::from(header));

    let wrap_width = (width as usize).saturating_sub(indent.len() + 2).max(1);
    for wrapped in wrap(&message.text, wrap_width) {
        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled(wrapped.into_owned(), style),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("╰─".to_string(), style),
    ]));

    lines
}

fn label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "You",
        Sender::Bot => "Bot",
    }
}

fn base_style(sender: Sender) -> Style {
    Style::default().fg(match sender {
        Sender::User => Color::Rgb(255, 223, 128), // Warm yellow
        Sender::Bot => Color::Rgb(144, 238, 144),  // Soft green
    })
}
