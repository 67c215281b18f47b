use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::borrow::Cow;

use crate::shell::Theme;

/// Resolved color set for the current theme.
#[derive(Clone, Copy)]
pub struct Palette {
    pub accent: Color,
    pub selected: Color,
    pub idle: Color,
    pub dim: Color,
    pub text: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            accent: Color::Blue,
            selected: Color::Yellow,
            idle: Color::Gray,
            dim: Color::DarkGray,
            text: Color::White,
        },
        Theme::Light => Palette {
            accent: Color::Cyan,
            selected: Color::Magenta,
            idle: Color::Black,
            dim: Color::Gray,
            text: Color::Black,
        },
        Theme::Midnight => Palette {
            accent: Color::Magenta,
            selected: Color::Cyan,
            idle: Color::Blue,
            dim: Color::DarkGray,
            text: Color::White,
        },
    }
}

pub fn span_sep(p: &Palette) -> Span<'static> {
    Span::styled("  |  ", Style::default().fg(p.dim))
}

/// Core painter: "< " + LABEL + " >"
pub fn button_spans<S: Into<Cow<'static, str>>>(
    label: S,
    selected: bool,
    p: &Palette,
) -> Vec<Span<'static>> {
    let label = label.into();
    vec![
        Span::styled(
            "< ",
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            label,
            Style::default()
                .fg(if selected { p.selected } else { p.idle })
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " >",
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        ),
    ]
}

pub fn button_line<S: Into<Cow<'static, str>>>(
    label: S,
    selected: bool,
    p: &Palette,
) -> Line<'static> {
    Line::from(button_spans(label, selected, p))
}

/// Selection style for card borders and list rows.
pub fn highlight(selected: bool, p: &Palette) -> Style {
    if selected {
        Style::default().fg(p.selected).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.dim)
    }
}
