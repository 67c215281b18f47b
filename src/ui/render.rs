//! Frame painter: one draw call per tick, everything derived from the
//! engine's state plus the shell it carries.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::engine::context::{ContextName, GAMES_CHROME_LEN};
use crate::engine::power::PowerPhase;
use crate::engine::registry::FocusableRegistry;
use crate::engine::screen::ScreenName;
use crate::engine::NavigationEngine;
use crate::shell::Shell;

use super::components::{field_line, slider_line, toggle_line, TextField};
use super::layout::{centered_rect_abs, shell_layout};
use super::style::{button_line, button_spans, highlight, palette, span_sep, Palette};

const CLOCK_24H: &[FormatItem<'_>] = format_description!("[hour]:[minute]");
const CLOCK_12H: &[FormatItem<'_>] = format_description!("[hour repr:12]:[minute] [period]");

pub fn draw(f: &mut Frame<'_>, engine: &NavigationEngine<Shell>, search: &TextField) {
    let shell = engine.registry();
    let p = palette(shell.settings.theme);
    let size = f.size();

    match engine.phase() {
        PowerPhase::Booting => return draw_boot(f, engine, &p, size),
        PowerPhase::Sleeping => {
            return draw_blank(f, "Sleeping — press any key", &p, size);
        }
        PowerPhase::PoweredOff => {
            return draw_blank(f, "", &p, size);
        }
        PowerPhase::Awake => {}
    }

    let chrome = shell_layout(size);
    draw_status(f, shell, &p, chrome.status);
    draw_tabs(f, engine, &p, chrome.tabs);

    match engine.screen() {
        ScreenName::Home => draw_items_screen(f, engine, ContextName::Home, "Home", &p, chrome.body),
        ScreenName::Games => draw_games(f, engine, search, &p, chrome.body),
        ScreenName::Media => draw_items_screen(f, engine, ContextName::Media, "Media", &p, chrome.body),
        ScreenName::System => draw_system(f, engine, &p, chrome.body),
        ScreenName::GameDetails => draw_details(f, engine, &p, chrome.body),
        ScreenName::NowPlaying => draw_now_playing(f, engine, &p, chrome.body),
        ScreenName::InGame => draw_in_game(f, engine, &p, chrome.body),
    }

    draw_footer(f, engine, &p, chrome.footer);

    if engine.modal_depth() > 0 {
        draw_overlay(f, engine, &p, size);
    }
    if let Some(loading) = engine.loading() {
        let area = centered_rect_abs(40, 5, size);
        f.render_widget(Clear, area);
        let pane = Paragraph::new(format!("{}…", loading.title))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(highlight(true, &p)));
        f.render_widget(pane, area);
    }
    if let Some(toast) = engine.toast() {
        let w = (toast.chars().count() as u16 + 6).min(size.width.saturating_sub(2));
        let area = Rect {
            x: size.x + (size.width.saturating_sub(w)) / 2,
            y: size.bottom().saturating_sub(4),
            width: w,
            height: 3,
        };
        f.render_widget(Clear, area);
        let boxed = Paragraph::new(toast.to_string())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(highlight(true, &p)));
        f.render_widget(boxed, area);
    }
}

fn draw_boot(f: &mut Frame<'_>, engine: &NavigationEngine<Shell>, p: &Palette, size: Rect) {
    let area = centered_rect_abs(60, 6, size);
    let block = Block::default().borders(Borders::ALL).title(" Nexora ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);
    f.render_widget(
        Paragraph::new("Starting up").alignment(Alignment::Center),
        rows[0],
    );
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(p.accent))
        .percent(engine.boot_percent() as u16);
    f.render_widget(gauge, rows[1]);
    f.render_widget(
        Paragraph::new(Span::styled(
            "ENTER to skip",
            Style::default().fg(p.dim),
        ))
        .alignment(Alignment::Center),
        rows[2],
    );
}

fn draw_blank(f: &mut Frame<'_>, msg: &str, p: &Palette, size: Rect) {
    f.render_widget(Clear, size);
    if !msg.is_empty() {
        let area = centered_rect_abs(40, 3, size);
        f.render_widget(
            Paragraph::new(Span::styled(msg.to_string(), Style::default().fg(p.dim)))
                .alignment(Alignment::Center),
            area,
        );
    }
}

fn draw_status(f: &mut Frame<'_>, shell: &Shell, p: &Palette, area: Rect) {
    let fmt = if shell.settings.clock24 { CLOCK_24H } else { CLOCK_12H };
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let clock = now.format(fmt).unwrap_or_default();

    let flag = |label: &'static str, on: bool| {
        Span::styled(
            label,
            if on {
                Style::default().fg(p.accent)
            } else {
                Style::default().fg(p.dim).add_modifier(Modifier::CROSSED_OUT)
            },
        )
    };
    let line = Line::from(vec![
        Span::styled(" NEXORA", Style::default().fg(p.accent).add_modifier(Modifier::BOLD)),
        span_sep(p),
        flag("SND", shell.settings.sound),
        Span::raw(" "),
        flag("WIFI", shell.settings.wifi),
        Span::raw(" "),
        flag("CTRL", shell.settings.controller),
        span_sep(p),
        Span::styled(clock, Style::default().fg(p.text)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_tabs(f: &mut Frame<'_>, engine: &NavigationEngine<Shell>, p: &Palette, area: Rect) {
    let mut spans: Vec<Span<'static>> = vec![Span::raw(" ")];
    for screen in crate::engine::screen::TAB_RING {
        let selected = engine.tab() == screen;
        spans.extend(button_spans(screen.as_str().to_uppercase(), selected, p));
        spans.push(Span::raw("  "));
    }
    let tabs = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(p.dim)));
    f.render_widget(tabs, area);
}

/// Generic button-row screen: every item on its own line, focus highlighted.
fn draw_items_screen(
    f: &mut Frame<'_>,
    engine: &NavigationEngine<Shell>,
    ctx: ContextName,
    title: &str,
    p: &Palette,
    area: Rect,
) {
    let items = engine.registry().items(ctx);
    let focus = engine.focus();
    let mut lines: Vec<Line<'static>> = vec![Line::default()];
    for (i, item) in items.iter().enumerate() {
        let selected = focus.context == ctx && focus.index == i;
        lines.push(button_line(item.label.clone(), selected, p));
        lines.push(Line::default());
    }
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(format!(" {title} ")));
    f.render_widget(body, area);
}

fn draw_games(
    f: &mut Frame<'_>,
    engine: &NavigationEngine<Shell>,
    search: &TextField,
    p: &Palette,
    area: Rect,
) {
    let shell = engine.registry();
    let focus = engine.focus();
    let in_games = focus.context == ContextName::Games;
    let sel = |i: usize| in_games && focus.index == i;

    let block = Block::default().borders(Borders::ALL).title(" Games ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(3)])
        .split(inner);

    // Toolbar: back / filter / sort / search / apply.
    let mut toolbar: Vec<Span<'static>> = Vec::new();
    toolbar.extend(button_spans("Back", sel(0), p));
    toolbar.push(Span::raw("  "));
    toolbar.extend(button_spans(
        format!("Filter: {}", shell.library.filter.label()),
        sel(1),
        p,
    ));
    toolbar.push(Span::raw("  "));
    toolbar.extend(button_spans(
        format!("Sort: {}", shell.library.sort.label()),
        sel(2),
        p,
    ));
    toolbar.push(Span::raw("  "));
    toolbar.extend(field_line("Search", search, sel(3), p).spans);
    toolbar.push(Span::raw("  "));
    toolbar.extend(button_spans("Apply", sel(4), p));
    f.render_widget(Paragraph::new(Line::from(toolbar)), rows[0]);

    // Card grid, 3 per row.
    let games = shell.library.visible();
    if games.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No games match.", Style::default().fg(p.dim)))
                .alignment(Alignment::Center),
            rows[2],
        );
        return;
    }
    let card_h = 4u16;
    for (i, game) in games.iter().enumerate() {
        let col = (i % 3) as u16;
        let row = (i / 3) as u16;
        let card = Rect {
            x: rows[2].x + col * (rows[2].width / 3),
            y: rows[2].y + row * card_h,
            width: rows[2].width / 3,
            height: card_h,
        };
        if card.bottom() > rows[2].bottom() {
            break;
        }
        let selected = sel(GAMES_CHROME_LEN + i);
        let marker = if game.installed { "" } else { " (cloud)" };
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                game.title.clone(),
                Style::default().fg(if selected { p.selected } else { p.text }),
            )),
            Line::from(Span::styled(
                format!("{}{marker}", game.genre),
                Style::default().fg(p.dim),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).border_style(highlight(selected, p)));
        f.render_widget(body, card);
    }
}

fn draw_system(f: &mut Frame<'_>, engine: &NavigationEngine<Shell>, p: &Palette, area: Rect) {
    let shell = engine.registry();
    let focus = engine.focus();
    let in_sys = focus.context == ContextName::System;
    let sel = |i: usize| in_sys && focus.index == i;

    let lines = vec![
        Line::default(),
        button_line("Back", sel(0), p),
        Line::default(),
        toggle_line("Sound", shell.settings.sound, sel(1), p),
        Line::default(),
        toggle_line("24h Clock", shell.settings.clock24, sel(2), p),
        Line::default(),
        button_line(
            format!("Theme: {}", shell.settings.theme.label()),
            sel(3),
            p,
        ),
        Line::default(),
        slider_line("Volume", shell.settings.volume, sel(4), p),
    ];
    let body =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" System "));
    f.render_widget(body, area);
}

fn draw_details(f: &mut Frame<'_>, engine: &NavigationEngine<Shell>, p: &Palette, area: Rect) {
    let shell = engine.registry();
    let game = shell
        .selected_game
        .as_deref()
        .and_then(|id| shell.library.get(id));
    let title = game.map(|g| g.title.as_str()).unwrap_or("Unknown");

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(p.text).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(g) = game {
        lines.push(Line::from(Span::styled(
            format!(
                "{} — {}",
                g.genre,
                if g.installed { "Installed" } else { "Not installed" }
            ),
            Style::default().fg(p.dim),
        )));
    }
    lines.push(Line::default());
    let focus = engine.focus();
    let in_details = focus.context == ContextName::Details;
    for (i, item) in engine.registry().items(ContextName::Details).iter().enumerate() {
        lines.push(button_line(
            item.label.clone(),
            in_details && focus.index == i,
            p,
        ));
        lines.push(Line::default());
    }
    let body =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(body, area);
}

fn running_title(shell: &Shell) -> String {
    shell
        .running_game
        .as_deref()
        .and_then(|id| shell.library.get(id))
        .map(|g| g.title.clone())
        .unwrap_or_else(|| "No game".to_string())
}

fn draw_now_playing(f: &mut Frame<'_>, engine: &NavigationEngine<Shell>, p: &Palette, area: Rect) {
    let title = running_title(engine.registry());
    let focus = engine.focus();
    let in_np = focus.context == ContextName::NowPlaying;
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("Now Playing: {title}"),
            Style::default().fg(p.text).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    for (i, item) in engine.registry().items(ContextName::NowPlaying).iter().enumerate() {
        lines.push(button_line(item.label.clone(), in_np && focus.index == i, p));
        lines.push(Line::default());
    }
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Now Playing "));
    f.render_widget(body, area);
}

fn draw_in_game(f: &mut Frame<'_>, engine: &NavigationEngine<Shell>, p: &Palette, area: Rect) {
    let title = running_title(engine.registry());
    let focus = engine.focus();
    let in_game = focus.context == ContextName::InGame;
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("▶ {title}"),
            Style::default().fg(p.selected).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Simulated gameplay",
            Style::default().fg(p.dim),
        )),
        Line::default(),
    ];
    for (i, item) in engine.registry().items(ContextName::InGame).iter().enumerate() {
        lines.push(button_line(item.label.clone(), in_game && focus.index == i, p));
        lines.push(Line::default());
    }
    let body =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" In Game "));
    f.render_widget(body, area);
}

fn draw_overlay(f: &mut Frame<'_>, engine: &NavigationEngine<Shell>, p: &Palette, size: Rect) {
    let shell = engine.registry();
    let focus = engine.focus();
    let items = shell.items(focus.context);

    let (title, mut lines): (String, Vec<Line<'static>>) = match focus.context {
        ContextName::Power => (" Power ".into(), vec![Line::default()]),
        ContextName::MediaOverlay => {
            let mut lines = vec![Line::default()];
            if let Some(kind) = shell.media {
                lines.push(Line::from(Span::styled(
                    kind.body().to_string(),
                    Style::default().fg(p.text),
                )));
            }
            lines.push(Line::default());
            (
                format!(
                    " {} ",
                    shell.media.map(|k| k.title()).unwrap_or("Media")
                ),
                lines,
            )
        }
        ContextName::QuickResume => (" Quick Resume ".into(), vec![Line::default()]),
        _ => (String::new(), vec![Line::default()]),
    };

    for (i, item) in items.iter().enumerate() {
        lines.push(button_line(item.label.clone(), focus.index == i, p));
        lines.push(Line::default());
    }

    let h = (lines.len() as u16 + 2).max(7);
    let area = centered_rect_abs(48, h, size);
    f.render_widget(Clear, area);
    let pane = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(highlight(true, p)),
        );
    f.render_widget(pane, area);
}

fn draw_footer(f: &mut Frame<'_>, engine: &NavigationEngine<Shell>, p: &Palette, area: Rect) {
    let hint = if engine.modal_depth() > 0 {
        " ↑↓ select   ENTER confirm   ESC close"
    } else if engine.text_input_focused() {
        " type to search   ENTER apply   ↑↓ leave field"
    } else {
        " arrows move   ENTER select   ESC back   [ ] tabs   p power   ctrl-q quit"
    };
    f.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(p.dim))),
        area,
    );
}
