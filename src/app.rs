//! Terminal event loop: raw-mode setup, input polling, engine stepping and
//! drawing, mirrored teardown on exit.

use anyhow::Result;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::info;

use crate::audio::{CuePlayer, LogCues, SilentCues};
use crate::cli::Cli;
use crate::engine::input::{map_key, GamepadDecoder, GamepadSource, NullGamepad};
use crate::engine::registry::HostOp;
use crate::engine::screen::ScreenName;
use crate::engine::{Event, NavigationEngine};
use crate::scene::Scene;
use crate::shell::Shell;
use crate::ui::components::TextField;
use crate::ui::render;

pub async fn run(cli: Cli) -> Result<()> {
    let scene = match &cli.scene {
        Some(path) => Scene::load(path)?,
        None => Scene::default(),
    };
    let cues: Box<dyn CuePlayer> = if cli.log_cues {
        Box::new(LogCues)
    } else {
        Box::new(SilentCues)
    };

    let mut engine = NavigationEngine::new(Shell::new(scene), cues, Instant::now());
    engine.on_screen_changed(|screen| info!(screen = %screen, "screen changed"));
    let mut search = TextField::default();
    if cli.skip_boot {
        let events = engine.skip_boot();
        process_events(&mut engine, &mut search, events);
    }

    // terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut gamepad: Box<dyn GamepadSource> = Box::new(NullGamepad);
    let mut decoder = GamepadDecoder::new();
    let tick = Duration::from_millis(cli.tick_ms.max(10));

    'outer: loop {
        terminal.draw(|f| render::draw(f, &engine, &search))?;

        if event::poll(tick)? {
            if let TermEvent::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Release {
                    continue;
                }
                // GLOBAL HOTKEY: Ctrl+Q quits from anywhere
                if k.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(k.code, KeyCode::Char('q' | 'Q'))
                {
                    break 'outer;
                }
                if engine.text_input_focused() && edit_search(&mut engine, &mut search, k) {
                    continue;
                }
                if let Some(action) = map_key(k) {
                    let events = engine.handle(action);
                    process_events(&mut engine, &mut search, events);
                }
            }
        }

        for action in decoder.actions(&gamepad.poll()) {
            let events = engine.handle(action);
            process_events(&mut engine, &mut search, events);
        }

        let events = engine.advance(Instant::now());
        process_events(&mut engine, &mut search, events);
    }

    // restore
    disable_raw_mode()?;
    let out = terminal.backend_mut();
    execute!(out, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Route edit keys into the search buffer while it has focus. Returns true
/// when the key was consumed; arrows/Enter/Esc fall through so the engine can
/// move focus out of the field or apply the filters.
fn edit_search(
    engine: &mut NavigationEngine<Shell>,
    search: &mut TextField,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            search.insert_char(c)
        }
        KeyCode::Backspace => search.backspace(),
        KeyCode::Delete => search.delete(),
        KeyCode::Left => search.move_left(),
        KeyCode::Right => search.move_right(),
        KeyCode::Home => search.home(),
        KeyCode::End => search.end(),
        _ => return false,
    }
    engine.registry_mut().library.search = search.text.clone();
    true
}

/// Apply engine events to shell state; the engine stays domain-agnostic and
/// the shell owns the consequences.
fn process_events(
    engine: &mut NavigationEngine<Shell>,
    search: &mut TextField,
    events: Vec<Event>,
) {
    for event in events {
        match event {
            Event::Host(op) => {
                let toast = engine.registry_mut().apply(&op);
                if let Some(msg) = toast {
                    engine.notify(msg);
                }
                match op {
                    HostOp::ShowDetails(_) => {
                        let more = engine.activate(ScreenName::GameDetails, true);
                        process_events(engine, search, more);
                    }
                    HostOp::CycleFilter | HostOp::ApplyFilters => {
                        // The card grid may have shrunk under the cursor.
                        engine.sync_focus();
                    }
                    _ => {}
                }
            }
            Event::GameLaunched(id) => {
                engine.registry_mut().running_game = Some(id);
            }
            Event::GameResumed(id) => {
                engine.registry_mut().library.resume(&id);
                engine.registry_mut().running_game = Some(id);
            }
            Event::GameQuit => {
                let shell = engine.registry_mut();
                if let Some(id) = shell.running_game.take() {
                    shell.library.suspend(&id);
                }
                engine.sync_focus();
            }
            Event::BootCompleted => info!("boot finished"),
            Event::Restarted => {
                // Fresh boot: the search box empties with the rest of the
                // navigation state; settings survive.
                search.clear();
                engine.registry_mut().library.search.clear();
                info!("console restarting");
            }
            Event::ScreenChanged(_) => {}
        }
    }
}
