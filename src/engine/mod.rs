//! Unified focus & navigation engine.
//!
//! One owned instance holds every piece of navigation state: the active
//! screen and its history, the focus context/index pair, the overlay stack,
//! the power phase and the timer queue. All mutation goes through
//! [`NavigationEngine`] methods; the host renders from its accessors and
//! applies the [`HostOp`]s it hands back.

pub mod context;
pub mod directional;
pub mod geometry;
pub mod input;
pub mod modal;
pub mod power;
pub mod registry;
pub mod schedule;
pub mod screen;

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::audio::{CueKind, CuePlayer};
use context::{ContextName, FocusState, OverlayMotion, GAMES_CHROME_LEN};
use input::Action;
use modal::ModalStack;
use power::{PowerGate, PowerOption, PowerPhase, BOOT_FIRST_TICK, BOOT_SETTLE};
use registry::{Activation, Focusable, FocusableRegistry, HostOp};
use schedule::{Scheduler, TimerEvent, TimerToken};
use screen::{ScreenName, ScreenRouter};

/// How long a toast stays up before its expiry timer clears it.
pub const TOAST_DURATION: Duration = Duration::from_millis(950);
/// Settle time between pressing Play and landing in-game.
pub const LAUNCH_DELAY: Duration = Duration::from_millis(650);
/// Settle time between quitting and landing back on the library.
pub const QUIT_DELAY: Duration = Duration::from_millis(700);

/// Notifications surfaced to the host after `handle`/`advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ScreenChanged(ScreenName),
    BootCompleted,
    /// An activation or shortcut the host owns (settings, library ops).
    Host(HostOp),
    GameLaunched(String),
    GameResumed(String),
    GameQuit,
    Restarted,
}

/// Full-screen "Launching…/Quitting…" pane shown during a delayed
/// transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loading {
    pub title: &'static str,
    pub game_id: Option<String>,
}

pub struct NavigationEngine<R: FocusableRegistry> {
    registry: R,
    cues: Box<dyn CuePlayer>,
    router: ScreenRouter,
    focus: FocusState,
    /// Remembered games-grid cell so returning to the library lands on the
    /// previously selected card, not always the first.
    last_grid_focus: usize,
    modal: ModalStack,
    power: PowerGate,
    sched: Scheduler,
    rng: StdRng,
    now: Instant,
    boot_timer: Option<TimerToken>,
    toast: Option<String>,
    toast_timer: Option<TimerToken>,
    /// Pending launch/quit transition; cancelled when a power transition
    /// supersedes it.
    transition: Option<TimerToken>,
    loading: Option<Loading>,
}

impl<R: FocusableRegistry> NavigationEngine<R> {
    /// Create the engine in the booting phase, focused on `home`/0.
    pub fn new(registry: R, cues: Box<dyn CuePlayer>, now: Instant) -> Self {
        let mut engine = Self {
            registry,
            cues,
            router: ScreenRouter::new(),
            focus: FocusState::default(),
            last_grid_focus: 0,
            modal: ModalStack::new(),
            power: PowerGate::new(),
            sched: Scheduler::new(),
            rng: StdRng::from_entropy(),
            now,
            boot_timer: None,
            toast: None,
            toast_timer: None,
            transition: None,
            loading: None,
        };
        engine.boot_timer = Some(
            engine
                .sched
                .schedule(now + BOOT_FIRST_TICK, TimerEvent::BootTick),
        );
        engine.cues.play(CueKind::Launch);
        engine
    }

    // ---- accessors -------------------------------------------------------

    pub fn screen(&self) -> ScreenName {
        self.router.active()
    }

    pub fn tab(&self) -> ScreenName {
        self.router.tab()
    }

    pub fn history_len(&self) -> usize {
        self.router.history_len()
    }

    pub fn history(&self) -> &[ScreenName] {
        self.router.history()
    }

    pub fn phase(&self) -> PowerPhase {
        self.power.phase()
    }

    pub fn boot_percent(&self) -> u8 {
        self.power.boot_percent()
    }

    pub fn focus(&self) -> FocusState {
        self.focus
    }

    pub fn toast(&self) -> Option<&str> {
        self.toast.as_deref()
    }

    pub fn loading(&self) -> Option<&Loading> {
        self.loading.as_ref()
    }

    pub fn modal_depth(&self) -> usize {
        self.modal.depth()
    }

    pub fn power_menu_open(&self) -> bool {
        self.modal.is_open() && self.focus.context == ContextName::Power
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// The handle focus currently rests on, freshly resolved.
    pub fn focused_item(&self) -> Option<Focusable> {
        self.registry
            .items(self.focus.context)
            .get(self.focus.index)
            .cloned()
    }

    /// True while the focused item is a text input (search field); the host
    /// routes printable keys into it and toggle shortcuts are suppressed.
    pub fn text_input_focused(&self) -> bool {
        self.phase() == PowerPhase::Awake
            && self
                .focused_item()
                .is_some_and(|i| i.kind == registry::ItemKind::TextInput)
    }

    /// Synchronous screen-changed observer (fires before `handle` returns).
    pub fn on_screen_changed(&mut self, f: impl FnMut(ScreenName) + 'static) {
        self.router.on_screen_changed(f);
    }

    pub fn cue(&mut self, kind: CueKind) {
        self.cues.play(kind);
    }

    /// Show a transient toast, replacing (and re-arming) any existing one.
    pub fn notify(&mut self, msg: impl Into<String>) {
        self.toast = Some(msg.into());
        if let Some(t) = self.toast_timer.take() {
            self.sched.cancel(t);
        }
        self.toast_timer = Some(
            self.sched
                .schedule(self.now + TOAST_DURATION, TimerEvent::ToastExpire),
        );
    }

    // ---- clock -----------------------------------------------------------

    /// Move the engine clock forward and run every due timer.
    pub fn advance(&mut self, now: Instant) -> Vec<Event> {
        self.now = now;
        let mut events = Vec::new();
        for ev in self.sched.fire_due(now) {
            match ev {
                TimerEvent::BootTick => {
                    if self.power.phase() != PowerPhase::Booting {
                        continue;
                    }
                    if self.power.boot_tick(&mut self.rng) {
                        self.boot_timer = Some(
                            self.sched
                                .schedule(now + BOOT_SETTLE, TimerEvent::BootSettle),
                        );
                    } else {
                        let gap = self.power.next_boot_tick(&mut self.rng);
                        self.boot_timer =
                            Some(self.sched.schedule(now + gap, TimerEvent::BootTick));
                    }
                }
                TimerEvent::BootSettle => {
                    if self.power.phase() == PowerPhase::Booting {
                        self.finish_boot(&mut events);
                    }
                }
                TimerEvent::ToastExpire => {
                    self.toast = None;
                    self.toast_timer = None;
                }
                TimerEvent::LaunchDone(id) => {
                    self.loading = None;
                    self.transition = None;
                    self.activate_inner(ScreenName::InGame, true, &mut events);
                    events.push(Event::GameLaunched(id));
                }
                TimerEvent::QuitDone => {
                    self.loading = None;
                    self.transition = None;
                    self.activate_inner(ScreenName::Games, true, &mut events);
                    events.push(Event::GameQuit);
                }
            }
        }
        events
    }

    // ---- action pipeline -------------------------------------------------

    /// Feed one logical action through the gate -> modal -> focus ->
    /// directional pipeline.
    pub fn handle(&mut self, action: Action) -> Vec<Event> {
        let mut events = Vec::new();
        match self.power.phase() {
            PowerPhase::Sleeping => {
                // Any input at all wakes; the action itself is consumed.
                self.power.set_phase(PowerPhase::Awake);
                self.sync_focus();
                self.cues.play(CueKind::Confirm);
                self.notify("Woke up");
                return events;
            }
            PowerPhase::PoweredOff => {
                if action == Action::Power {
                    self.power.set_phase(PowerPhase::Awake);
                    self.cues.play(CueKind::Launch);
                    self.notify("Power On");
                    if !self.router.switch(ScreenName::Home, false) {
                        // Already on home; still re-derive focus.
                        self.enter_context(ScreenName::Home);
                    } else {
                        self.enter_context(ScreenName::Home);
                        events.push(Event::ScreenChanged(ScreenName::Home));
                    }
                } else {
                    debug!(?action, "input discarded while powered off");
                }
                return events;
            }
            PowerPhase::Booting => {
                if action == Action::Confirm {
                    self.finish_boot(&mut events);
                } else {
                    debug!(?action, "input discarded while booting");
                }
                return events;
            }
            PowerPhase::Awake => {}
        }

        // Status-line toggles run before overlay routing (like the original
        // shortcut handler) but never while typing in the search field.
        match action {
            Action::ToggleSound
            | Action::ToggleClock
            | Action::ToggleWifi
            | Action::ToggleController => {
                if self.text_input_focused() {
                    debug!(?action, "toggle suppressed while typing");
                    return events;
                }
                let (op, cue) = match action {
                    Action::ToggleSound => (HostOp::ToggleSound, CueKind::Confirm),
                    Action::ToggleClock => (HostOp::ToggleClock, CueKind::Move),
                    Action::ToggleWifi => (HostOp::ToggleWifi, CueKind::Move),
                    _ => (HostOp::ToggleController, CueKind::Move),
                };
                self.cues.play(cue);
                events.push(Event::Host(op));
                return events;
            }
            Action::OpenSoundSettings => {
                if self.text_input_focused() {
                    return events;
                }
                self.cues.play(CueKind::Confirm);
                self.activate_inner(ScreenName::System, true, &mut events);
                return events;
            }
            Action::Power => {
                if self.power_menu_open() {
                    self.cues.play(CueKind::Cancel);
                    self.close_overlay();
                } else {
                    self.cues.play(CueKind::Confirm);
                    self.open_overlay(ContextName::Power);
                }
                return events;
            }
            _ => {}
        }

        if self.modal.is_open() {
            match action {
                Action::TabPrev | Action::TabNext => {
                    // Focus trap: no escaping a modal sideways.
                    debug!(?action, "tab action swallowed by open overlay");
                }
                Action::Cancel => {
                    self.cues.play(CueKind::Cancel);
                    self.close_overlay();
                }
                Action::Confirm => self.confirm(&mut events),
                _ => {
                    if let Some(dir) = action.direction() {
                        if self.focus.context.overlay_motion() == OverlayMotion::VerticalOnly
                            && dir.is_horizontal()
                        {
                            return events;
                        }
                        self.cues.play(CueKind::Move);
                        self.move_linear(dir.linear_step());
                    }
                }
            }
            return events;
        }

        match action {
            Action::Cancel => {
                // Typing traps Cancel; leaving the field is Up/Down's job.
                if self.text_input_focused() {
                    debug!("cancel suppressed while typing");
                    return events;
                }
                self.cues.play(CueKind::Cancel);
                self.go_back(&mut events);
            }
            Action::TabPrev => self.goto_tab(-1, &mut events),
            Action::TabNext => self.goto_tab(1, &mut events),
            Action::Confirm => self.confirm(&mut events),
            _ => {
                if let Some(dir) = action.direction() {
                    self.cues.play(CueKind::Move);
                    self.move_direction(dir, &mut events);
                }
            }
        }
        events
    }

    // ---- screen router ---------------------------------------------------

    /// Host-facing screen activation (used e.g. after selecting a game for
    /// the details screen). Fail-soft under gating.
    pub fn activate(&mut self, screen: ScreenName, push_history: bool) -> Vec<Event> {
        let mut events = Vec::new();
        self.activate_inner(screen, push_history, &mut events);
        events
    }

    fn activate_inner(&mut self, screen: ScreenName, push_history: bool, events: &mut Vec<Event>) {
        if self.power.phase() != PowerPhase::Awake {
            debug!(screen = %screen, "screen activation dropped by power gate");
            return;
        }
        if self.power_menu_open() {
            debug!(screen = %screen, "screen activation dropped: power menu open");
            return;
        }
        if !self.router.switch(screen, push_history) {
            return;
        }
        self.enter_context(screen);
        events.push(Event::ScreenChanged(screen));
    }

    fn go_back(&mut self, events: &mut Vec<Event>) {
        if self.modal.is_open() {
            return;
        }
        let target = self.router.pop_history().unwrap_or_else(|| self.router.tab());
        self.activate_inner(target, false, events);
    }

    fn goto_tab(&mut self, step: isize, events: &mut Vec<Event>) {
        let tab = self.router.tab_neighbor(step);
        self.cues.play(CueKind::Confirm);
        self.activate_inner(tab, true, events);
        self.notify(tab.as_str().to_uppercase());
    }

    // ---- focus context manager -------------------------------------------

    /// Switch the focus context directly, resetting the index.
    pub fn set_context(&mut self, ctx: ContextName) {
        self.focus = FocusState::new(ctx);
    }

    fn enter_context(&mut self, screen: ScreenName) {
        self.focus = FocusState::new(ContextName::for_screen(screen));
        self.focus_first();
    }

    /// Re-resolve the current item list and land on the remembered position
    /// (games grid) or the clamped current index.
    fn focus_first(&mut self) {
        let items = self.registry.items(self.focus.context);
        if items.is_empty() {
            self.focus.index = 0;
            return;
        }
        if self.focus.context == ContextName::Games {
            let cards = items.len().saturating_sub(GAMES_CHROME_LEN);
            if cards > 0 {
                self.focus.index = GAMES_CHROME_LEN + self.last_grid_focus.min(cards - 1);
            }
        }
        self.focus.index = self.focus.index.min(items.len() - 1);
    }

    /// Clamp the focus index after the underlying list changed (filtering,
    /// quick-resume updates). Call whenever host state feeding the registry
    /// was mutated.
    pub fn sync_focus(&mut self) {
        let len = self.registry.items(self.focus.context).len();
        self.focus.index = if len == 0 {
            0
        } else {
            self.focus.index.min(len - 1)
        };
    }

    /// Linear move, clamped to the list with no wraparound.
    pub fn move_linear(&mut self, delta: isize) {
        let items = self.registry.items(self.focus.context);
        if items.is_empty() {
            return;
        }
        let max = (items.len() - 1) as isize;
        self.focus.index = (self.focus.index as isize + delta).clamp(0, max) as usize;
        self.remember_grid();
    }

    fn move_direction(&mut self, dir: directional::Direction, events: &mut Vec<Event>) {
        let items = self.registry.items(self.focus.context);
        if dir.is_horizontal() {
            if let Some(item) = items.get(self.focus.index) {
                if item.kind == registry::ItemKind::Slider {
                    let step = if dir == directional::Direction::Right { 5 } else { -5 };
                    events.push(Event::Host(HostOp::AdjustVolume(step)));
                    return;
                }
            }
        }
        match directional::pick(&items, self.focus.index, dir) {
            Some(winner) => {
                self.focus.index = winner;
                self.remember_grid();
            }
            None => debug!(?dir, "directional move hit the edge"),
        }
    }

    fn remember_grid(&mut self) {
        if self.focus.context == ContextName::Games && self.focus.index >= GAMES_CHROME_LEN {
            self.last_grid_focus = self.focus.index - GAMES_CHROME_LEN;
        }
    }

    // ---- modal/overlay stack ---------------------------------------------

    /// Suspend the ambient context and focus the overlay's own item list.
    pub fn open_overlay(&mut self, ctx: ContextName) {
        self.modal.push(self.focus.into());
        self.focus = FocusState::new(ctx);
    }

    /// Restore the pre-overlay focus snapshot (clamped in case the
    /// underlying list changed while the overlay was up).
    pub fn close_overlay(&mut self) {
        let frame = self.modal.pop();
        self.focus = FocusState {
            context: frame.context,
            index: frame.index,
        };
        self.sync_focus();
    }

    // ---- activation ------------------------------------------------------

    fn confirm(&mut self, events: &mut Vec<Event>) {
        let items = self.registry.items(self.focus.context);
        let Some(item) = items.get(self.focus.index).cloned() else {
            debug!(ctx = ?self.focus.context, "confirm on empty context ignored");
            return;
        };
        self.apply_activation(item, events);
    }

    fn apply_activation(&mut self, item: Focusable, events: &mut Vec<Event>) {
        match item.action {
            Activation::Goto(screen) => {
                self.cues.play(CueKind::Confirm);
                self.activate_inner(screen, true, events);
            }
            Activation::Back => {
                self.cues.play(CueKind::Cancel);
                self.go_back(events);
            }
            Activation::OpenMediaOverlay(kind) => {
                self.cues.play(CueKind::Confirm);
                self.open_overlay(ContextName::MediaOverlay);
                events.push(Event::Host(HostOp::ShowMedia(kind)));
            }
            Activation::OpenQuickResume => {
                self.cues.play(CueKind::Confirm);
                self.open_overlay(ContextName::QuickResume);
            }
            Activation::AcceptMedia => {
                self.cues.play(CueKind::Confirm);
                self.notify("Opening… (placeholder)");
                self.close_overlay();
            }
            Activation::CloseOverlay => {
                self.cues.play(CueKind::Cancel);
                self.close_overlay();
            }
            Activation::PowerOption(option) => self.power_select(option, events),
            Activation::Launch(id) => {
                self.cues.play(CueKind::Launch);
                self.cancel_transition();
                self.loading = Some(Loading {
                    title: "Launching",
                    game_id: Some(id.clone()),
                });
                self.transition = Some(
                    self.sched
                        .schedule(self.now + LAUNCH_DELAY, TimerEvent::LaunchDone(id)),
                );
            }
            Activation::Resume(id) => {
                self.close_overlay();
                self.cues.play(CueKind::Launch);
                self.activate_inner(ScreenName::InGame, true, events);
                self.notify(format!("Resumed: {}", item.label));
                events.push(Event::GameResumed(id));
            }
            Activation::QuitGame => {
                self.cues.play(CueKind::Quit);
                self.cancel_transition();
                self.loading = Some(Loading {
                    title: "Quitting",
                    game_id: None,
                });
                self.transition = Some(
                    self.sched
                        .schedule(self.now + QUIT_DELAY, TimerEvent::QuitDone),
                );
            }
            Activation::Reject(msg) => {
                self.cues.play(CueKind::Error);
                self.notify(msg);
            }
            Activation::Host(op) => {
                let cue = match op {
                    HostOp::CycleFilter | HostOp::CycleSort | HostOp::AdjustVolume(_) => {
                        CueKind::Move
                    }
                    _ => CueKind::Confirm,
                };
                self.cues.play(cue);
                events.push(Event::Host(op));
            }
            Activation::Noop => {
                self.cues.play(CueKind::Confirm);
            }
        }
    }

    // ---- power -----------------------------------------------------------

    fn power_select(&mut self, option: PowerOption, events: &mut Vec<Event>) {
        // Selecting any option closes the menu before the transition applies.
        self.close_overlay();
        match option {
            PowerOption::Sleep => {
                self.cues.play(CueKind::Confirm);
                self.cancel_transition();
                self.power.set_phase(PowerPhase::Sleeping);
            }
            PowerOption::Restart => self.restart(events),
            PowerOption::Off => {
                self.cues.play(CueKind::Quit);
                self.cancel_transition();
                self.power.set_phase(PowerPhase::PoweredOff);
            }
        }
    }

    /// Fresh boot: every timer cancelled, history and overlays cleared,
    /// focus back to home/0. Host-side settings survive (the host decides
    /// what to reset on [`Event::Restarted`]).
    pub fn restart(&mut self, events: &mut Vec<Event>) {
        self.sched.clear();
        self.boot_timer = None;
        self.toast = None;
        self.toast_timer = None;
        self.transition = None;
        self.loading = None;
        self.modal.clear();
        self.router.reset();
        self.last_grid_focus = 0;
        self.focus = FocusState::default();
        self.power.reset_to_boot();
        self.boot_timer = Some(
            self.sched
                .schedule(self.now + BOOT_FIRST_TICK, TimerEvent::BootTick),
        );
        self.cues.play(CueKind::Launch);
        events.push(Event::Restarted);
    }

    fn cancel_transition(&mut self) {
        if let Some(t) = self.transition.take() {
            self.sched.cancel(t);
            self.loading = None;
        }
    }

    fn finish_boot(&mut self, events: &mut Vec<Event>) {
        if let Some(t) = self.boot_timer.take() {
            self.sched.cancel(t);
        }
        self.power.finish_boot();
        self.enter_context(self.router.active());
        events.push(Event::BootCompleted);
    }

    /// Skip the boot ramp entirely (CLI flag / boot-skip action).
    pub fn skip_boot(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.power.phase() == PowerPhase::Booting {
            self.finish_boot(&mut events);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::geometry::Rect;
    use crate::audio::SilentCues;

    /// Two buttons per context, enough to exercise the pipeline without the
    /// full scene model.
    struct TinyRegistry;

    impl FocusableRegistry for TinyRegistry {
        fn items(&self, ctx: ContextName) -> Vec<Focusable> {
            let row = |actions: Vec<(&str, Activation)>| {
                actions
                    .into_iter()
                    .enumerate()
                    .map(|(i, (id, action))| {
                        Focusable::button(
                            id,
                            id,
                            Rect::new(40.0 + i as f32 * 200.0, 100.0, 160.0, 48.0),
                            action,
                        )
                    })
                    .collect::<Vec<_>>()
            };
            match ctx {
                ContextName::Home => row(vec![
                    ("open-games", Activation::Goto(ScreenName::Games)),
                    ("open-media", Activation::Goto(ScreenName::Media)),
                ]),
                ContextName::Games => row(vec![
                    ("back", Activation::Back),
                    ("details", Activation::Goto(ScreenName::GameDetails)),
                ]),
                ContextName::Details => row(vec![
                    ("back", Activation::Back),
                    ("play", Activation::Launch("demo".into())),
                ]),
                ContextName::Power => row(vec![
                    ("sleep", Activation::PowerOption(PowerOption::Sleep)),
                    ("off", Activation::PowerOption(PowerOption::Off)),
                ]),
                _ => row(vec![("noop", Activation::Noop)]),
            }
        }
    }

    fn awake_engine() -> (NavigationEngine<TinyRegistry>, Instant) {
        let now = Instant::now();
        let mut engine = NavigationEngine::new(TinyRegistry, Box::new(SilentCues), now);
        engine.skip_boot();
        (engine, now)
    }

    #[test]
    fn boot_gates_everything_but_confirm() {
        let now = Instant::now();
        let mut engine = NavigationEngine::new(TinyRegistry, Box::new(SilentCues), now);
        assert_eq!(engine.phase(), PowerPhase::Booting);
        assert!(engine.handle(Action::MoveRight).is_empty());
        assert_eq!(engine.focus().index, 0);
        let events = engine.handle(Action::Confirm);
        assert!(events.contains(&Event::BootCompleted));
        assert_eq!(engine.phase(), PowerPhase::Awake);
    }

    #[test]
    fn boot_ramp_runs_on_timers() {
        let now = Instant::now();
        let mut engine = NavigationEngine::new(TinyRegistry, Box::new(SilentCues), now);
        let mut t = now;
        for _ in 0..64 {
            t += Duration::from_millis(400);
            let events = engine.advance(t);
            if events.contains(&Event::BootCompleted) {
                assert_eq!(engine.boot_percent(), 100);
                assert_eq!(engine.phase(), PowerPhase::Awake);
                return;
            }
        }
        panic!("boot never settled");
    }

    #[test]
    fn confirm_navigates_and_back_returns() {
        let (mut engine, _) = awake_engine();
        let events = engine.handle(Action::Confirm);
        assert!(events.contains(&Event::ScreenChanged(ScreenName::Games)));
        assert_eq!(engine.history_len(), 1);
        engine.handle(Action::Cancel);
        assert_eq!(engine.screen(), ScreenName::Home);
        assert_eq!(engine.history_len(), 0);
        // Back on an empty stack falls through to the remembered tab.
        engine.handle(Action::Cancel);
        assert_eq!(engine.screen(), ScreenName::Home);
    }

    #[test]
    fn power_menu_traps_focus_and_restores_it() {
        let (mut engine, _) = awake_engine();
        engine.handle(Action::MoveRight);
        assert_eq!(engine.focus().index, 1);
        engine.handle(Action::Power);
        assert!(engine.power_menu_open());
        assert_eq!(engine.focus(), FocusState::new(ContextName::Power));
        // Tab cycling must not escape the modal.
        engine.handle(Action::TabNext);
        assert_eq!(engine.screen(), ScreenName::Home);
        engine.handle(Action::Cancel);
        assert!(!engine.power_menu_open());
        assert_eq!(
            engine.focus(),
            FocusState {
                context: ContextName::Home,
                index: 1
            }
        );
    }

    #[test]
    fn sleep_wakes_on_any_input_consuming_it() {
        let (mut engine, _) = awake_engine();
        engine.handle(Action::Power);
        engine.handle(Action::Confirm); // sleep option
        assert_eq!(engine.phase(), PowerPhase::Sleeping);
        let before = engine.focus();
        engine.handle(Action::MoveRight);
        assert_eq!(engine.phase(), PowerPhase::Awake);
        assert_eq!(engine.focus(), before);
    }

    #[test]
    fn powered_off_only_power_revives() {
        let (mut engine, _) = awake_engine();
        engine.handle(Action::Power);
        engine.handle(Action::MoveRight);
        engine.handle(Action::Confirm); // off option
        assert_eq!(engine.phase(), PowerPhase::PoweredOff);
        assert!(engine.handle(Action::Confirm).is_empty());
        assert_eq!(engine.phase(), PowerPhase::PoweredOff);
        engine.handle(Action::Power);
        assert_eq!(engine.phase(), PowerPhase::Awake);
        assert_eq!(engine.screen(), ScreenName::Home);
    }

    #[test]
    fn launch_lands_in_game_after_the_delay() {
        let (mut engine, now) = awake_engine();
        engine.handle(Action::Confirm); // -> games
        engine.handle(Action::MoveRight);
        engine.handle(Action::Confirm); // -> details
        engine.handle(Action::MoveRight);
        engine.handle(Action::Confirm); // play
        assert!(engine.loading().is_some());
        assert_eq!(engine.screen(), ScreenName::GameDetails);
        let events = engine.advance(now + LAUNCH_DELAY + Duration::from_millis(10));
        assert!(events.contains(&Event::GameLaunched("demo".into())));
        assert_eq!(engine.screen(), ScreenName::InGame);
        assert!(engine.loading().is_none());
    }

    #[test]
    fn toast_expires_on_its_timer() {
        let (mut engine, now) = awake_engine();
        engine.handle(Action::TabNext);
        assert!(engine.toast().is_some());
        engine.advance(now + TOAST_DURATION + Duration::from_millis(10));
        assert_eq!(engine.toast(), None);
    }

    #[test]
    fn tab_cycling_wraps_both_directions() {
        let (mut engine, _) = awake_engine();
        engine.handle(Action::TabPrev);
        assert_eq!(engine.screen(), ScreenName::System);
        engine.handle(Action::TabNext);
        assert_eq!(engine.screen(), ScreenName::Home);
    }

    #[test]
    fn restart_reboots_with_clean_state() {
        let (mut engine, now) = awake_engine();
        engine.handle(Action::Confirm); // -> games
        engine.handle(Action::Power);
        assert!(engine.modal_depth() > 0);
        let mut events = Vec::new();
        engine.restart(&mut events);
        assert!(events.contains(&Event::Restarted));
        assert_eq!(engine.phase(), PowerPhase::Booting);
        assert_eq!(engine.modal_depth(), 0);
        assert_eq!(engine.history_len(), 0);
        assert_eq!(engine.screen(), ScreenName::Home);
        assert_eq!(engine.focus(), FocusState::default());
        // The new boot ramp is live again.
        let mut t = now;
        for _ in 0..64 {
            t += Duration::from_millis(400);
            if engine.advance(t).contains(&Event::BootCompleted) {
                return;
            }
        }
        panic!("restart boot never settled");
    }
}
