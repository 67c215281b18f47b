use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// History is bounded; the oldest entry is dropped beyond this.
pub const HISTORY_CAP: usize = 30;

/// The main tab ring cycled by TAB_PREV / TAB_NEXT.
pub const TAB_RING: [ScreenName; 4] = [
    ScreenName::Home,
    ScreenName::Games,
    ScreenName::Media,
    ScreenName::System,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenName {
    Home,
    Games,
    Media,
    System,
    GameDetails,
    NowPlaying,
    InGame,
}

impl ScreenName {
    /// Main tab screens update the tab underline; detail screens keep the
    /// previous tab highlighted.
    pub fn is_tab(self) -> bool {
        TAB_RING.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScreenName::Home => "home",
            ScreenName::Games => "games",
            ScreenName::Media => "media",
            ScreenName::System => "system",
            ScreenName::GameDetails => "game-details",
            ScreenName::NowPlaying => "now-playing",
            ScreenName::InGame => "in-game",
        }
    }
}

impl fmt::Display for ScreenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenName {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(ScreenName::Home),
            "games" => Ok(ScreenName::Games),
            "media" => Ok(ScreenName::Media),
            "system" => Ok(ScreenName::System),
            "game-details" => Ok(ScreenName::GameDetails),
            "now-playing" => Ok(ScreenName::NowPlaying),
            "in-game" => Ok(ScreenName::InGame),
            other => Err(UnknownScreen(other.to_string())),
        }
    }
}

/// Unknown screen names only exist at the string boundary (CLI, scene
/// files); callers log and drop them rather than propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScreen(pub String);

impl fmt::Display for UnknownScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown screen name: {:?}", self.0)
    }
}

impl std::error::Error for UnknownScreen {}

/// Owns the active screen, the main-tab memory and the bounded back stack.
///
/// Gating (power phase, open power menu) lives in the engine; the router
/// only enforces the structural rules: no self-transition, bounded history,
/// history never containing the active screen.
pub struct ScreenRouter {
    active: ScreenName,
    tab: ScreenName,
    history: Vec<ScreenName>,
    listeners: Vec<Box<dyn FnMut(ScreenName)>>,
}

impl ScreenRouter {
    pub fn new() -> Self {
        Self {
            active: ScreenName::Home,
            tab: ScreenName::Home,
            history: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn active(&self) -> ScreenName {
        self.active
    }

    pub fn tab(&self) -> ScreenName {
        self.tab
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[ScreenName] {
        &self.history
    }

    /// Register a synchronous screen-changed observer. Listeners fire in
    /// registration order, after the router state is fully updated.
    pub fn on_screen_changed(&mut self, f: impl FnMut(ScreenName) + 'static) {
        self.listeners.push(Box::new(f));
    }

    /// Switch the active screen. Returns false (and changes nothing) when
    /// the target is already active.
    pub fn switch(&mut self, screen: ScreenName, push_history: bool) -> bool {
        if screen == self.active {
            debug!(screen = %screen, "screen switch dropped: already active");
            return false;
        }

        if push_history {
            self.history.push(self.active);
            if self.history.len() > HISTORY_CAP {
                self.history.remove(0);
            }
        }
        // The stack never holds the screen we are entering.
        self.history.retain(|s| *s != screen);

        self.active = screen;
        if screen.is_tab() {
            self.tab = screen;
        }
        for l in &mut self.listeners {
            l(screen);
        }
        true
    }

    /// Pop the back stack; `None` means the caller falls through to the
    /// current tab.
    pub fn pop_history(&mut self) -> Option<ScreenName> {
        self.history.pop()
    }

    /// Tab ring neighbor of the current tab, wrapping at both ends.
    pub fn tab_neighbor(&self, step: isize) -> ScreenName {
        let pos = TAB_RING.iter().position(|t| *t == self.tab).unwrap_or(0) as isize;
        let len = TAB_RING.len() as isize;
        TAB_RING[((pos + step).rem_euclid(len)) as usize]
    }

    pub fn reset(&mut self) {
        self.active = ScreenName::Home;
        self.tab = ScreenName::Home;
        self.history.clear();
    }
}

impl Default for ScreenRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn switch_to_active_screen_is_a_no_op() {
        let mut r = ScreenRouter::new();
        assert!(!r.switch(ScreenName::Home, true));
        assert_eq!(r.history_len(), 0);
    }

    #[test]
    fn history_is_bounded() {
        let mut r = ScreenRouter::new();
        for _ in 0..40 {
            r.switch(ScreenName::Games, true);
            r.switch(ScreenName::Home, true);
        }
        assert!(r.history_len() <= HISTORY_CAP);
    }

    #[test]
    fn history_never_contains_active_screen() {
        let mut r = ScreenRouter::new();
        r.switch(ScreenName::Games, true);
        r.switch(ScreenName::Home, true);
        r.switch(ScreenName::Games, true);
        assert_eq!(r.active(), ScreenName::Games);
        assert!(!r.history.contains(&ScreenName::Games));
    }

    #[test]
    fn detail_screens_keep_the_tab() {
        let mut r = ScreenRouter::new();
        r.switch(ScreenName::Games, true);
        r.switch(ScreenName::GameDetails, true);
        assert_eq!(r.tab(), ScreenName::Games);
        assert_eq!(r.active(), ScreenName::GameDetails);
    }

    #[test]
    fn tab_ring_wraps_both_ways() {
        let r = ScreenRouter::new();
        assert_eq!(r.tab_neighbor(-1), ScreenName::System);
        assert_eq!(r.tab_neighbor(1), ScreenName::Games);
    }

    #[test]
    fn listeners_fire_in_order_after_update() {
        let seen: Rc<RefCell<Vec<(u8, ScreenName)>>> = Rc::default();
        let mut r = ScreenRouter::new();
        let a = seen.clone();
        r.on_screen_changed(move |s| a.borrow_mut().push((1, s)));
        let b = seen.clone();
        r.on_screen_changed(move |s| b.borrow_mut().push((2, s)));

        r.switch(ScreenName::Media, true);
        assert_eq!(
            &*seen.borrow(),
            &[(1, ScreenName::Media), (2, ScreenName::Media)]
        );
    }

    #[test]
    fn parse_round_trip() {
        for s in [
            ScreenName::Home,
            ScreenName::GameDetails,
            ScreenName::NowPlaying,
            ScreenName::InGame,
        ] {
            assert_eq!(s.as_str().parse::<ScreenName>().unwrap(), s);
        }
        assert!("lobby".parse::<ScreenName>().is_err());
    }
}
