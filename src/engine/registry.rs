use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::power::PowerOption;
use super::screen::ScreenName;

/// What a focusable item is, as far as input handling cares.
///
/// `TextInput` suppresses the toggle shortcuts while focused; `Slider` maps
/// horizontal moves onto value adjustments instead of focus moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Button,
    Card,
    Tab,
    TextInput,
    Slider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    Music,
    Gallery,
    Streaming,
    Downloads,
}

impl MediaKind {
    pub fn title(self) -> &'static str {
        match self {
            MediaKind::Music => "Music",
            MediaKind::Gallery => "Gallery",
            MediaKind::Streaming => "Streaming",
            MediaKind::Downloads => "Downloads",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            MediaKind::Music => "A simple music hub. (Placeholder for now.)",
            MediaKind::Gallery => "View screenshots / covers. (Placeholder for now.)",
            MediaKind::Streaming => "Connect streaming apps. (Placeholder for now.)",
            MediaKind::Downloads => "Manage downloaded media. (Placeholder for now.)",
        }
    }
}

/// Operations the engine does not interpret itself; they are handed back to
/// the embedding application, which owns settings and the game library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostOp {
    ToggleSound,
    ToggleClock,
    ToggleWifi,
    ToggleController,
    AdjustVolume(i8),
    CycleFilter,
    CycleSort,
    ApplyFilters,
    CycleTheme,
    /// Show copy for the given media hub page (the overlay itself is already
    /// open by the time this is emitted).
    ShowMedia(MediaKind),
    /// Open the details screen for a game. The host selects the game on the
    /// registry first, then asks the router for `game-details`.
    ShowDetails(String),
}

/// What pressing CONFIRM on an item does. Activation is data, not a
/// callback: the engine interprets the navigation-level variants and returns
/// `Host` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activation {
    Goto(ScreenName),
    Back,
    OpenMediaOverlay(MediaKind),
    OpenQuickResume,
    /// The media overlay's placeholder "Open" button.
    AcceptMedia,
    CloseOverlay,
    PowerOption(PowerOption),
    /// Launch an installed game (delayed transition into `in-game`).
    Launch(String),
    /// Resume a suspended game from the quick-resume overlay (immediate).
    Resume(String),
    /// Quit the running game (delayed transition back to `games`).
    QuitGame,
    /// Refused with a toast and the error cue, e.g. Play on a game that is
    /// not installed.
    Reject(String),
    /// Pass an operation through to the host unchanged.
    Host(HostOp),
    Noop,
}

/// Opaque reference to an activatable UI element.
///
/// Handles are rebuilt on every registry query; the engine never stores
/// them, only the `(context, index)` pair, so a rebuilt list (filtered game
/// grid) can never leave it pointing at a stale element.
#[derive(Debug, Clone, PartialEq)]
pub struct Focusable {
    pub id: String,
    pub label: String,
    pub rect: Rect,
    pub kind: ItemKind,
    pub action: Activation,
}

impl Focusable {
    pub fn button(id: &str, label: &str, rect: Rect, action: Activation) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            rect,
            kind: ItemKind::Button,
            action,
        }
    }
}

/// The rendering layer's side of the contract: an ordered item list per
/// context, resolved fresh on every call.
pub trait FocusableRegistry {
    fn items(&self, ctx: super::context::ContextName) -> Vec<Focusable>;
}
