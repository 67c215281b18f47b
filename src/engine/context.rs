use serde::{Deserialize, Serialize};

use super::screen::ScreenName;

/// Number of chrome items ahead of the cards in the `games` context:
/// back, filter, sort, search, apply.
pub const GAMES_CHROME_LEN: usize = 5;

/// A named, ordered set of focusable items scoped to one screen or overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextName {
    Nav,
    Home,
    Games,
    Media,
    System,
    Details,
    NowPlaying,
    InGame,
    Power,
    MediaOverlay,
    #[serde(rename = "quick-resume-overlay")]
    QuickResume,
}

/// How arrow input moves focus inside an overlay context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMotion {
    /// Left/Up step back, Right/Down step forward (media overlay, power menu).
    BothAxes,
    /// Only Up/Down move; horizontal input is swallowed (quick-resume list).
    VerticalOnly,
}

impl ContextName {
    /// Fixed screen -> default context mapping.
    pub fn for_screen(screen: ScreenName) -> ContextName {
        match screen {
            ScreenName::Home => ContextName::Home,
            ScreenName::Games => ContextName::Games,
            ScreenName::Media => ContextName::Media,
            ScreenName::System => ContextName::System,
            ScreenName::GameDetails => ContextName::Details,
            ScreenName::NowPlaying => ContextName::NowPlaying,
            ScreenName::InGame => ContextName::InGame,
        }
    }

    pub fn is_overlay(self) -> bool {
        matches!(
            self,
            ContextName::Power | ContextName::MediaOverlay | ContextName::QuickResume
        )
    }

    pub fn overlay_motion(self) -> OverlayMotion {
        match self {
            ContextName::QuickResume => OverlayMotion::VerticalOnly,
            _ => OverlayMotion::BothAxes,
        }
    }
}

/// The single source of truth for "what is focused right now".
///
/// Invariant: `index` is within the context's item list whenever that list
/// is non-empty; when it is empty the index is pinned to 0 and nothing is
/// focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusState {
    pub context: ContextName,
    pub index: usize,
}

impl FocusState {
    pub fn new(context: ContextName) -> Self {
        Self { context, index: 0 }
    }
}

impl Default for FocusState {
    fn default() -> Self {
        FocusState::new(ContextName::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_screen_maps_to_a_context() {
        assert_eq!(
            ContextName::for_screen(ScreenName::GameDetails),
            ContextName::Details
        );
        assert_eq!(
            ContextName::for_screen(ScreenName::NowPlaying),
            ContextName::NowPlaying
        );
        assert_eq!(ContextName::for_screen(ScreenName::Home), ContextName::Home);
    }

    #[test]
    fn overlay_motion_policy() {
        assert_eq!(
            ContextName::QuickResume.overlay_motion(),
            OverlayMotion::VerticalOnly
        );
        assert_eq!(
            ContextName::Power.overlay_motion(),
            OverlayMotion::BothAxes
        );
        assert!(ContextName::MediaOverlay.is_overlay());
        assert!(!ContextName::Games.is_overlay());
    }
}
