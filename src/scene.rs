//! Static scene model: which focusable items exist per context and where
//! they sit in logical-pixel space.
//!
//! Dynamic contexts (game cards, details buttons, quick-resume entries) are
//! assembled at query time by the shell; everything fixed lives here and can
//! be overridden from a JSON file via `--scene`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::engine::context::ContextName;
use crate::engine::geometry::Rect;
use crate::engine::power::PowerOption;
use crate::engine::registry::{Activation, Focusable, HostOp, ItemKind, MediaKind};
use crate::engine::screen::ScreenName;

/// Games grid geometry, shared with the shell's dynamic card builder.
pub const GRID_COLS: usize = 3;
pub const GRID_ORIGIN_X: f32 = 40.0;
pub const GRID_ORIGIN_Y: f32 = 160.0;
pub const CARD_WIDTH: f32 = 360.0;
pub const CARD_HEIGHT: f32 = 200.0;
pub const COL_PITCH: f32 = 384.0;
pub const ROW_PITCH: f32 = 224.0;

/// Logical rect of the `index`-th games-grid cell.
pub fn grid_cell(index: usize) -> Rect {
    let col = (index % GRID_COLS) as f32;
    let row = (index / GRID_COLS) as f32;
    Rect::new(
        GRID_ORIGIN_X + col * COL_PITCH,
        GRID_ORIGIN_Y + row * ROW_PITCH,
        CARD_WIDTH,
        CARD_HEIGHT,
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneItem {
    pub id: String,
    pub label: String,
    pub rect: Rect,
    #[serde(default = "default_kind")]
    pub kind: ItemKind,
    pub action: Activation,
}

fn default_kind() -> ItemKind {
    ItemKind::Button
}

impl SceneItem {
    pub fn to_focusable(&self) -> Focusable {
        Focusable {
            id: self.id.clone(),
            label: self.label.clone(),
            rect: self.rect,
            kind: self.kind,
            action: self.action.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub contexts: HashMap<ContextName, Vec<SceneItem>>,
}

impl Scene {
    pub fn load(path: &Path) -> anyhow::Result<Scene> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading scene file {}", path.display()))?;
        let scene: Scene = serde_json::from_str(&raw)
            .with_context(|| format!("parsing scene file {}", path.display()))?;
        Ok(scene)
    }

    /// Static items for a context; empty for dynamic or unknown contexts.
    pub fn items(&self, ctx: ContextName) -> &[SceneItem] {
        self.contexts.get(&ctx).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn item(id: &str, label: &str, rect: Rect, action: Activation) -> SceneItem {
    SceneItem {
        id: id.into(),
        label: label.into(),
        rect,
        kind: ItemKind::Button,
        action,
    }
}

impl Default for Scene {
    /// The built-in 1280x720 console layout.
    fn default() -> Self {
        let mut contexts: HashMap<ContextName, Vec<SceneItem>> = HashMap::new();

        // No items for the nav context: the tab strip is driven by the
        // TAB_PREV/TAB_NEXT ring, never by focus. A custom scene may still
        // populate it.

        contexts.insert(
            ContextName::Home,
            vec![
                item(
                    "hero-games",
                    "Browse Games",
                    Rect::new(80.0, 140.0, 220.0, 56.0),
                    Activation::Goto(ScreenName::Games),
                ),
                item(
                    "hero-media",
                    "Open Media",
                    Rect::new(340.0, 140.0, 220.0, 56.0),
                    Activation::Goto(ScreenName::Media),
                ),
                item(
                    "card-games",
                    "Game Library",
                    Rect::new(80.0, 420.0, 260.0, 180.0),
                    Activation::Goto(ScreenName::Games),
                ),
                item(
                    "card-media",
                    "Media Hub",
                    Rect::new(380.0, 420.0, 260.0, 180.0),
                    Activation::Goto(ScreenName::Media),
                ),
                item(
                    "card-system",
                    "System",
                    Rect::new(680.0, 420.0, 260.0, 180.0),
                    Activation::Goto(ScreenName::System),
                ),
                item(
                    "card-quick-resume",
                    "Quick Resume",
                    Rect::new(980.0, 420.0, 260.0, 180.0),
                    Activation::OpenQuickResume,
                ),
            ],
        );

        // Toolbar order here fixes the chrome/card boundary of the games
        // context: back, filter, sort, search, apply, then the cards.
        let mut games = vec![
            item(
                "games-back",
                "Back",
                Rect::new(40.0, 90.0, 100.0, 44.0),
                Activation::Back,
            ),
            item(
                "games-filter",
                "Filter",
                Rect::new(160.0, 90.0, 140.0, 44.0),
                Activation::Host(HostOp::CycleFilter),
            ),
            item(
                "games-sort",
                "Sort",
                Rect::new(320.0, 90.0, 140.0, 44.0),
                Activation::Host(HostOp::CycleSort),
            ),
            item(
                "games-search",
                "Search",
                Rect::new(480.0, 90.0, 320.0, 44.0),
                Activation::Host(HostOp::ApplyFilters),
            ),
            item(
                "games-apply",
                "Apply",
                Rect::new(820.0, 90.0, 120.0, 44.0),
                Activation::Host(HostOp::ApplyFilters),
            ),
        ];
        games[3].kind = ItemKind::TextInput;
        contexts.insert(ContextName::Games, games);

        let media_cards = [
            (MediaKind::Music, 80.0, 160.0),
            (MediaKind::Gallery, 480.0, 160.0),
            (MediaKind::Streaming, 80.0, 400.0),
            (MediaKind::Downloads, 480.0, 400.0),
        ];
        let mut media = vec![item(
            "media-back",
            "Back",
            Rect::new(40.0, 90.0, 100.0, 44.0),
            Activation::Back,
        )];
        media.extend(media_cards.iter().map(|&(kind, x, y)| {
            let mut it = item(
                &format!("media-{}", kind.title().to_lowercase()),
                kind.title(),
                Rect::new(x, y, 360.0, 200.0),
                Activation::OpenMediaOverlay(kind),
            );
            it.kind = ItemKind::Card;
            it
        }));
        contexts.insert(ContextName::Media, media);

        let mut system = vec![
            item(
                "system-back",
                "Back",
                Rect::new(40.0, 90.0, 100.0, 44.0),
                Activation::Back,
            ),
            item(
                "system-sound",
                "Sound",
                Rect::new(80.0, 170.0, 300.0, 120.0),
                Activation::Host(HostOp::ToggleSound),
            ),
            item(
                "system-clock",
                "24h Clock",
                Rect::new(420.0, 170.0, 300.0, 120.0),
                Activation::Host(HostOp::ToggleClock),
            ),
            item(
                "system-theme",
                "Theme",
                Rect::new(760.0, 170.0, 300.0, 120.0),
                Activation::Host(HostOp::CycleTheme),
            ),
            item(
                "system-volume",
                "Volume",
                Rect::new(80.0, 330.0, 640.0, 56.0),
                Activation::Noop,
            ),
        ];
        system[4].kind = ItemKind::Slider;
        contexts.insert(ContextName::System, system);

        contexts.insert(
            ContextName::NowPlaying,
            vec![
                item(
                    "np-back",
                    "Back",
                    Rect::new(40.0, 90.0, 100.0, 44.0),
                    Activation::Back,
                ),
                item(
                    "np-resume",
                    "Resume",
                    Rect::new(80.0, 400.0, 200.0, 56.0),
                    Activation::Goto(ScreenName::InGame),
                ),
                item(
                    "np-quit",
                    "Quit Game",
                    Rect::new(320.0, 400.0, 200.0, 56.0),
                    Activation::QuitGame,
                ),
            ],
        );

        contexts.insert(
            ContextName::InGame,
            vec![
                item(
                    "ig-now-playing",
                    "Now Playing",
                    Rect::new(80.0, 560.0, 220.0, 56.0),
                    Activation::Goto(ScreenName::NowPlaying),
                ),
                item(
                    "ig-home",
                    "Home",
                    Rect::new(340.0, 560.0, 160.0, 56.0),
                    Activation::Goto(ScreenName::Home),
                ),
                item(
                    "ig-quit",
                    "Quit",
                    Rect::new(540.0, 560.0, 160.0, 56.0),
                    Activation::QuitGame,
                ),
            ],
        );

        contexts.insert(
            ContextName::Power,
            [PowerOption::Sleep, PowerOption::Restart, PowerOption::Off]
                .iter()
                .enumerate()
                .map(|(i, &opt)| {
                    item(
                        &format!("power-{}", opt.label().to_lowercase()),
                        opt.label(),
                        Rect::new(540.0, 240.0 + i as f32 * 72.0, 200.0, 56.0),
                        Activation::PowerOption(opt),
                    )
                })
                .collect(),
        );

        contexts.insert(
            ContextName::MediaOverlay,
            vec![
                item(
                    "overlay-open",
                    "Open",
                    Rect::new(440.0, 460.0, 160.0, 48.0),
                    Activation::AcceptMedia,
                ),
                item(
                    "overlay-close",
                    "Close",
                    Rect::new(680.0, 460.0, 160.0, 48.0),
                    Activation::CloseOverlay,
                ),
            ],
        );

        Scene {
            width: 1280.0,
            height: 720.0,
            contexts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_covers_static_contexts() {
        let scene = Scene::default();
        // Tabs are not focusable; the nav context only exists for custom
        // scenes that want them to be.
        assert!(scene.items(ContextName::Nav).is_empty());
        assert_eq!(
            scene.items(ContextName::Games).len(),
            crate::engine::context::GAMES_CHROME_LEN
        );
        assert_eq!(scene.items(ContextName::Power).len(), 3);
        // Dynamic contexts stay empty here.
        assert!(scene.items(ContextName::Details).is_empty());
        assert!(scene.items(ContextName::QuickResume).is_empty());
    }

    #[test]
    fn grid_cells_step_by_pitch() {
        assert_eq!(grid_cell(0).left(), GRID_ORIGIN_X);
        assert_eq!(grid_cell(1).left(), GRID_ORIGIN_X + COL_PITCH);
        assert_eq!(grid_cell(3).top(), GRID_ORIGIN_Y + ROW_PITCH);
        assert_eq!(grid_cell(3).left(), GRID_ORIGIN_X);
    }

    #[test]
    fn scene_round_trips_through_json() {
        let scene = Scene::default();
        let raw = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.items(ContextName::Home).len(), scene.items(ContextName::Home).len());
    }
}
