//! Shell state: settings, the game library and the scene, exposed to the
//! engine as one [`FocusableRegistry`].

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::context::ContextName;
use crate::engine::geometry::Rect;
use crate::engine::registry::{
    Activation, Focusable, FocusableRegistry, HostOp, ItemKind, MediaKind,
};
use crate::library::Library;
use crate::scene::{grid_cell, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Dark,
    Light,
    Midnight,
}

impl Theme {
    pub fn next(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Midnight,
            Theme::Midnight => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
            Theme::Midnight => "Midnight",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellSettings {
    pub sound: bool,
    pub volume: u8,
    pub clock24: bool,
    pub wifi: bool,
    pub controller: bool,
    pub theme: Theme,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            sound: true,
            volume: 60,
            clock24: false,
            wifi: true,
            controller: true,
            theme: Theme::Dark,
        }
    }
}

/// Everything the engine and the renderer need to resolve items and draw a
/// frame. Mutated only through [`Shell::apply`] and the library accessors.
pub struct Shell {
    pub scene: Scene,
    pub library: Library,
    pub settings: ShellSettings,
    /// Game shown on the details screen (set before routing there).
    pub selected_game: Option<String>,
    /// Page currently shown by the media overlay.
    pub media: Option<MediaKind>,
    /// Title currently running while on the in-game screen.
    pub running_game: Option<String>,
}

impl Shell {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            library: Library::seeded(),
            settings: ShellSettings::default(),
            selected_game: None,
            media: None,
            running_game: None,
        }
    }

    /// Apply one host operation; returns the toast to show, if any.
    pub fn apply(&mut self, op: &HostOp) -> Option<String> {
        match op {
            HostOp::ToggleSound => {
                self.settings.sound = !self.settings.sound;
                Some(format!(
                    "Sound {}",
                    if self.settings.sound { "on" } else { "muted" }
                ))
            }
            HostOp::ToggleClock => {
                self.settings.clock24 = !self.settings.clock24;
                Some(format!(
                    "{} clock",
                    if self.settings.clock24 { "24h" } else { "12h" }
                ))
            }
            HostOp::ToggleWifi => {
                self.settings.wifi = !self.settings.wifi;
                Some(format!(
                    "Wi-Fi {}",
                    if self.settings.wifi { "on" } else { "off" }
                ))
            }
            HostOp::ToggleController => {
                self.settings.controller = !self.settings.controller;
                Some(format!(
                    "Controller {}",
                    if self.settings.controller {
                        "connected"
                    } else {
                        "disconnected"
                    }
                ))
            }
            HostOp::AdjustVolume(delta) => {
                let v = self.settings.volume as i16 + *delta as i16;
                self.settings.volume = v.clamp(0, 100) as u8;
                Some(format!("Volume {}%", self.settings.volume))
            }
            HostOp::CycleFilter => {
                self.library.cycle_filter();
                Some(format!("Filter: {}", self.library.filter.label()))
            }
            HostOp::CycleSort => {
                self.library.cycle_sort();
                Some(format!("Sort: {}", self.library.sort.label()))
            }
            HostOp::ApplyFilters => {
                self.library.apply_search();
                Some(format!("{} games shown", self.library.visible().len()))
            }
            HostOp::CycleTheme => {
                self.settings.theme = self.settings.theme.next();
                Some(format!("Theme: {}", self.settings.theme.label()))
            }
            HostOp::ShowMedia(kind) => {
                self.media = Some(*kind);
                None
            }
            HostOp::ShowDetails(id) => {
                info!(id, "selecting game for details");
                self.selected_game = Some(id.clone());
                None
            }
        }
    }

    fn game_cards(&self) -> Vec<Focusable> {
        self.library
            .visible()
            .iter()
            .enumerate()
            .map(|(i, game)| Focusable {
                id: game.id.clone(),
                label: game.title.clone(),
                rect: grid_cell(i),
                kind: ItemKind::Card,
                action: Activation::Host(HostOp::ShowDetails(game.id.clone())),
            })
            .collect()
    }

    fn details_items(&self) -> Vec<Focusable> {
        let mut items = vec![Focusable::button(
            "details-back",
            "Back",
            Rect::new(40.0, 90.0, 100.0, 44.0),
            Activation::Back,
        )];
        let Some(game) = self
            .selected_game
            .as_deref()
            .and_then(|id| self.library.get(id))
        else {
            return items;
        };
        let play = if game.installed {
            Activation::Launch(game.id.clone())
        } else {
            Activation::Reject(format!("{} is not installed", game.title))
        };
        items.push(Focusable::button(
            "details-play",
            "Play",
            Rect::new(80.0, 420.0, 200.0, 56.0),
            play,
        ));
        items.push(Focusable::button(
            "details-options",
            "Options",
            Rect::new(320.0, 420.0, 200.0, 56.0),
            Activation::Noop,
        ));
        items
    }

    fn quick_resume_items(&self) -> Vec<Focusable> {
        let entries: Vec<Focusable> = self
            .library
            .quick_resume()
            .enumerate()
            .map(|(i, game)| Focusable {
                id: format!("resume-{}", game.id),
                label: game.title.clone(),
                rect: Rect::new(460.0, 200.0 + i as f32 * 64.0, 360.0, 56.0),
                kind: ItemKind::Button,
                action: Activation::Resume(game.id.clone()),
            })
            .collect();
        if entries.is_empty() {
            return vec![Focusable::button(
                "resume-empty",
                "Nothing suspended",
                Rect::new(460.0, 200.0, 360.0, 56.0),
                Activation::CloseOverlay,
            )];
        }
        entries
    }
}

impl FocusableRegistry for Shell {
    fn items(&self, ctx: ContextName) -> Vec<Focusable> {
        match ctx {
            ContextName::Games => {
                let mut items: Vec<Focusable> = self
                    .scene
                    .items(ctx)
                    .iter()
                    .map(|i| i.to_focusable())
                    .collect();
                items.extend(self.game_cards());
                items
            }
            ContextName::Details => self.details_items(),
            ContextName::QuickResume => self.quick_resume_items(),
            _ => self.scene.items(ctx).iter().map(|i| i.to_focusable()).collect(),
        }
    }
}
