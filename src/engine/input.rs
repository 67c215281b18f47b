//! Input normalization: keyboard events and polled gamepad button edges
//! become one logical action stream. Downstream (gate -> modal -> focus ->
//! directional) never knows which device produced an action.

use std::collections::HashMap;

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::directional::Direction;

/// Logical action vocabulary shared by every input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Confirm,
    Cancel,
    TabPrev,
    TabNext,
    Power,
    // Status-line toggles (host-level, still power-gated).
    ToggleSound,
    ToggleClock,
    ToggleWifi,
    ToggleController,
    /// Shift+M: jump straight to the system screen.
    OpenSoundSettings,
}

impl Action {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::MoveUp => Some(Direction::Up),
            Action::MoveDown => Some(Direction::Down),
            Action::MoveLeft => Some(Direction::Left),
            Action::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }

    /// Toggle-style actions fire once per physical press; holding the key
    /// must not retrigger them.
    pub fn ignores_repeat(self) -> bool {
        matches!(
            self,
            Action::Power
                | Action::ToggleSound
                | Action::ToggleClock
                | Action::ToggleWifi
                | Action::ToggleController
                | Action::OpenSoundSettings
        )
    }
}

/// Map one key event to a logical action. Release events and auto-repeat of
/// toggle actions map to nothing.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let action = match key.code {
        KeyCode::Up => Action::MoveUp,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Left => Action::MoveLeft,
        KeyCode::Right => Action::MoveRight,
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Char('[') => Action::TabPrev,
        KeyCode::Char(']') => Action::TabNext,
        KeyCode::Char('p') | KeyCode::Char('P') => Action::Power,
        KeyCode::Char('m') | KeyCode::Char('M') if shift => Action::OpenSoundSettings,
        KeyCode::Char('m') => Action::ToggleSound,
        KeyCode::Char('t') | KeyCode::Char('T') => Action::ToggleClock,
        KeyCode::Char('w') | KeyCode::Char('W') => Action::ToggleWifi,
        KeyCode::Char('c') | KeyCode::Char('C') => Action::ToggleController,
        _ => return None,
    };

    if key.kind == KeyEventKind::Repeat && action.ignores_repeat() {
        return None;
    }
    Some(action)
}

bitflags! {
    /// Pressed-button set of one pad, standard-mapping bit positions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct GamepadButtons: u16 {
        const SOUTH      = 1 << 0;  // A / Cross
        const EAST       = 1 << 1;  // B / Circle
        const SHOULDER_L = 1 << 4;
        const SHOULDER_R = 1 << 5;
        const START      = 1 << 9;
        const DPAD_UP    = 1 << 12;
        const DPAD_DOWN  = 1 << 13;
        const DPAD_LEFT  = 1 << 14;
        const DPAD_RIGHT = 1 << 15;
    }
}

/// One snapshot per connected pad, polled once per loop iteration.
pub trait GamepadSource {
    fn poll(&mut self) -> Vec<(usize, GamepadButtons)>;
}

/// Source used when no pad backend is wired up.
pub struct NullGamepad;

impl GamepadSource for NullGamepad {
    fn poll(&mut self) -> Vec<(usize, GamepadButtons)> {
        Vec::new()
    }
}

const BUTTON_ACTIONS: [(GamepadButtons, Action); 9] = [
    (GamepadButtons::DPAD_UP, Action::MoveUp),
    (GamepadButtons::DPAD_DOWN, Action::MoveDown),
    (GamepadButtons::DPAD_LEFT, Action::MoveLeft),
    (GamepadButtons::DPAD_RIGHT, Action::MoveRight),
    (GamepadButtons::SOUTH, Action::Confirm),
    (GamepadButtons::EAST, Action::Cancel),
    (GamepadButtons::SHOULDER_L, Action::TabPrev),
    (GamepadButtons::SHOULDER_R, Action::TabNext),
    (GamepadButtons::START, Action::Power),
];

/// Diffs each pad's buttons against the previous poll; a false->true edge
/// emits the mapped action exactly once, no matter how long the button is
/// held.
#[derive(Debug, Default)]
pub struct GamepadDecoder {
    prev: HashMap<usize, GamepadButtons>,
}

impl GamepadDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&mut self, pads: &[(usize, GamepadButtons)]) -> Vec<Action> {
        let mut out = Vec::new();
        for &(pad, buttons) in pads {
            let prev = self.prev.get(&pad).copied().unwrap_or_default();
            let edges = buttons & !prev;
            for (flag, action) in BUTTON_ACTIONS {
                if edges.contains(flag) {
                    out.push(action);
                }
            }
            self.prev.insert(pad, buttons);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keyboard_mapping_table() {
        assert_eq!(map_key(press(KeyCode::Up)), Some(Action::MoveUp));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(Action::Confirm));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Action::Cancel));
        assert_eq!(map_key(press(KeyCode::Char('['))), Some(Action::TabPrev));
        assert_eq!(map_key(press(KeyCode::Char(']'))), Some(Action::TabNext));
        assert_eq!(map_key(press(KeyCode::Char('p'))), Some(Action::Power));
        assert_eq!(map_key(press(KeyCode::Char('m'))), Some(Action::ToggleSound));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('M'), KeyModifiers::SHIFT)),
            Some(Action::OpenSoundSettings)
        );
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn repeat_suppressed_for_toggles_but_not_moves() {
        let mut repeat_m = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE);
        repeat_m.kind = KeyEventKind::Repeat;
        assert_eq!(map_key(repeat_m), None);

        let mut repeat_down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        repeat_down.kind = KeyEventKind::Repeat;
        assert_eq!(map_key(repeat_down), Some(Action::MoveDown));
    }

    #[test]
    fn gamepad_edges_fire_once_per_press() {
        let mut dec = GamepadDecoder::new();
        let held = GamepadButtons::DPAD_RIGHT | GamepadButtons::SOUTH;

        let first = dec.actions(&[(0, held)]);
        assert_eq!(first, vec![Action::MoveRight, Action::Confirm]);

        // Held across subsequent frames: no repeats.
        assert!(dec.actions(&[(0, held)]).is_empty());

        // Release then press again: fires again.
        assert!(dec.actions(&[(0, GamepadButtons::empty())]).is_empty());
        assert_eq!(dec.actions(&[(0, GamepadButtons::SOUTH)]), vec![Action::Confirm]);
    }

    #[test]
    fn pads_are_tracked_independently() {
        let mut dec = GamepadDecoder::new();
        dec.actions(&[(0, GamepadButtons::START)]);
        // A different pad pressing the same button is a fresh edge.
        assert_eq!(dec.actions(&[(1, GamepadButtons::START)]), vec![Action::Power]);
    }
}
