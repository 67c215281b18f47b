use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Mutually exclusive power phases. The power menu is not a phase; it is a
/// modal frame with context `power` that only exists while `Awake`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerPhase {
    Booting,
    Awake,
    Sleeping,
    PoweredOff,
}

/// Options offered by the power menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerOption {
    Sleep,
    Restart,
    Off,
}

impl PowerOption {
    pub fn label(self) -> &'static str {
        match self {
            PowerOption::Sleep => "Sleep",
            PowerOption::Restart => "Restart",
            PowerOption::Off => "Power Off",
        }
    }
}

/// Delay before the first boot progress tick.
pub const BOOT_FIRST_TICK: Duration = Duration::from_millis(260);
/// Pause between the bar reaching 100% and the home screen appearing.
pub const BOOT_SETTLE: Duration = Duration::from_millis(450);

/// Boot progress state. The ramp is decorative but its pacing matches the
/// original shell: 6-17% per tick, 180-340ms apart.
#[derive(Debug)]
pub struct PowerGate {
    phase: PowerPhase,
    boot_percent: u8,
}

impl PowerGate {
    pub fn new() -> Self {
        Self {
            phase: PowerPhase::Booting,
            boot_percent: 0,
        }
    }

    pub fn phase(&self) -> PowerPhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: PowerPhase) {
        self.phase = phase;
    }

    pub fn boot_percent(&self) -> u8 {
        self.boot_percent
    }

    /// Apply one progress tick; returns true when the ramp just completed.
    pub fn boot_tick(&mut self, rng: &mut impl Rng) -> bool {
        let add = rng.gen_range(6..18u8);
        self.boot_percent = self.boot_percent.saturating_add(add).min(100);
        self.boot_percent >= 100
    }

    pub fn next_boot_tick(&self, rng: &mut impl Rng) -> Duration {
        Duration::from_millis(180 + rng.gen_range(0..160u64))
    }

    pub fn finish_boot(&mut self) {
        self.boot_percent = 100;
        self.phase = PowerPhase::Awake;
    }

    pub fn reset_to_boot(&mut self) {
        self.phase = PowerPhase::Booting;
        self.boot_percent = 0;
    }
}

impl Default for PowerGate {
    fn default() -> Self {
        Self::new()
    }
}
