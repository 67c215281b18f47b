//! Audio cue contract. The engine fires a cue on every navigation event;
//! synthesis is someone else's job, so the default player just logs. The
//! oscillator parameters below are the reference table a real backend would
//! render.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    Move,
    Confirm,
    Cancel,
    Error,
    Launch,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// One short envelope-shaped beep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeepSpec {
    pub freq_hz: f32,
    pub duration_s: f32,
    pub volume: f32,
    pub wave: Waveform,
}

impl CueKind {
    pub fn spec(self) -> BeepSpec {
        let (freq_hz, duration_s, volume, wave) = match self {
            CueKind::Move => (520.0, 0.04, 0.05, Waveform::Sine),
            CueKind::Confirm => (740.0, 0.05, 0.07, Waveform::Sine),
            CueKind::Cancel => (340.0, 0.055, 0.07, Waveform::Sine),
            CueKind::Error => (220.0, 0.07, 0.08, Waveform::Square),
            CueKind::Launch => (260.0, 0.09, 0.08, Waveform::Triangle),
            CueKind::Quit => (160.0, 0.1, 0.09, Waveform::Triangle),
        };
        BeepSpec {
            freq_hz,
            duration_s,
            volume,
            wave,
        }
    }
}

/// Cue playback capability. Implementations must swallow backend failures;
/// a missing audio device never breaks navigation.
pub trait CuePlayer {
    fn play(&mut self, kind: CueKind);
}

/// Default player: logs the cue at debug level.
pub struct LogCues;

impl CuePlayer for LogCues {
    fn play(&mut self, kind: CueKind) {
        let spec = kind.spec();
        debug!(?kind, freq_hz = spec.freq_hz, "ui cue");
    }
}

/// Discards every cue; used when sound is disabled.
pub struct SilentCues;

impl CuePlayer for SilentCues {
    fn play(&mut self, _kind: CueKind) {}
}
