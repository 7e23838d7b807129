use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One step of the breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Breathe in.
    Inhale,
    /// Hold the breath.
    Hold,
    /// Breathe out.
    Exhale,
}

impl Phase {
    /// Text shown while the phase runs.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Inhale => "Inhale",
            Phase::Hold => "Hold",
            Phase::Exhale => "Exhale",
        }
    }

    /// Phase that follows this one. Exhale wraps back to Inhale.
    pub fn next(self) -> Self {
        match self {
            Phase::Inhale => Phase::Hold,
            Phase::Hold => Phase::Exhale,
            Phase::Exhale => Phase::Inhale,
        }
    }
}

/// Phase durations and the vibration pattern fired when each phase begins.
/// An empty pattern means no vibration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreathingConfig {
    /// Inhale length in milliseconds.
    pub inhale_ms: u64,
    /// Hold length in milliseconds.
    pub hold_ms: u64,
    /// Exhale length in milliseconds.
    pub exhale_ms: u64,
    /// Vibration pattern at inhale start.
    pub inhale_haptic: Vec<u32>,
    /// Vibration pattern at hold start.
    pub hold_haptic: Vec<u32>,
    /// Vibration pattern at exhale start.
    pub exhale_haptic: Vec<u32>,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            inhale_ms: 4000,
            hold_ms: 2000,
            exhale_ms: 6000,
            inhale_haptic: vec![20],
            hold_haptic: Vec::new(),
            exhale_haptic: vec![40, 60, 40],
        }
    }
}

/// Shortest phase the timer will run; zero-length phases are raised to it.
pub const MIN_PHASE_MS: u64 = 1;

impl BreathingConfig {
    /// How long `phase` lasts, never less than [`MIN_PHASE_MS`].
    pub fn duration(&self, phase: Phase) -> Duration {
        let ms = match phase {
            Phase::Inhale => self.inhale_ms,
            Phase::Hold => self.hold_ms,
            Phase::Exhale => self.exhale_ms,
        };
        Duration::from_millis(ms.max(MIN_PHASE_MS))
    }

    /// Vibration pattern for the start of `phase`.
    pub fn haptic(&self, phase: Phase) -> &[u32] {
        match phase {
            Phase::Inhale => &self.inhale_haptic,
            Phase::Hold => &self.hold_haptic,
            Phase::Exhale => &self.exhale_haptic,
        }
    }
}

/// Position within the endless Inhale → Hold → Exhale cycle.
#[derive(Debug, Clone)]
pub struct PhaseCycle {
    config: BreathingConfig,
    current: Phase,
}

impl PhaseCycle {
    /// Cycle positioned at Inhale.
    pub fn new(config: BreathingConfig) -> Self {
        Self {
            config,
            current: Phase::Inhale,
        }
    }

    /// Running phase.
    pub fn current(&self) -> Phase {
        self.current
    }

    /// Length of the running phase.
    pub fn duration(&self) -> Duration {
        self.config.duration(self.current)
    }

    /// Vibration pattern of the running phase.
    pub fn haptic(&self) -> &[u32] {
        self.config.haptic(self.current)
    }

    /// Moves to the next phase and returns it.
    pub fn advance(&mut self) -> Phase {
        self.current = self.current.next();
        self.current
    }
}
