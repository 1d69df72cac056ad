//! Presentation preferences
//!
//! These never change gameplay; they only decide which cue events the
//! simulation emits for the presentation and audio layers.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Emit sound cue events
    pub sound_cues: bool,

    // === Visual Effects ===
    /// Pulse the score/lives readouts when they change
    pub emphasis: bool,

    // === Accessibility ===
    /// Reduced motion (suppresses emphasis pulses)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_cues: true,
            emphasis: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Silent preset for headless runs
    pub fn muted() -> Self {
        Self {
            sound_cues: false,
            ..Self::default()
        }
    }

    /// Effective emphasis (respects reduced_motion)
    pub fn effective_emphasis(&self) -> bool {
        self.emphasis && !self.reduced_motion
    }

    /// Parse settings JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }
}
