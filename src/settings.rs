//! Game settings
//!
//! The demo comes in two flavors - plain physical fragments, or charged
//! shots with particle bursts and bloom. Both run on the same core; the
//! flavor is just configuration.

use serde::{Deserialize, Serialize};

/// Which explosion style targets burst into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EffectStyle {
    /// A handful of physics-driven fragments
    #[default]
    Fragments,
    /// A larger batch of scene-only particles with a linear fade
    Particles,
}

/// Bloom pass tuning, consumed by the render collaborator. No feedback
/// into the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloomSettings {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            strength: 1.5,
            radius: 0.4,
            threshold: 0.85,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    pub effect_style: EffectStyle,
    /// Hold-to-charge launch force. When off, every shot leaves at the
    /// fixed force.
    pub charged_shots: bool,
    pub bloom: BloomSettings,
}

impl Settings {
    /// The full-fat preset: charged shots and particle bursts
    pub fn neon() -> Self {
        Self {
            effect_style: EffectStyle::Particles,
            charged_shots: true,
            bloom: BloomSettings::default(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
