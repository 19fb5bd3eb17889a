//! Fire-and-forget visual effects triggered by game events.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("celebration failed: {0}")]
pub struct EffectError(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Origin {
    pub y: f64,
}

/// Options handed to the page's confetti function.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfettiBurst {
    pub particle_count: u32,
    pub spread: u32,
    pub origin: Origin,
    pub colors: Vec<&'static str>,
}

impl Default for ConfettiBurst {
    fn default() -> Self {
        Self {
            particle_count: 200,
            spread: 100,
            origin: Origin { y: 0.6 },
            colors: vec!["#00F0FF", "#FF2E93", "#FFD700"],
        }
    }
}

/// A win celebration. Callers log failures and carry on.
pub trait Celebration {
    fn celebrate(&self, burst: &ConfettiBurst) -> Result<(), EffectError>;
}
