//! Data-driven game balance
//!
//! Every section falls back to the built-in constants, so a tuning file only
//! needs the values it changes:
//!
//! ```json
//! { "chase": { "follow_distance": 650.0 } }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Barrier collision settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    /// Subtracted from a collider's radius when growing barrier bounds
    pub corner_buffer: f64,
    /// Layout endpoints this close on an axis are snapped flat on load
    pub layout_snap: f64,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            corner_buffer: CORNER_BUFFER,
            layout_snap: LAYOUT_SNAP,
        }
    }
}

/// Player movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub speed: f64,
    /// Speed for the tick after a barrier contact
    pub contact_speed: f64,
    pub frame_rate: f64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            contact_speed: PLAYER_CONTACT_SPEED,
            frame_rate: PLAYER_FRAME_RATE,
        }
    }
}

/// Chaser behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseTuning {
    pub speed: f64,
    /// Chasers only move while this close to the player
    pub follow_distance: f64,
    /// Seconds after a collision before following can resume
    pub disengage_delay: f64,
    /// Per-axis slack before turning toward the player
    pub dead_zone: f64,
    /// Collision timer value for freshly spawned chasers
    pub initial_timer: f64,
}

impl Default for ChaseTuning {
    fn default() -> Self {
        Self {
            speed: CHASER_SPEED,
            follow_distance: FOLLOW_DISTANCE,
            disengage_delay: DISENGAGE_DELAY,
            dead_zone: HEADING_DEAD_ZONE,
            initial_timer: INITIAL_COLLISION_TIMER,
        }
    }
}

/// All tunable values for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub collision: CollisionTuning,
    pub player: PlayerTuning,
    pub chase: ChaseTuning,
    /// Frame rate for rings, goblins and decorations
    pub prop_frame_rate: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            collision: CollisionTuning::default(),
            player: PlayerTuning::default(),
            chase: ChaseTuning::default(),
            prop_frame_rate: PROP_FRAME_RATE,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| TuningError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load tuning, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(TuningError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("No tuning file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Write tuning as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
