//! Ring Chase - A top-down ring collecting game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (barrier collisions, chasers, animation, scene)
//! - `level`: Flat-file barrier layout and item spawn formats
//! - `tuning`: Data-driven game balance

pub mod level;
pub mod sim;
pub mod tuning;

pub use level::{ItemKind, ItemSpawn, LevelError};
pub use tuning::{Tuning, TuningError};

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Fixed timestep used by the headless runner (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f64 = 1.0 / 60.0;

    /// Shrinks the padded barrier bounds so circles slide around corners
    pub const CORNER_BUFFER: f64 = 7.0;
    /// Endpoints this close on an axis are snapped flat when a layout loads
    pub const LAYOUT_SNAP: f64 = 5.0;

    /// Player defaults
    pub const PLAYER_SPEED: f64 = 150.0;
    /// Player speed for the tick after touching a barrier
    pub const PLAYER_CONTACT_SPEED: f64 = 75.0;
    pub const PLAYER_FRAME_RATE: f64 = 15.0;
    pub const PLAYER_RUN_FRAMES: usize = 12;
    pub const PLAYER_IDLE_FRAMES: usize = 8;

    /// Chaser (goblin) defaults
    pub const CHASER_SPEED: f64 = 80.0;
    /// Chasers further than this from the player stop moving
    pub const FOLLOW_DISTANCE: f64 = 500.0;
    /// Seconds without a collision before a chaser may follow again
    pub const DISENGAGE_DELAY: f64 = 1.0;
    /// Per-axis slack before a chaser turns toward the player
    pub const HEADING_DEAD_ZONE: f64 = 10.0;
    /// Starting value of the collision timer, so new chasers follow immediately
    pub const INITIAL_COLLISION_TIMER: f64 = 10.0;

    /// Frame rate shared by rings, goblins and decorations
    pub const PROP_FRAME_RATE: f64 = 12.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Inclusive range check: `min <= value <= max`
#[inline]
pub fn between(min: f64, value: f64, max: f64) -> bool {
    value >= min && value <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance(DVec2::new(0.0, 0.0), DVec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(DVec2::new(-1.0, 2.0), DVec2::new(-1.0, 2.0)), 0.0);
    }

    #[test]
    fn test_between_is_inclusive() {
        assert!(between(0.0, 0.0, 1.0));
        assert!(between(0.0, 1.0, 1.0));
        assert!(!between(0.0, 1.0001, 1.0));
        assert!(!between(2.0, 1.0, 3.0));
    }
}
