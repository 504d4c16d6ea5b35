//! Keyboard-driven player movement

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::geometry::Segment;
use super::state::{Entity, EntityKind, SpriteSheet};
use crate::tuning::Tuning;

/// Arrow/WASD state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Keys {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Direction the held keys ask for.
    ///
    /// Left wins over right and down wins over up when both are held.
    pub fn direction(&self) -> Option<Direction> {
        let horizontal = if self.left {
            -1
        } else if self.right {
            1
        } else {
            0
        };
        let vertical = if self.down {
            -1
        } else if self.up {
            1
        } else {
            0
        };
        Direction::from_axes(horizontal, vertical)
    }
}

/// Move the player for one tick and push it out of barriers.
///
/// Returns the number of barriers touched. Touching any slows the player for
/// the next tick.
pub fn update_player(
    player: &mut Entity,
    held: Keys,
    released: Keys,
    segments: &[Segment],
    tuning: &Tuning,
    dt: f64,
) -> u32 {
    let EntityKind::Player(mut controller) = player.kind else {
        return 0;
    };

    if let Some(direction) = held.direction() {
        controller.moving = true;
        if let Some(facing) = direction.facing() {
            player.facing = facing;
        }
        if direction != player.direction {
            player.anim
                .restart(direction.row(), SpriteSheet::PlayerRun.frame_count());
        }
        player.direction = direction;
    }

    if controller.moving {
        player.pos += player.direction.step() * controller.speed * dt;
        player.sheet = SpriteSheet::PlayerRun;
    } else {
        player.sheet = SpriteSheet::PlayerIdle;
    }

    if released.any() {
        controller.moving = false;
    }

    let contacts = player.resolve_barriers(segments, tuning.collision.corner_buffer);
    controller.speed = if contacts > 0 {
        tuning.player.contact_speed
    } else {
        tuning.player.speed
    };
    player.kind = EntityKind::Player(controller);
    contacts
}
