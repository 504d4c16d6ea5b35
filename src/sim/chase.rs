//! Goblin chase behavior
//!
//! A chaser heads for the player until it walks into a barrier. It then
//! turns clockwise and wanders in that direction, turning again on every
//! further hit, until it has gone a while without touching anything and the
//! player is close enough to be worth following again.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::geometry::Segment;
use super::state::{Entity, EntityKind};
use crate::consts::INITIAL_COLLISION_TIMER;
use crate::distance;
use crate::tuning::Tuning;

/// What a chaser remembers between ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChaseState {
    pub last_direction: Direction,
    /// Heading for the player rather than wandering
    pub following: bool,
    pub seconds_since_collision: f64,
}

impl ChaseState {
    pub fn new(initial_timer: f64) -> Self {
        Self {
            last_direction: Direction::S,
            following: true,
            seconds_since_collision: initial_timer,
        }
    }
}

impl Default for ChaseState {
    fn default() -> Self {
        Self::new(INITIAL_COLLISION_TIMER)
    }
}

/// A change between following and wandering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaseTransition {
    Disengaged,
    Reengaged,
}

/// Direction from `from` toward `target`, ignoring offsets within `dead_zone`.
///
/// West beats east and south beats north when both fire, which only happens
/// with a negative dead zone. `None` means the target is within the dead zone
/// on both axes.
pub fn heading_toward(from: DVec2, target: DVec2, dead_zone: f64) -> Option<Direction> {
    let horizontal = if target.x + dead_zone < from.x {
        -1
    } else if target.x - dead_zone > from.x {
        1
    } else {
        0
    };
    let vertical = if target.y + dead_zone < from.y {
        -1
    } else if target.y - dead_zone > from.y {
        1
    } else {
        0
    };
    Direction::from_axes(horizontal, vertical)
}

/// Run one tick of chase behavior for `chaser`.
///
/// The chaser is resolved against the barriers before it moves, and only
/// moves while within the follow distance of `player`. Non-chasers are left
/// untouched.
pub fn update_chaser(
    chaser: &mut Entity,
    player: DVec2,
    segments: &[Segment],
    tuning: &Tuning,
    dt: f64,
) -> Option<ChaseTransition> {
    let EntityKind::Chaser(mut brain) = chaser.kind else {
        return None;
    };
    let chase = &tuning.chase;
    let was_following = brain.following;

    let mut direction = brain.last_direction;
    if brain.following {
        if let Some(heading) = heading_toward(chaser.pos, player, chase.dead_zone) {
            direction = heading;
        }
    }

    let close_enough = distance(chaser.pos, player) <= chase.follow_distance;

    if chaser.resolve_barriers(segments, tuning.collision.corner_buffer) > 0 {
        direction = brain.last_direction.rotate_clockwise();
        brain.following = false;
        brain.seconds_since_collision = 0.0;
    } else {
        brain.seconds_since_collision += dt;
    }

    if brain.seconds_since_collision > chase.disengage_delay && close_enough {
        brain.following = true;
    }

    if close_enough {
        chaser.pos += direction.step() * chase.speed * dt;
    }

    if direction != brain.last_direction {
        chaser.anim.restart(direction.row(), chaser.sheet.frame_count());
    }
    if let Some(facing) = direction.facing() {
        chaser.facing = facing;
    }
    brain.last_direction = direction;
    chaser.direction = direction;
    chaser.kind = EntityKind::Chaser(brain);
    chaser.refresh();

    match (was_following, brain.following) {
        (true, false) => Some(ChaseTransition::Disengaged),
        (false, true) => Some(ChaseTransition::Reengaged),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::KindProfile;

    fn goblin_at(pos: DVec2) -> Entity {
        Entity::new(7, EntityKind::Chaser(ChaseState::default()), pos, KindProfile::GOBLIN)
    }

    fn brain(e: &Entity) -> ChaseState {
        match e.kind {
            EntityKind::Chaser(b) => b,
            other => panic!("not a chaser: {other:?}"),
        }
    }

    #[test]
    fn test_heading_precedence() {
        let g = DVec2::new(100.0, 100.0);
        assert_eq!(heading_toward(g, DVec2::new(0.0, 0.0), 10.0), Some(Direction::SW));
        assert_eq!(heading_toward(g, DVec2::new(0.0, 300.0), 10.0), Some(Direction::NW));
        assert_eq!(heading_toward(g, DVec2::new(0.0, 105.0), 10.0), Some(Direction::W));
        assert_eq!(heading_toward(g, DVec2::new(300.0, 0.0), 10.0), Some(Direction::SE));
        assert_eq!(heading_toward(g, DVec2::new(300.0, 300.0), 10.0), Some(Direction::NE));
        assert_eq!(heading_toward(g, DVec2::new(105.0, 0.0), 10.0), Some(Direction::S));
        assert_eq!(heading_toward(g, DVec2::new(95.0, 300.0), 10.0), Some(Direction::N));
        assert_eq!(heading_toward(g, DVec2::new(108.0, 92.0), 10.0), None);
        // Negative slack lets both sides fire; west and south win
        assert_eq!(heading_toward(g, DVec2::new(100.0, 100.0), -10.0), Some(Direction::SW));
    }

    #[test]
    fn test_follows_player() {
        let tuning = Tuning::default();
        let mut goblin = goblin_at(DVec2::new(0.0, 0.0));
        let player = DVec2::new(-200.0, 0.0);

        assert_eq!(update_chaser(&mut goblin, player, &[], &tuning, 0.1), None);
        assert_eq!(goblin.direction, Direction::W);
        assert_eq!(goblin.facing, 1.0);
        assert!((goblin.pos.x - -16.0).abs() < 1e-9);
        assert_eq!(brain(&goblin).last_direction, Direction::W);
    }

    #[test]
    fn test_collision_disengages_then_reengages() {
        let tuning = Tuning::default();
        let dt = 0.1;
        // Long wall just right of the goblin's collider
        let wall = [Segment::new(DVec2::new(0.0, -1000.0), DVec2::new(0.0, 1000.0))];
        let mut goblin = goblin_at(DVec2::new(-5.0, 60.0));
        let player = DVec2::new(-200.0, 60.0);

        let first = update_chaser(&mut goblin, player, &wall, &tuning, dt);
        assert_eq!(first, Some(ChaseTransition::Disengaged));
        let b = brain(&goblin);
        assert!(!b.following);
        assert_eq!(b.last_direction, Direction::SW);
        assert_eq!(b.seconds_since_collision, 0.0);

        // Wanders south-west, away from the wall, until the delay has passed
        let mut reengaged_at = None;
        for i in 0..15 {
            let before = brain(&goblin).seconds_since_collision;
            if update_chaser(&mut goblin, player, &wall, &tuning, dt)
                == Some(ChaseTransition::Reengaged)
            {
                assert!(before + dt > tuning.chase.disengage_delay);
                reengaged_at = Some(i);
                break;
            }
            assert_eq!(goblin.direction, Direction::SW);
        }
        assert!(reengaged_at.is_some());
        assert!(brain(&goblin).following);
    }

    #[test]
    fn test_collision_while_wandering_rotates_again() {
        let tuning = Tuning::default();
        let wall = [Segment::new(DVec2::new(-1000.0, 0.0), DVec2::new(1000.0, 0.0))];
        let mut goblin = goblin_at(DVec2::new(0.0, 65.0));
        goblin.kind = EntityKind::Chaser(ChaseState {
            last_direction: Direction::W,
            following: false,
            seconds_since_collision: 0.4,
        });

        assert_eq!(update_chaser(&mut goblin, DVec2::new(0.0, 300.0), &wall, &tuning, 0.1), None);
        let b = brain(&goblin);
        assert_eq!(b.last_direction, Direction::NW);
        assert_eq!(b.seconds_since_collision, 0.0);
        assert!(!b.following);
    }

    #[test]
    fn test_far_chaser_freezes_but_keeps_time() {
        let tuning = Tuning::default();
        let start = DVec2::new(0.0, 0.0);
        let mut goblin = goblin_at(start);
        goblin.kind = EntityKind::Chaser(ChaseState {
            last_direction: Direction::E,
            following: false,
            seconds_since_collision: 0.5,
        });

        update_chaser(&mut goblin, DVec2::new(900.0, 0.0), &[], &tuning, 0.75);
        assert_eq!(goblin.pos, start);
        let b = brain(&goblin);
        assert_eq!(b.seconds_since_collision, 1.25);
        // Timer is past the delay but the player is too far away
        assert!(!b.following);
    }

    #[test]
    fn test_direction_change_restarts_animation() {
        let tuning = Tuning::default();
        let mut goblin = goblin_at(DVec2::ZERO);
        goblin.anim.frame = 3;
        goblin.anim.accumulator = 0.05;

        update_chaser(&mut goblin, DVec2::new(300.0, 0.0), &[], &tuning, 0.01);
        assert_eq!(goblin.direction, Direction::E);
        assert_eq!(goblin.anim.frame, Direction::E.row() * 8);
        assert_eq!(goblin.anim.accumulator, 0.0);
    }

    #[test]
    fn test_non_chaser_is_ignored() {
        let tuning = Tuning::default();
        let mut ring = Entity::new(1, EntityKind::Pickup, DVec2::ZERO, KindProfile::RING);
        assert_eq!(update_chaser(&mut ring, DVec2::new(5.0, 5.0), &[], &tuning, 0.1), None);
        assert_eq!(ring.pos, DVec2::ZERO);
    }
}
