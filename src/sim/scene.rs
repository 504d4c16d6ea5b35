//! Registry pass: pickups, draw order and the per-frame render list

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::{Entity, GameEvent, GameState, SpriteSheet};

/// Everything a renderer needs to draw one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    pub id: u32,
    pub sheet: SpriteSheet,
    /// Frame index into `sheet`
    pub frame: usize,
    /// Sprite anchor in world space
    pub position: DVec2,
    /// Horizontal scale: 1.0 as authored, -1.0 mirrored
    pub facing: f64,
    pub sort_key: i64,
}

impl From<&Entity> for RenderItem {
    fn from(e: &Entity) -> Self {
        Self {
            id: e.id,
            sheet: e.sheet,
            frame: e.anim.frame,
            position: e.pos,
            facing: e.facing,
            sort_key: e.sort_key,
        }
    }
}

/// Remove every pickup the player is touching and score it.
///
/// Indices are gathered before anything is removed, then removed from the
/// back so each `swap_remove` only moves an entry that has already been
/// checked. Returns how many were collected.
pub fn collect_pickups(state: &mut GameState) -> usize {
    let Some(reach) = state.player().map(|p| p.collider) else {
        return 0;
    };

    let touched: Vec<usize> = state
        .entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_pickup() && e.collider.overlaps(&reach))
        .map(|(i, _)| i)
        .collect();

    for &index in touched.iter().rev() {
        let pickup = state.entities.swap_remove(index);
        state.score += 1;
        log::info!("Collected ring {} (score {})", pickup.id, state.score);
        state.events.push(GameEvent::PickupCollected {
            id: pickup.id,
            score: state.score,
        });
    }
    touched.len()
}

/// Refresh sort keys and stable-sort into draw order
pub fn sort_for_draw(entities: &mut [Entity]) {
    for entity in entities.iter_mut() {
        entity.refresh();
    }
    entities.sort_by_key(|e| e.sort_key);
}

/// Render list in draw order
pub fn render_list(state: &GameState) -> Vec<RenderItem> {
    state.entities.iter().map(RenderItem::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{ItemKind, ItemSpawn};
    use crate::tuning::Tuning;

    fn ring(x: f64, y: f64) -> ItemSpawn {
        ItemSpawn {
            kind: ItemKind::Ring,
            pos: DVec2::new(x, y),
        }
    }

    #[test]
    fn test_collects_only_touched_pickup() {
        // Player collider sits at (0, -20)
        let items = [ring(5.0, -20.0), ring(300.0, 0.0), ring(-300.0, 0.0)];
        let mut state = GameState::from_level(Vec::new(), &items, DVec2::ZERO, Tuning::default());
        assert_eq!(state.pickups_remaining(), 3);

        assert_eq!(collect_pickups(&mut state), 1);
        assert_eq!(state.pickups_remaining(), 2);
        assert_eq!(state.score, 1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PickupCollected { id: 2, score: 1 }]
        );
    }

    #[test]
    fn test_adjacent_pickups_are_all_collected() {
        // Removing the first would swap the last into its slot
        let items = [ring(0.0, -20.0), ring(10.0, -20.0), ring(500.0, 500.0), ring(-10.0, -20.0)];
        let mut state = GameState::from_level(Vec::new(), &items, DVec2::ZERO, Tuning::default());

        assert_eq!(collect_pickups(&mut state), 3);
        assert_eq!(state.score, 3);
        let left: Vec<u32> = state
            .entities
            .iter()
            .filter(|e| e.is_pickup())
            .map(|e| e.id)
            .collect();
        assert_eq!(left, vec![4]);
        assert!(state.player().is_some());
    }

    #[test]
    fn test_pickup_distance_is_inclusive() {
        // Radii 15 + 10; centers exactly 25 apart
        let mut state = GameState::from_level(
            Vec::new(),
            &[ring(25.0, -20.0)],
            DVec2::ZERO,
            Tuning::default(),
        );
        assert_eq!(collect_pickups(&mut state), 1);
    }

    #[test]
    fn test_no_player_collects_nothing() {
        let mut state = GameState::from_level(Vec::new(), &[ring(0.0, -20.0)], DVec2::ZERO, Tuning::default());
        state.entities.retain(|e| !e.is_player());
        assert_eq!(collect_pickups(&mut state), 0);
        assert_eq!(state.pickups_remaining(), 1);
    }

    #[test]
    fn test_draw_order_lower_feet_last() {
        let items = [ring(0.0, -100.0), ring(0.0, 200.0), ring(0.0, 50.0)];
        let mut state = GameState::from_level(Vec::new(), &items, DVec2::new(0.0, 500.0), Tuning::default());
        sort_for_draw(&mut state.entities);

        let ys: Vec<f64> = state.entities.iter().map(|e| e.pos.y).collect();
        assert_eq!(ys, vec![500.0, 200.0, 50.0, -100.0]);
        let keys: Vec<i64> = state.entities.iter().map(|e| e.sort_key).collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_equal_keys_keep_insertion_order() {
        let items = [ring(10.0, 40.0), ring(20.0, 40.0), ring(30.0, 40.0)];
        let mut state = GameState::from_level(Vec::new(), &items, DVec2::new(0.0, 900.0), Tuning::default());
        sort_for_draw(&mut state.entities);
        let ids: Vec<u32> = state.entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_render_list_follows_entities() {
        let mut state = GameState::from_level(Vec::new(), &[ring(1.0, 2.0)], DVec2::ZERO, Tuning::default());
        state.entities[1].anim.frame = 4;
        let items = render_list(&state);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].sheet, SpriteSheet::Ring);
        assert_eq!(items[1].frame, 4);
        assert_eq!(items[1].position, DVec2::new(1.0, 2.0));
        assert_eq!(items[0].sheet, SpriteSheet::PlayerIdle);
    }
}
