//! Per-frame simulation tick
//!
//! Order within a tick: player input and barrier contact, chasers, animation
//! clocks, then the registry pass (pickups and draw order).

use serde::{Deserialize, Serialize};

use super::chase::{ChaseTransition, update_chaser};
use super::player::{Keys, update_player};
use super::scene::{collect_pickups, sort_for_draw};
use super::state::{GameEvent, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Direction keys currently down
    pub held: Keys,
    /// Direction keys released since the last tick
    pub released: Keys,
    /// Put the player back at the spawn point
    pub respawn: bool,
}

impl TickInput {
    /// Input with `held` down and nothing released
    pub fn holding(held: Keys) -> Self {
        Self {
            held,
            ..Default::default()
        }
    }
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) {
    state.time_ticks += 1;

    let spawn = state.player_spawn;
    let mut player_anchor = None;
    if let Some(player) = state.entities.iter_mut().find(|e| e.is_player()) {
        update_player(
            player,
            input.held,
            input.released,
            &state.segments,
            &state.tuning,
            dt,
        );
        // Respawn wins over this tick's movement
        if input.respawn {
            log::info!("Player respawned at ({}, {})", spawn.x, spawn.y);
            player.pos = spawn;
            player.refresh();
        }
        player_anchor = Some(player.pos);
    }

    if let Some(anchor) = player_anchor {
        for chaser in state.entities.iter_mut().filter(|e| e.is_chaser()) {
            match update_chaser(chaser, anchor, &state.segments, &state.tuning, dt) {
                Some(ChaseTransition::Disengaged) => {
                    log::debug!("Goblin {} hit a barrier and lost the trail", chaser.id);
                    state
                        .events
                        .push(GameEvent::ChaserDisengaged { id: chaser.id });
                }
                Some(ChaseTransition::Reengaged) => {
                    log::debug!("Goblin {} is following again", chaser.id);
                    state
                        .events
                        .push(GameEvent::ChaserReengaged { id: chaser.id });
                }
                None => {}
            }
        }
    }

    for entity in state.entities.iter_mut() {
        entity.animate(dt, &state.tuning);
    }

    collect_pickups(state);
    sort_for_draw(&mut state.entities);
}
