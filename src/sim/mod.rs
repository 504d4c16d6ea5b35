//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (registry order, then draw order)
//! - No rendering or platform dependencies

pub mod anim;
pub mod chase;
pub mod collision;
pub mod direction;
pub mod geometry;
pub mod player;
pub mod scene;
pub mod state;
pub mod tick;

pub use anim::AnimState;
pub use chase::{ChaseState, ChaseTransition, heading_toward, update_chaser};
pub use collision::{Resolution, perpendicular_foot, resolve, segment_push};
pub use direction::Direction;
pub use geometry::{Circle, PaddedBounds, Segment, SegmentKind};
pub use player::{Keys, update_player};
pub use scene::{RenderItem, collect_pickups, render_list, sort_for_draw};
pub use state::{
    Entity, EntityKind, GameEvent, GameState, KindProfile, PlayerState, SpriteSheet,
};
pub use tick::{TickInput, tick};
