//! Game state and core simulation types
//!
//! The registry owns every entity; barrier segments are fixed once a level
//! is loaded.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::anim::AnimState;
use super::chase::ChaseState;
use super::collision::resolve;
use super::direction::Direction;
use super::geometry::{Circle, Segment};
use crate::consts::*;
use crate::level::{ItemKind, ItemSpawn};
use crate::tuning::Tuning;

/// Sprite atlas an entity is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteSheet {
    PlayerIdle,
    PlayerRun,
    Ring,
    Goblin,
    Ted,
}

impl SpriteSheet {
    /// Frames per row
    pub fn frame_count(self) -> usize {
        match self {
            SpriteSheet::PlayerIdle => PLAYER_IDLE_FRAMES,
            SpriteSheet::PlayerRun => PLAYER_RUN_FRAMES,
            SpriteSheet::Ring | SpriteSheet::Ted => 7,
            SpriteSheet::Goblin => 8,
        }
    }
}

/// Collider and draw-layer placement relative to an entity's sprite anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindProfile {
    pub radius: f64,
    /// Vertical offset from the anchor to the collider center
    pub collider_offset: f64,
    /// Distance from the anchor down to the sprite's feet
    pub foot_offset: f64,
    pub sheet: SpriteSheet,
}

impl KindProfile {
    pub const PLAYER: KindProfile = KindProfile {
        radius: 15.0,
        collider_offset: -20.0,
        foot_offset: 35.0,
        sheet: SpriteSheet::PlayerIdle,
    };
    pub const GOBLIN: KindProfile = KindProfile {
        radius: 15.0,
        collider_offset: -60.0,
        foot_offset: 60.0,
        sheet: SpriteSheet::Goblin,
    };
    pub const RING: KindProfile = KindProfile {
        radius: 10.0,
        collider_offset: 0.0,
        foot_offset: 0.0,
        sheet: SpriteSheet::Ring,
    };
    pub const TED: KindProfile = KindProfile {
        radius: 10.0,
        collider_offset: -50.0,
        foot_offset: 50.0,
        sheet: SpriteSheet::Ted,
    };

    pub fn for_item(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Ring => Self::RING,
            ItemKind::Goblin => Self::GOBLIN,
            ItemKind::Ted => Self::TED,
        }
    }
}

/// Player controller memory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Set while a direction key is held, cleared on any release
    pub moving: bool,
    /// Speed for this tick; drops after touching a barrier
    pub speed: f64,
}

impl PlayerState {
    pub fn new(speed: f64) -> Self {
        Self {
            moving: false,
            speed,
        }
    }
}

/// What an entity is, with any per-kind memory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Player(PlayerState),
    Chaser(ChaseState),
    /// Collected when the player touches it
    Pickup,
    /// Drawn and animated only
    Decoration,
}

/// Anything in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Sprite anchor in world space (Y up)
    pub pos: DVec2,
    /// Derived from `pos`; see [`Entity::refresh`]
    pub collider: Circle,
    /// 1.0 draws the sprite as authored (facing west), -1.0 mirrors it
    pub facing: f64,
    /// Draw order, smaller first
    pub sort_key: i64,
    pub direction: Direction,
    pub anim: AnimState,
    pub profile: KindProfile,
    /// Sheet currently drawn; the player swaps between idle and run
    pub sheet: SpriteSheet,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: DVec2, profile: KindProfile) -> Self {
        let mut entity = Self {
            id,
            kind,
            pos,
            collider: Circle::new(pos, profile.radius),
            facing: 1.0,
            sort_key: 0,
            direction: Direction::S,
            anim: AnimState::default(),
            profile,
            sheet: profile.sheet,
        };
        entity.refresh();
        entity
    }

    /// Collider for the current position
    pub fn collider_at_pos(&self) -> Circle {
        Circle::new(
            self.pos + DVec2::new(0.0, self.profile.collider_offset),
            self.profile.radius,
        )
    }

    /// Screen-space depth of the feet: further down the screen draws later
    pub fn depth_key(&self) -> i64 {
        (self.profile.foot_offset - self.pos.y) as i64
    }

    /// Re-derive collider and sort key from the position
    pub fn refresh(&mut self) {
        self.collider = self.collider_at_pos();
        self.sort_key = self.depth_key();
    }

    /// Push the entity out of any barriers it overlaps.
    ///
    /// Returns how many barriers pushed it.
    pub fn resolve_barriers(&mut self, segments: &[Segment], corner_buffer: f64) -> u32 {
        self.refresh();
        let result = resolve(&self.collider, segments, corner_buffer);
        if result.hit() {
            self.pos += result.displacement;
            self.refresh();
        }
        result.collisions
    }

    /// Advance the sprite clock; returns the frame to draw
    pub fn animate(&mut self, dt: f64, tuning: &Tuning) -> usize {
        let (frame_rate, row) = match self.kind {
            EntityKind::Player(_) => (tuning.player.frame_rate, self.direction.row()),
            EntityKind::Chaser(_) => (tuning.prop_frame_rate, self.direction.row()),
            EntityKind::Pickup | EntityKind::Decoration => (tuning.prop_frame_rate, 0),
        };
        self.anim
            .advance(dt, frame_rate, self.sheet.frame_count(), row)
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player(_))
    }

    pub fn is_chaser(&self) -> bool {
        matches!(self.kind, EntityKind::Chaser(_))
    }

    pub fn is_pickup(&self) -> bool {
        matches!(self.kind, EntityKind::Pickup)
    }
}

/// Things worth telling the caller about, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PickupCollected { id: u32, score: u64 },
    ChaserDisengaged { id: u32 },
    ChaserReengaged { id: u32 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Barriers, fixed for the session
    pub segments: Vec<Segment>,
    /// Every entity, in draw order after each tick
    pub entities: Vec<Entity>,
    /// Rings collected
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub tuning: Tuning,
    /// Where the player starts and respawns
    pub player_spawn: DVec2,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a state with a player at `player_spawn` and no items
    pub fn new(segments: Vec<Segment>, player_spawn: DVec2, tuning: Tuning) -> Self {
        let mut state = Self {
            segments,
            entities: Vec::new(),
            score: 0,
            time_ticks: 0,
            tuning,
            player_spawn,
            events: Vec::new(),
            next_id: 1,
        };

        let id = state.next_entity_id();
        let player = PlayerState::new(state.tuning.player.speed);
        state.entities.push(Entity::new(
            id,
            EntityKind::Player(player),
            player_spawn,
            KindProfile::PLAYER,
        ));

        state
    }

    /// Create a state and spawn every item from a level's item list
    pub fn from_level(
        segments: Vec<Segment>,
        items: &[ItemSpawn],
        player_spawn: DVec2,
        tuning: Tuning,
    ) -> Self {
        let mut state = Self::new(segments, player_spawn, tuning);
        for item in items {
            state.spawn_item(item);
        }
        log::info!(
            "Level ready: {} barriers, {} entities",
            state.segments.len(),
            state.entities.len()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an entity for an item spawn; returns its ID
    pub fn spawn_item(&mut self, item: &ItemSpawn) -> u32 {
        let id = self.next_entity_id();
        let kind = match item.kind {
            ItemKind::Ring => EntityKind::Pickup,
            ItemKind::Goblin => {
                EntityKind::Chaser(ChaseState::new(self.tuning.chase.initial_timer))
            }
            ItemKind::Ted => EntityKind::Decoration,
        };
        self.entities
            .push(Entity::new(id, kind, item.pos, KindProfile::for_item(item.kind)));
        id
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.is_player())
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.is_player())
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn pickups_remaining(&self) -> usize {
        self.entities.iter().filter(|e| e.is_pickup()).count()
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
