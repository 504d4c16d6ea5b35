//! Ring Chase headless runner
//!
//! Loads a level, replays a scripted sequence of key presses at the fixed
//! timestep and prints what happened.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use glam::DVec2;

use ring_chase::consts::SIM_DT;
use ring_chase::level::{load_items, load_layout};
use ring_chase::sim::{GameEvent, GameState, Keys, TickInput, render_list, tick};
use ring_chase::tuning::Tuning;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Barrier layout file (`ax,ay,bx,by,` per line)
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Item spawn file (`tag,x,y,` per line)
    #[arg(short, long)]
    items: Option<PathBuf>,

    /// Tuning JSON; defaults are used when missing
    #[arg(short, long, default_value = "tuning.json")]
    tuning: PathBuf,

    /// Moves as `keys:ticks`, comma separated. Keys are `up`, `down`, `left`,
    /// `right` joined with `+`, or `idle` / `respawn`
    #[arg(short, long, default_value = "right:60,up:30")]
    moves: String,

    #[arg(long, default_value_t = 650.0, allow_negative_numbers = true)]
    spawn_x: f64,

    #[arg(long, default_value_t = 500.0, allow_negative_numbers = true)]
    spawn_y: f64,

    /// Print the final render list
    #[arg(long)]
    dump: bool,
}

/// One scripted step: hold `keys` for `ticks` ticks
#[derive(Debug, Clone, Copy, PartialEq)]
struct Move {
    keys: Keys,
    respawn: bool,
    ticks: u64,
}

fn parse_moves(script: &str) -> Result<Vec<Move>> {
    let mut moves = Vec::new();
    for step in script.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let Some((names, count)) = step.split_once(':') else {
            bail!("Move '{step}' is missing a tick count");
        };
        let ticks: u64 = count
            .trim()
            .parse()
            .with_context(|| format!("Bad tick count in move '{step}'"))?;

        let mut keys = Keys::default();
        let mut respawn = false;
        for name in names.split('+').map(str::trim) {
            match name {
                "up" => keys.up = true,
                "down" => keys.down = true,
                "left" => keys.left = true,
                "right" => keys.right = true,
                "idle" => {}
                "respawn" => respawn = true,
                other => bail!("Unknown key '{other}' in move '{step}'"),
            }
        }
        moves.push(Move {
            keys,
            respawn,
            ticks,
        });
    }
    Ok(moves)
}

/// Keys held in `before` but not in `after`
fn released_between(before: Keys, after: Keys) -> Keys {
    Keys {
        up: before.up && !after.up,
        down: before.down && !after.down,
        left: before.left && !after.left,
        right: before.right && !after.right,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Ring Chase (headless) starting...");

    let tuning = Tuning::load_or_default(&args.tuning);
    let segments = match &args.layout {
        Some(path) => load_layout(path, tuning.collision.layout_snap)
            .with_context(|| format!("Failed to load layout {}", path.display()))?,
        None => Vec::new(),
    };
    let items = match &args.items {
        Some(path) => load_items(path)
            .with_context(|| format!("Failed to load items {}", path.display()))?,
        None => Vec::new(),
    };
    let moves = parse_moves(&args.moves)?;

    let spawn = DVec2::new(args.spawn_x, args.spawn_y);
    let mut state = GameState::from_level(segments, &items, spawn, tuning);

    let mut held = Keys::default();
    let mut disengages = 0usize;
    for step in &moves {
        for i in 0..step.ticks {
            let input = TickInput {
                held: step.keys,
                released: if i == 0 {
                    released_between(held, step.keys)
                } else {
                    Keys::default()
                },
                respawn: step.respawn && i == 0,
            };
            tick(&mut state, &input, SIM_DT);

            for event in state.drain_events() {
                match event {
                    GameEvent::PickupCollected { id, score } => {
                        println!("tick {:>5}: collected ring {id} (score {score})", state.time_ticks);
                    }
                    GameEvent::ChaserDisengaged { id } => {
                        disengages += 1;
                        log::debug!("tick {}: goblin {id} disengaged", state.time_ticks);
                    }
                    GameEvent::ChaserReengaged { .. } => {}
                }
            }
        }
        held = step.keys;
    }

    println!("Run complete.");
    println!("Ticks: {}", state.time_ticks);
    println!("Score: {}", state.score);
    println!("Rings left: {}", state.pickups_remaining());
    println!("Goblin disengages: {disengages}");
    if let Some(player) = state.player() {
        println!("Player at: ({:.2}, {:.2})", player.pos.x, player.pos.y);
    }

    if args.dump {
        let list = render_list(&state);
        println!(
            "{}",
            serde_json::to_string_pretty(&list).context("Failed to serialize render list")?
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        let moves = parse_moves("right:60, up+left:30,idle:5,respawn:1").unwrap();
        assert_eq!(moves.len(), 4);
        assert!(moves[0].keys.right && moves[0].ticks == 60);
        assert!(moves[1].keys.up && moves[1].keys.left && !moves[1].keys.right);
        assert!(!moves[2].keys.any());
        assert!(moves[3].respawn);
    }

    #[test]
    fn test_parse_moves_rejects_garbage() {
        assert!(parse_moves("right").is_err());
        assert!(parse_moves("jump:3").is_err());
        assert!(parse_moves("up:x").is_err());
        assert!(parse_moves("").unwrap().is_empty());
    }

    #[test]
    fn test_released_between() {
        let right = Keys { right: true, ..Default::default() };
        let up_right = Keys { up: true, right: true, ..Default::default() };
        assert_eq!(released_between(right, up_right), Keys::default());
        assert_eq!(
            released_between(up_right, Keys::default()),
            up_right
        );
    }
}
