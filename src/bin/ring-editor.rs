//! Ring Chase level editor
//!
//! Appends barriers and item spawns to the flat files the game reads.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use glam::DVec2;

use ring_chase::level::{
    ItemKind, ItemSpawn, append_items, append_segments, chain, load_items, load_layout,
};
use ring_chase::sim::{Segment, SegmentKind};
use ring_chase::tuning::Tuning;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Barrier layout file
    #[arg(short, long, default_value = "layout.txt")]
    layout: PathBuf,

    /// Item spawn file
    #[arg(short, long, default_value = "items.txt")]
    items: PathBuf,

    /// Tuning JSON, read for the layout snap distance
    #[arg(short, long, default_value = "tuning.json")]
    tuning: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add one barrier from (AX, AY) to (BX, BY)
    #[command(allow_negative_numbers = true)]
    Barrier { ax: f64, ay: f64, bx: f64, by: f64 },
    /// Add connected barriers through X1 Y1 X2 Y2 ...
    #[command(allow_negative_numbers = true)]
    Chain {
        #[arg(required = true, num_args = 4..)]
        coords: Vec<f64>,
    },
    /// Add an item spawn (ring, goblin or ted)
    #[command(allow_negative_numbers = true)]
    Item { tag: ItemKind, x: f64, y: f64 },
    /// Summarize both files
    List,
}

fn points(coords: &[f64]) -> Result<Vec<DVec2>> {
    if coords.len() % 2 != 0 {
        bail!("Chain needs x/y pairs, got {} numbers", coords.len());
    }
    Ok(coords
        .chunks_exact(2)
        .map(|pair| DVec2::new(pair[0], pair[1]))
        .collect())
}

fn check_finite(values: &[f64]) -> Result<()> {
    if values.iter().any(|v| !v.is_finite()) {
        bail!("Coordinates must be finite");
    }
    Ok(())
}

fn list(layout: &Path, items: &Path, snap: f64) -> Result<()> {
    let segments = if layout.exists() {
        load_layout(layout, snap)
            .with_context(|| format!("Failed to read layout {}", layout.display()))?
    } else {
        Vec::new()
    };
    let count = |kind: SegmentKind| segments.iter().filter(|s| s.kind() == kind).count();
    println!("{}: {} barriers", layout.display(), segments.len());
    println!("  horizontal: {}", count(SegmentKind::Horizontal));
    println!("  vertical:   {}", count(SegmentKind::Vertical));
    println!("  oblique:    {}", count(SegmentKind::Oblique));

    let spawns = if items.exists() {
        load_items(items).with_context(|| format!("Failed to read items {}", items.display()))?
    } else {
        Vec::new()
    };
    println!("{}: {} items", items.display(), spawns.len());
    for kind in [ItemKind::Ring, ItemKind::Goblin, ItemKind::Ted] {
        let n = spawns.iter().filter(|s| s.kind == kind).count();
        println!("  {kind}: {n}");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Barrier { ax, ay, bx, by } => {
            check_finite(&[ax, ay, bx, by])?;
            let segment = Segment::new(DVec2::new(ax, ay), DVec2::new(bx, by));
            if segment.is_degenerate() {
                log::warn!("Barrier at ({ax}, {ay}) has zero length");
            }
            append_segments(&args.layout, &[segment])
                .with_context(|| format!("Failed to write {}", args.layout.display()))?;
            println!("Added barrier to {}", args.layout.display());
        }
        Command::Chain { coords } => {
            check_finite(&coords)?;
            let segments = chain(&points(&coords)?);
            append_segments(&args.layout, &segments)
                .with_context(|| format!("Failed to write {}", args.layout.display()))?;
            println!("Added {} barriers to {}", segments.len(), args.layout.display());
        }
        Command::Item { tag, x, y } => {
            check_finite(&[x, y])?;
            let spawn = ItemSpawn {
                kind: tag,
                pos: DVec2::new(x, y),
            };
            append_items(&args.items, &[spawn])
                .with_context(|| format!("Failed to write {}", args.items.display()))?;
            println!("Added {tag} at ({x}, {y}) to {}", args.items.display());
        }
        Command::List => {
            let tuning = Tuning::load_or_default(&args.tuning);
            list(&args.layout, &args.items, tuning.collision.layout_snap)?;
        }
    }

    Ok(())
}
