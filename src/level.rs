//! Flat-file level formats shared by the game and the editor
//!
//! ## Layout file (`layout.txt`)
//! One barrier per line, `ax,ay,bx,by,` with a trailing comma:
//! ```text
//! -120.000000,40.000000,310.000000,40.000000,
//! ```
//!
//! ## Items file (`items.txt`)
//! One spawn per line, `tag,x,y,` where the tag is `ring`, `goblin` or `ted`:
//! ```text
//! ring,500.000000,300.000000,
//! ```
//!
//! Lines with the wrong number of fields are skipped with a warning so that a
//! half-written line from an interrupted editor session does not block play.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::between;
use crate::sim::Segment;

/// Fields per layout line, counting the empty one after the trailing comma
const LAYOUT_FIELDS: usize = 5;
/// Fields per items line, counting the empty one after the trailing comma
const ITEM_FIELDS: usize = 4;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("unknown item tag `{0}`")]
    UnknownTag(String),
}

impl LevelError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// What an items file can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Ring,
    Goblin,
    Ted,
}

impl ItemKind {
    pub fn tag(self) -> &'static str {
        match self {
            ItemKind::Ring => "ring",
            ItemKind::Goblin => "goblin",
            ItemKind::Ted => "ted",
        }
    }
}

impl FromStr for ItemKind {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ring" => Ok(ItemKind::Ring),
            "goblin" => Ok(ItemKind::Goblin),
            "ted" => Ok(ItemKind::Ted),
            other => Err(LevelError::UnknownTag(other.to_string())),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One entry of the items file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemSpawn {
    pub kind: ItemKind,
    pub pos: DVec2,
}

fn parse_coord(field: &str, line: usize) -> Result<f64, LevelError> {
    let value: f64 = field.trim().parse().map_err(|e| LevelError::Parse {
        line,
        message: format!("bad number `{}`: {e}", field.trim()),
    })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LevelError::Parse {
            line,
            message: format!("non-finite coordinate `{}`", field.trim()),
        })
    }
}

/// Parse layout text into barriers.
///
/// An endpoint within `snap` of the other on an axis is moved onto it, so
/// hand-drawn near-horizontal and near-vertical barriers come out exactly
/// flat and take the cheaper collision path.
pub fn parse_layout(text: &str, snap: f64) -> Result<Vec<Segment>, LevelError> {
    let mut segments = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = raw.split(',').collect();
        if fields.len() != LAYOUT_FIELDS {
            log::warn!("layout line {line}: expected 4 coordinates, skipping `{raw}`");
            continue;
        }

        let mut ax = parse_coord(fields[0], line)?;
        let mut ay = parse_coord(fields[1], line)?;
        let bx = parse_coord(fields[2], line)?;
        let by = parse_coord(fields[3], line)?;

        if between(bx - snap, ax, bx + snap) {
            ax = bx;
        }
        if between(by - snap, ay, by + snap) {
            ay = by;
        }
        segments.push(Segment::new(DVec2::new(ax, ay), DVec2::new(bx, by)));
    }
    Ok(segments)
}

/// Parse items text into spawns. Unknown tags are skipped.
pub fn parse_items(text: &str) -> Result<Vec<ItemSpawn>, LevelError> {
    let mut items = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = raw.split(',').collect();
        if fields.len() != ITEM_FIELDS {
            log::warn!("items line {line}: expected tag and 2 coordinates, skipping `{raw}`");
            continue;
        }

        let kind = match fields[0].parse::<ItemKind>() {
            Ok(kind) => kind,
            Err(e) => {
                log::warn!("items line {line}: {e}, skipping");
                continue;
            }
        };
        let x = parse_coord(fields[1], line)?;
        let y = parse_coord(fields[2], line)?;
        items.push(ItemSpawn {
            kind,
            pos: DVec2::new(x, y),
        });
    }
    Ok(items)
}

/// One layout line, newline included
pub fn format_segment(segment: &Segment) -> String {
    format!(
        "{:.6},{:.6},{:.6},{:.6},\n",
        segment.a.x, segment.a.y, segment.b.x, segment.b.y
    )
}

/// One items line, newline included
pub fn format_item(item: &ItemSpawn) -> String {
    format!("{},{:.6},{:.6},\n", item.kind, item.pos.x, item.pos.y)
}

pub fn load_layout(path: &Path, snap: f64) -> Result<Vec<Segment>, LevelError> {
    let text = fs::read_to_string(path).map_err(|e| LevelError::io(path, e))?;
    let segments = parse_layout(&text, snap)?;
    log::info!("Loaded {} barriers from {}", segments.len(), path.display());
    Ok(segments)
}

pub fn load_items(path: &Path) -> Result<Vec<ItemSpawn>, LevelError> {
    let text = fs::read_to_string(path).map_err(|e| LevelError::io(path, e))?;
    let items = parse_items(&text)?;
    log::info!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

fn append_lines(path: &Path, lines: impl Iterator<Item = String>) -> Result<(), LevelError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LevelError::io(path, e))?;
    for line in lines {
        file.write_all(line.as_bytes())
            .map_err(|e| LevelError::io(path, e))?;
    }
    Ok(())
}

/// Append barriers to a layout file, creating it if needed
pub fn append_segments(path: &Path, segments: &[Segment]) -> Result<(), LevelError> {
    append_lines(path, segments.iter().map(format_segment))
}

/// Append spawns to an items file, creating it if needed
pub fn append_items(path: &Path, items: &[ItemSpawn]) -> Result<(), LevelError> {
    append_lines(path, items.iter().map(format_item))
}

/// Barriers drawn as one connected polyline: each starts where the last ended
pub fn chain(points: &[DVec2]) -> Vec<Segment> {
    points
        .windows(2)
        .map(|pair| Segment::new(pair[0], pair[1]))
        .collect()
}
