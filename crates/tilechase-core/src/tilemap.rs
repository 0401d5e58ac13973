//! Tile storage and the walkability source consumed by path searches.
//!
//! A grid position either holds tile data (`Some(Tile)`) or is empty. Empty
//! positions are obstacles. [`TileMap`] is the in-memory implementation of
//! [`TileSource`]; hosts with their own tile storage implement the trait
//! directly.

use std::fmt;

use crate::geom::{Point, Range};

/// Opaque tile payload. Only its presence matters for walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile(pub u16);

impl Tile {
    /// Plain floor, as produced by the ASCII parser.
    pub const FLOOR: Tile = Tile(1);
}

/// Read-only view of a tile grid.
pub trait TileSource {
    /// The populated bounds of the grid.
    fn bounds(&self) -> Range;

    /// Tile data at `p`, or `None` for an empty position or one outside
    /// [`bounds`](Self::bounds).
    fn tile_at(&self, p: Point) -> Option<Tile>;
}

impl<T: TileSource + ?Sized> TileSource for &T {
    fn bounds(&self) -> Range {
        (**self).bounds()
    }

    fn tile_at(&self, p: Point) -> Option<Tile> {
        (**self).tile_at(p)
    }
}

/// A rectangular grid of optional tiles.
///
/// Deserializing checks that the tile vector covers `bounds` exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTileMap"))]
pub struct TileMap {
    bounds: Range,
    tiles: Vec<Option<Tile>>,
}

/// Unchecked wire form of a [`TileMap`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTileMap {
    bounds: Range,
    tiles: Vec<Option<Tile>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTileMap> for TileMap {
    type Error = TileMapError;

    fn try_from(raw: RawTileMap) -> Result<Self, TileMapError> {
        let expected = raw.bounds.len();
        if raw.tiles.len() != expected {
            return Err(TileMapError::TileCount {
                expected,
                found: raw.tiles.len(),
            });
        }
        Ok(Self {
            bounds: raw.bounds,
            tiles: raw.tiles,
        })
    }
}

impl TileMap {
    /// Create an empty map (every position blocked) covering `bounds`.
    pub fn new(bounds: Range) -> Self {
        Self {
            bounds,
            tiles: vec![None; bounds.len()],
        }
    }

    /// Create a `width` × `height` map at the origin, filled with `tile`.
    pub fn filled(width: i32, height: i32, tile: Tile) -> Self {
        let mut map = Self::new(Range::new(0, 0, width, height));
        map.fill(Some(tile));
        map
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.bounds.width() as usize + x)
    }

    /// The bounding range of the map.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Tile at `p`, or `None` if empty or out of bounds.
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.index(p).and_then(|i| self.tiles[i])
    }

    /// Set the tile at `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, tile: Option<Tile>) {
        if let Some(i) = self.index(p) {
            self.tiles[i] = tile;
        }
    }

    /// Set every position of the map to `tile`.
    pub fn fill(&mut self, tile: Option<Tile>) {
        self.tiles.fill(tile);
    }

    /// Number of positions holding tile data.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }

    /// Parse an ASCII map.
    ///
    /// Each line is one row, row 0 being `y = bounds.min.y`. `#` and space
    /// are empty positions, `.` is floor, `P` and `C` are floor that also
    /// mark the target and chaser spawn cells. Leading and trailing blank lines
    /// are ignored; every line must have the same width.
    pub fn from_ascii(s: &str) -> Result<AsciiMap, TileMapError> {
        let s = s.trim_matches(|c: char| c == '\n' || c == '\r');
        if s.trim().is_empty() {
            return Err(TileMapError::Empty);
        }
        let lines: Vec<&str> = s.lines().map(|l| l.trim_end_matches('\r')).collect();
        let width = lines[0].chars().count();
        if lines.iter().any(|l| l.chars().count() != width) {
            return Err(TileMapError::InconsistentSize(s.to_string()));
        }

        let mut parsed = AsciiMap {
            map: TileMap::new(Range::new(0, 0, width as i32, lines.len() as i32)),
            target: None,
            chaser: None,
        };
        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                let tile = match ch {
                    '#' | ' ' => None,
                    '.' => Some(Tile::FLOOR),
                    'P' => {
                        parsed.target = Some(p);
                        Some(Tile::FLOOR)
                    }
                    'C' => {
                        parsed.chaser = Some(p);
                        Some(Tile::FLOOR)
                    }
                    _ => {
                        return Err(TileMapError::InvalidRune {
                            ch,
                            pos: p,
                            content: s.to_string(),
                        });
                    }
                };
                parsed.map.set(p, tile);
            }
        }
        Ok(parsed)
    }
}

impl TileSource for TileMap {
    fn bounds(&self) -> Range {
        self.bounds
    }

    fn tile_at(&self, p: Point) -> Option<Tile> {
        self.at(p)
    }
}

impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in self.bounds.min.y..self.bounds.max.y {
            if y > self.bounds.min.y {
                writeln!(f)?;
            }
            for x in self.bounds.min.x..self.bounds.max.x {
                match self.at(Point::new(x, y)) {
                    Some(_) => write!(f, ".")?,
                    None => write!(f, "#")?,
                }
            }
        }
        Ok(())
    }
}

/// Result of [`TileMap::from_ascii`]: the map plus any spawn markers.
#[derive(Debug, Clone)]
pub struct AsciiMap {
    pub map: TileMap,
    /// Last `P` marker seen.
    pub target: Option<Point>,
    /// Last `C` marker seen.
    pub chaser: Option<Point>,
}

/// Errors that can occur when building a map from text or serialized data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileMapError {
    /// The input contained no rows.
    Empty,
    /// Lines have inconsistent widths.
    InconsistentSize(String),
    /// A character outside `# .PC` was found.
    InvalidRune {
        ch: char,
        pos: Point,
        content: String,
    },
    /// Serialized tiles do not cover the serialized bounds.
    TileCount { expected: usize, found: usize },
}

impl fmt::Display for TileMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "tile map: no rows"),
            Self::InconsistentSize(s) => write!(f, "tile map: inconsistent size:\n{s}"),
            Self::InvalidRune { ch, pos, content } => {
                write!(
                    f,
                    "tile map contains invalid rune \u{201c}{ch}\u{201d} at ({}, {}):\n{content}",
                    pos.x, pos.y
                )
            }
            Self::TileCount { expected, found } => {
                write!(f, "tile map: bounds hold {expected} tiles, got {found}")
            }
        }
    }
}

impl std::error::Error for TileMapError {}
