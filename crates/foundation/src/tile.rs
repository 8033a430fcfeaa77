use std::fmt;
use std::str::FromStr;

use crate::bounds::GeoBounds;

/// Grid cell coordinate at a fixed tiling resolution.
///
/// Keys are an ordered pair of integers everywhere inside the core and only
/// become the store boundary's `"x/y"` string form through `Display`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileKey {
    pub x: i32,
    pub y: i32,
}

impl TileKey {
    pub fn new(x: i32, y: i32) -> Self {
        TileKey { x, y }
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileKeyParseError {
    raw: String,
}

impl fmt::Display for TileKeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed tile key {:?} (expected \"x/y\")", self.raw)
    }
}

impl std::error::Error for TileKeyParseError {}

impl FromStr for TileKey {
    type Err = TileKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TileKeyParseError { raw: s.to_string() };
        let (x, y) = s.split_once('/').ok_or_else(err)?;
        let x = x.parse::<i32>().map_err(|_| err())?;
        let y = y.parse::<i32>().map_err(|_| err())?;
        Ok(TileKey::new(x, y))
    }
}

/// Fixed tiling resolution, degrees per cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileGrid {
    pub degrees_per_tile: f64,
}

impl TileGrid {
    pub fn new(degrees_per_tile: f64) -> Self {
        TileGrid { degrees_per_tile }
    }

    fn is_usable(&self) -> bool {
        self.degrees_per_tile.is_finite() && self.degrees_per_tile > 0.0
    }

    /// The cell containing a point. Cells own their low edges; a point on a
    /// cell's high edge belongs to the neighbor.
    pub fn tile_containing(&self, lon: f64, lat: f64) -> TileKey {
        TileKey::new(
            (lon / self.degrees_per_tile).floor() as i32,
            (lat / self.degrees_per_tile).floor() as i32,
        )
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        TileGrid::new(1.0)
    }
}

/// Every tile whose cell intersects `bounds`, covering it completely.
///
/// Ordering contract:
/// - Row-major: ascending x, then ascending y within a column.
///
/// A box edge exactly on a cell boundary includes the neighboring cell
/// (over-covering is fine; under-covering is a bug). The cover is computed on
/// the world extent; coordinates beyond ±180/±90 are clamped to it. Inverted
/// or non-finite bounds, or an unusable grid, cover nothing; a zero-area box
/// covers the single cell containing the point.
pub fn tiles_for_bounds(bounds: GeoBounds, grid: TileGrid) -> Vec<TileKey> {
    if !bounds.is_well_formed() || !grid.is_usable() {
        return Vec::new();
    }

    let lo = grid.tile_containing(
        bounds.min[0].clamp(-180.0, 180.0),
        bounds.min[1].clamp(-90.0, 90.0),
    );
    let hi = grid.tile_containing(
        bounds.max[0].clamp(-180.0, 180.0),
        bounds.max[1].clamp(-90.0, 90.0),
    );

    let mut out = Vec::new();
    for x in lo.x..=hi.x {
        for y in lo.y..=hi.y {
            out.push(TileKey::new(x, y));
        }
    }
    out
}
