use std::collections::BTreeSet;

use foundation::bounds::GeoBounds;
use foundation::tile::{TileGrid, tiles_for_bounds};

use crate::entity::GeoEntity;
use crate::store::TileStore;

/// Entities inside `bounds`: coarse tile fetch, then exact filtering.
///
/// Tile membership over-approximates the query rectangle, so candidates from
/// the covering tiles are trimmed with an inclusive point-in-box test on all
/// four edges. The index stores each entity in exactly one tile; should one
/// ever appear in several, only its first occurrence is returned.
///
/// Ordering contract:
/// - Tile-cover order (ascending x, then y), store order within a tile.
///
/// Malformed bounds cover no tiles and so yield no entities; missing tiles
/// read as empty.
pub fn visible_entities<'a>(
    bounds: GeoBounds,
    grid: TileGrid,
    store: &'a TileStore,
) -> Vec<&'a GeoEntity> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut out: Vec<&'a GeoEntity> = Vec::new();

    for key in tiles_for_bounds(bounds, grid) {
        for entity in store.get(key) {
            if !bounds.contains(entity.lon, entity.lat) {
                continue;
            }
            if seen.insert(entity.id.as_str()) {
                out.push(entity);
            }
        }
    }

    out
}
