use std::collections::BTreeMap;
use std::str::FromStr;

use foundation::tile::TileKey;

use crate::entity::GeoEntity;

/// Read-only view of the per-tile entity lists maintained by the data-sync
/// collaborator.
///
/// The sync layer stores each entity under exactly one tile (the cell
/// containing its coordinates) and publishes a whole new snapshot when the
/// backing store changes; this type never re-buckets anything.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TileStore {
    tiles: BTreeMap<TileKey, Vec<GeoEntity>>,
}

impl TileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boundary conversion from the sync layer's `"x/y"`-keyed map.
    ///
    /// Unparseable keys are skipped: snapshots are best-effort data and one
    /// stray key must not take down the whole view.
    pub fn from_serialized<I>(tiles: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<GeoEntity>)>,
    {
        let mut out = Self::new();
        for (raw, entities) in tiles {
            let Ok(key) = TileKey::from_str(&raw) else {
                continue;
            };
            out.insert(key, entities);
        }
        out
    }

    /// Appends to the tile's list when the key is already present.
    pub fn insert(&mut self, key: TileKey, entities: Vec<GeoEntity>) {
        self.tiles.entry(key).or_default().extend(entities);
    }

    /// Missing tiles are empty, not errors.
    pub fn get(&self, key: TileKey) -> &[GeoEntity] {
        self.tiles.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn entity_count(&self) -> usize {
        self.tiles.values().map(Vec::len).sum()
    }
}
