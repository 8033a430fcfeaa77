use std::sync::Arc;

use foundation::bounds::GeoBounds;
use foundation::tile::TileGrid;
use survey::config::SurveyConfig;
use survey::taxonomy::ClassificationNode;
use viewport::entity::GeoEntity;
use viewport::store::TileStore;

use crate::memo::{ClassificationPipeline, MemoStats, ViewportCache};

/// Owns every memo slot of the derived-state layer.
///
/// One instance per state container. Derivations run synchronously on the
/// caller's thread in dependency order, and the caller serializes state
/// transitions, so a derivation is never re-entered. Features and
/// observations keep separate slots: panning invalidates both, but a sync
/// touching only one store leaves the other's slot warm.
#[derive(Debug, Default)]
pub struct DerivedState {
    features: ViewportCache,
    observations: ViewportCache,
    classifier: ClassificationPipeline,
}

impl DerivedState {
    pub fn new(grid: TileGrid) -> Self {
        Self {
            features: ViewportCache::new(grid),
            observations: ViewportCache::new(grid),
            classifier: ClassificationPipeline::new(),
        }
    }

    pub fn visible_features(
        &mut self,
        bounds: GeoBounds,
        store: &Arc<TileStore>,
    ) -> Arc<Vec<GeoEntity>> {
        self.features.query(bounds, store)
    }

    pub fn visible_observations(
        &mut self,
        bounds: GeoBounds,
        store: &Arc<TileStore>,
    ) -> Arc<Vec<GeoEntity>> {
        self.observations.query(bounds, store)
    }

    pub fn classification(
        &mut self,
        surveys: &Arc<Vec<SurveyConfig>>,
    ) -> Arc<Vec<ClassificationNode>> {
        self.classifier.classify(surveys)
    }

    pub fn feature_stats(&self) -> MemoStats {
        self.features.stats()
    }

    pub fn observation_stats(&self) -> MemoStats {
        self.observations.stats()
    }

    pub fn classification_stats(&self) -> MemoStats {
        self.classifier.classify_stats()
    }

    /// Drops every slot; the next round of derivations recomputes from
    /// scratch.
    pub fn invalidate_all(&mut self) {
        self.features.invalidate();
        self.observations.invalidate();
        self.classifier.invalidate();
    }
}
