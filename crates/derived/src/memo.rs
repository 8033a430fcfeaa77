use std::sync::Arc;

use tracing::{debug, trace};

use foundation::bounds::GeoBounds;
use foundation::tile::TileGrid;
use survey::active::active_surveys;
use survey::config::SurveyConfig;
use survey::taxonomy::{ClassificationNode, classification};
use viewport::entity::GeoEntity;
use viewport::query::visible_entities;
use viewport::store::TileStore;

/// Hit/miss bookkeeping for one memo slot. Deterministic: no wall clock.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
}

/// Single-slot memo over the visible-entity query.
///
/// The slot records the identity of its immediate inputs: the bounds value
/// and the store snapshot's allocation (`Arc::ptr_eq`). Any other input pair
/// evicts the slot (last call wins). Mutating a snapshot in place behind an
/// unchanged `Arc` therefore stale-hits; callers publish changes as fresh
/// `Arc`s.
#[derive(Debug, Default)]
pub struct ViewportCache {
    grid: TileGrid,
    slot: Option<ViewportSlot>,
    stats: MemoStats,
}

#[derive(Debug)]
struct ViewportSlot {
    bounds: GeoBounds,
    store: Arc<TileStore>,
    result: Arc<Vec<GeoEntity>>,
}

impl ViewportCache {
    pub fn new(grid: TileGrid) -> Self {
        Self {
            grid,
            slot: None,
            stats: MemoStats::default(),
        }
    }

    pub fn grid(&self) -> TileGrid {
        self.grid
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    /// Drops the recorded slot; the next query recomputes.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    /// A hit returns the previously computed result object itself.
    pub fn query(&mut self, bounds: GeoBounds, store: &Arc<TileStore>) -> Arc<Vec<GeoEntity>> {
        if let Some(slot) = &self.slot
            && slot.bounds == bounds
            && Arc::ptr_eq(&slot.store, store)
        {
            self.stats.hits += 1;
            trace!(hits = self.stats.hits, "viewport cache hit");
            return Arc::clone(&slot.result);
        }

        self.stats.misses += 1;
        let result: Arc<Vec<GeoEntity>> = Arc::new(
            visible_entities(bounds, self.grid, store)
                .into_iter()
                .cloned()
                .collect(),
        );
        debug!(visible = result.len(), "viewport recompute");
        self.slot = Some(ViewportSlot {
            bounds,
            store: Arc::clone(store),
            result: Arc::clone(&result),
        });
        result
    }
}

/// Two chained single-slot stages: survey list → active subset → flat
/// classification list.
///
/// A stage recompute publishes a fresh `Arc`, which misses the downstream
/// slot on its next comparison, so an upstream change invalidates the whole
/// chain with no extra bookkeeping.
#[derive(Debug, Default)]
pub struct ClassificationPipeline {
    active: Option<ActiveSlot>,
    classified: Option<ClassifySlot>,
    active_stats: MemoStats,
    classify_stats: MemoStats,
}

#[derive(Debug)]
struct ActiveSlot {
    surveys: Arc<Vec<SurveyConfig>>,
    result: Arc<Vec<SurveyConfig>>,
}

#[derive(Debug)]
struct ClassifySlot {
    active: Arc<Vec<SurveyConfig>>,
    result: Arc<Vec<ClassificationNode>>,
}

impl ClassificationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_stats(&self) -> MemoStats {
        self.active_stats
    }

    pub fn classify_stats(&self) -> MemoStats {
        self.classify_stats
    }

    pub fn invalidate(&mut self) {
        self.active = None;
        self.classified = None;
    }

    /// The active subset, memoized on the survey list's identity.
    pub fn active(&mut self, surveys: &Arc<Vec<SurveyConfig>>) -> Arc<Vec<SurveyConfig>> {
        if let Some(slot) = &self.active
            && Arc::ptr_eq(&slot.surveys, surveys)
        {
            self.active_stats.hits += 1;
            return Arc::clone(&slot.result);
        }

        self.active_stats.misses += 1;
        let result: Arc<Vec<SurveyConfig>> =
            Arc::new(active_surveys(surveys.as_slice()).into_iter().cloned().collect());
        debug!(
            active = result.len(),
            total = surveys.len(),
            "active-survey recompute"
        );
        self.active = Some(ActiveSlot {
            surveys: Arc::clone(surveys),
            result: Arc::clone(&result),
        });
        result
    }

    /// The flat classification list for the current survey list.
    pub fn classify(&mut self, surveys: &Arc<Vec<SurveyConfig>>) -> Arc<Vec<ClassificationNode>> {
        let active = self.active(surveys);

        if let Some(slot) = &self.classified
            && Arc::ptr_eq(&slot.active, &active)
        {
            self.classify_stats.hits += 1;
            trace!("classification cache hit");
            return Arc::clone(&slot.result);
        }

        self.classify_stats.misses += 1;
        let refs: Vec<&SurveyConfig> = active.iter().collect();
        let result = Arc::new(classification(&refs));
        debug!(nodes = result.len(), "classification recompute");
        self.classified = Some(ClassifySlot {
            active,
            result: Arc::clone(&result),
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{ClassificationPipeline, ViewportCache};
    use foundation::bounds::GeoBounds;
    use foundation::tile::TileGrid;
    use survey::config::SurveyConfig;
    use viewport::entity::GeoEntity;
    use viewport::query::visible_entities;
    use viewport::store::TileStore;

    fn store() -> Arc<TileStore> {
        Arc::new(TileStore::from_serialized(vec![
            ("0/0".to_string(), vec![GeoEntity::new("f1", 0.5, 0.5)]),
            ("-1/-1".to_string(), vec![GeoEntity::new("f2", -0.9, -0.9)]),
        ]))
    }

    fn survey_doc(id: &str, default: bool) -> SurveyConfig {
        serde_json::from_value(serde_json::json!({
            "default": default,
            "definition": {
                "id": id,
                "name": id,
                "featureTypes": [{"id": "well", "name": "Well"}],
                "observationTypes": ["well"],
                "categories": [{"name": "Water", "members": ["well"]}]
            }
        }))
        .expect("survey doc")
    }

    #[test]
    fn repeated_query_returns_the_cached_result_object() {
        let mut cache = ViewportCache::new(TileGrid::default());
        let store = store();
        let bounds = GeoBounds::from_corners([-1.0, -1.0, 1.0, 1.0]);

        let a = cache.query(bounds, &store);
        let b = cache.query(bounds, &store);

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn changed_bounds_recompute_and_match_a_from_scratch_run() {
        let mut cache = ViewportCache::new(TileGrid::default());
        let store = store();

        let wide = GeoBounds::from_corners([-1.0, -1.0, 1.0, 1.0]);
        let narrow = GeoBounds::from_corners([0.0, 0.0, 1.0, 1.0]);

        let _ = cache.query(wide, &store);
        let cached = cache.query(narrow, &store);

        let scratch: Vec<GeoEntity> = visible_entities(narrow, TileGrid::default(), &store)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(*cached, scratch);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn a_new_store_allocation_is_a_miss_even_with_equal_contents() {
        let mut cache = ViewportCache::new(TileGrid::default());
        let bounds = GeoBounds::from_corners([-1.0, -1.0, 1.0, 1.0]);

        let first = store();
        let second = Arc::new((*first).clone());

        let a = cache.query(bounds, &first);
        let b = cache.query(bounds, &second);

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn the_single_slot_is_last_call_wins() {
        let mut cache = ViewportCache::new(TileGrid::default());
        let store = store();

        let a = GeoBounds::from_corners([-1.0, -1.0, 1.0, 1.0]);
        let b = GeoBounds::from_corners([0.0, 0.0, 1.0, 1.0]);

        let _ = cache.query(a, &store);
        let _ = cache.query(b, &store);
        // The slot now holds `b`; returning to `a` recomputes.
        let _ = cache.query(a, &store);

        assert_eq!(cache.stats().misses, 3);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn invalidate_forces_a_recompute() {
        let mut cache = ViewportCache::new(TileGrid::default());
        let store = store();
        let bounds = GeoBounds::from_corners([-1.0, -1.0, 1.0, 1.0]);

        let _ = cache.query(bounds, &store);
        cache.invalidate();
        let _ = cache.query(bounds, &store);

        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn classification_hits_both_stages_on_an_unchanged_survey_list() {
        let mut pipeline = ClassificationPipeline::new();
        let surveys = Arc::new(vec![survey_doc("s1", true)]);

        let a = pipeline.classify(&surveys);
        let b = pipeline.classify(&surveys);

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(pipeline.active_stats().misses, 1);
        assert_eq!(pipeline.active_stats().hits, 1);
        assert_eq!(pipeline.classify_stats().misses, 1);
        assert_eq!(pipeline.classify_stats().hits, 1);
    }

    #[test]
    fn a_new_survey_list_recomputes_the_whole_chain() {
        let mut pipeline = ClassificationPipeline::new();
        let first = Arc::new(vec![survey_doc("s1", true)]);
        let second = Arc::new(vec![survey_doc("s1", true), survey_doc("s2", false)]);

        let a = pipeline.classify(&first);
        let b = pipeline.classify(&second);

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(pipeline.active_stats().misses, 2);
        assert_eq!(pipeline.classify_stats().misses, 2);
    }

    #[test]
    fn the_custom_survey_wins_through_the_pipeline() {
        let mut pipeline = ClassificationPipeline::new();
        let surveys = Arc::new(vec![survey_doc("bundled", true), survey_doc("mine", false)]);

        let active = pipeline.active(&surveys);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].definition.id, "mine");
    }
}
