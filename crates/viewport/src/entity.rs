use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tag key linking an observation back to the feature it annotates.
///
/// A relation, not ownership: the feature lives in its own store and may not
/// be loaded when the observation is.
pub const FEATURE_REF_TAG: &str = "osm-p2p-id";

/// A geotagged map entity: an upstream feature or a surveyor's observation.
///
/// Tags are kept as raw JSON values; the data-sync collaborator owns their
/// schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoEntity {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: BTreeMap<String, serde_json::Value>,
}

impl GeoEntity {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
            tags: BTreeMap::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// The annotated feature's id, for observations that reference one.
    pub fn feature_ref(&self) -> Option<&str> {
        self.tags.get(FEATURE_REF_TAG).and_then(|v| v.as_str())
    }
}
