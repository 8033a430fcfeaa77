use serde::{Deserialize, Serialize};

/// A survey configuration document, as supplied by the configuration-loading
/// collaborator (bundled definitions plus any the user installed).
///
/// Documents are loosely authored JSON: unknown fields are ignored and
/// optional sections default to empty, so a sparse document still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Bundled surveys ship with `default: true`; anything the user installs
    /// is custom.
    #[serde(default)]
    pub default: bool,
    pub definition: SurveyDefinition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<IconEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub feature_types: Vec<FeatureType>,
    /// Type ids referencing `feature_types`. A dangling reference is kept and
    /// resolves to a hole downstream, never an error.
    #[serde(default)]
    pub observation_types: Vec<String>,
    #[serde(default)]
    pub categories: Vec<CategoryDef>,
}

/// A preset record. Authored documents carry more fields (geometry, tag
/// templates); only what classification needs is modeled here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureType {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

/// Icon identifiers embed size variants ("well-24px"), so lookups match by
/// prefix rather than equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconEntry {
    pub icon: String,
}
