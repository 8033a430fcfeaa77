use std::collections::BTreeSet;

use crate::config::{FeatureType, IconEntry, SurveyConfig};

/// An observation type resolved against its survey's feature types.
///
/// `survey_id` is the originating `definition.id`, attached at resolution
/// time so downstream grouping never depends on fields of authored records.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedType {
    pub id: String,
    pub name: String,
    pub survey_id: String,
}

/// A named grouping of observation types, merged within a single survey.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub icon: Option<String>,
    /// Union of member ids across same-name declarations: insertion order,
    /// no duplicates, never shrinks once an id is added.
    pub members: Vec<String>,
    pub survey_id: String,
    /// One entry per member, in member order. A dangling member id stays as
    /// `None` so positions keep lining up with `members`.
    pub list: Vec<Option<ResolvedType>>,
}

/// Observation types no category claims, grouped per originating survey.
#[derive(Debug, Clone, PartialEq)]
pub struct UncategorizedGroup {
    pub survey_id: String,
    pub survey_name: Option<String>,
    pub list: Vec<ResolvedType>,
}

/// One entry of the flat classification list consumed by category pickers.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationNode {
    Category(Category),
    Uncategorized(UncategorizedGroup),
}

/// Every active survey's observation types resolved against that survey's
/// feature types, concatenated in survey order.
///
/// A dangling id stays as `None` rather than being dropped: consumers rely
/// on positional alignment with the declared `observation_types` sequences.
pub fn observation_types(active: &[&SurveyConfig]) -> Vec<Option<ResolvedType>> {
    let mut out = Vec::new();
    for survey in active {
        let def = &survey.definition;
        for type_id in &def.observation_types {
            let resolved = def
                .feature_types
                .iter()
                .find(|t| &t.id == type_id)
                .map(|t| ResolvedType {
                    id: t.id.clone(),
                    name: t.name.clone(),
                    survey_id: def.id.clone(),
                });
            out.push(resolved);
        }
    }
    out
}

/// Per-survey category reduction.
///
/// Within one survey, repeated declarations of the same name fold into one
/// category: the first declaration pins position and icon, later ones union
/// in members not already present. Categories from different surveys are
/// never merged; the per-survey results are concatenated in active order.
pub fn categories(
    active: &[&SurveyConfig],
    observation_types: &[Option<ResolvedType>],
) -> Vec<Category> {
    let mut out: Vec<Category> = Vec::new();

    for survey in active {
        let def = &survey.definition;
        // Reduction scope is this survey's slice of the output only.
        let start = out.len();
        for decl in &def.categories {
            if let Some(cat) = out[start..].iter_mut().find(|c| c.name == decl.name) {
                for member in &decl.members {
                    if !cat.members.contains(member) {
                        cat.members.push(member.clone());
                    }
                }
            } else {
                let mut members: Vec<String> = Vec::new();
                for member in &decl.members {
                    if !members.contains(member) {
                        members.push(member.clone());
                    }
                }
                out.push(Category {
                    name: decl.name.clone(),
                    icon: decl.icon.clone(),
                    members,
                    survey_id: def.id.clone(),
                    list: Vec::new(),
                });
            }
        }
    }

    // Members resolve against the full cross-survey observation-type
    // sequence, first match per id.
    for cat in &mut out {
        cat.list = cat
            .members
            .iter()
            .map(|id| {
                observation_types
                    .iter()
                    .flatten()
                    .find(|t| &t.id == id)
                    .cloned()
            })
            .collect();
    }

    out
}

/// Observation types absent from every category's members, grouped by
/// originating survey in first-appearance order.
///
/// Membership is tested against the full aggregated category set, not
/// per-survey: a type claimed by any survey's category is categorized.
pub fn uncategorized_groups(
    active: &[&SurveyConfig],
    observation_types: &[Option<ResolvedType>],
    categories: &[Category],
) -> Vec<UncategorizedGroup> {
    let claimed: BTreeSet<&str> = categories
        .iter()
        .flat_map(|c| c.members.iter().map(String::as_str))
        .collect();

    let mut out: Vec<UncategorizedGroup> = Vec::new();
    for t in observation_types.iter().flatten() {
        if claimed.contains(t.id.as_str()) {
            continue;
        }

        let idx = match out.iter().position(|g| g.survey_id == t.survey_id) {
            Some(idx) => idx,
            None => {
                let survey_name = active
                    .iter()
                    .find(|s| s.definition.id == t.survey_id)
                    .map(|s| s.definition.name.clone());
                out.push(UncategorizedGroup {
                    survey_id: t.survey_id.clone(),
                    survey_name,
                    list: Vec::new(),
                });
                out.len() - 1
            }
        };
        out[idx].list.push(t.clone());
    }

    out
}

/// The flat classification list: categories first, then uncategorized
/// groups.
pub fn classification(active: &[&SurveyConfig]) -> Vec<ClassificationNode> {
    let types = observation_types(active);
    let cats = categories(active, &types);
    let uncategorized = uncategorized_groups(active, &types, &cats);

    let mut out: Vec<ClassificationNode> =
        cats.into_iter().map(ClassificationNode::Category).collect();
    out.extend(
        uncategorized
            .into_iter()
            .map(ClassificationNode::Uncategorized),
    );
    out
}

/// All active surveys' feature types, concatenated in survey order.
pub fn feature_types<'a>(active: &'a [&SurveyConfig]) -> Vec<&'a FeatureType> {
    active
        .iter()
        .flat_map(|s| s.definition.feature_types.iter())
        .collect()
}

/// First feature type with the given id across the active surveys.
pub fn find_feature_type<'a>(active: &'a [&SurveyConfig], id: &str) -> Option<&'a FeatureType> {
    active
        .iter()
        .flat_map(|s| s.definition.feature_types.iter())
        .find(|t| t.id == id)
}

/// Icon entries from every active survey that carries any.
pub fn icons<'a>(active: &'a [&SurveyConfig]) -> Vec<&'a IconEntry> {
    active
        .iter()
        .filter_map(|s| s.icons.as_ref())
        .flatten()
        .collect()
}

/// First icon whose identifier starts with `id`; entries embed size
/// suffixes, so equality would never match.
pub fn find_icon<'a>(active: &'a [&SurveyConfig], id: &str) -> Option<&'a IconEntry> {
    active
        .iter()
        .filter_map(|s| s.icons.as_ref())
        .flatten()
        .find(|e| e.icon.starts_with(id))
}
