use crate::config::SurveyConfig;

/// Surveys the user installed themselves (`default != true`).
pub fn custom_surveys(all: &[SurveyConfig]) -> Vec<&SurveyConfig> {
    all.iter().filter(|s| !s.default).collect()
}

/// Surveys bundled with the application (`default == true`).
pub fn default_surveys(all: &[SurveyConfig]) -> Vec<&SurveyConfig> {
    all.iter().filter(|s| s.default).collect()
}

/// The configurations currently in effect.
///
/// A global override: the presence of any custom survey disables every
/// bundled default, not just overlapping ones.
pub fn active_surveys(all: &[SurveyConfig]) -> Vec<&SurveyConfig> {
    let custom = custom_surveys(all);
    if !custom.is_empty() {
        return custom;
    }
    default_surveys(all)
}
