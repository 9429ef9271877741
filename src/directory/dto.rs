use serde::Deserialize;

/// Which skill list the substring filter applies to. Anything other than
/// `offered` or `wanted` falls back to both lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkillFilter {
    Offered,
    Wanted,
    #[default]
    All,
}

impl SkillFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("offered") => SkillFilter::Offered,
            Some("wanted") => SkillFilter::Wanted,
            _ => SkillFilter::All,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub skill: Option<String>,
    #[serde(rename = "type")]
    pub filter: Option<String>,
}
