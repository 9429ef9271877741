use uuid::Uuid;

use crate::directory::dto::SkillFilter;
use crate::store::{Database, User};

fn matches(skills: &[String], needle: &str) -> bool {
    skills
        .iter()
        .any(|s| s.to_lowercase().contains(&needle.to_lowercase()))
}

/// Public users other than the requester, optionally narrowed by a
/// case-insensitive substring match against the chosen skill list(s).
pub fn search<'a>(
    db: &'a Database,
    requester: Uuid,
    skill: Option<&str>,
    filter: SkillFilter,
) -> Vec<&'a User> {
    db.users
        .iter()
        .filter(|u| u.is_public && u.id != requester)
        .filter(|u| match skill {
            None => true,
            Some(needle) => match filter {
                SkillFilter::Offered => matches(&u.skills_offered, needle),
                SkillFilter::Wanted => matches(&u.skills_wanted, needle),
                SkillFilter::All => {
                    matches(&u.skills_offered, needle) || matches(&u.skills_wanted, needle)
                }
            },
        })
        .collect()
}
