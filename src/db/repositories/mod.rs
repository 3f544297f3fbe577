pub mod activity_logs;
pub mod comments;
pub mod documents;
pub mod entity_refs;
pub mod milestones;
pub mod notifications;
pub mod persons;
pub mod project_duties;
pub mod projects;
pub mod teams;
pub mod timeline_phases;
pub mod timelines;
pub mod user_duties;
pub mod user_teams;
pub mod users;

/// A resolved page window. Built by the service layer from
/// `skipCount`/`maxResultCount` after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }
}

/// `%keyword%` for ILIKE filters, or `None` for a missing or blank keyword.
pub(crate) fn like_pattern(keyword: Option<&str>) -> Option<String> {
    let trimmed = keyword?.trim();
    if trimmed.is_empty() {
        return None;
    }
    let escaped = trimmed
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{}%", escaped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keyword_is_no_filter() {
        assert_eq!(like_pattern(None), None);
        assert_eq!(like_pattern(Some("   ")), None);
    }

    #[test]
    fn keyword_is_trimmed_and_wrapped() {
        assert_eq!(like_pattern(Some(" alpha ")), Some("%alpha%".to_string()));
    }

    #[test]
    fn wildcards_in_keyword_are_escaped() {
        assert_eq!(like_pattern(Some("50%_off")), Some("%50\\%\\_off%".to_string()));
    }
}
