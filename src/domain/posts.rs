//! Post content invariants shared by create and update paths.

use crate::domain::error::DomainError;

/// Storage bound on the post title column.
pub const POST_TITLE_MAX_LEN: usize = 128;

/// A validated title/content pair ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    title: String,
    content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("post title must not be empty"));
        }
        if trimmed.chars().count() > POST_TITLE_MAX_LEN {
            return Err(DomainError::validation(format!(
                "post title exceeds {POST_TITLE_MAX_LEN} characters"
            )));
        }

        Ok(Self {
            title: trimmed.to_string(),
            content: content.into(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_parts(self) -> (String, String) {
        (self.title, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_trims_title() {
        let draft = PostDraft::new("  Hello  ", "body").expect("valid draft");
        assert_eq!(draft.title(), "Hello");
        assert_eq!(draft.content(), "body");
    }

    #[test]
    fn draft_rejects_empty_title() {
        assert!(PostDraft::new("   ", "body").is_err());
    }

    #[test]
    fn draft_rejects_overlong_title() {
        let title = "x".repeat(POST_TITLE_MAX_LEN + 1);
        assert!(PostDraft::new(title, "").is_err());

        let title = "x".repeat(POST_TITLE_MAX_LEN);
        assert!(PostDraft::new(title, "").is_ok());
    }
}
