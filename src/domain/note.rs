//! Note domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{MAX_CONTENT_LENGTH, MAX_TAGS_COUNT};
use crate::errors::{AppError, AppResult};

/// Note owned by a single user, optionally filed under one of their folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_id: i32,
    /// Weak reference to a folder; `None` means unfiled.
    pub folder_id: Option<i32>,
    pub is_favorite: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Note {
    /// Build a validated, unsaved note. `None` tags means no tags.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        user_id: i32,
        tags: Option<Vec<String>>,
    ) -> AppResult<Self> {
        let (title, content) = (title.into(), content.into());
        Self::validate(&title, &content, tags.as_deref())?;

        Ok(Self {
            id: 0,
            title,
            content,
            user_id,
            folder_id: None,
            is_favorite: false,
            tags: tags.unwrap_or_default(),
            timestamp: Utc::now(),
        })
    }

    fn validate(title: &str, content: &str, tags: Option<&[String]>) -> AppResult<()> {
        if title.is_empty() {
            return Err(AppError::validation("Note title cannot be empty"));
        }
        if content.is_empty() {
            return Err(AppError::validation("Note content cannot be empty"));
        }
        if content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(AppError::validation(format!(
                "Note content cannot exceed {} characters",
                MAX_CONTENT_LENGTH
            )));
        }
        if tags.is_some_and(|tags| tags.len() > MAX_TAGS_COUNT) {
            return Err(AppError::validation(format!(
                "A note cannot have more than {} tags",
                MAX_TAGS_COUNT
            )));
        }

        Ok(())
    }

    /// Overwrite title, content and tags. Id, owner, favorite flag and
    /// folder assignment are left alone.
    pub fn apply(&mut self, update: Note) {
        self.title = update.title;
        self.content = update.content;
        self.tags = update.tags;
    }

    /// Case-sensitive match on title or content substring, or exact tag.
    pub fn matches(&self, query: &str) -> bool {
        self.title.contains(query)
            || self.content.contains(query)
            || self.tags.iter().any(|tag| tag == query)
    }
}

/// Note as presented to clients
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NoteResponse {
    #[schema(example = 12)]
    pub id: i32,
    #[schema(example = "Groceries")]
    pub title: String,
    #[schema(example = "milk, eggs")]
    pub content: String,
    pub folder_id: Option<i32>,
    pub is_favorite: bool,
    pub tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            folder_id: note.folder_id,
            is_favorite: note.is_favorite,
            tags: note.tags,
            timestamp: note.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_new_note_defaults() {
        let note = Note::new("Groceries", "milk, eggs", 1, None).unwrap();
        assert_eq!(note.id, 0);
        assert!(note.tags.is_empty());
        assert!(note.folder_id.is_none());
        assert!(!note.is_favorite);
    }

    #[test]
    fn test_validation_rules() {
        let long_content = "x".repeat(MAX_CONTENT_LENGTH + 1);
        let cases = [
            ("", "content", None, "title cannot be empty"),
            ("title", "", None, "content cannot be empty"),
            ("title", long_content.as_str(), None, "cannot exceed"),
            ("title", "content", tags(&["a", "b", "c", "d"]), "more than"),
        ];

        for (title, content, tags, expected) in cases {
            let err = Note::new(title, content, 1, tags).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
            assert!(err.to_string().contains(expected), "got '{}'", err);
        }
    }

    #[test]
    fn test_content_at_limit_accepted() {
        let content = "x".repeat(MAX_CONTENT_LENGTH);
        assert!(Note::new("title", content, 1, tags(&["a", "b", "c"])).is_ok());
    }

    #[test]
    fn test_apply_keeps_folder_and_favorite() {
        let mut note = Note::new("old", "old content", 1, None).unwrap();
        note.id = 5;
        note.folder_id = Some(3);
        note.is_favorite = true;

        note.apply(Note::new("new", "new content", 1, tags(&["t"])).unwrap());

        assert_eq!(note.id, 5);
        assert_eq!(note.title, "new");
        assert_eq!(note.content, "new content");
        assert_eq!(note.tags, vec!["t".to_string()]);
        assert_eq!(note.folder_id, Some(3));
        assert!(note.is_favorite);
    }

    #[test]
    fn test_matches() {
        let note = Note::new("Groceries", "milk, eggs", 1, tags(&["shop"])).unwrap();
        assert!(note.matches("Groc"));
        assert!(note.matches("eggs"));
        assert!(note.matches("shop"));
        assert!(!note.matches("sho"));
        assert!(!note.matches("groceries"));
    }
}
