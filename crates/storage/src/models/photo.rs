use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::Rating;

/// Label shown in place of an author name that was never provided.
pub const ANONYMOUS_AUTHOR: &str = "Anônimo";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Photo {
    pub photo_id: Uuid,
    pub contest_id: Uuid,
    pub category_id: Uuid,
    pub author_name: Option<String>,
    pub url: String,
    pub drive_file_id: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    /// Ratings in submission order. Loaded separately from the photo row.
    #[sqlx(skip)]
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

impl Photo {
    /// Author name for display, falling back to [`ANONYMOUS_AUTHOR`] when
    /// missing or blank.
    pub fn display_author(&self) -> &str {
        match self.author_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => ANONYMOUS_AUTHOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo_by(author_name: Option<&str>) -> Photo {
        Photo {
            photo_id: Uuid::new_v4(),
            contest_id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            author_name: author_name.map(String::from),
            url: "https://example.org/p.jpg".to_string(),
            drive_file_id: None,
            created_at: chrono::Utc::now().naive_utc(),
            ratings: Vec::new(),
        }
    }

    #[test]
    fn test_display_author_uses_name() {
        assert_eq!(photo_by(Some("Maria")).display_author(), "Maria");
    }

    #[test]
    fn test_display_author_falls_back_when_missing_or_blank() {
        assert_eq!(photo_by(None).display_author(), ANONYMOUS_AUTHOR);
        assert_eq!(photo_by(Some("")).display_author(), ANONYMOUS_AUTHOR);
        assert_eq!(photo_by(Some("   ")).display_author(), ANONYMOUS_AUTHOR);
    }
}
