use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Registers a photo whose file is already hosted at `url`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePhotoRequest {
    pub category_id: Uuid,

    #[validate(length(max = 255))]
    pub author_name: Option<String>,

    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,

    #[validate(length(min = 1, max = 255))]
    pub drive_file_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_must_be_valid() {
        let mut req = CreatePhotoRequest {
            category_id: Uuid::new_v4(),
            author_name: Some("Joana".to_string()),
            url: "https://lh3.googleusercontent.com/d/abc123".to_string(),
            drive_file_id: Some("abc123".to_string()),
        };
        assert!(req.validate().is_ok());

        req.url = "not a url".to_string();
        assert!(req.validate().is_err());
    }
}
