//! Wire models exchanged with the backend.
//!
//! Optional text fields serialize as explicit `null` (no
//! `skip_serializing_if`): profile and portfolio updates are full
//! replaces, so a cleared field must reach the backend as `null` rather
//! than being silently omitted.

use serde::{Deserialize, Serialize};

/// The authenticated user as returned by `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_profile_public: bool,
    #[serde(default = "default_true")]
    pub show_email_in_profile: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_true() -> bool {
    true
}

/// One project record in the user's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub technologies: Option<String>,
    #[serde(default)]
    pub is_visible: bool,
}

/// Body of `PUT /users/me` for the profile form (full replace).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub telegram: Option<String>,
    pub phone: Option<String>,
    pub is_profile_public: bool,
    pub show_email_in_profile: bool,
}

/// Body of `POST /portfolio` and `PUT /portfolio/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub technologies: Option<String>,
    pub is_visible: bool,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_payload_serializes_explicit_nulls() {
        let payload = ItemPayload {
            title: "Site".to_string(),
            description: None,
            image_url: None,
            project_url: None,
            technologies: None,
            is_visible: true,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Site",
                "description": null,
                "image_url": null,
                "project_url": null,
                "technologies": null,
                "is_visible": true,
            })
        );
    }

    #[test]
    fn test_current_user_tolerates_missing_optionals() {
        let user: CurrentUser = serde_json::from_value(json!({
            "id": 7,
            "email": "a@b.c",
            "username": "ab",
            "full_name": null,
        }))
        .unwrap();
        assert_eq!(user.telegram, None);
        assert!(user.show_email_in_profile);
        assert!(user.is_active);
    }
}
