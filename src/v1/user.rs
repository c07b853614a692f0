//! User identity shape

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::primitives::Identifier;
use crate::validate::{fields, Report, Validate};

/// A user as embedded in v1 responses and webhook payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Identifier,
    /// Id on the user's source platform, when linked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<Identifier>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

const USER_FIELDS: &[&str] = &["id", "platform_id", "username", "avatar"];

impl Validate for User {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, USER_FIELDS, report);

        let id = fields::required_field::<Identifier>(obj, path, "id", report);
        let platform_id = fields::optional_field::<Identifier>(obj, path, "platform_id", report);
        let username = fields::required_string(obj, path, "username", report);
        let avatar = fields::optional_string(obj, path, "avatar", report);

        Some(Self {
            id: id?,
            platform_id: platform_id?,
            username: username?,
            avatar: avatar?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_accepts_minimal_record() {
        let user = User::validate(&json!({
            "id": "287731768369479682",
            "username": "sans"
        }))
        .unwrap();
        assert!(user.platform_id.is_none());
        assert!(user.avatar.is_none());
    }

    #[test]
    fn test_user_null_platform_id_reads_as_absent() {
        let user = User::validate(&json!({
            "id": "287731768369479682",
            "platform_id": null,
            "username": "sans"
        }))
        .unwrap();
        assert!(user.platform_id.is_none());
    }

    #[test]
    fn test_user_checks_platform_id_format() {
        let err = User::validate(&json!({
            "id": "287731768369479682",
            "platform_id": "12",
            "username": "sans"
        }))
        .unwrap_err();
        assert!(err.cites("platform_id"));
    }
}
