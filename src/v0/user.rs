//! User profiles and voter-list entries

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::primitives::Identifier;
use crate::validate::{fields, Report, Validate};

/// Social profile links nested under a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reddit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

const SOCIAL_FIELDS: &[&str] = &["youtube", "reddit", "twitter", "instagram", "github"];

impl Validate for Social {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, SOCIAL_FIELDS, report);

        let youtube = fields::optional_string(obj, path, "youtube", report);
        let reddit = fields::optional_string(obj, path, "reddit", report);
        let twitter = fields::optional_string(obj, path, "twitter", report);
        let instagram = fields::optional_string(obj, path, "instagram", report);
        let github = fields::optional_string(obj, path, "github", report);

        Some(Self {
            youtube: youtube?,
            reddit: reddit?,
            twitter: twitter?,
            instagram: instagram?,
            github: github?,
        })
    }
}

/// A user profile.
///
/// The `mod` wire member is a Rust keyword, so the struct calls it
/// `moderator` and maps it back on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Identifier,
    pub username: String,
    pub discriminator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(rename = "defAvatar")]
    pub def_avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<Social>,
    /// Profile accent color, as a hex string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub supporter: bool,
    #[serde(rename = "certifiedDev")]
    pub certified_dev: bool,
    #[serde(rename = "mod")]
    pub moderator: bool,
    #[serde(rename = "webMod")]
    pub web_mod: bool,
    pub admin: bool,
}

const USER_FIELDS: &[&str] = &[
    "id",
    "username",
    "discriminator",
    "avatar",
    "defAvatar",
    "bio",
    "banner",
    "social",
    "color",
    "supporter",
    "certifiedDev",
    "mod",
    "webMod",
    "admin",
];

impl Validate for User {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, USER_FIELDS, report);

        let id = fields::required_field::<Identifier>(obj, path, "id", report);
        let username = fields::required_string(obj, path, "username", report);
        let discriminator = fields::required_string(obj, path, "discriminator", report);
        let avatar = fields::optional_string(obj, path, "avatar", report);
        let def_avatar = fields::required_string(obj, path, "defAvatar", report);
        let bio = fields::optional_string(obj, path, "bio", report);
        let banner = fields::optional_string(obj, path, "banner", report);
        let social = fields::optional_field::<Social>(obj, path, "social", report);
        let color = fields::optional_string(obj, path, "color", report);
        let supporter = fields::required_boolean(obj, path, "supporter", report);
        let certified_dev = fields::required_boolean(obj, path, "certifiedDev", report);
        let moderator = fields::required_boolean(obj, path, "mod", report);
        let web_mod = fields::required_boolean(obj, path, "webMod", report);
        let admin = fields::required_boolean(obj, path, "admin", report);

        Some(Self {
            id: id?,
            username: username?,
            discriminator: discriminator?,
            avatar: avatar?,
            def_avatar: def_avatar?,
            bio: bio?,
            banner: banner?,
            social: social?,
            color: color?,
            supporter: supporter?,
            certified_dev: certified_dev?,
            moderator: moderator?,
            web_mod: web_mod?,
            admin: admin?,
        })
    }
}

/// Abbreviated user record returned in voter lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleUser {
    pub username: String,
    pub id: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

const SIMPLE_USER_FIELDS: &[&str] = &["username", "id", "avatar"];

impl Validate for SimpleUser {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, SIMPLE_USER_FIELDS, report);

        let username = fields::required_string(obj, path, "username", report);
        let id = fields::required_field::<Identifier>(obj, path, "id", report);
        let avatar = fields::optional_string(obj, path, "avatar", report);

        Some(Self {
            username: username?,
            id: id?,
            avatar: avatar?,
        })
    }
}

/// Last voters for a bot. The API serves at most 1000 entries; the cap is
/// the server's, not checked here.
pub type VoterList = Vec<SimpleUser>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user_fixture() -> serde_json::Value {
        json!({
            "id": "140862798832861184",
            "username": "Xetera",
            "discriminator": "0001",
            "defAvatar": "322c936a8c8be1b803cd94861bdfa868",
            "social": { "github": "xetera" },
            "supporter": false,
            "certifiedDev": false,
            "mod": false,
            "webMod": false,
            "admin": false
        })
    }

    #[test]
    fn test_user_accepts_profile_with_nested_social() {
        let user = User::validate(&user_fixture()).unwrap();
        assert_eq!(user.social.unwrap().github.as_deref(), Some("xetera"));
        assert!(!user.moderator);
    }

    #[test]
    fn test_user_maps_mod_keyword_on_the_wire() {
        let user = User::validate(&user_fixture()).unwrap();
        let wire = serde_json::to_value(&user).unwrap();
        assert_eq!(wire["mod"], json!(false));
        assert!(wire.get("moderator").is_none());
    }

    #[test]
    fn test_user_cites_nested_social_faults() {
        let mut raw = user_fixture();
        raw["social"] = json!({ "github": 42 });
        let err = User::validate(&raw).unwrap_err();
        assert!(err.cites("social.github"));
    }

    #[test]
    fn test_user_requires_every_role_flag() {
        let mut raw = user_fixture();
        raw.as_object_mut().unwrap().remove("admin");
        let err = User::validate(&raw).unwrap_err();
        assert!(err.cites("admin"));
    }

    #[test]
    fn test_voter_list_validates_per_entry() {
        let voters = VoterList::validate(&json!([
            { "username": "Xetera", "id": "140862798832861184" },
            { "username": "Luca", "id": "129908908096487424", "avatar": "a_1241439176f8908a2" }
        ]))
        .unwrap();
        assert_eq!(voters.len(), 2);

        let err = VoterList::validate(&json!([{ "username": "Xetera" }])).unwrap_err();
        assert!(err.cites("[0].id"));
    }
}
