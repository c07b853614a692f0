//! Vote records, paging queries, and vote-status shapes

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::primitives::{Date, Identifier, Timestamp};
use crate::validate::{fields, Report, Validate, Violation};

use super::project::Platform;

/// One voting event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub user_id: Identifier,
    /// Target's id on its source platform.
    pub platform_id: Identifier,
    /// Vote multiplier in effect when the vote was cast.
    pub weight: i64,
    pub created_at: Timestamp,
    /// When the vote stops counting. Later than `created_at` in practice,
    /// though the wire contract does not state it as a rule.
    pub expires_at: Timestamp,
}

const VOTE_FIELDS: &[&str] = &["user_id", "platform_id", "weight", "created_at", "expires_at"];

impl Validate for Vote {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, VOTE_FIELDS, report);

        let user_id = fields::required_field::<Identifier>(obj, path, "user_id", report);
        let platform_id = fields::required_field::<Identifier>(obj, path, "platform_id", report);
        let weight = fields::required_integer(obj, path, "weight", report);
        let created_at = fields::required_field::<Timestamp>(obj, path, "created_at", report);
        let expires_at = fields::required_field::<Timestamp>(obj, path, "expires_at", report);

        Some(Self {
            user_id: user_id?,
            platform_id: platform_id?,
            weight: weight?,
            created_at: created_at?,
            expires_at: expires_at?,
        })
    }
}

/// Paging parameters for a project's votes.
///
/// At least one bound must be present. When both are, consumers page by
/// `cursor` and the server ignores `startDate`; that precedence is the
/// documented contract, not something checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotesQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(
        rename = "startDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<Date>,
}

impl VotesQuery {
    /// Query continuing from a prior response's cursor.
    pub fn by_cursor(cursor: impl Into<String>) -> Self {
        Self {
            cursor: Some(cursor.into()),
            start_date: None,
        }
    }

    /// Query starting from a calendar date.
    pub fn since(start_date: Date) -> Self {
        Self {
            cursor: None,
            start_date: Some(start_date),
        }
    }
}

const VOTES_QUERY_FIELDS: &[&str] = &["cursor", "startDate"];

impl Validate for VotesQuery {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, VOTES_QUERY_FIELDS, report);

        let cursor = fields::optional_string(obj, path, "cursor", report);
        let start_date = fields::optional_field::<Date>(obj, path, "startDate", report);

        // Refinement after the member checks: paging needs at least one bound.
        if matches!((&cursor, &start_date), (Some(None), Some(None))) {
            report.push(Violation::missing_combination(
                path,
                &["cursor", "startDate"],
            ));
            return None;
        }

        Some(Self {
            cursor: cursor?,
            start_date: start_date?,
        })
    }
}

/// One page of a project's votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotesResponse {
    /// Continuation token for the next page; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    pub votes: Vec<Vote>,
}

const VOTES_RESPONSE_FIELDS: &[&str] = &["cursor", "votes"];

impl Validate for VotesResponse {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, VOTES_RESPONSE_FIELDS, report);

        let cursor = fields::optional_string(obj, path, "cursor", report);
        let votes = fields::required_field::<Vec<Vote>>(obj, path, "votes", report);

        Some(Self {
            cursor: cursor?,
            votes: votes?,
        })
    }
}

/// Vote-status query for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteStatusQuery {
    #[serde(rename = "userId")]
    pub user_id: Identifier,
    /// Platform the vote was cast through; absent means a native-platform
    /// vote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Platform>,
}

const VOTE_STATUS_QUERY_FIELDS: &[&str] = &["userId", "source"];

impl Validate for VoteStatusQuery {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, VOTE_STATUS_QUERY_FIELDS, report);

        let user_id = fields::required_field::<Identifier>(obj, path, "userId", report);
        let source = fields::optional_field::<Platform>(obj, path, "source", report);

        Some(Self {
            user_id: user_id?,
            source: source?,
        })
    }
}

/// Current vote standing for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteStatus {
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub weight: i64,
}

const VOTE_STATUS_FIELDS: &[&str] = &["created_at", "expires_at", "weight"];

impl Validate for VoteStatus {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, VOTE_STATUS_FIELDS, report);

        let created_at = fields::required_field::<Timestamp>(obj, path, "created_at", report);
        let expires_at = fields::required_field::<Timestamp>(obj, path, "expires_at", report);
        let weight = fields::required_integer(obj, path, "weight", report);

        Some(Self {
            created_at: created_at?,
            expires_at: expires_at?,
            weight: weight?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validate::ViolationKind;

    fn vote_fixture() -> serde_json::Value {
        json!({
            "user_id": "287731768369479682",
            "platform_id": "264811613708746752",
            "weight": 2,
            "created_at": "2024-05-01T10:00:00Z",
            "expires_at": "2024-05-01T22:00:00Z"
        })
    }

    #[test]
    fn test_vote_accepts_full_record() {
        let vote = Vote::validate(&vote_fixture()).unwrap();
        assert_eq!(vote.weight, 2);
        assert!(vote.created_at < vote.expires_at);
    }

    #[test]
    fn test_vote_cites_each_missing_member() {
        let err = Vote::validate(&json!({ "weight": 1 })).unwrap_err();
        assert!(err.cites("user_id"));
        assert!(err.cites("platform_id"));
        assert!(err.cites("created_at"));
        assert!(err.cites("expires_at"));
        assert_eq!(err.violations().len(), 4);
    }

    #[test]
    fn test_votes_query_needs_some_bound() {
        let err = VotesQuery::validate(&json!({})).unwrap_err();
        assert!(err.has(ViolationKind::MissingRequiredCombination));
        assert!(err.cites("$root"));

        assert!(VotesQuery::validate(&json!({ "cursor": "b64token" })).is_ok());
        assert!(VotesQuery::validate(&json!({ "startDate": "2024-05-01" })).is_ok());
        assert!(VotesQuery::validate(&json!({
            "cursor": "b64token",
            "startDate": "2024-05-01"
        }))
        .is_ok());
    }

    #[test]
    fn test_votes_query_null_members_count_as_absent() {
        let err = VotesQuery::validate(&json!({ "cursor": null, "startDate": null })).unwrap_err();
        assert!(err.has(ViolationKind::MissingRequiredCombination));
    }

    #[test]
    fn test_votes_query_checks_date_format_first() {
        let err = VotesQuery::validate(&json!({ "startDate": "May 1st" })).unwrap_err();
        assert!(err.cites("startDate"));
        assert!(err.has(ViolationKind::InvalidFormat));
    }

    #[test]
    fn test_votes_response_pages() {
        let page = VotesResponse::validate(&json!({
            "cursor": "eyJvZmZzZXQiOjEwMH0",
            "votes": [vote_fixture()]
        }))
        .unwrap();
        assert_eq!(page.votes.len(), 1);

        let last = VotesResponse::validate(&json!({ "votes": [] })).unwrap();
        assert!(last.cursor.is_none());
        assert!(last.votes.is_empty());
    }

    #[test]
    fn test_vote_status_query_defaults_source_to_native() {
        let query =
            VoteStatusQuery::validate(&json!({ "userId": "287731768369479682" })).unwrap();
        assert!(query.source.is_none());

        let sourced = VoteStatusQuery::validate(&json!({
            "userId": "287731768369479682",
            "source": "discord"
        }))
        .unwrap();
        assert_eq!(sourced.source, Some(Platform::Discord));
    }

    #[test]
    fn test_vote_status_reads_window() {
        let status = VoteStatus::validate(&json!({
            "created_at": "2024-05-01T10:00:00Z",
            "expires_at": "2024-05-01T22:00:00Z",
            "weight": 1
        }))
        .unwrap();
        assert_eq!(status.weight, 1);
    }
}
