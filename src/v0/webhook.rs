//! Vote event payloads delivered to registered endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::primitives::Identifier;
use crate::validate::{fields, Report, Validate, Violation, WireEnum};

/// Kind of vote event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Upvote,
    /// Sent for deliveries triggered from the webhook test page.
    Test,
}

impl WireEnum for VoteKind {
    const ALLOWED: &'static [&'static str] = &["upvote", "test"];

    fn from_wire(text: &str) -> Option<Self> {
        match text {
            "upvote" => Some(VoteKind::Upvote),
            "test" => Some(VoteKind::Test),
            _ => None,
        }
    }

    fn as_wire(&self) -> &'static str {
        match self {
            VoteKind::Upvote => "upvote",
            VoteKind::Test => "test",
        }
    }
}

impl Validate for VoteKind {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        fields::wire_enum(value, path, report)
    }
}

/// Vote event for a listed bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotVote {
    /// Bot that received the vote.
    pub bot: Identifier,
    /// User who cast it.
    pub user: Identifier,
    #[serde(rename = "type")]
    pub kind: VoteKind,
    /// Weekend votes count double.
    #[serde(rename = "isWeekend")]
    pub is_weekend: bool,
    /// Query string attached to the vote page visit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

const BOT_VOTE_FIELDS: &[&str] = &["bot", "user", "type", "isWeekend", "query"];

impl Validate for BotVote {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, BOT_VOTE_FIELDS, report);

        let bot = fields::required_field::<Identifier>(obj, path, "bot", report);
        let user = fields::required_field::<Identifier>(obj, path, "user", report);
        let kind = fields::required_field::<VoteKind>(obj, path, "type", report);
        let is_weekend = fields::required_boolean(obj, path, "isWeekend", report);
        let query = fields::optional_string(obj, path, "query", report);

        Some(Self {
            bot: bot?,
            user: user?,
            kind: kind?,
            is_weekend: is_weekend?,
            query: query?,
        })
    }
}

/// Vote event for a listed server. No weekend multiplier applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerVote {
    /// Server that received the vote.
    pub guild: Identifier,
    pub user: Identifier,
    #[serde(rename = "type")]
    pub kind: VoteKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

const SERVER_VOTE_FIELDS: &[&str] = &["guild", "user", "type", "query"];

impl Validate for ServerVote {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, SERVER_VOTE_FIELDS, report);

        let guild = fields::required_field::<Identifier>(obj, path, "guild", report);
        let user = fields::required_field::<Identifier>(obj, path, "user", report);
        let kind = fields::required_field::<VoteKind>(obj, path, "type", report);
        let query = fields::optional_string(obj, path, "query", report);

        Some(Self {
            guild: guild?,
            user: user?,
            kind: kind?,
            query: query?,
        })
    }
}

/// A legacy webhook delivery.
///
/// The two variants share the `type` tag; what separates them on the wire is
/// which target member they carry, `bot` or `guild`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Server(ServerVote),
    Bot(BotVote),
}

impl Payload {
    /// The user who cast the vote, whichever target it was for.
    pub fn user(&self) -> &Identifier {
        match self {
            Payload::Server(vote) => &vote.user,
            Payload::Bot(vote) => &vote.user,
        }
    }

    pub fn kind(&self) -> VoteKind {
        match self {
            Payload::Server(vote) => vote.kind,
            Payload::Bot(vote) => vote.kind,
        }
    }
}

impl Validate for Payload {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;

        // The tag gates everything else: an unrecognized kind is rejected
        // before any shape detail is examined.
        let tag = fields::required(obj, path, "type", report)?;
        if let Some(text) = tag.as_str() {
            if VoteKind::from_wire(text).is_none() {
                report.push(Violation::unknown_variant(
                    &fields::join(path, "type"),
                    text,
                    VoteKind::ALLOWED,
                ));
                return None;
            }
        }

        if obj.contains_key("guild") {
            tracing::trace!(variant = "server", "matched vote payload");
            ServerVote::check(value, path, report).map(Payload::Server)
        } else {
            tracing::trace!(variant = "bot", "matched vote payload");
            BotVote::check(value, path, report).map(Payload::Bot)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validate::ViolationKind;

    fn bot_vote_fixture() -> serde_json::Value {
        json!({
            "bot": "264811613708746752",
            "user": "140862798832861184",
            "type": "upvote",
            "isWeekend": true
        })
    }

    #[test]
    fn test_payload_picks_bot_variant() {
        let payload = Payload::validate(&bot_vote_fixture()).unwrap();
        assert_eq!(payload.user().as_str(), "140862798832861184");
        match payload {
            Payload::Bot(vote) => {
                assert!(vote.is_weekend);
                assert_eq!(vote.kind, VoteKind::Upvote);
            }
            Payload::Server(_) => panic!("expected a bot vote"),
        }
    }

    #[test]
    fn test_payload_picks_server_variant_by_guild_member() {
        let payload = Payload::validate(&json!({
            "guild": "417723229721853963",
            "user": "140862798832861184",
            "type": "test",
            "query": "?utm=test"
        }))
        .unwrap();
        assert_eq!(payload.user().as_str(), "140862798832861184");
        match payload {
            Payload::Server(vote) => assert_eq!(vote.kind, VoteKind::Test),
            Payload::Bot(_) => panic!("expected a server vote"),
        }
    }

    #[test]
    fn test_payload_rejects_unknown_kind_before_shape() {
        let err = Payload::validate(&json!({
            "bot": "264811613708746752",
            "type": "downvote"
        }))
        .unwrap_err();
        assert_eq!(err.violations().len(), 1);
        let violation = &err.violations()[0];
        assert_eq!(violation.kind, ViolationKind::UnknownVariant);
        assert_eq!(violation.path, "type");
        assert!(violation.expected.contains("upvote"));
        assert!(violation.expected.contains("test"));
    }

    #[test]
    fn test_payload_requires_the_tag() {
        let err = Payload::validate(&json!({
            "bot": "264811613708746752",
            "user": "140862798832861184",
            "isWeekend": false
        }))
        .unwrap_err();
        assert!(err.cites("type"));
        assert_eq!(err.violations().len(), 1);
    }

    #[test]
    fn test_payload_aggregates_variant_faults() {
        let err = Payload::validate(&json!({
            "bot": "short",
            "type": "upvote",
            "isWeekend": "yes"
        }))
        .unwrap_err();
        assert!(err.cites("bot"));
        assert!(err.cites("user"));
        assert!(err.cites("isWeekend"));
    }

    #[test]
    fn test_serde_union_round_trip() {
        let payload = Payload::validate(&bot_vote_fixture()).unwrap();
        let wire = serde_json::to_value(&payload).unwrap();
        assert_eq!(wire, bot_vote_fixture());
        let back: Payload = serde_json::from_value(wire).unwrap();
        assert_eq!(back, payload);
    }
}
