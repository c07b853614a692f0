//! Tagged event envelope and integration shapes
//!
//! Deliveries arrive as `{ "type": <tag>, "data": <body> }`. The tag is a
//! closed set; dispatch is an exact string match from tag to body shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::primitives::{Identifier, WebhookSecret};
use crate::validate::{fields, Report, Validate, Violation, WireEnum};

use super::vote::Vote;

/// Webhook event kind. Doubles as the subscription scope set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookKind {
    #[serde(rename = "webhook.test")]
    Test,
    #[serde(rename = "integration.create")]
    IntegrationCreate,
    #[serde(rename = "integration.delete")]
    IntegrationDelete,
    #[serde(rename = "vote.create")]
    VoteCreate,
}

impl WireEnum for WebhookKind {
    const ALLOWED: &'static [&'static str] = &[
        "webhook.test",
        "integration.create",
        "integration.delete",
        "vote.create",
    ];

    fn from_wire(text: &str) -> Option<Self> {
        match text {
            "webhook.test" => Some(WebhookKind::Test),
            "integration.create" => Some(WebhookKind::IntegrationCreate),
            "integration.delete" => Some(WebhookKind::IntegrationDelete),
            "vote.create" => Some(WebhookKind::VoteCreate),
            _ => None,
        }
    }

    fn as_wire(&self) -> &'static str {
        match self {
            WebhookKind::Test => "webhook.test",
            WebhookKind::IntegrationCreate => "integration.create",
            WebhookKind::IntegrationDelete => "integration.delete",
            WebhookKind::VoteCreate => "vote.create",
        }
    }
}

impl Validate for WebhookKind {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        fields::wire_enum(value, path, report)
    }
}

/// Delivery-check body. Carries nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPing {}

impl Validate for TestPing {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, &[], report);
        Some(Self {})
    }
}

/// Body of an `integration.create` delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationCreated {
    /// Signing secret for verifying subsequent deliveries.
    pub webhook_secret: WebhookSecret,
    pub project_id: Identifier,
    /// User who connected the integration.
    pub user_id: Identifier,
}

const INTEGRATION_CREATED_FIELDS: &[&str] = &["webhook_secret", "project_id", "user_id"];

impl Validate for IntegrationCreated {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, INTEGRATION_CREATED_FIELDS, report);

        let webhook_secret =
            fields::required_field::<WebhookSecret>(obj, path, "webhook_secret", report);
        let project_id = fields::required_field::<Identifier>(obj, path, "project_id", report);
        let user_id = fields::required_field::<Identifier>(obj, path, "user_id", report);

        Some(Self {
            webhook_secret: webhook_secret?,
            project_id: project_id?,
            user_id: user_id?,
        })
    }
}

/// Body of an `integration.delete` delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationDeleted {
    pub project_id: Identifier,
    pub user_id: Identifier,
}

const INTEGRATION_DELETED_FIELDS: &[&str] = &["project_id", "user_id"];

impl Validate for IntegrationDeleted {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, INTEGRATION_DELETED_FIELDS, report);

        let project_id = fields::required_field::<Identifier>(obj, path, "project_id", report);
        let user_id = fields::required_field::<Identifier>(obj, path, "user_id", report);

        Some(Self {
            project_id: project_id?,
            user_id: user_id?,
        })
    }
}

/// A v1 webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Payload {
    #[serde(rename = "webhook.test")]
    Test(TestPing),
    #[serde(rename = "integration.create")]
    IntegrationCreate(IntegrationCreated),
    #[serde(rename = "integration.delete")]
    IntegrationDelete(IntegrationDeleted),
    #[serde(rename = "vote.create")]
    VoteCreate(Vote),
}

impl Payload {
    /// The event kind this payload was delivered under.
    pub fn kind(&self) -> WebhookKind {
        match self {
            Payload::Test(_) => WebhookKind::Test,
            Payload::IntegrationCreate(_) => WebhookKind::IntegrationCreate,
            Payload::IntegrationDelete(_) => WebhookKind::IntegrationDelete,
            Payload::VoteCreate(_) => WebhookKind::VoteCreate,
        }
    }
}

const PAYLOAD_FIELDS: &[&str] = &["type", "data"];

impl Validate for Payload {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, PAYLOAD_FIELDS, report);

        // Both envelope members are checked before either gates the other,
        // so a payload missing both reports both.
        let tag = fields::required(obj, path, "type", report);
        let data = fields::required(obj, path, "data", report);
        let (tag, data) = (tag?, data?);

        let tag_path = fields::join(path, "type");
        let text = fields::string(tag, &tag_path, report)?;
        let kind = match WebhookKind::from_wire(text) {
            Some(kind) => kind,
            None => {
                report.push(Violation::unknown_variant(
                    &tag_path,
                    text,
                    WebhookKind::ALLOWED,
                ));
                return None;
            }
        };

        tracing::trace!(tag = kind.as_wire(), "matched webhook tag");
        let data_path = fields::join(path, "data");
        match kind {
            WebhookKind::Test => TestPing::check(data, &data_path, report).map(Payload::Test),
            WebhookKind::IntegrationCreate => {
                IntegrationCreated::check(data, &data_path, report).map(Payload::IntegrationCreate)
            }
            WebhookKind::IntegrationDelete => {
                IntegrationDeleted::check(data, &data_path, report).map(Payload::IntegrationDelete)
            }
            WebhookKind::VoteCreate => {
                Vote::check(data, &data_path, report).map(Payload::VoteCreate)
            }
        }
    }
}

/// Response to connecting an integration: where deliveries will go and
/// which scopes were subscribed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationResponse {
    /// Webhook delivery URL.
    pub url: String,
    pub routes: Vec<WebhookKind>,
}

const INTEGRATION_RESPONSE_FIELDS: &[&str] = &["url", "routes"];

impl Validate for IntegrationResponse {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, INTEGRATION_RESPONSE_FIELDS, report);

        let url = fields::required_string(obj, path, "url", report);
        let routes = fields::required_field::<Vec<WebhookKind>>(obj, path, "routes", report);

        if let Some(routes) = &routes {
            check_unique_routes(routes, &fields::join(path, "routes"), report);
        }

        Some(Self {
            url: url?,
            routes: routes?,
        })
    }
}

/// Refinement after the member checks: a subscription names each scope once.
fn check_unique_routes(routes: &[WebhookKind], path: &str, report: &mut Report) {
    let mut seen = Vec::new();
    let mut duplicated = Vec::new();
    for kind in routes {
        let literal = kind.as_wire();
        if seen.contains(&literal) {
            if !duplicated.contains(&literal) {
                duplicated.push(literal);
            }
        } else {
            seen.push(literal);
        }
    }
    if !duplicated.is_empty() {
        report.push(Violation::duplicate_value(path, &duplicated));
    }
}
