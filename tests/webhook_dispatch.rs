//! Webhook Dispatch Tests
//!
//! The discriminated unions of both API versions:
//! - The tag selects exactly one variant schema
//! - Unknown tags fail with UNKNOWN_VARIANT listing every accepted literal
//! - Variant body faults are cited under the data path
//! - v0 deliveries split on the guild member, bot versus server

use botboard_model::{parse_json, PayloadError, v0, v1, Validate, ViolationKind};
use serde_json::json;

// =============================================================================
// Helper Fixtures
// =============================================================================

fn v1_vote_data() -> serde_json::Value {
    json!({
        "user_id": "287731768369479682",
        "platform_id": "264811613708746752",
        "weight": 1,
        "created_at": "2024-05-01T10:00:00Z",
        "expires_at": "2024-05-01T22:00:00Z"
    })
}

// =============================================================================
// v1 Tag Dispatch
// =============================================================================

/// Each accepted tag selects its own variant.
#[test]
fn test_v1_each_tag_selects_its_variant() {
    let cases = [
        (json!({ "type": "webhook.test", "data": {} }), v1::WebhookKind::Test),
        (
            json!({ "type": "integration.create", "data": {
                "webhook_secret": "whs_Ab12",
                "project_id": "287731768369479682",
                "user_id": "140862798832861184"
            }}),
            v1::WebhookKind::IntegrationCreate,
        ),
        (
            json!({ "type": "integration.delete", "data": {
                "project_id": "287731768369479682",
                "user_id": "140862798832861184"
            }}),
            v1::WebhookKind::IntegrationDelete,
        ),
        (
            json!({ "type": "vote.create", "data": v1_vote_data() }),
            v1::WebhookKind::VoteCreate,
        ),
    ];

    for (raw, expected) in cases {
        let payload = v1::Payload::validate(&raw).unwrap();
        assert_eq!(payload.kind(), expected);
    }
}

/// An unknown tag is rejected with every accepted literal named.
#[test]
fn test_v1_unknown_tag_lists_all_literals() {
    let err = v1::Payload::validate(&json!({
        "type": "unknown.event",
        "data": {}
    }))
    .unwrap_err();

    assert_eq!(err.violations().len(), 1);
    let violation = &err.violations()[0];
    assert_eq!(violation.kind, ViolationKind::UnknownVariant);
    assert_eq!(violation.actual, "unknown.event");
    for literal in [
        "webhook.test",
        "integration.create",
        "integration.delete",
        "vote.create",
    ] {
        assert!(
            violation.expected.contains(literal),
            "expected detail missing {}",
            literal
        );
    }
}

/// A matching tag with an incomplete body cites the member under data.
#[test]
fn test_v1_variant_faults_cite_data_paths() {
    let mut data = v1_vote_data();
    data.as_object_mut().unwrap().remove("created_at");
    data["weight"] = json!("heavy");

    let err = v1::Payload::validate(&json!({ "type": "vote.create", "data": data })).unwrap_err();
    assert!(err.cites("data.created_at"));
    assert!(err.cites("data.weight"));
}

/// The data member must be an object for record-bodied variants.
#[test]
fn test_v1_non_object_data_is_a_type_fault() {
    let err = v1::Payload::validate(&json!({
        "type": "integration.delete",
        "data": "gone"
    }))
    .unwrap_err();
    assert!(err.cites("data"));
    assert!(err.has(ViolationKind::InvalidType));
}

/// The two-member envelope is itself checked before dispatch.
#[test]
fn test_v1_envelope_members_are_required() {
    let err = v1::Payload::validate(&json!({ "data": {} })).unwrap_err();
    assert!(err.cites("type"));

    let err = v1::Payload::validate(&json!({ "type": "webhook.test" })).unwrap_err();
    assert!(err.cites("data"));
}

// =============================================================================
// v0 Guild/Bot Split
// =============================================================================

/// A payload with a guild member is a server vote.
#[test]
fn test_v0_guild_member_selects_server_vote() {
    let payload = v0::Payload::validate(&json!({
        "guild": "417723229721853963",
        "user": "140862798832861184",
        "type": "upvote"
    }))
    .unwrap();
    assert!(matches!(payload, v0::Payload::Server(_)));
}

/// Without a guild member the delivery validates as a bot vote.
#[test]
fn test_v0_default_selection_is_bot_vote() {
    let payload = v0::Payload::validate(&json!({
        "bot": "264811613708746752",
        "user": "140862798832861184",
        "type": "test",
        "isWeekend": false
    }))
    .unwrap();
    assert_eq!(payload.kind(), v0::VoteKind::Test);
    assert!(matches!(payload, v0::Payload::Bot(_)));
}

/// The v0 tag set is two literals, and both are named on rejection.
#[test]
fn test_v0_unknown_kind_lists_both_literals() {
    let err = v0::Payload::validate(&json!({
        "bot": "264811613708746752",
        "user": "140862798832861184",
        "type": "supervote",
        "isWeekend": false
    }))
    .unwrap_err();

    assert_eq!(err.violations().len(), 1);
    let violation = &err.violations()[0];
    assert_eq!(violation.kind, ViolationKind::UnknownVariant);
    assert!(violation.expected.contains("upvote"));
    assert!(violation.expected.contains("test"));
}

/// Server votes carry no weekend flag; one supplied is undeclared.
#[test]
fn test_v0_server_vote_has_no_weekend_flag() {
    let raw = json!({
        "guild": "417723229721853963",
        "user": "140862798832861184",
        "type": "upvote",
        "isWeekend": true
    });
    // Lenient mode drops it.
    assert!(v0::Payload::validate(&raw).is_ok());

    let err = v0::Payload::validate_with(
        &raw,
        botboard_model::ValidateOptions::strict(),
    )
    .unwrap_err();
    assert!(err.cites("isWeekend"));
}

// =============================================================================
// String Entry Point
// =============================================================================

/// Raw JSON text flows through parse and validation in one step.
#[test]
fn test_parse_json_end_to_end() {
    let input = r#"{
        "type": "integration.create",
        "data": {
            "webhook_secret": "whs_Ab12",
            "project_id": "287731768369479682",
            "user_id": "140862798832861184"
        }
    }"#;

    let payload: v1::Payload = parse_json(input).unwrap();
    match payload {
        v1::Payload::IntegrationCreate(created) => {
            assert_eq!(created.webhook_secret.expose(), "whs_Ab12");
        }
        other => panic!("unexpected payload: {:?}", other),
    }
}

/// Malformed text and invalid shapes surface as distinct error variants.
#[test]
fn test_parse_json_error_variants() {
    let malformed = parse_json::<v1::Payload>("{ not json").unwrap_err();
    assert!(matches!(malformed, PayloadError::Json(_)));

    let invalid = parse_json::<v1::Payload>(r#"{ "type": "nope", "data": {} }"#).unwrap_err();
    match invalid {
        PayloadError::Invalid(err) => assert!(err.has(ViolationKind::UnknownVariant)),
        other => panic!("unexpected error: {:?}", other),
    }
}
