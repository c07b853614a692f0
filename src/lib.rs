//! botboard-model - typed wire shapes and strict validators for the
//! Botboard listing API
//!
//! Two parallel families per API version:
//!
//! - serde-derived types ([`v0`], [`v1`]) for consumers who already trust
//!   their input and only need the shapes;
//! - the [`Validate`] trait for untrusted input, which walks a raw
//!   [`serde_json::Value`], aggregates every violation with its field path,
//!   and returns the normalized typed value on success.
//!
//! ```
//! use botboard_model::{v1, Validate};
//! use serde_json::json;
//!
//! let delivery = v1::Payload::validate(&json!({
//!     "type": "vote.create",
//!     "data": {
//!         "user_id": "287731768369479682",
//!         "platform_id": "264811613708746752",
//!         "weight": 1,
//!         "created_at": "2024-05-01T10:00:00Z",
//!         "expires_at": "2024-05-01T22:00:00Z"
//!     }
//! }))?;
//!
//! match delivery {
//!     v1::Payload::VoteCreate(vote) => assert_eq!(vote.weight, 1),
//!     other => panic!("unexpected delivery: {:?}", other),
//! }
//! # Ok::<(), botboard_model::ValidationError>(())
//! ```

pub mod v0;
pub mod v1;
pub mod validate;

pub use validate::primitives::{Date, FormatError, Identifier, Timestamp, WebhookSecret};
pub use validate::{
    parse_json, PayloadError, Validate, ValidateOptions, ValidationError, Violation, ViolationKind,
};
