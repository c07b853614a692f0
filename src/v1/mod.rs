//! Current projects API (v1)
//!
//! Wire shapes of the second-generation listing API. Bodies use snake_case
//! members; query parameters keep camelCase.

pub mod error;
pub mod project;
pub mod user;
pub mod vote;
pub mod webhook;

pub use error::Problem;
pub use project::{BaseProject, Platform, Project, ProjectType, ReviewSummary};
pub use user::User;
pub use vote::{Vote, VoteStatus, VoteStatusQuery, VotesQuery, VotesResponse};
pub use webhook::{
    IntegrationCreated, IntegrationDeleted, IntegrationResponse, Payload, TestPing, WebhookKind,
};
