//! Legacy bots API (v0)
//!
//! Wire shapes of the first-generation listing API. Field names follow the
//! historical wire casing, a mix of lowercase run-together names and
//! camelCase, preserved exactly for compatibility.

pub mod bot;
pub mod user;
pub mod vote;
pub mod webhook;

pub use bot::{Bot, BotStats, SearchQuery, SearchResponse, ServerCount, StatsUpdate};
pub use user::{SimpleUser, Social, User, VoterList};
pub use vote::{CheckQuery, CheckResponse, Voted};
pub use webhook::{BotVote, Payload, ServerVote, VoteKind};
