//! Bot resource, search, and statistics shapes

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::primitives::{Identifier, Timestamp};
use crate::validate::{fields, Report, Validate, Violation};

/// Search page size when the query names none.
pub const DEFAULT_LIMIT: i64 = 50;

/// Largest accepted search page size.
pub const MAX_LIMIT: i64 = 500;

/// A listed bot, as returned by lookup and search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    pub id: Identifier,
    #[serde(rename = "clientid")]
    pub client_id: Identifier,
    pub username: String,
    pub discriminator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Default avatar hash shown when `avatar` is unset.
    #[serde(rename = "defAvatar")]
    pub def_avatar: String,
    /// Library the bot is written with.
    pub lib: String,
    pub prefix: String,
    #[serde(rename = "shortdesc")]
    pub short_desc: String,
    #[serde(rename = "longdesc", default, skip_serializing_if = "Option::is_none")]
    pub long_desc: Option<String>,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    pub owners: Vec<Identifier>,
    /// Guilds the bot is featured in.
    pub guilds: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite: Option<String>,
    /// When the bot was approved for listing.
    pub date: Timestamp,
    #[serde(rename = "certifiedBot")]
    pub certified_bot: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vanity: Option<String>,
    pub points: i64,
    #[serde(rename = "monthlyPoints")]
    pub monthly_points: i64,
    #[serde(
        rename = "donatebotguildid",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub donate_bot_guild_id: Option<Identifier>,
}

const BOT_FIELDS: &[&str] = &[
    "id",
    "clientid",
    "username",
    "discriminator",
    "avatar",
    "defAvatar",
    "lib",
    "prefix",
    "shortdesc",
    "longdesc",
    "tags",
    "website",
    "support",
    "github",
    "owners",
    "guilds",
    "invite",
    "date",
    "certifiedBot",
    "vanity",
    "points",
    "monthlyPoints",
    "donatebotguildid",
];

impl Validate for Bot {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, BOT_FIELDS, report);

        let id = fields::required_field::<Identifier>(obj, path, "id", report);
        let client_id = fields::required_field::<Identifier>(obj, path, "clientid", report);
        let username = fields::required_string(obj, path, "username", report);
        let discriminator = fields::required_string(obj, path, "discriminator", report);
        let avatar = fields::optional_string(obj, path, "avatar", report);
        let def_avatar = fields::required_string(obj, path, "defAvatar", report);
        let lib = fields::required_string(obj, path, "lib", report);
        let prefix = fields::required_string(obj, path, "prefix", report);
        let short_desc = fields::required_string(obj, path, "shortdesc", report);
        let long_desc = fields::optional_string(obj, path, "longdesc", report);
        let tags = fields::required_field::<Vec<String>>(obj, path, "tags", report);
        let website = fields::optional_string(obj, path, "website", report);
        let support = fields::optional_string(obj, path, "support", report);
        let github = fields::optional_string(obj, path, "github", report);
        let owners = fields::required_field::<Vec<Identifier>>(obj, path, "owners", report);
        let guilds = fields::required_field::<Vec<Identifier>>(obj, path, "guilds", report);
        let invite = fields::optional_string(obj, path, "invite", report);
        let date = fields::required_field::<Timestamp>(obj, path, "date", report);
        let certified_bot = fields::required_boolean(obj, path, "certifiedBot", report);
        let vanity = fields::optional_string(obj, path, "vanity", report);
        let points = fields::required_integer(obj, path, "points", report);
        let monthly_points = fields::required_integer(obj, path, "monthlyPoints", report);
        let donate_bot_guild_id =
            fields::optional_field::<Identifier>(obj, path, "donatebotguildid", report);

        Some(Self {
            id: id?,
            client_id: client_id?,
            username: username?,
            discriminator: discriminator?,
            avatar: avatar?,
            def_avatar: def_avatar?,
            lib: lib?,
            prefix: prefix?,
            short_desc: short_desc?,
            long_desc: long_desc?,
            tags: tags?,
            website: website?,
            support: support?,
            github: github?,
            owners: owners?,
            guilds: guilds?,
            invite: invite?,
            date: date?,
            certified_bot: certified_bot?,
            vanity: vanity?,
            points: points?,
            monthly_points: monthly_points?,
            donate_bot_guild_id: donate_bot_guild_id?,
        })
    }
}

/// Bot search parameters.
///
/// `limit` and `offset` fill in their documented defaults when absent, so a
/// validated query always carries concrete paging values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text search expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Comma-separated projection of resource fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            search: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort: None,
            fields: None,
        }
    }
}

const SEARCH_QUERY_FIELDS: &[&str] = &["search", "limit", "offset", "sort", "fields"];

impl Validate for SearchQuery {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, SEARCH_QUERY_FIELDS, report);

        let search = fields::optional_string(obj, path, "search", report);
        let limit = match fields::optional_integer(obj, path, "limit", report) {
            Some(Some(n)) if (1..=MAX_LIMIT).contains(&n) => Some(n),
            Some(Some(n)) => {
                report.push(Violation::invalid_format(
                    &fields::join(path, "limit"),
                    format!("an integer between 1 and {}", MAX_LIMIT),
                    n.to_string(),
                ));
                None
            }
            Some(None) => Some(DEFAULT_LIMIT),
            None => None,
        };
        let offset = match fields::optional_integer(obj, path, "offset", report) {
            Some(Some(n)) if n >= 0 => Some(n),
            Some(Some(n)) => {
                report.push(Violation::invalid_format(
                    &fields::join(path, "offset"),
                    "a non-negative integer",
                    n.to_string(),
                ));
                None
            }
            Some(None) => Some(0),
            None => None,
        };
        let sort = fields::optional_string(obj, path, "sort", report);
        let projection = fields::optional_string(obj, path, "fields", report);

        Some(Self {
            search: search?,
            limit: limit?,
            offset: offset?,
            sort: sort?,
            fields: projection?,
        })
    }
}

/// Search response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Bot>,
    /// Matches across all pages.
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    /// Matches in this page.
    pub count: i64,
}

const SEARCH_RESPONSE_FIELDS: &[&str] = &["results", "total", "limit", "offset", "count"];

impl Validate for SearchResponse {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, SEARCH_RESPONSE_FIELDS, report);

        let results = fields::required_field::<Vec<Bot>>(obj, path, "results", report);
        let total = fields::required_integer(obj, path, "total", report);
        let limit = fields::required_integer(obj, path, "limit", report);
        let offset = fields::required_integer(obj, path, "offset", report);
        let count = fields::required_integer(obj, path, "count", report);

        Some(Self {
            results: results?,
            total: total?,
            limit: limit?,
            offset: offset?,
            count: count?,
        })
    }
}

/// Bot statistics as served by the stats endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_count: Option<i64>,
    /// Per-shard server counts, when the bot reports shards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shards: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard_count: Option<i64>,
}

const BOT_STATS_FIELDS: &[&str] = &["server_count", "shards", "shard_count"];

impl Validate for BotStats {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, BOT_STATS_FIELDS, report);

        let server_count = fields::optional_integer(obj, path, "server_count", report);
        let shards = fields::optional_field::<Vec<i64>>(obj, path, "shards", report);
        let shard_count = fields::optional_integer(obj, path, "shard_count", report);

        Some(Self {
            server_count: server_count?,
            shards: shards?,
            shard_count: shard_count?,
        })
    }
}

/// Server count carried by a stats update: one total, or per-shard counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerCount {
    Total(i64),
    PerShard(Vec<i64>),
}

impl ServerCount {
    /// Sums per-shard counts, saturating at the integer bounds; the single
    /// form is its own total.
    pub fn total(&self) -> i64 {
        match self {
            ServerCount::Total(n) => *n,
            ServerCount::PerShard(shards) => {
                shards.iter().fold(0, |total, n| total.saturating_add(*n))
            }
        }
    }
}

impl Validate for ServerCount {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        match value {
            Value::Number(_) => fields::integer(value, path, report).map(ServerCount::Total),
            Value::Array(_) => Vec::<i64>::check(value, path, report).map(ServerCount::PerShard),
            other => {
                report.push(Violation::invalid_type(
                    path,
                    "an integer or an array of integers",
                    fields::json_type_name(other),
                ));
                None
            }
        }
    }
}

/// Stats update posted by a bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsUpdate {
    pub server_count: ServerCount,
    /// Zero-based shard posting the update, with the single-count form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard_count: Option<i64>,
}

impl StatsUpdate {
    /// Update carrying one total server count.
    pub fn total(server_count: i64) -> Self {
        Self {
            server_count: ServerCount::Total(server_count),
            shard_id: None,
            shard_count: None,
        }
    }

    /// Update carrying per-shard counts.
    pub fn per_shard(counts: Vec<i64>) -> Self {
        Self {
            server_count: ServerCount::PerShard(counts),
            shard_id: None,
            shard_count: None,
        }
    }
}

const STATS_UPDATE_FIELDS: &[&str] = &["server_count", "shard_id", "shard_count"];

impl Validate for StatsUpdate {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, STATS_UPDATE_FIELDS, report);

        let server_count = fields::required_field::<ServerCount>(obj, path, "server_count", report);
        let shard_id = fields::optional_integer(obj, path, "shard_id", report);
        let shard_count = fields::optional_integer(obj, path, "shard_count", report);

        Some(Self {
            server_count: server_count?,
            shard_id: shard_id?,
            shard_count: shard_count?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validate::{ValidateOptions, ViolationKind};

    fn bot_fixture() -> serde_json::Value {
        json!({
            "id": "264811613708746752",
            "clientid": "264811613708746752",
            "username": "Luca",
            "discriminator": "1375",
            "avatar": "7edcc4c6fbb0b23762eff291ffc9fc12",
            "defAvatar": "6debd47ed13483642cf09e832ed0bc1b",
            "lib": "serenity",
            "prefix": "?",
            "shortdesc": "Utility bot for listing servers",
            "tags": ["Moderation", "Utility"],
            "owners": ["129908908096487424"],
            "guilds": ["417723229721853963"],
            "date": "2017-12-26T02:16:38Z",
            "certifiedBot": false,
            "points": 397,
            "monthlyPoints": 19
        })
    }

    #[test]
    fn test_bot_accepts_full_resource() {
        let bot = Bot::validate(&bot_fixture()).unwrap();
        assert_eq!(bot.username, "Luca");
        assert_eq!(bot.owners.len(), 1);
        assert!(bot.long_desc.is_none());
    }

    #[test]
    fn test_bot_aggregates_every_fault() {
        let mut raw = bot_fixture();
        let obj = raw.as_object_mut().unwrap();
        obj.remove("username");
        obj.insert("points".into(), json!("many"));
        obj.insert("owners".into(), json!(["not-a-snowflake"]));

        let err = Bot::validate(&raw).unwrap_err();
        assert!(err.cites("username"));
        assert!(err.cites("points"));
        assert!(err.cites("owners[0]"));
        assert_eq!(err.violations().len(), 3);
    }

    #[test]
    fn test_bot_drops_unknown_members_by_default() {
        let mut raw = bot_fixture();
        raw.as_object_mut()
            .unwrap()
            .insert("legacy_field".into(), json!(1));
        assert!(Bot::validate(&raw).is_ok());

        let err = Bot::validate_with(&raw, ValidateOptions::strict()).unwrap_err();
        assert!(err.cites("legacy_field"));
    }

    #[test]
    fn test_search_query_fills_defaults() {
        let query = SearchQuery::validate(&json!({})).unwrap();
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert_eq!(query.offset, 0);
        assert!(query.search.is_none());
        assert_eq!(query, SearchQuery::default());
    }

    #[test]
    fn test_search_query_bounds_limit_and_offset() {
        let err = SearchQuery::validate(&json!({ "limit": 0 })).unwrap_err();
        assert!(err.has(ViolationKind::InvalidFormat));

        let err = SearchQuery::validate(&json!({ "limit": 501 })).unwrap_err();
        assert!(err.cites("limit"));

        let err = SearchQuery::validate(&json!({ "offset": -1 })).unwrap_err();
        assert!(err.cites("offset"));

        assert!(SearchQuery::validate(&json!({ "limit": 500, "offset": 0 })).is_ok());
    }

    #[test]
    fn test_bot_stats_members_are_all_optional() {
        assert_eq!(BotStats::validate(&json!({})).unwrap(), BotStats::default());

        let full = BotStats::validate(&json!({
            "server_count": 1250,
            "shards": [100, 150],
            "shard_count": 2
        }))
        .unwrap();
        assert_eq!(full.server_count, Some(1250));
        assert_eq!(full.shards.as_deref(), Some(&[100i64, 150][..]));
        assert_eq!(full.shard_count, Some(2));
    }

    #[test]
    fn test_server_count_accepts_both_shapes() {
        assert_eq!(
            ServerCount::validate(&json!(1250)).unwrap(),
            ServerCount::Total(1250)
        );
        let per_shard = ServerCount::validate(&json!([100, 150, 120])).unwrap();
        assert_eq!(per_shard.total(), 370);
    }

    #[test]
    fn test_server_count_rejects_other_shapes() {
        let err = StatsUpdate::validate(&json!({ "server_count": "1250" })).unwrap_err();
        assert!(err.cites("server_count"));
        assert!(err.has(ViolationKind::InvalidType));

        let err = StatsUpdate::validate(&json!({ "server_count": [100, "x"] })).unwrap_err();
        assert!(err.cites("server_count[1]"));
    }

    #[test]
    fn test_server_count_total_saturates_at_the_bounds() {
        let update = StatsUpdate::validate(&json!({ "server_count": [i64::MAX, 1] })).unwrap();
        assert_eq!(update.server_count.total(), i64::MAX);

        let negative = ServerCount::PerShard(vec![i64::MIN, -1]);
        assert_eq!(negative.total(), i64::MIN);
    }

    #[test]
    fn test_stats_update_serializes_flat() {
        let update = StatsUpdate::total(1250);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "server_count": 1250 })
        );
        let sharded = StatsUpdate::per_shard(vec![100, 150]);
        assert_eq!(
            serde_json::to_value(&sharded).unwrap(),
            json!({ "server_count": [100, 150] })
        );
    }

    #[test]
    fn test_search_response_cites_nested_results() {
        let err = SearchResponse::validate(&json!({
            "results": [{ "id": "264811613708746752" }],
            "total": 1,
            "limit": 50,
            "offset": 0,
            "count": 1
        }))
        .unwrap_err();
        assert!(err.cites("results[0].username"));
    }
}
