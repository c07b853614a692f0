//! Platform, project type, and project resources

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validate::primitives::Identifier;
use crate::validate::{fields, Report, Validate, WireEnum};

/// Source platform a project lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Discord,
}

impl WireEnum for Platform {
    const ALLOWED: &'static [&'static str] = &["discord"];

    fn from_wire(text: &str) -> Option<Self> {
        match text {
            "discord" => Some(Platform::Discord),
            _ => None,
        }
    }

    fn as_wire(&self) -> &'static str {
        match self {
            Platform::Discord => "discord",
        }
    }
}

impl Validate for Platform {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        fields::wire_enum(value, path, report)
    }
}

/// What category of listing a project is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Bot,
    Server,
}

impl WireEnum for ProjectType {
    const ALLOWED: &'static [&'static str] = &["bot", "server"];

    fn from_wire(text: &str) -> Option<Self> {
        match text {
            "bot" => Some(ProjectType::Bot),
            "server" => Some(ProjectType::Server),
            _ => None,
        }
    }

    fn as_wire(&self) -> &'static str {
        match self {
            ProjectType::Bot => "bot",
            ProjectType::Server => "server",
        }
    }
}

impl Validate for ProjectType {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        fields::wire_enum(value, path, report)
    }
}

/// Identifying core every project response carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseProject {
    pub id: Identifier,
    pub platform: Platform,
    /// Id on the source platform.
    pub platform_id: Identifier,
    #[serde(rename = "type")]
    pub kind: ProjectType,
}

impl BaseProject {
    pub(crate) const FIELDS: &'static [&'static str] = &["id", "platform", "platform_id", "type"];

    /// Member checks shared with the expanded `Project` shape, which flattens
    /// these fields into its own object.
    pub(crate) fn check_members(
        obj: &Map<String, Value>,
        path: &str,
        report: &mut Report,
    ) -> Option<Self> {
        let id = fields::required_field::<Identifier>(obj, path, "id", report);
        let platform = fields::required_field::<Platform>(obj, path, "platform", report);
        let platform_id = fields::required_field::<Identifier>(obj, path, "platform_id", report);
        let kind = fields::required_field::<ProjectType>(obj, path, "type", report);

        Some(Self {
            id: id?,
            platform: platform?,
            platform_id: platform_id?,
            kind: kind?,
        })
    }
}

impl Validate for BaseProject {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, Self::FIELDS, report);
        Self::check_members(obj, path, report)
    }
}

/// Review aggregate on an expanded project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub count: i64,
    pub average_score: f64,
}

const REVIEW_SUMMARY_FIELDS: &[&str] = &["count", "average_score"];

impl Validate for ReviewSummary {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, REVIEW_SUMMARY_FIELDS, report);

        let count = fields::required_integer(obj, path, "count", report);
        let average_score = fields::required_number(obj, path, "average_score", report);

        Some(Self {
            count: count?,
            average_score: average_score?,
        })
    }
}

/// Expanded project resource: the identifying core plus descriptive and
/// statistical members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(flatten)]
    pub base: BaseProject,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    pub tags: Vec<String>,
    pub votes: i64,
    pub monthly_votes: i64,
    pub reviews: ReviewSummary,
}

const PROJECT_FIELDS: &[&str] = &[
    "id",
    "platform",
    "platform_id",
    "type",
    "name",
    "headline",
    "tags",
    "votes",
    "monthly_votes",
    "reviews",
];

impl Validate for Project {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, PROJECT_FIELDS, report);

        let base = BaseProject::check_members(obj, path, report);
        let name = fields::required_string(obj, path, "name", report);
        let headline = fields::optional_string(obj, path, "headline", report);
        let tags = fields::required_field::<Vec<String>>(obj, path, "tags", report);
        let votes = fields::required_integer(obj, path, "votes", report);
        let monthly_votes = fields::required_integer(obj, path, "monthly_votes", report);
        let reviews = fields::required_field::<ReviewSummary>(obj, path, "reviews", report);

        Some(Self {
            base: base?,
            name: name?,
            headline: headline?,
            tags: tags?,
            votes: votes?,
            monthly_votes: monthly_votes?,
            reviews: reviews?,
        })
    }
}
