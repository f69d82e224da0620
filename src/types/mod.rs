use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

// ============= Agent Types =============

/// A persisted agent record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Agent {
    /// Store-assigned identifier, never reassigned
    pub id: String,
    pub name: String,
    /// Unique URL-safe identifier
    pub slug: String,
    /// Invocation endpoint of the agent
    pub url: String,
    pub description: String,
    #[schema(value_type = String, example = "bot")]
    pub icon: AgentIcon,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub trigger_keywords: Vec<String>,
    #[serde(default)]
    pub tools: Vec<AgentTool>,
    pub enabled: bool,
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Agent {
    /// Visible to public-facing consumers: public and enabled.
    pub fn is_listed(&self) -> bool {
        self.is_public && self.enabled
    }

    /// Case-insensitive substring match over name, description and slug.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.slug.to_lowercase().contains(needle)
    }
}

/// A tool exposed by an agent, described with a JSON-schema-like parameter block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AgentTool {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameters: ToolParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ToolParameters {
    #[serde(rename = "type", default = "default_parameters_type")]
    pub kind: String,
    #[serde(default)]
    pub properties: BTreeMap<String, ToolProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl Default for ToolParameters {
    fn default() -> Self {
        Self {
            kind: default_parameters_type(),
            properties: BTreeMap::new(),
            required: None,
        }
    }
}

fn default_parameters_type() -> String {
    "object".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ToolProperty {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

// ============= Icons =============

/// Supported agent icons.
///
/// Parsing normalizes the key (lowercase, letters only). Unknown keys map to
/// [`AgentIcon::Fallback`], which serializes as `"default"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AgentIcon {
    #[default]
    Bot,
    Code,
    Calendar,
    Mail,
    Github,
    Database,
    Globe,
    File,
    Search,
    MessageSquare,
    ListChecks,
    Image,
    Music,
    Video,
    Podcast,
    CheckSquare,
    Fallback,
}

impl AgentIcon {
    /// Icons offered for selection (excludes the fallback).
    pub const SELECTABLE: [AgentIcon; 16] = [
        AgentIcon::Bot,
        AgentIcon::Code,
        AgentIcon::Calendar,
        AgentIcon::Mail,
        AgentIcon::Github,
        AgentIcon::Database,
        AgentIcon::Globe,
        AgentIcon::File,
        AgentIcon::Search,
        AgentIcon::MessageSquare,
        AgentIcon::ListChecks,
        AgentIcon::Image,
        AgentIcon::Music,
        AgentIcon::Video,
        AgentIcon::Podcast,
        AgentIcon::CheckSquare,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AgentIcon::Bot => "bot",
            AgentIcon::Code => "code",
            AgentIcon::Calendar => "calendar",
            AgentIcon::Mail => "mail",
            AgentIcon::Github => "github",
            AgentIcon::Database => "database",
            AgentIcon::Globe => "globe",
            AgentIcon::File => "file",
            AgentIcon::Search => "search",
            AgentIcon::MessageSquare => "messagesquare",
            AgentIcon::ListChecks => "listchecks",
            AgentIcon::Image => "image",
            AgentIcon::Music => "music",
            AgentIcon::Video => "video",
            AgentIcon::Podcast => "podcast",
            AgentIcon::CheckSquare => "checksquare",
            AgentIcon::Fallback => "default",
        }
    }

    pub fn from_key(raw: &str) -> Self {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::SELECTABLE
            .into_iter()
            .find(|icon| icon.key() == normalized)
            .unwrap_or(AgentIcon::Fallback)
    }
}

impl fmt::Display for AgentIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<&str> for AgentIcon {
    fn from(raw: &str) -> Self {
        AgentIcon::from_key(raw)
    }
}

impl Serialize for AgentIcon {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for AgentIcon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(AgentIcon::from_key).unwrap_or_default())
    }
}

// ============= Agent Inputs =============

/// Fields accepted when creating an agent. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateAgentInput {
    #[serde(default)]
    pub name: String,
    /// Derived from `name` when empty
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[schema(value_type = String, example = "bot")]
    pub icon: AgentIcon,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub trigger_keywords: Vec<String>,
    #[serde(default)]
    pub tools: Vec<AgentTool>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

fn default_true() -> bool {
    true
}

impl CreateAgentInput {
    /// Minimal input with defaults for everything optional.
    pub fn new(name: &str, url: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: String::new(),
            url: url.to_string(),
            description: description.to_string(),
            icon: AgentIcon::default(),
            use_cases: Vec::new(),
            trigger_keywords: Vec::new(),
            tools: Vec::new(),
            enabled: true,
            is_public: true,
            version: None,
            author: None,
        }
    }

    /// Validate required fields, derive a missing slug, and drop blank list entries.
    pub fn sanitize(mut self) -> Result<Self> {
        require_non_blank("name", &self.name)?;
        require_non_blank("url", &self.url)?;
        require_non_blank("description", &self.description)?;

        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.name);
        }
        validate_slug(&self.slug)?;
        validate_url(&self.url)?;

        self.use_cases = drop_blank(self.use_cases);
        self.trigger_keywords = drop_blank(self.trigger_keywords);
        self.version = self.version.and_then(non_blank);
        self.author = self.author.and_then(non_blank);

        Ok(self)
    }
}

/// A partial update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AgentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub icon: Option<AgentIcon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<AgentTool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    /// A blank value clears the stored version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// A blank value clears the stored author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl AgentPatch {
    /// Patch that only sets `enabled`.
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Validate supplied fields and drop blank list entries.
    pub fn sanitize(mut self) -> Result<Self> {
        if let Some(name) = &self.name {
            require_non_blank("name", name)?;
        }
        if let Some(description) = &self.description {
            require_non_blank("description", description)?;
        }
        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
        }
        if let Some(url) = &self.url {
            require_non_blank("url", url)?;
            validate_url(url)?;
        }

        self.use_cases = self.use_cases.map(drop_blank);
        self.trigger_keywords = self.trigger_keywords.map(drop_blank);

        Ok(self)
    }
}

/// Derive a URL-safe slug: lowercase ASCII alphanumerics joined by single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

fn validate_slug(slug: &str) -> Result<()> {
    let valid = !slug.is_empty()
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        });

    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "Slug '{}' must be lowercase alphanumerics separated by single hyphens",
            slug
        )))
    }
}

fn validate_url(url: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(url.trim())
        .map_err(|e| AppError::InvalidInput(format!("Invalid url '{}': {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(()),
        _ => Err(AppError::InvalidInput(format!(
            "Url '{}' must be an absolute http(s) URL",
            url
        ))),
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(AppError::InvalidInput(format!("Field '{}' is required", field)))
    } else {
        Ok(())
    }
}

/// `None` for blank text, so optional columns never store `""`.
pub fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn drop_blank(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .filter(|entry| !entry.trim().is_empty())
        .collect()
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match self {
            AppError::Configuration(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::StoreUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Database(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Code Suggester", "code-suggester")]
    #[case("  Linear   Agent  ", "linear-agent")]
    #[case("GitHub Agent!", "github-agent")]
    #[case("v2 -- beta", "v2-beta")]
    #[case("Émile's bot", "mile-s-bot")]
    #[case("---", "")]
    fn test_slugify(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slugify(name), expected);
    }

    #[rstest]
    #[case("bot", AgentIcon::Bot)]
    #[case("MessageSquare", AgentIcon::MessageSquare)]
    #[case("list-checks", AgentIcon::ListChecks)]
    #[case("CHECK_SQUARE", AgentIcon::CheckSquare)]
    #[case("rocket", AgentIcon::Fallback)]
    #[case("", AgentIcon::Fallback)]
    fn test_icon_from_key(#[case] raw: &str, #[case] expected: AgentIcon) {
        assert_eq!(AgentIcon::from_key(raw), expected);
    }

    #[test]
    fn test_icon_serde() {
        let icon: AgentIcon = serde_json::from_str("\"unknown-glyph\"").unwrap();
        assert_eq!(icon, AgentIcon::Fallback);
        assert_eq!(serde_json::to_string(&icon).unwrap(), "\"default\"");

        let icon: AgentIcon = serde_json::from_str("null").unwrap();
        assert_eq!(icon, AgentIcon::Bot);

        for icon in AgentIcon::SELECTABLE {
            assert_eq!(AgentIcon::from_key(icon.key()), icon);
        }
    }

    #[test]
    fn test_create_input_defaults() {
        let input: CreateAgentInput = serde_json::from_str(
            r#"{"name": "Echo", "url": "https://echo.example.com", "description": "Echoes"}"#,
        )
        .unwrap();

        assert!(input.enabled);
        assert!(input.is_public);
        assert_eq!(input.icon, AgentIcon::Bot);
        assert!(input.tools.is_empty());
    }

    #[test]
    fn test_sanitize_derives_slug_and_drops_blanks() {
        let mut input = CreateAgentInput::new(
            "Calendar Agent",
            "https://calendar.example.com/api",
            "Schedules meetings",
        );
        input.use_cases = vec!["Schedule".into(), "   ".into(), "".into(), "Remind".into()];
        input.trigger_keywords = vec!["".into(), "meeting".into()];
        input.author = Some("  ".into());

        let input = input.sanitize().unwrap();
        assert_eq!(input.slug, "calendar-agent");
        assert_eq!(input.use_cases, vec!["Schedule", "Remind"]);
        assert_eq!(input.trigger_keywords, vec!["meeting"]);
        assert_eq!(input.author, None);
    }

    #[test]
    fn test_sanitize_rejects_missing_fields() {
        let input = CreateAgentInput::new("", "https://x.example.com", "desc");
        assert!(matches!(input.sanitize(), Err(AppError::InvalidInput(_))));

        let input = CreateAgentInput::new("Name", "not a url", "desc");
        assert!(matches!(input.sanitize(), Err(AppError::InvalidInput(_))));

        let input = CreateAgentInput::new("Name", "ftp://files.example.com", "desc");
        assert!(matches!(input.sanitize(), Err(AppError::InvalidInput(_))));

        let mut input = CreateAgentInput::new("Name", "https://x.example.com", "desc");
        input.slug = "Not A Slug".into();
        assert!(matches!(input.sanitize(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_patch_sanitize() {
        let patch = AgentPatch {
            use_cases: Some(vec!["".into(), "one".into()]),
            ..Default::default()
        }
        .sanitize()
        .unwrap();
        assert_eq!(patch.use_cases, Some(vec!["one".to_string()]));

        let patch = AgentPatch {
            slug: Some("bad slug".into()),
            ..Default::default()
        };
        assert!(patch.sanitize().is_err());

        assert!(AgentPatch::default().is_empty());
        assert!(!AgentPatch::enabled(false).is_empty());
    }

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("1.2.0", Some("1.2.0"))]
    fn test_non_blank(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(non_blank(raw.to_string()).as_deref(), expected);
    }

    #[test]
    fn test_agent_matches() {
        let agent = Agent {
            id: "1".into(),
            name: "Code Suggester".into(),
            slug: "code-suggester".into(),
            url: "https://example.com".into(),
            description: "Suggests improvements".into(),
            icon: AgentIcon::Code,
            use_cases: vec![],
            trigger_keywords: vec![],
            tools: vec![],
            enabled: true,
            is_public: false,
            version: None,
            author: None,
            created_at: None,
            updated_at: None,
        };

        assert!(agent.matches("code"));
        assert!(agent.matches("improve"));
        assert!(!agent.matches("linear"));
        assert!(!agent.is_listed());
    }

    #[test]
    fn test_error_status_codes() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                AppError::StoreUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Configuration("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
