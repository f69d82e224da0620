use super::traits::AgentRepository;
use crate::types::{non_blank, Agent, AgentIcon, AgentPatch, AppError, CreateAgentInput, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Builder, Connection, Database, Row, Value};
use tracing::{debug, info};

const AGENT_COLUMNS: &str = "id, name, slug, url, description, icon, use_cases, trigger_keywords, \
     tools, enabled, is_public, version, author, created_at, updated_at";

/// libSQL-backed agent store: remote Turso, a local SQLite file, or in-memory.
pub struct TursoClient {
    _db: Database,
    conn: Connection,
}

impl TursoClient {
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        info!(url = %url, "Connecting to remote agent store");
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::StoreUnavailable(format!("Failed to connect to Turso: {}", e)))?;

        Self::open(db).await
    }

    pub async fn new_local(path: &str) -> Result<Self> {
        info!(path = %path, "Opening local agent store");
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::StoreUnavailable(format!("Failed to open database: {}", e)))?;

        Self::open(db).await
    }

    pub async fn new_memory() -> Result<Self> {
        Self::new_local(":memory:").await
    }

    async fn open(db: Database) -> Result<Self> {
        // One shared connection: each new connection to ":memory:" would be a fresh database.
        let conn = db
            .connect()
            .map_err(|e| AppError::StoreUnavailable(format!("Failed to get connection: {}", e)))?;

        let client = Self { _db: db, conn };
        client.initialize_schema().await?;

        Ok(client)
    }

    pub fn connection(&self) -> Result<Connection> {
        Ok(self.conn.clone())
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS agents (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                url TEXT NOT NULL,
                description TEXT NOT NULL,
                icon TEXT NOT NULL DEFAULT 'bot',
                use_cases TEXT NOT NULL DEFAULT '[]',
                trigger_keywords TEXT NOT NULL DEFAULT '[]',
                tools TEXT NOT NULL DEFAULT '[]',
                enabled INTEGER NOT NULL DEFAULT 1,
                is_public INTEGER NOT NULL DEFAULT 1,
                version TEXT,
                author TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| classify(e, "Failed to create agents table"))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_agents_listing ON agents (is_public, enabled)",
            (),
        )
        .await
        .map_err(|e| classify(e, "Failed to create agents index"))?;

        Ok(())
    }

    async fn query_agents(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Agent>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(sql, params)
            .await
            .map_err(|e| classify(e, "Failed to query agents"))?;

        let mut agents = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| classify(e, "Failed to read agent row"))?
        {
            agents.push(row_to_agent(&row)?);
        }

        Ok(agents)
    }
}

#[async_trait]
impl AgentRepository for TursoClient {
    async fn list_all(&self) -> Result<Vec<Agent>> {
        self.query_agents(
            &format!(
                "SELECT {} FROM agents ORDER BY created_at DESC, rowid DESC",
                AGENT_COLUMNS
            ),
            Vec::new(),
        )
        .await
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Agent>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query_agents(
            &format!(
                "SELECT {} FROM agents ORDER BY created_at DESC, rowid DESC LIMIT ?",
                AGENT_COLUMNS
            ),
            vec![Value::Integer(limit)],
        )
        .await
    }

    async fn list_public_enabled(&self) -> Result<Vec<Agent>> {
        self.query_agents(
            &format!(
                "SELECT {} FROM agents WHERE is_public = 1 AND enabled = 1
                 ORDER BY created_at DESC, rowid DESC",
                AGENT_COLUMNS
            ),
            Vec::new(),
        )
        .await
    }

    async fn get_by_id(&self, id: &str) -> Result<Agent> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                &format!("SELECT {} FROM agents WHERE id = ?", AGENT_COLUMNS),
                [id],
            )
            .await
            .map_err(|e| classify(e, "Failed to query agent"))?;

        match rows
            .next()
            .await
            .map_err(|e| classify(e, "Failed to read agent row"))?
        {
            Some(row) => row_to_agent(&row),
            None => Err(AppError::NotFound(format!("Agent '{}' not found", id))),
        }
    }

    async fn create(&self, input: CreateAgentInput) -> Result<Agent> {
        let input = input.sanitize()?;
        let conn = self.connection()?;
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().timestamp_millis();

        let values = vec![
            Value::Text(id.clone()),
            Value::Text(input.name),
            Value::Text(input.slug),
            Value::Text(input.url),
            Value::Text(input.description),
            Value::Text(input.icon.key().to_string()),
            Value::Text(to_json(&input.use_cases)?),
            Value::Text(to_json(&input.trigger_keywords)?),
            Value::Text(to_json(&input.tools)?),
            Value::Integer(i64::from(input.enabled)),
            Value::Integer(i64::from(input.is_public)),
            optional_text(input.version),
            optional_text(input.author),
            Value::Integer(now),
            Value::Integer(now),
        ];

        conn.execute(
            &format!(
                "INSERT INTO agents ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                AGENT_COLUMNS
            ),
            values,
        )
        .await
        .map_err(|e| classify(e, "Failed to create agent"))?;

        debug!(agent_id = %id, "Created agent");
        self.get_by_id(&id).await
    }

    async fn update(&self, id: &str, patch: AgentPatch) -> Result<Agent> {
        let patch = patch.sanitize()?;
        let conn = self.connection()?;

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(name) = patch.name {
            assignments.push("name = ?");
            values.push(Value::Text(name));
        }
        if let Some(slug) = patch.slug {
            assignments.push("slug = ?");
            values.push(Value::Text(slug));
        }
        if let Some(url) = patch.url {
            assignments.push("url = ?");
            values.push(Value::Text(url));
        }
        if let Some(description) = patch.description {
            assignments.push("description = ?");
            values.push(Value::Text(description));
        }
        if let Some(icon) = patch.icon {
            assignments.push("icon = ?");
            values.push(Value::Text(icon.key().to_string()));
        }
        if let Some(use_cases) = patch.use_cases {
            assignments.push("use_cases = ?");
            values.push(Value::Text(to_json(&use_cases)?));
        }
        if let Some(trigger_keywords) = patch.trigger_keywords {
            assignments.push("trigger_keywords = ?");
            values.push(Value::Text(to_json(&trigger_keywords)?));
        }
        if let Some(tools) = patch.tools {
            assignments.push("tools = ?");
            values.push(Value::Text(to_json(&tools)?));
        }
        if let Some(enabled) = patch.enabled {
            assignments.push("enabled = ?");
            values.push(Value::Integer(i64::from(enabled)));
        }
        if let Some(is_public) = patch.is_public {
            assignments.push("is_public = ?");
            values.push(Value::Integer(i64::from(is_public)));
        }
        if let Some(version) = patch.version {
            assignments.push("version = ?");
            values.push(optional_text(non_blank(version)));
        }
        if let Some(author) = patch.author {
            assignments.push("author = ?");
            values.push(optional_text(non_blank(author)));
        }

        assignments.push("updated_at = ?");
        values.push(Value::Integer(Utc::now().timestamp_millis()));
        values.push(Value::Text(id.to_string()));

        let affected = conn
            .execute(
                &format!("UPDATE agents SET {} WHERE id = ?", assignments.join(", ")),
                values,
            )
            .await
            .map_err(|e| classify(e, "Failed to update agent"))?;

        if affected == 0 {
            return Err(AppError::NotFound(format!("Agent '{}' not found", id)));
        }

        debug!(agent_id = %id, "Updated agent");
        self.get_by_id(id).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let conn = self.connection()?;

        let affected = conn
            .execute("DELETE FROM agents WHERE id = ?", [id])
            .await
            .map_err(|e| classify(e, "Failed to delete agent"))?;

        if affected == 0 {
            return Err(AppError::NotFound(format!("Agent '{}' not found", id)));
        }

        debug!(agent_id = %id, "Deleted agent");
        Ok(())
    }

    async fn slugs(&self) -> Result<Vec<String>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query("SELECT slug FROM agents", ())
            .await
            .map_err(|e| classify(e, "Failed to query slugs"))?;

        let mut slugs = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| classify(e, "Failed to read slug"))?
        {
            slugs.push(row.get::<String>(0).map_err(|e| AppError::Database(e.to_string()))?);
        }

        Ok(slugs)
    }

    async fn schema_columns(&self) -> Result<Vec<String>> {
        let conn = self.connection()?;

        let rows = conn
            .query("SELECT * FROM agents LIMIT 1", ())
            .await
            .map_err(|e| classify(e, "Failed to inspect agents table"))?;

        Ok((0..rows.column_count())
            .filter_map(|idx| rows.column_name(idx).map(str::to_string))
            .collect())
    }
}

fn row_to_agent(row: &Row) -> Result<Agent> {
    let icon: String = row.get(5).map_err(|e| AppError::Database(e.to_string()))?;
    let use_cases: String = row.get(6).map_err(|e| AppError::Database(e.to_string()))?;
    let trigger_keywords: String = row.get(7).map_err(|e| AppError::Database(e.to_string()))?;
    let tools: String = row.get(8).map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Agent {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        name: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        slug: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        url: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        description: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
        icon: AgentIcon::from_key(&icon),
        use_cases: from_json(&use_cases)?,
        trigger_keywords: from_json(&trigger_keywords)?,
        tools: from_json(&tools)?,
        enabled: row.get::<i64>(9).map_err(|e| AppError::Database(e.to_string()))? != 0,
        is_public: row.get::<i64>(10).map_err(|e| AppError::Database(e.to_string()))? != 0,
        version: row.get(11).map_err(|e| AppError::Database(e.to_string()))?,
        author: row.get(12).map_err(|e| AppError::Database(e.to_string()))?,
        created_at: timestamp(row.get(13).map_err(|e| AppError::Database(e.to_string()))?),
        updated_at: timestamp(row.get(14).map_err(|e| AppError::Database(e.to_string()))?),
    })
}

fn timestamp(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

fn optional_text(value: Option<String>) -> Value {
    value.map(Value::Text).unwrap_or(Value::Null)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| AppError::Internal(format!("Failed to encode column: {}", e)))
}

fn from_json<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::Database(format!("Malformed JSON column: {}", e)))
}

/// Map a libSQL error onto the application taxonomy.
fn classify(error: libsql::Error, context: &str) -> AppError {
    let message = error.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("unique constraint failed") {
        AppError::Conflict(format!("{}: slug already exists", context))
    } else if lowered.contains("error sending request")
        || lowered.contains("connection refused")
        || lowered.contains("dns error")
        || lowered.contains("timed out")
        || lowered.contains("connect error")
    {
        AppError::StoreUnavailable(format!("{}: {}", context, message))
    } else {
        AppError::Database(format!("{}: {}", context, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_conversion() {
        let ts = timestamp(1_700_000_000_123).unwrap();
        assert_eq!(ts.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn test_optional_text() {
        assert!(matches!(optional_text(None), Value::Null));
        assert!(matches!(
            optional_text(Some("1.0.0".into())),
            Value::Text(ref v) if v == "1.0.0"
        ));
    }

    #[test]
    fn test_json_columns() {
        let encoded = to_json(&vec!["a".to_string(), "b".to_string()]).unwrap();
        let decoded: Vec<String> = from_json(&encoded).unwrap();
        assert_eq!(decoded, vec!["a", "b"]);

        let err = from_json::<Vec<String>>("not json").unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
