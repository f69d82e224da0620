//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the dashboard CLI.

use crate::agents::AgentStats;
use crate::db::{DiagnosticStatus, DiagnosticsReport};
use crate::types::Agent;
use owo_colors::OwoColorize;

const NAME_WIDTH: usize = 22;
const SLUG_WIDTH: usize = 20;
const STATE_WIDTH: usize = 9;
const ID_WIDTH: usize = 36;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the dashboard banner
    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!(
                "\n   {} {}\n",
                "Friday Agent Dashboard".bright_cyan().bold(),
                version.dimmed()
            );
        } else {
            println!("\n   Friday Agent Dashboard {}\n", version);
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a subheader
    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {} ---", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print the agent table
    pub fn agent_table(&self, agents: &[Agent]) {
        if agents.is_empty() {
            self.info("No agents found");
            return;
        }

        let header = table_row(&[
            ("NAME", NAME_WIDTH),
            ("SLUG", SLUG_WIDTH),
            ("STATE", STATE_WIDTH),
            ("VISIBILITY", 10),
            ("ID", ID_WIDTH),
        ]);
        let rule = "─".repeat(header.chars().count());

        if self.colored {
            println!("    {}", header.bright_white().bold());
            println!("    {}", rule.dimmed());
        } else {
            println!("    {}", header);
            println!("    {}", "-".repeat(header.chars().count()));
        }

        for agent in agents {
            let row = table_row(&[
                (agent.name.as_str(), NAME_WIDTH),
                (agent.slug.as_str(), SLUG_WIDTH),
                (enabled_label(agent.enabled), STATE_WIDTH),
                (visibility_label(agent.is_public), 10),
                (agent.id.as_str(), ID_WIDTH),
            ]);

            if self.colored && !agent.enabled {
                println!("    {}", row.dimmed());
            } else {
                println!("    {}", row);
            }
        }
    }

    /// Print the total/enabled/public counters
    pub fn stats(&self, stats: &AgentStats) {
        let line = format!(
            "{} total, {} enabled, {} public",
            stats.total, stats.enabled, stats.public
        );
        if self.colored {
            println!("\n    {}", line.dimmed());
        } else {
            println!("\n    {}", line);
        }
    }

    /// Print every field of one agent
    pub fn agent_detail(&self, agent: &Agent) {
        self.header(&agent.name);
        self.kv("ID", &agent.id);
        self.kv("Slug", &agent.slug);
        self.kv("URL", &agent.url);
        self.kv("Icon", agent.icon.key());
        self.kv("State", enabled_label(agent.enabled));
        self.kv("Visibility", visibility_label(agent.is_public));
        self.kv("Version", agent.version.as_deref().unwrap_or("-"));
        self.kv("Author", agent.author.as_deref().unwrap_or("-"));
        if let Some(created_at) = agent.created_at {
            self.kv("Created", &created_at.to_rfc3339());
        }
        if let Some(updated_at) = agent.updated_at {
            self.kv("Updated", &updated_at.to_rfc3339());
        }

        self.subheader("Description");
        println!("    {}", agent.description);

        if !agent.use_cases.is_empty() {
            self.subheader("Use cases");
            for use_case in &agent.use_cases {
                self.list_item(use_case);
            }
        }

        if !agent.trigger_keywords.is_empty() {
            self.subheader("Trigger keywords");
            self.list_item(&agent.trigger_keywords.join(", "));
        }

        if !agent.tools.is_empty() {
            self.subheader("Tools");
            for tool in &agent.tools {
                self.list_item(&format!("{}: {}", tool.name, tool.description));
            }
        }
    }

    /// Print a diagnostics report
    pub fn diagnostics(&self, report: &DiagnosticsReport) {
        self.header("Store diagnostics");
        self.kv("Timestamp", &report.timestamp.to_rfc3339());
        self.kv("Store URL", &report.env.store_url);
        self.kv("Store key", &report.env.store_key);

        match report.status {
            DiagnosticStatus::Ok => self.success("Store reachable"),
            DiagnosticStatus::Error => self.error(
                report
                    .error
                    .as_deref()
                    .unwrap_or("Store check failed"),
            ),
        }

        if let Some(query) = &report.agents_query {
            self.subheader("Agents query");
            match &query.error {
                Some(error) => self.error(error),
                None => {
                    self.kv("Count", &query.count.to_string());
                    for agent in &query.data {
                        self.list_item(&format!(
                            "{} ({}) {}",
                            agent.name,
                            agent.slug,
                            enabled_label(agent.enabled)
                        ));
                    }
                }
            }
        }

        if let Some(schema) = &report.schema_check {
            self.subheader("Schema");
            match &schema.error {
                Some(error) => self.error(error),
                None => self.kv("Columns", &schema.columns.join(", ")),
            }
        }
    }

    /// Print a rendered test call result
    pub fn test_result(&self, agent: &Agent, result: &str) {
        self.subheader(&format!("Response from {}", agent.slug));
        for line in result.lines() {
            if self.colored && result.starts_with("Error:") {
                println!("    {}", line.red());
            } else {
                println!("    {}", line);
            }
        }
    }
}

/// Pad (or truncate with `…`) each cell to its width and join with a space.
pub fn table_row(cells: &[(&str, usize)]) -> String {
    cells
        .iter()
        .map(|(value, width)| fit(value, *width))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

fn fit(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len > width && width > 1 {
        let truncated: String = value.chars().take(width - 1).collect();
        format!("{}…", truncated)
    } else {
        format!("{:<width$}", value, width = width)
    }
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

fn visibility_label(is_public: bool) -> &'static str {
    if is_public {
        "public"
    } else {
        "private"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgentIcon;
    use chrono::Utc;

    fn agent() -> Agent {
        Agent {
            id: "a-1".to_string(),
            name: "Code Assistant".to_string(),
            slug: "code-assistant".to_string(),
            url: "https://agents.example.com/code".to_string(),
            description: "Reviews code".to_string(),
            icon: AgentIcon::Code,
            use_cases: vec!["Code review".to_string()],
            trigger_keywords: vec!["code".to_string(), "review".to_string()],
            tools: vec![],
            enabled: false,
            is_public: true,
            version: None,
            author: Some("Friday Team".to_string()),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    #[test]
    fn test_output_new() {
        let output = Output::new();
        assert!(output.colored);
    }

    #[test]
    fn test_output_no_color() {
        let output = Output::no_color();
        assert!(!output.colored);
    }

    #[test]
    fn test_table_row_pads_and_truncates() {
        assert_eq!(table_row(&[("abc", 5), ("de", 3)]), "abc   de");
        assert_eq!(table_row(&[("abcdefgh", 5)]), "abcd…");
        assert_eq!(table_row(&[]), "");
    }

    #[test]
    fn test_labels() {
        assert_eq!(enabled_label(true), "enabled");
        assert_eq!(enabled_label(false), "disabled");
        assert_eq!(visibility_label(false), "private");
    }

    #[test]
    fn test_output_methods_no_panic() {
        // Smoke test - ensure none of the output methods panic
        for output in [Output::no_color(), Output::new()] {
            output.banner();
            output.success("test success");
            output.info("test info");
            output.warning("test warning");
            output.error("test error");
            output.header("Test Header");
            output.subheader("Test Subheader");
            output.kv("key", "value");
            output.list_item("item");
            output.hint("hint message");
            output.agent_table(&[agent()]);
            output.agent_table(&[]);
            output.agent_detail(&agent());
            output.stats(&AgentStats {
                total: 1,
                enabled: 0,
                public: 1,
            });
            output.test_result(&agent(), "Error: connection refused");
        }
    }
}
