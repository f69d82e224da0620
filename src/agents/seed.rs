//! Sample agent seeding.
//!
//! Inserts a fixed set of sample agents whose slugs are not already present.
//! Existing rows are never updated.

use crate::db::AgentRepository;
use crate::types::{Agent, AgentIcon, AppError, CreateAgentInput, Result};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Debug, Default, Serialize)]
pub struct SeedReport {
    pub inserted: Vec<Agent>,
    /// Slugs that already existed
    pub skipped: Vec<String>,
}

impl SeedReport {
    pub fn count(&self) -> usize {
        self.inserted.len()
    }

    pub fn message(&self) -> String {
        if self.inserted.is_empty() {
            "All sample agents already exist".to_string()
        } else {
            format!("Seeded {} sample agents", self.inserted.len())
        }
    }
}

struct Sample {
    name: &'static str,
    slug: &'static str,
    url: &'static str,
    description: &'static str,
    icon: AgentIcon,
    use_cases: &'static [&'static str],
    trigger_keywords: &'static [&'static str],
    enabled: bool,
}

const SAMPLES: [Sample; 5] = [
    Sample {
        name: "Code Suggester",
        slug: "code-suggester",
        url: "https://friday-code-suggester.vercel.app/api/suggest",
        description: "Suggests code improvements and fixes based on your current coding context",
        icon: AgentIcon::Code,
        use_cases: &["Code suggestions", "Bug fixes", "Refactoring help", "Code completion"],
        trigger_keywords: &["code", "function", "class", "error", "bug", "fix", "refactor"],
        enabled: true,
    },
    Sample {
        name: "Linear Agent",
        slug: "linear-agent",
        url: "https://friday-linear-agent.vercel.app/api/linear",
        description: "Manages Linear issues - creates, updates, and tracks your project tasks",
        icon: AgentIcon::ListChecks,
        use_cases: &["Create issues", "Update status", "Track progress", "Manage sprints"],
        trigger_keywords: &["linear", "issue", "ticket", "task", "sprint", "backlog"],
        enabled: true,
    },
    Sample {
        name: "Calendar Agent",
        slug: "calendar-agent",
        url: "https://friday-calendar-agent.vercel.app/api/calendar",
        description: "Helps schedule meetings and manage your calendar events",
        icon: AgentIcon::Calendar,
        use_cases: &["Schedule meetings", "Check availability", "Create events", "Set reminders"],
        trigger_keywords: &["meeting", "calendar", "schedule", "event", "appointment", "remind"],
        enabled: true,
    },
    Sample {
        name: "GitHub Agent",
        slug: "github-agent",
        url: "https://friday-github-agent.vercel.app/api/github",
        description: "Interacts with GitHub - creates PRs, reviews code, manages issues",
        icon: AgentIcon::Github,
        use_cases: &["Create PRs", "Review code", "Manage issues", "Check CI status"],
        trigger_keywords: &[
            "github",
            "pr",
            "pull request",
            "commit",
            "branch",
            "merge",
            "repository",
        ],
        enabled: true,
    },
    Sample {
        name: "Email Agent",
        slug: "email-agent",
        url: "https://friday-email-agent.vercel.app/api/email",
        description: "Helps draft and send emails, summarizes long email threads",
        icon: AgentIcon::Mail,
        use_cases: &["Draft emails", "Summarize threads", "Schedule sends", "Reply suggestions"],
        trigger_keywords: &["email", "mail", "gmail", "inbox", "reply", "send", "compose"],
        enabled: false,
    },
];

/// The fixed sample set
pub fn sample_agents() -> Vec<CreateAgentInput> {
    SAMPLES
        .iter()
        .map(|sample| CreateAgentInput {
            name: sample.name.to_string(),
            slug: sample.slug.to_string(),
            url: sample.url.to_string(),
            description: sample.description.to_string(),
            icon: sample.icon,
            use_cases: sample.use_cases.iter().map(|s| s.to_string()).collect(),
            trigger_keywords: sample.trigger_keywords.iter().map(|s| s.to_string()).collect(),
            tools: Vec::new(),
            enabled: sample.enabled,
            is_public: true,
            version: Some("1.0.0".to_string()),
            author: Some("Friday Team".to_string()),
        })
        .collect()
}

/// Insert every sample agent whose slug is not already stored.
pub async fn seed_sample_agents(repository: &dyn AgentRepository) -> Result<SeedReport> {
    let existing: HashSet<String> = repository.slugs().await?.into_iter().collect();
    let mut report = SeedReport::default();

    for input in sample_agents() {
        if existing.contains(&input.slug) {
            report.skipped.push(input.slug);
            continue;
        }

        let slug = input.slug.clone();
        match repository.create(input).await {
            Ok(agent) => report.inserted.push(agent),
            // Inserted concurrently by someone else since the slug read
            Err(AppError::Conflict(_)) => {
                warn!(slug = %slug, "Sample agent appeared during seeding; skipping");
                report.skipped.push(slug);
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        inserted = report.inserted.len(),
        skipped = report.skipped.len(),
        "Seeded sample agents"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_valid() {
        let samples = sample_agents();
        assert_eq!(samples.len(), 5);

        for sample in samples {
            let slug = sample.slug.clone();
            let sanitized = sample.sanitize().expect("sample should validate");
            assert_eq!(sanitized.slug, slug);
        }
    }

    #[test]
    fn test_only_email_agent_disabled() {
        let disabled: Vec<_> = sample_agents()
            .into_iter()
            .filter(|a| !a.enabled)
            .map(|a| a.slug)
            .collect();
        assert_eq!(disabled, vec!["email-agent"]);
    }
}
