//! `agents` subcommands.
//!
//! Every command goes through [`AgentService`], so mutations are followed by a
//! reload of the snapshot the same way the dashboard does it.

use super::output::Output;
use super::{AgentCommands, CreateArgs, EditArgs};
use crate::agents::{AgentService, AgentTestInvoker};
use crate::types::{AgentIcon, AgentPatch, AppError, CreateAgentInput, Result};

/// Dispatch one `agents` subcommand.
pub async fn run(
    command: AgentCommands,
    service: &AgentService,
    invoker: &AgentTestInvoker,
    output: &Output,
) -> Result<()> {
    match command {
        AgentCommands::List { search, public } => {
            service.refresh().await?;

            let mut agents = service.search(search.as_deref().unwrap_or_default());
            if public {
                agents.retain(|agent| agent.is_listed());
            }

            output.header("Agents");
            output.agent_table(&agents);
            output.stats(&service.stats());
        }

        AgentCommands::Show { id } => {
            service.refresh().await?;
            let agent = service
                .get(&id)
                .ok_or_else(|| AppError::NotFound(format!("Agent {} not found", id)))?;
            output.agent_detail(&agent);
        }

        AgentCommands::Create(args) => {
            let agent = service.create(create_input(args)).await?;
            output.success(&format!("Created {} ({})", agent.name, agent.slug));
            output.kv("ID", &agent.id);
            warn_stale(service, output);
        }

        AgentCommands::Edit(args) => {
            let id = args.id.clone();
            let patch = edit_patch(args);
            if patch.is_empty() {
                output.warning("Nothing to update");
                output.hint("Pass at least one field, e.g. --name or --enable");
                return Ok(());
            }

            let agent = service.edit(&id, patch).await?;
            output.success(&format!("Updated {}", agent.name));
            warn_stale(service, output);
        }

        AgentCommands::Toggle { id } => {
            service.refresh().await?;
            let agent = service.toggle(&id).await?;
            let state = if agent.enabled { "enabled" } else { "disabled" };
            output.success(&format!("{} is now {}", agent.name, state));
            warn_stale(service, output);
        }

        AgentCommands::Delete { id, yes } => {
            if !yes {
                output.hint("Re-run with --yes to confirm");
                return Err(AppError::InvalidInput(format!(
                    "Refusing to delete agent {} without --yes",
                    id
                )));
            }

            service.remove(&id).await?;
            output.success(&format!("Deleted agent {}", id));
            warn_stale(service, output);
        }

        AgentCommands::Test { id, command } => {
            if command.trim().is_empty() {
                return Err(AppError::InvalidInput(
                    "Command must not be empty".to_string(),
                ));
            }

            let agent = service.repository().get_by_id(&id).await?;
            output.info(&format!("POST {}", agent.url));
            let result = invoker.invoke(&agent, &command).await;
            output.test_result(&agent, &result);
        }
    }

    Ok(())
}

fn warn_stale(service: &AgentService, output: &Output) {
    if let Some(error) = service.error() {
        output.warning(&format!("Saved, but reloading agents failed: {}", error));
    }
}

/// Map `agents create` flags onto a create input.
pub fn create_input(args: CreateArgs) -> CreateAgentInput {
    let mut input = CreateAgentInput::new(&args.name, &args.url, &args.description);
    input.slug = args.slug.unwrap_or_default();
    input.icon = args
        .icon
        .as_deref()
        .map(AgentIcon::from_key)
        .unwrap_or_default();
    input.use_cases = args.use_cases;
    input.trigger_keywords = args.keywords;
    input.enabled = !args.disabled;
    input.is_public = !args.private;
    input.version = args.version;
    input.author = args.author;
    input
}

/// Map `agents edit` flags onto a patch. Unset flags stay `None`.
pub fn edit_patch(args: EditArgs) -> AgentPatch {
    let enabled = match (args.enable, args.disable) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    let is_public = match (args.public, args.private) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };

    AgentPatch {
        name: args.name,
        slug: args.slug,
        url: args.url,
        description: args.description,
        icon: args.icon.as_deref().map(AgentIcon::from_key),
        use_cases: args.use_cases,
        trigger_keywords: args.keywords,
        tools: None,
        enabled,
        is_public,
        version: args.version,
        author: args.author,
    }
}
