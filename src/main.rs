use anyhow::{Context, Result};
use friday::agents::{seed_sample_agents, AgentService, AgentTestInvoker};
use friday::cli::{output::Output, Cli, Commands};
use friday::db::run_diagnostics;
use friday::utils::Config;
use tracing::{debug, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Err(e) = run(cli, &output).await {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let serving = matches!(cli.command, None | Some(Commands::Serve { .. }));
    let level = match (cli.verbose, serving) {
        (true, _) => "friday=debug,tower_http=debug",
        (false, true) => "friday=info,tower_http=info",
        (false, false) => "friday=warn",
    };
    let json_logs = cli.json_logs
        || std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
    init_logging(level, json_logs)?;

    let mut config = Config::from_env()?;
    debug!(store = %config.store.masked_url(), "Configuration loaded");

    match cli.command {
        None => {
            output.banner();
            friday::server::serve(config).await
        }
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            output.banner();
            friday::server::serve(config).await
        }
        Some(Commands::Agents(command)) => {
            let repository = config.store.provider()?.create_client().await?;
            let service = AgentService::new(repository);
            let invoker = AgentTestInvoker::from_config(&config.invoker)?;
            friday::cli::agents::run(command, &service, &invoker, output).await?;
            Ok(())
        }
        Some(Commands::Seed) => {
            let repository = config.store.provider()?.create_client().await?;
            let report = seed_sample_agents(repository.as_ref())
                .await
                .context("Seeding failed")?;
            info!(count = report.count(), "Seed finished");

            output.success(&report.message());
            for agent in &report.inserted {
                output.list_item(&format!("{} ({})", agent.name, agent.slug));
            }
            Ok(())
        }
        Some(Commands::Debug { json }) => {
            // Diagnostics connect on their own so a bad configuration is reported, not fatal.
            let report = run_diagnostics(&config.store, None).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output.diagnostics(&report);
            }
            Ok(())
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_target(false).compact().init();
    }

    Ok(())
}
