mod cli;
mod document;
mod engine;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use instana_core::config::load_dotenv;
use instana_core::{CancellationToken, ProviderConfig};
use instana_resources::{
    AlertingChannelResource, AutomationActionResource, MobileAlertConfigResource, ResourceHandle,
};
use instana_restapi::{InMemoryApi, InstanaClient};

use crate::cli::{CliArgs, Command, ResourceKind};

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let mut config = ProviderConfig::from_env();
    if let Some(endpoint) = args.endpoint {
        config.endpoint = Some(endpoint);
    }
    if let Some(api_token) = args.api_token {
        config.api_token = Some(api_token);
    }

    match args.command {
        Command::Schema { resource } => print_schemas(resource),
        Command::Render { resource, file } => {
            let doc = document::load(&file)?;
            print_json(&engine::render(resource, &doc)?)
        }
        Command::Apply {
            resource,
            file,
            state,
            dry_run,
        } => {
            let doc = document::load(&file)?;
            let cancel = cancel_on_ctrl_c();
            let new_state = if dry_run {
                if state.is_some() {
                    warn!("--state is ignored with --dry-run; the in-memory API starts empty");
                }
                engine::apply(resource, &InMemoryApi::new(), &doc, None, &cancel).await?
            } else {
                let prior = state.as_deref().map(document::load).transpose()?;
                let api = connect(&config)?;
                engine::apply(resource, &api, &doc, prior.as_ref(), &cancel).await?
            };
            print_json(&new_state)
        }
        Command::Read(args) => {
            let prior = document::load(&args.state)?;
            let cancel = cancel_on_ctrl_c();
            let api = connect(&config)?;
            match engine::read(args.resource, &api, &prior, &cancel).await? {
                Some(state) => print_json(&state),
                None => {
                    warn!("object no longer exists; drop it from state");
                    print_json(&serde_json::Value::Null)
                }
            }
        }
        Command::Destroy(args) => {
            let prior = document::load(&args.state)?;
            let cancel = cancel_on_ctrl_c();
            let api = connect(&config)?;
            engine::destroy(args.resource, &api, &prior, &cancel).await
        }
        Command::Lookup { target } => {
            let cancel = cancel_on_ctrl_c();
            let api = connect(&config)?;
            print_json(&engine::lookup(&target, &api, &cancel).await?)
        }
    }
}

fn connect(config: &ProviderConfig) -> Result<InstanaClient> {
    config.validate()?;
    config.log_summary();
    let client = InstanaClient::from_config(config).context("failed to build Instana client")?;
    info!(base_url = client.base_url(), "client ready");
    Ok(client)
}

/// Token that fires on the first Ctrl-C; in-flight requests abort with a
/// cancellation diagnostic.
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, canceling");
            trigger.cancel();
        }
    });
    token
}

fn print_schemas(resource: Option<ResourceKind>) -> Result<()> {
    let kinds = match resource {
        Some(kind) => vec![kind],
        None => ResourceKind::ALL.to_vec(),
    };
    let schemas: Vec<_> = kinds
        .into_iter()
        .map(|kind| match kind {
            ResourceKind::AlertingChannel => AlertingChannelResource::new().metadata().schema.clone(),
            ResourceKind::MobileAlertConfig => MobileAlertConfigResource::new().metadata().schema.clone(),
            ResourceKind::AutomationAction => AutomationActionResource::new().metadata().schema.clone(),
        })
        .collect();
    print_json(&schemas)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
