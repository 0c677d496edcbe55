//! # wadash
//!
//! Command-line front end for the WhatsApp bot admin backend. Every command is
//! issued "from" a navigation path (`--path /42/groups`); the first segment of
//! that path is the tenant the request is tagged with.

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use wadash_client::models::{NewMember, RatingUpdate, ScheduledMessage, SendMessage};
use wadash_client::{
    ApiClient, CancellationToken, DashboardService, LocationSource, Navigator, Route,
};

#[derive(Debug, Parser)]
#[command(name = "wadash", version, about = "Manage WhatsApp bot groups, contacts and messages")]
struct Cli {
    /// Navigation path the command runs from; its first segment is the tenant.
    #[arg(long, global = true, env = "WADASH_PATH", default_value = "/")]
    path: String,

    /// Override `api.base_url` from the configuration.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show which tenant the current path resolves to.
    Tenant,
    /// Log in and print the tenant home path.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "WADASH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    #[command(subcommand)]
    Groups(GroupsCommand),
    /// List bot configurations and their action logs.
    Bots,
    #[command(subcommand)]
    Contacts(ContactsCommand),
    /// Hand a message to the backend scheduler.
    Schedule {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: String,
        /// Local time, `YYYY-MM-DDTHH:MM[:SS]`.
        #[arg(long, value_parser = parse_schedule_time)]
        at: NaiveDateTime,
    },
    /// Group analytics; all groups unless `--group` is given.
    Dashboard {
        #[arg(long)]
        group: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum GroupsCommand {
    List,
    Show { id: i64 },
    Members { id: i64 },
    Delete { name: String },
    /// Assign a bot configuration to a group.
    SetBot { group_id: i64, botconfig_id: i64 },
}

#[derive(Debug, Subcommand)]
enum ContactsCommand {
    /// Rate a group member (1-5).
    Rate { group_id: i64, member_id: i64, rating: u8 },
    /// Send a direct message to a member.
    Send { name: String, message: String },
    /// Add a contact to a group.
    Add {
        group_id: i64,
        name: String,
        email: String,
        #[arg(long, default_value = "member")]
        role: String,
    },
    /// Resync contacts from WhatsApp.
    Sync,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = wadash_common::config::load().context("loading configuration")?;
    if let Some(url) = &cli.base_url {
        config.api.base_url = url.clone();
    }

    // Logs go to stderr; stdout carries the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.filter)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        path = %cli.path,
        "starting wadash"
    );

    let nav = Navigator::new(cli.path.clone());
    let cancel = CancellationToken::new();
    let client = ApiClient::from_config(&config.api, &config.tenant, Arc::new(nav.clone()))?
        .with_cancellation(cancel.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted; cancelling request");
            cancel.cancel();
        }
    });

    let output = run(cli.command, &client, &nav).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(command: Command, client: &ApiClient, nav: &Navigator) -> anyhow::Result<Value> {
    let value = match command {
        Command::Tenant => {
            let ctx = client.tenant_context();
            json!({
                "path": nav.pathname(),
                "tenant": ctx.tenant_id().map(|t| t.as_str()),
            })
        }
        Command::Login { username, password } => {
            let user = client.login(&username, &password).await?;
            let home = Route::Home.path(&user.tenant_id);
            tracing::info!(tenant = %user.tenant_id, %home, "logged in");
            json!({ "user": user, "home": home })
        }
        Command::Groups(cmd) => match cmd {
            GroupsCommand::List => serde_json::to_value(client.get_groups().await?)?,
            GroupsCommand::Show { id } => serde_json::to_value(client.get_group_details(id).await?)?,
            GroupsCommand::Members { id } => {
                serde_json::to_value(client.get_group_members(id).await?)?
            }
            GroupsCommand::Delete { name } => client.delete_group(&name).await?,
            GroupsCommand::SetBot { group_id, botconfig_id } => {
                client.update_group_bot_config(group_id, botconfig_id).await?
            }
        },
        Command::Bots => serde_json::to_value(client.get_bot_configs().await?)?,
        Command::Contacts(cmd) => match cmd {
            ContactsCommand::Rate { group_id, member_id, rating } => {
                client
                    .update_rating(&RatingUpdate { group_id, member_id, rating })
                    .await?
            }
            ContactsCommand::Send { name, message } => {
                client.send_message(&SendMessage { name, message }).await?
            }
            ContactsCommand::Add { group_id, name, email, role } => {
                let member = NewMember { name, email, group_id, role };
                serde_json::to_value(client.add_member(&member).await?)?
            }
            ContactsCommand::Sync => serde_json::to_value(client.sync_contacts().await?)?,
        },
        Command::Schedule { phone, message, at } => {
            client
                .schedule_message(&ScheduledMessage {
                    phone_number: phone,
                    message,
                    schedule_time: at,
                })
                .await?
        }
        Command::Dashboard { group } => {
            let service = DashboardService::new(client.clone());
            match group {
                Some(name) => serde_json::to_value(service.get_dashboard_data(&name).await?)?,
                None => serde_json::to_value(service.fetch_all_data().await?.as_ref())?,
            }
        }
    };
    Ok(value)
}

/// Accepts the `datetime-local` form (`2026-11-01T09:30`) with optional seconds.
fn parse_schedule_time(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|_| format!("expected YYYY-MM-DDTHH:MM[:SS], got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_schedule_time_formats() {
        let minutes = parse_schedule_time("2026-11-01T09:30").unwrap();
        let seconds = parse_schedule_time("2026-11-01T09:30:00").unwrap();
        assert_eq!(minutes, seconds);
        assert!(parse_schedule_time("tomorrow").is_err());
        assert!(parse_schedule_time("").is_err());
    }

    #[test]
    fn test_path_is_global() {
        let cli = Cli::try_parse_from(["wadash", "groups", "list", "--path", "/42/groups"]).unwrap();
        assert_eq!(cli.path, "/42/groups");
        assert!(matches!(cli.command, Command::Groups(GroupsCommand::List)));
    }

    #[test]
    fn test_contacts_add_defaults_role() {
        let cli = Cli::try_parse_from(["wadash", "contacts", "add", "3", "Ravi", "ravi@company.com"])
            .unwrap();
        match cli.command {
            Command::Contacts(ContactsCommand::Add { group_id, role, .. }) => {
                assert_eq!(group_id, 3);
                assert_eq!(role, "member");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
