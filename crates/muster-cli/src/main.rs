//! Muster CLI: roster and chain-of-command manager.

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use muster_config::{CliOverrides, MusterConfig};
use muster_permissions::{
    Action, CredentialVerifier, PermissionEngine, RoleResolver, SharedSecretVerifier,
};
use muster_roster::{RosterService, RosterStore};
use muster_types::{Member, Roster, resolve_medal};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "muster", version, about = "Roster and chain-of-command manager")]
struct Cli {
    /// Username of the acting member
    #[arg(long, global = true)]
    user: Option<String>,

    /// Shared secret for the acting member (falls back to MUSTER_SECRET)
    #[arg(long, global = true)]
    secret: Option<String>,

    /// Directory holding roster.json (overrides MUSTER_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose/debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every member with rank and role
    Roster,
    /// Show one member by id, username, or name
    Show { member: String },
    /// Headcount and medal totals
    Stats,
    /// List the rank catalog
    Ranks,
    /// List the medal catalog
    Medals,
    /// Print the unit's founding history
    History,
    /// Verify credentials and print the resolved role
    Whoami,
    /// Check whether an action would be allowed, without performing it
    Check {
        target: String,
        #[arg(value_enum)]
        action: ActionArg,
        rank: Option<String>,
    },
    /// Enlist a new member
    Add { name: String, rank: String },
    /// Promote a member to a new rank
    Promote { target: String, rank: String },
    /// Demote a member to a new rank
    Demote { target: String, rank: String },
    /// Award a medal by catalog number or name
    Medal { target: String, medal: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum ActionArg {
    Promote,
    Demote,
    Medal,
    Add,
}

impl From<ActionArg> for Action {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Promote => Action::Promote,
            ActionArg::Demote => Action::Demote,
            ActionArg::Medal => Action::AwardMedal,
            ActionArg::Add => Action::AddMember,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = MusterConfig::load(CliOverrides {
        data_dir: cli.data_dir.clone(),
    })
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    let store = RosterStore::new(config.data_dir.clone())
        .await
        .with_context(|| format!("Failed to open data dir {}", config.data_dir.display()))?;
    let engine = PermissionEngine::new(RoleResolver::new(config.role_overrides.clone()));
    let service = RosterService::new(store, engine);

    run(&cli, &config, &service).await
}

async fn run(cli: &Cli, config: &MusterConfig, service: &RosterService) -> Result<()> {
    let engine = service.engine();
    match &cli.command {
        Command::Roster => {
            let roster = load(service).await?;
            print!("{}", render::roster_table(&roster, engine, &config.unit_name));
        }
        Command::Show { member } => {
            let roster = load(service).await?;
            let found = roster
                .find_by_id(member)
                .or_else(|| roster.find_target(member))
                .ok_or_else(|| anyhow::anyhow!("Soldier not found: {member}"))?;
            print!("{}", render::member_detail(found, engine));
        }
        Command::Stats => {
            let roster = load(service).await?;
            println!("{}", render::stats(&roster.stats()));
        }
        Command::Ranks => print!("{}", render::rank_catalog()),
        Command::Medals => print!("{}", render::medal_catalog()),
        Command::History => print!("{}", render::unit_history()),
        Command::Whoami => {
            let roster = load(service).await?;
            let actor = authenticate(cli, config, &roster)?;
            println!(
                "{} ({}) — {} {}, role {}",
                actor.name,
                actor.username,
                actor.rank,
                actor.rank.title(),
                engine.resolve_role(actor)
            );
        }
        Command::Check {
            target,
            action,
            rank,
        } => {
            let actor = authenticated_username(cli, config, service).await?;
            let role = service
                .check(&actor, target, Action::from(*action), rank.as_deref())
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("Allowed ({role}).");
        }
        Command::Add { name, rank } => {
            let actor = authenticated_username(cli, config, service).await?;
            let added = service
                .add_member(&actor, name, rank)
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!(
                "{} ({}) added as {} ({})",
                added.name,
                added.username,
                added.rank,
                added.rank.title()
            );
        }
        Command::Promote { target, rank } => {
            let actor = authenticated_username(cli, config, service).await?;
            let updated = service
                .promote(&actor, target, rank)
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            print_rank_change(&updated, "promoted");
        }
        Command::Demote { target, rank } => {
            let actor = authenticated_username(cli, config, service).await?;
            let updated = service
                .demote(&actor, target, rank)
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            print_rank_change(&updated, "demoted");
        }
        Command::Medal { target, medal } => {
            let actor = authenticated_username(cli, config, service).await?;
            let medal = resolve_medal(medal);
            let updated = service
                .award_medal(&actor, target, &medal)
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("{} awarded: {medal}", updated.name);
        }
    }
    Ok(())
}

async fn load(service: &RosterService) -> Result<Roster> {
    service.load().await.map_err(|e| anyhow::anyhow!("{e}"))
}

/// Verify `--user` / `--secret` against the roster and return the member.
fn authenticate<'a>(cli: &Cli, config: &MusterConfig, roster: &'a Roster) -> Result<&'a Member> {
    let username = cli
        .user
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--user is required for this command"))?;
    let secret = cli
        .secret
        .clone()
        .or_else(|| std::env::var("MUSTER_SECRET").ok())
        .ok_or_else(|| anyhow::anyhow!("--secret or MUSTER_SECRET is required"))?;
    let verifier =
        SharedSecretVerifier::new(&config.shared_secrets).map_err(|e| anyhow::anyhow!("{e}"))?;
    verifier
        .verify(roster, username, &secret)
        .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Authenticate, returning the actor's canonical username.
///
/// The role is not returned: the service resolves it again from the snapshot
/// it mutates.
async fn authenticated_username(
    cli: &Cli,
    config: &MusterConfig,
    service: &RosterService,
) -> Result<String> {
    let roster = load(service).await?;
    let actor = authenticate(cli, config, &roster)?;
    tracing::debug!(username = %actor.username, "authenticated");
    Ok(actor.username.clone())
}

fn print_rank_change(member: &Member, verb: &str) {
    println!(
        "{} {verb} to {} ({})",
        member.name,
        member.rank,
        member.rank.title()
    );
}
