//! ACL evaluator — Demo CLI
//!
//! Runs small scenarios against the real engine, or answers a single
//! permission query against an ACL document.
//!
//! Usage:
//!   cargo run -p demo -- readme
//!   cargo run -p demo -- resume
//!   cargo run -p demo -- check --role moderator --ability users --permission ban
//!   cargo run -p demo -- check --document acl.toml --role member --ability posts

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use acl_contracts::{config::AclConfig, error::AclResult};
use acl_core::AclService;
use acl_policy::AclDocument;
use acl_storage::{open_store, FileMedium, SessionMedium};

/// The document used when `check` is run without `--document`.
const FORUM_DOCUMENT: &str = include_str!("../documents/forum.toml");

// ── CLI definition ────────────────────────────────────────────────────────────

/// Role-based access control evaluator demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "ACL evaluator demo",
    long_about = "Runs ACL evaluator scenarios showing role attachment, permission\n\
                  equivalence (write ↔ create/edit/delete), role-scoped denies, and\n\
                  session resume from storage."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// The moderator/admin walkthrough.
    Readme,
    /// Save a session into storage and resume it in a second session.
    Resume,
    /// Answer one `can` query against an ACL document.
    Check {
        /// ACL document to load. Defaults to the bundled forum document.
        #[arg(long)]
        document: Option<PathBuf>,

        /// Directory for the persistent backend.
        #[arg(long, default_value = ".acl")]
        storage_dir: PathBuf,

        /// Role to attach (repeatable).
        #[arg(long = "role", required = true)]
        roles: Vec<String>,

        /// Ability to check.
        #[arg(long)]
        ability: String,

        /// Permission to check.
        #[arg(long, default_value = "any")]
        permission: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Readme => run_readme(),
        Command::Resume => run_resume(),
        Command::Check {
            document,
            storage_dir,
            roles,
            ability,
            permission,
        } => run_check(document, storage_dir, &roles, &ability, &permission),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

fn run_readme() -> AclResult<()> {
    println!("Moderator / admin walkthrough");
    println!("=============================");

    let mut acl = AclService::ephemeral();
    acl.add_ability_with("moderator", "users", ["read", "ban", "unban"]);
    acl.add_ability("admin", "users");

    acl.attach_role("moderator");
    println!("attached roles: {}", format_roles(&acl));
    report(&acl, "users", "ban");
    report(&acl, "users", "create");

    acl.attach_role("admin");
    println!("attached roles: {}", format_roles(&acl));
    report(&acl, "users", "create");
    println!();
    Ok(())
}

fn run_resume() -> AclResult<()> {
    println!("Session resume");
    println!("==============");

    let config = AclConfig::default();
    let session = SessionMedium::new();
    let files = FileMedium::new(".acl");

    let mut first = AclService::new(config.clone(), open_store(&config, &session, &files))?;
    first.add_ability_with("editor", "posts", ["read", "edit"]);
    first.attach_role("editor");
    println!("first session  {} roles: {}", first.session_id().0, format_roles(&first));

    let mut second = AclService::new(config.clone(), open_store(&config, &session, &files))?;
    let resumed = second.resume();
    println!(
        "second session {} resumed: {} roles: {}",
        second.session_id().0,
        resumed,
        format_roles(&second)
    );
    report(&second, "posts", "write");
    report(&second, "posts", "delete");
    println!();
    Ok(())
}

fn run_check(
    document: Option<PathBuf>,
    storage_dir: PathBuf,
    roles: &[String],
    ability: &str,
    permission: &str,
) -> AclResult<()> {
    let document = match document {
        Some(path) => AclDocument::from_file(&path)?,
        None => AclDocument::from_toml_str(FORUM_DOCUMENT)?,
    };

    let store = open_store(&document.config, &SessionMedium::new(), &FileMedium::new(storage_dir));
    let mut acl = AclService::new(document.config.clone(), store)?;
    document.apply(&mut acl);
    for role in roles {
        acl.attach_role(role.as_str());
    }

    info!(roles = roles.len(), ability = %ability, permission = %permission, "running check");
    report(&acl, ability, permission);
    Ok(())
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn report(acl: &AclService, ability: &str, permission: &str) {
    let verdict = if acl.can(ability, permission) { "ALLOW" } else { "DENY" };
    println!("  can({ability}, {permission}) → {verdict}");
}

fn format_roles(acl: &AclService) -> String {
    let names: Vec<&str> = acl.roles().iter().map(|r| r.as_str()).collect();
    format!("[{}]", names.join(", "))
}
