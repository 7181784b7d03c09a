//! Operator CLI for guild arena and challenge storage.
//!
//! The storage backend is configured through environment variables (see
//! [`guilds_storage::config`]); flags here only override the read-only and
//! pretty-print switches and describe the migration target.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use guilds_storage::config::get_pretty_json;
use guilds_storage::{
    migrate_records, DatabaseAdapter, DatabaseBackend, DatabaseConfig, GuildStorage,
    JsonCodec, Settings, StorageContext,
};

#[derive(Parser)]
#[command(name = "guildsctl", about = "Inspect and migrate guild arena/challenge storage")]
struct Cli {
    /// Skip every write, regardless of GUILDS_READ_ONLY.
    #[arg(long, global = true)]
    read_only: bool,

    /// Pretty-print records written to JSON files, regardless of GUILDS_PRETTY_JSON.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the arena and challenge containers for the configured backend.
    Init,
    /// List stored arenas.
    Arenas,
    /// List stored challenges.
    Challenges,
    /// Copy every record from the configured backend into another one.
    Migrate {
        /// Target backend: json, mysql, sqlite or mariadb.
        #[arg(long)]
        to: DatabaseBackend,
        /// Connection URL for a relational target.
        #[arg(long)]
        url: Option<String>,
        /// Table prefix for a relational target.
        #[arg(long)]
        prefix: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let settings = Arc::new(Settings::from_env());
    if cli.read_only {
        settings.set_read_only(true);
    }

    let config = DatabaseConfig::from_env().context("invalid storage configuration")?;
    tracing::info!("Using data directory: {}", config.data_dir.display());

    let codec = if cli.pretty || get_pretty_json() {
        JsonCodec::pretty()
    } else {
        JsonCodec::default()
    };
    let ctx = StorageContext::new(config.data_dir.clone(), settings).with_codec(codec);
    let storage = open_storage(&ctx, &config).await?;

    match cli.command {
        Commands::Init => {
            storage.create_containers().await?;
            println!("Containers ready on {} backend", config.backend);
        }
        Commands::Arenas => list_arenas(&storage).await?,
        Commands::Challenges => list_challenges(&storage).await?,
        Commands::Migrate { to, url, prefix } => {
            let mut target_config = DatabaseConfig {
                backend: to,
                url,
                ..config.clone()
            };
            if let Some(prefix) = prefix {
                target_config.table_prefix = prefix;
            }
            if target_config == config {
                anyhow::bail!("migration target is the configured source backend");
            }

            let target = open_storage(&ctx, &target_config).await?;
            let report = migrate_records(&storage, &target).await?;
            println!(
                "Migrated {} arenas and {} challenges from {} to {}",
                report.arenas, report.challenges, config.backend, target_config.backend
            );
        }
    }

    Ok(())
}

async fn open_storage(ctx: &StorageContext, config: &DatabaseConfig) -> anyhow::Result<GuildStorage> {
    let db = DatabaseAdapter::connect(config)
        .await
        .with_context(|| format!("failed to open {} storage", config.backend))?;
    Ok(GuildStorage::new(ctx, &db)?)
}

async fn list_arenas(storage: &GuildStorage) -> anyhow::Result<()> {
    let mut arenas = storage.arenas.get_all_arenas().await?;
    arenas.sort_by(|a, b| a.name.cmp(&b.name));
    for arena in &arenas {
        let state = match (arena.is_ready(), arena.in_use) {
            (false, _) => "incomplete",
            (true, true) => "in use",
            (true, false) => "available",
        };
        println!("{}  {:<24} {}", arena.id, arena.name, state);
    }
    println!("{} arena(s)", arenas.len());
    Ok(())
}

async fn list_challenges(storage: &GuildStorage) -> anyhow::Result<()> {
    let mut challenges: Vec<_> = storage.challenges.get_all_challenges().await?.into_iter().collect();
    challenges.sort_by_key(|c| c.id);
    for challenge in &challenges {
        let state = if challenge.completed {
            "completed"
        } else if challenge.started {
            "started"
        } else if challenge.accepted {
            "accepted"
        } else {
            "pending"
        };
        println!(
            "{}  {} vs {}  {}",
            challenge.id, challenge.challenger, challenge.defender, state
        );
    }
    println!("{} challenge(s)", challenges.len());
    Ok(())
}
