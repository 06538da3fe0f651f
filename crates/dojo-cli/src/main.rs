use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dojo_core::identity::Role;
use dojo_core::performance::LeaderboardPeriod;
use dojo_core::weights::WeightScope;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dojo")]
#[command(about = "Sales Dojo - roleplay training for sales teams", long_about = None, version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Backend base URL (overrides config.toml and DOJO_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Act as this email instead of the configured profile
    #[arg(long, global = true)]
    pub email: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the personas available for training
    Personas,
    /// Register or update your trainee profile
    Profile {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        team: Option<String>,
        /// seller or manager
        #[arg(long, default_value = "seller")]
        role: Role,
    },
    /// Start a roleplay session and chat with the persona
    Train {
        /// Persona key (defaults to the first persona)
        #[arg(long)]
        persona: Option<String>,
    },
    /// Show your finished sessions, most recent first
    History,
    /// Show the leaderboard
    Leaderboard {
        /// 7d, 30d, 90d or all (defaults to the configured period)
        #[arg(long)]
        period: Option<LeaderboardPeriod>,
        #[arg(long)]
        team: Option<String>,
    },
    /// Check premium eligibility
    Premium,
    /// Show or change scoring weights
    Weights {
        #[command(subcommand)]
        action: WeightsAction,
    },
}

#[derive(Subcommand)]
enum WeightsAction {
    /// Show the weights in effect for you
    Show,
    /// Save an override at a scope
    Set {
        /// user, team or global
        #[arg(long)]
        scope: WeightScope,
        /// Email (user scope) or team name (team scope); defaults to your own
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        rapport: f64,
        #[arg(long)]
        discovery: f64,
        #[arg(long)]
        objection: f64,
        #[arg(long)]
        closing: f64,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,dojo=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Personas => commands::personas::run(&cli.global).await?,
        Commands::Profile {
            email,
            name,
            team,
            role,
        } => commands::profile::run(&cli.global, email, name, team, role).await?,
        Commands::Train { persona } => commands::train::run(&cli.global, persona).await?,
        Commands::History => commands::dashboard::history(&cli.global).await?,
        Commands::Leaderboard { period, team } => {
            commands::dashboard::leaderboard(&cli.global, period, team).await?
        }
        Commands::Premium => commands::dashboard::premium(&cli.global).await?,
        Commands::Weights { action } => match action {
            WeightsAction::Show => commands::weights::show(&cli.global).await?,
            WeightsAction::Set {
                scope,
                target,
                rapport,
                discovery,
                objection,
                closing,
            } => {
                let vector =
                    dojo_core::weights::WeightVector::new(rapport, discovery, objection, closing);
                commands::weights::set(&cli.global, scope, target, vector).await?
            }
        },
    }

    Ok(())
}
