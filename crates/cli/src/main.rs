mod skill_commands;

use {
    clap::{Parser, Subcommand},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "openwork", about = "OpenWork — desktop AI workbench")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Workspace directory (overrides the current directory).
    #[arg(long, global = true, env = "OPENWORK_WORKDIR")]
    workdir: Option<std::path::PathBuf>,

    /// Custom data directory (overrides the default data dir).
    #[arg(long, global = true, env = "OPENWORK_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Skill package management.
    Skills {
        #[command(subcommand)]
        action: skill_commands::SkillAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);
    info!(version = env!("CARGO_PKG_VERSION"), "openwork starting");

    if let Some(ref dir) = cli.data_dir {
        openwork_config::set_data_dir(dir.clone());
    }

    let workdir = match cli.workdir {
        Some(ref dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Skills { action } => skill_commands::handle_skills(&workdir, action),
    }
}
