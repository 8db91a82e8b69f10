use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use purepath_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "purepath", version, about = "PurePath recovery tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Streak, check-ins and level
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Browse the educational topic graph
    Learn {
        #[command(subcommand)]
        action: commands::learn::LearnAction,
    },
    /// Device lockdown guides
    Shield {
        #[command(subcommand)]
        action: commands::shield::ShieldAction,
    },
    /// Guided breathing for an urge
    Panic {
        /// Full Inhale/Hold/Exhale cycles (defaults to panic.cycles)
        #[arg(long)]
        cycles: Option<u32>,
    },
    /// Talk to the AI recovery coach
    Coach {
        #[command(subcommand)]
        action: commands::coach::CoachAction,
    },
    /// AI-written library articles
    Library {
        #[command(subcommand)]
        action: commands::library::LibraryAction,
    },
    /// Sign in locally
    Login {
        /// Display name (omit for a guest identity)
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Show the signed-in user
    Whoami,
    /// Forget the signed-in user
    Logout,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = Config::load_or_default().log.level;
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Learn { action } => commands::learn::run(action),
        Commands::Shield { action } => commands::shield::run(action),
        Commands::Panic { cycles } => commands::panic::run(cycles),
        Commands::Coach { action } => commands::coach::run(action),
        Commands::Library { action } => commands::library::run(action),
        Commands::Login { name, email } => commands::user::login(name, email),
        Commands::Whoami => commands::user::whoami(),
        Commands::Logout => commands::user::logout(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "purepath", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
