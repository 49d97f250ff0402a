//! SkillsLab CLI Entry Point
//!
//! Wires configuration, the token vault and the stores together, then runs
//! one command. Uses `anyhow` for command errors; store errors are
//! converted through `kernel::error::AppError` first.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod commands {
    pub mod admin;
    pub mod problems;
    pub mod session;
    pub mod submissions;
}

use app::App;

const DEFAULT_LOG_FILTER: &str = "skillslab=info,auth=info,catalog=info,submissions=info,platform=info";
const VERBOSE_LOG_FILTER: &str =
    "skillslab=debug,auth=debug,catalog=debug,submissions=debug,platform=debug";

#[derive(Parser)]
#[command(name = "skillslab")]
#[command(about = "SkillsLab - practice problems and submissions from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the access token
    Login {
        #[arg(short, long, env = "SKILLSLAB_USERNAME")]
        username: String,

        #[arg(short, long, env = "SKILLSLAB_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored access token
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "SKILLSLAB_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        full_name: Option<String>,
    },

    /// List problems
    Problems(commands::problems::ListArgs),

    /// Show one problem
    Problem {
        id: String,
    },

    /// Submit a solution
    Submit {
        problem_id: String,

        /// Language of the solution (python, cpp, sql, ...)
        #[arg(short, long)]
        language: String,

        /// File holding the solution
        #[arg(short, long)]
        file: PathBuf,

        /// Wait for the judge's verdict
        #[arg(short, long)]
        wait: bool,
    },

    /// List your submissions
    Submissions,

    /// Show one submission
    Submission {
        id: String,
    },

    /// Problem management (admin only)
    #[command(subcommand)]
    Admin(commands::admin::AdminCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let fallback = if cli.verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let config = platform::ClientConfig::from_env();
    tracing::debug!(api = %config.api_base_url, "Loaded configuration");
    let app = App::new(config)?;

    let result = match command {
        Commands::Login { username, password } => {
            commands::session::login(&app, &username, &password).await
        }
        Commands::Logout => commands::session::logout(&app),
        Commands::Whoami => commands::session::whoami(&app).await,
        Commands::Register {
            username,
            email,
            password,
            full_name,
        } => commands::session::register(&app, username, email, password, full_name).await,
        Commands::Problems(args) => commands::problems::list(&app, args).await,
        Commands::Problem { id } => commands::problems::show(&app, &id).await,
        Commands::Submit {
            problem_id,
            language,
            file,
            wait,
        } => commands::submissions::submit(&app, &problem_id, &language, &file, wait).await,
        Commands::Submissions => commands::submissions::list(&app).await,
        Commands::Submission { id } => commands::submissions::show(&app, &id).await,
        Commands::Admin(command) => commands::admin::run(&app, command).await,
    };

    if app.session.sync_invalidation() {
        tracing::warn!("Session expired; sign in again with `skillslab login`");
    }
    result
}
