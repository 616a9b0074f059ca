use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod screen;

#[derive(Parser)]
#[command(name = "humancalc", version, about = "Timed mental-arithmetic quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive session in the terminal
    Play(commands::play::PlayArgs),
    /// Generate one question and print it as JSON
    Question(commands::question::QuestionArgs),
    /// Show operand ranges, time limits and points per difficulty
    Rules,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Play(args) => commands::play::run(args),
        Commands::Question(args) => commands::question::run(args),
        Commands::Rules => commands::rules::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
