use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tailway_core::cli::{self, ConfigCmd, TailArgs};
use tailway_core::conf::load_config;
use tailway_core::logging::{init_cli_logging, init_logging};
use tailway_core::server;

#[derive(Parser, Debug)]
#[command(
    name = "tailway",
    version,
    about = "Tailway: live log tailing over HTTP"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },

    /// Print new lines of a log once, as a poll payload
    Tail(TailArgs),

    /// Run the Tailway server (default)
    Run {
        /// Path to the Tailway config directory
        #[arg(long, default_value = "config")]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Config { cmd }) => {
            init_cli_logging();

            if let Err(e) = cli::config::run(cmd) {
                eprintln!("config error: {e}");
                std::process::exit(1);
            }
        }

        Some(Command::Tail(args)) => {
            init_cli_logging();

            if let Err(e) = cli::tail::run(args) {
                eprintln!("tail error: {e}");
                std::process::exit(1);
            }
        }

        Some(Command::Run { config }) => serve(config),

        None => serve(PathBuf::from("config")),
    }
}

fn serve(config_dir: PathBuf) {
    init_logging();

    let validated = match load_config(&config_dir) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, config = %config_dir.display(), "failed to load config");
            eprintln!("failed to load config: {e}");
            std::process::exit(1);
        }
    };

    for warning in &validated.report.warnings {
        tracing::warn!(section = warning.origin.section, "{}", warning.message);
    }

    if let Err(e) = server::run(config_dir, validated.config) {
        tracing::error!(error = %e, "failed to start tailway server");
        std::process::exit(1);
    }
}
