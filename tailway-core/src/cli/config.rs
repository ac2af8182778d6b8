use crate::conf::{ConfigError, load_config, load_runtime_config};
use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to config directory
        #[arg(default_value = "config")]
        path: PathBuf,

        /// Plain output without colors
        #[arg(short, long, conflicts_with = "json")]
        plain: bool,

        /// Output the validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print resolved configuration
    Dump {
        #[arg(default_value = "config")]
        path: PathBuf,
    },
}

pub fn run(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Check { path, plain, json } => check(path, plain, json),
        ConfigCmd::Dump { path } => dump(path),
    }
}

pub fn check(path: PathBuf, plain: bool, json: bool) -> Result<()> {
    let (report, ok) = match load_config(&path) {
        Ok(validated) => {
            if !json {
                let tail = &validated.config.tail;
                println!("✔ Config loaded successfully");
                println!("✔ listening on {}", validated.config.listener.addr);
                println!("✔ tail route {}", tail.route);
                println!("✔ log dir {}", tail.log_dir.display());
            }
            (validated.report, true)
        }
        Err(ConfigError::Validation { report }) => (report, false),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if json {
        println!("{}", report.render_json()?);
    } else if report.has_violations() {
        if plain {
            report.render_plain();
        } else {
            report.render_pretty();
        }
    }

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

pub fn dump(path: PathBuf) -> Result<()> {
    let cfg = load_runtime_config(&path)?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}
