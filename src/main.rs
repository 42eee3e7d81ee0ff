//! Apsetup - installer and privilege setup for the AP Manager hotspot tool.
//!
//! Deploys the manager payload into fixed system locations, reconciles the
//! passwordless sudo grants the manager needs (validated through visudo so
//! a bad edit can never corrupt the policy store), and installs the
//! OS-level network dependencies for the detected package manager.

use anyhow::Result;
use clap::{Parser, Subcommand};

use apsetup::commands;
use apsetup::config::Config;

#[derive(Parser)]
#[command(name = "apsetup")]
#[command(about = "Installer and privilege setup for the AP Manager hotspot tool")]
#[command(
    after_help = "QUICK START:\n  sudo apsetup preflight  Check the host before installing\n  sudo apsetup install    Deploy files, sudoers rules, dependencies\n  apsetup show status     Inspect what is installed"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install AP Manager (deploy files, sudoers rules, dependencies)
    Install {
        /// Skip OS-level dependency installation
        #[arg(long)]
        no_deps: bool,
    },

    /// Reconcile the passwordless sudo rules only
    Sudoers,

    /// Install OS-level network dependencies only
    Deps,

    /// Run preflight checks (verify the host before installing)
    Preflight {
        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration
    Config,
    /// Show the desired sudoers rules
    Rules,
    /// Show install status (what is deployed, which rules are present)
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let base_dir = std::env::current_dir()?;

    // Load .env if present
    dotenvy::dotenv().ok();
    let config = Config::load(&base_dir);

    match cli.command {
        Commands::Install { no_deps } => {
            commands::cmd_install(&config, no_deps)?;
        }

        Commands::Sudoers => {
            commands::cmd_sudoers(&config)?;
        }

        Commands::Deps => {
            commands::cmd_deps()?;
        }

        Commands::Preflight { strict } => {
            commands::cmd_preflight(&config, strict)?;
        }

        Commands::Show { what } => {
            let show_target = match what {
                ShowTarget::Config => commands::show::ShowTarget::Config,
                ShowTarget::Rules => commands::show::ShowTarget::Rules,
                ShowTarget::Status => commands::show::ShowTarget::Status,
            };
            commands::cmd_show(show_target, &config)?;
        }
    }

    Ok(())
}
