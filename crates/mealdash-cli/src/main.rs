use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mealdash_core::theme::ThemeMode;

mod bootstrap;
mod commands;

use bootstrap::BootstrapOptions;

#[derive(Parser)]
#[command(name = "mealdash")]
#[command(about = "mealdash - meal-plan subscription dashboard client", long_about = None)]
struct Cli {
    /// Keep the snapshot in memory instead of on disk
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Directory holding config.toml and the snapshot file
    #[arg(long, global = true, env = "MEALDASH_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Backend base URL (overrides config)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a username and password
    Login {
        username: String,
        #[arg(long, env = "MEALDASH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show or change the colour theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Refresh and show dashboard statistics
    Dashboard {
        #[arg(long)]
        json: bool,
    },
    /// List subscription plans
    Plans {
        #[arg(long)]
        json: bool,
    },
    /// List catalog items
    Items {
        #[arg(long)]
        json: bool,
    },
    /// List customers
    Customers {
        #[arg(long)]
        json: bool,
    },
    /// List customer categories
    Categories {
        #[arg(long)]
        json: bool,
    },
    /// List delivery areas
    Areas {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Flip between light and dark
    Toggle,
    /// Set an explicit mode
    Set { mode: ThemeMode },
    /// Print the current mode
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = bootstrap::bootstrap(&BootstrapOptions {
        config_dir: cli.config_dir,
        api_url: cli.api_url,
        ephemeral: cli.ephemeral,
    })
    .await?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::session::login(&store, &username, &password).await?
        }
        Commands::Logout => commands::session::logout(&store).await,
        Commands::Whoami => commands::session::whoami(&store).await,
        Commands::Theme { action } => match action {
            ThemeAction::Toggle => commands::theme::toggle(&store).await,
            ThemeAction::Set { mode } => commands::theme::set(&store, mode).await,
            ThemeAction::Show => commands::theme::show(&store).await,
        },
        Commands::Dashboard { json } => commands::dashboard::show(&store, json).await?,
        Commands::Plans { json } => commands::catalog::plans(&store, json).await?,
        Commands::Items { json } => commands::catalog::items(&store, json).await?,
        Commands::Customers { json } => commands::catalog::customers(&store, json).await?,
        Commands::Categories { json } => commands::catalog::categories(&store, json).await?,
        Commands::Areas { json } => commands::catalog::areas(&store, json).await?,
    }

    Ok(())
}
