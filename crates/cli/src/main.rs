//! PixelPunk CLI - content store and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Push the built-in default dataset into an empty content store
//! px-cli content seed
//!
//! # Print the merged site content as JSON
//! px-cli content show
//!
//! # Wipe the store and restore the defaults (destructive)
//! px-cli content reset --yes
//!
//! # Generate an argon2 hash for PIXELPUNK_ADMIN_PASSWORD_HASH
//! px-cli admin hash-password -p 'the-operator-password'
//! ```
//!
//! # Commands
//!
//! - `content seed` - Seed an empty content store with the defaults
//! - `content show` - Print the merged content snapshot
//! - `content reset` - Reset the store to the defaults
//! - `admin hash-password` - Hash an operator password for the environment

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "px-cli")]
#[command(author, version, about = "PixelPunk Archive CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and manage the content store
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
    /// Admin gate tooling
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ContentAction {
    /// Seed an empty content store with the built-in defaults
    Seed,
    /// Print the merged site content as JSON
    Show,
    /// Wipe every edit and restore the built-in defaults
    Reset {
        /// Confirm the destructive reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Hash an operator password for `PIXELPUNK_ADMIN_PASSWORD_HASH`
    HashPassword {
        /// The password to hash
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Content { action } => match action {
            ContentAction::Seed => commands::content::seed().await?,
            ContentAction::Show => commands::content::show().await?,
            ContentAction::Reset { yes } => commands::content::reset(yes).await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::HashPassword { password } => {
                commands::admin::hash_password(&password)?;
            }
        },
    }
    Ok(())
}
