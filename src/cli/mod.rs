pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "hrms")]
#[command(about = "HRMS admin CLI - schema, root credential and branch company maintenance")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create (or drop and recreate) the schema on tenant databases")]
    Migrate {
        #[arg(long, help = "Comma-separated tenant names; defaults to every configured tenant")]
        db: Option<String>,

        #[arg(long, help = "Drop every table before creating it again")]
        reset: bool,
    },

    #[command(about = "Create the root (super administrator) credential if it is missing")]
    SeedRoot {
        #[arg(long, help = "Tenant database name, e.g. hrms_C001")]
        db: String,

        #[arg(long, help = "Initial root password")]
        password: String,
    },

    #[command(about = "Branch company directory on the default tenant")]
    Company {
        #[command(subcommand)]
        cmd: commands::company::CompanyCommands,
    },

    #[command(about = "List configured tenant databases")]
    Tenants,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Migrate { db, reset } => commands::migrate::handle(&config, db.as_deref(), reset, output_format).await,
        Commands::SeedRoot { db, password } => {
            commands::seed_root::handle(&config, &db, &password, output_format).await
        }
        Commands::Company { cmd } => commands::company::handle(&config, cmd, output_format).await,
        Commands::Tenants => commands::tenants::handle(&config, output_format),
    }
}
