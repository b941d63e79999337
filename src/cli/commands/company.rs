use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_empty_collection, output_success};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::models::BranchCompanyCreate;
use crate::services::company;

#[derive(Subcommand)]
pub enum CompanyCommands {
    #[command(about = "Register a branch company")]
    Add {
        #[arg(long, help = "Branch id, e.g. C001")]
        id: String,

        #[arg(long, help = "Display name")]
        name: String,
    },

    #[command(about = "List branch companies")]
    List,
}

pub async fn handle(config: &AppConfig, cmd: CompanyCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let registry = super::open_tenants(config, None).await?;
    let db = registry.default_db();

    let result = match cmd {
        CompanyCommands::Add { id, name } => {
            company::add(
                db,
                BranchCompanyCreate {
                    company_id: id.clone(),
                    company_name: name.clone(),
                },
            )
            .await?;
            output_success(
                &output_format,
                &format!("Added branch company {} ({})", id, name),
                Some(json!({ "company_id": id, "company_name": name })),
            )
        }
        CompanyCommands::List => {
            let page = company::list(db).await?;
            if page.items.is_empty() {
                output_empty_collection(&output_format, "companies", "No branch companies registered")
            } else {
                match output_format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&json!({ "companies": page.items }))?);
                    }
                    OutputFormat::Text => {
                        println!("{:<12} {}", "ID", "NAME");
                        println!("{}", "-".repeat(40));
                        for c in &page.items {
                            println!("{:<12} {}", c.company_id, c.company_name);
                        }
                    }
                }
                Ok(())
            }
        }
    };

    registry.close_all().await;
    result
}
