use serde_json::json;

use crate::cli::utils::output_empty_collection;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

/// Configured tenants in order; the first is the default handle.
pub fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let names = &config.database.names;
    if names.is_empty() {
        return output_empty_collection(&output_format, "tenants", "No tenants configured");
    }

    match output_format {
        OutputFormat::Json => {
            let tenants: Vec<_> = names
                .iter()
                .enumerate()
                .map(|(i, name)| json!({ "name": name, "default": i == 0 }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "tenants": tenants }))?);
        }
        OutputFormat::Text => {
            println!("{:<20} {}", "NAME", "KIND");
            println!("{}", "-".repeat(30));
            for (i, name) in names.iter().enumerate() {
                let marker = if i == 0 { "*" } else { " " };
                println!("{}{:<19} {}", marker, name, config.database.kind);
            }
        }
    }
    Ok(())
}
