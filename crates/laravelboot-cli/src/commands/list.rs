//! Implementation of the `laravelboot list` command.

use serde::Serialize;

use laravelboot_adapters::catalog;
use laravelboot_core::application::FeatureCatalog;
use laravelboot_core::error::BootError;
use laravelboot_core::prelude::{AuthKind, Tier};

use crate::{
    cli::{ListArgs, ListFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// One tier as shown by `list`.
#[derive(Debug, Serialize)]
struct TierEntry {
    tier: &'static str,
    /// Name that installs every feature of the tier.
    aggregate: &'static str,
    features: Vec<String>,
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let catalog = catalog::builtin().map_err(BootError::from)?;
    let tiers = entries(&catalog, args.tier.map(Tier::from));
    let show_auth = args.tier.is_none();

    match args.format {
        ListFormat::Table => {
            output.header("Available features:")?;
            if show_auth {
                let drivers: Vec<&str> = AuthKind::ALL.iter().map(AuthKind::as_str).collect();
                output.print("")?;
                output.print(&format!("  auth ({})", drivers.join(", ")))?;
            }
            for entry in &tiers {
                output.print("")?;
                output.print(&format!("  {} (add all: {})", entry.tier, entry.aggregate))?;
                for feature in &entry.features {
                    output.print(&format!("    {feature}"))?;
                }
            }
            if show_auth {
                output.print("")?;
                output.print("  all (auth and every tier)")?;
            }
        }

        // JSON and plain lists bypass OutputManager so they stay parseable
        // in pipes and under --quiet.
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&tiers).map_err(|e| CliError::ConfigError {
                message: format!("Failed to serialise the feature list: {e}"),
                source: Some(Box::new(e)),
            })?;
            println!("{json}");
        }

        ListFormat::List => {
            for entry in &tiers {
                for feature in &entry.features {
                    println!("{feature}");
                }
            }
        }
    }

    Ok(())
}

fn entries(catalog: &FeatureCatalog, only: Option<Tier>) -> Vec<TierEntry> {
    Tier::ALL
        .into_iter()
        .filter(|tier| only.is_none_or(|t| t == *tier))
        .map(|tier| TierEntry {
            tier: tier.as_str(),
            aggregate: tier.aggregate_name(),
            features: catalog
                .registry(tier)
                .features()
                .map(str::to_owned)
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_tier_in_order() {
        let catalog = catalog::builtin().unwrap();
        let tiers: Vec<&str> = entries(&catalog, None).iter().map(|e| e.tier).collect();
        assert_eq!(tiers, ["platform", "infrastructure", "enterprise"]);
    }

    #[test]
    fn filter_keeps_one_tier() {
        let catalog = catalog::builtin().unwrap();
        let only = entries(&catalog, Some(Tier::Infrastructure));
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].aggregate, "infra");
        assert!(only[0].features.iter().any(|f| f == "docker"));
    }

    #[test]
    fn json_shape() {
        let catalog = catalog::builtin().unwrap();
        let value = serde_json::to_value(entries(&catalog, Some(Tier::Platform))).unwrap();
        assert_eq!(value[0]["tier"], "platform");
        assert_eq!(value[0]["features"][0], "roles");
    }
}
