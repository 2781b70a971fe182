//! Domain errors.

use thiserror::Error;

use crate::domain::tier::Tier;

/// Business-rule violations raised by pure domain logic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A feature name that no registry entry matches.
    #[error("unknown {tier} feature: {name}")]
    UnknownFeature { tier: Tier, name: String },

    /// A feature name that no tier (and no special entry point) knows.
    #[error("unknown feature: {name}")]
    UnknownAnyFeature { name: String },

    /// A configuration value outside its allowed set.
    #[error("invalid {field} '{value}'")]
    InvalidValue { field: &'static str, value: String },

    /// A text patch could not find the text it anchors on.
    #[error("anchor `{anchor}` not found")]
    AnchorMissing { anchor: String },
}

impl DomainError {
    /// User-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownFeature { tier, name } => vec![
                format!("'{name}' is not a {tier} feature"),
                format!(
                    "Run the whole tier with: laravelboot add {}",
                    tier.aggregate_name()
                ),
                "List every feature with: laravelboot list".into(),
            ],
            Self::UnknownAnyFeature { name } => vec![
                format!("'{name}' is not a known feature"),
                "List every feature with: laravelboot list".into(),
            ],
            Self::InvalidValue { field, .. } => match *field {
                "database" => vec!["Supported databases: mysql, postgres, sqlite, mongo".into()],
                "auth" => vec!["Supported auth drivers: sanctum, passport".into()],
                "architecture" => vec!["Supported architectures: domain-based, standard".into()],
                _ => vec![format!("Check the value given for '{field}'")],
            },
            Self::AnchorMissing { .. } => vec![
                "The file does not have the layout a fresh Laravel project ships with".into(),
                "Apply the change by hand or restore the file and retry".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownFeature { .. } | Self::UnknownAnyFeature { .. } => ErrorCategory::NotFound,
            Self::InvalidValue { .. } => ErrorCategory::Validation,
            Self::AnchorMissing { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
