//! API documentation emitted at the end of a `new` run.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::application::step::SetupStep;
use crate::domain::{Action, Configuration, Tier};

pub const DOCS_FILE: &str = "README-API.md";

const ENDPOINTS: [(&str, &str, &str); 4] = [
    ("POST", "/api/login", "Issue an API token"),
    ("POST", "/api/logout", "Revoke the current token"),
    ("GET", "/api/me", "Current user"),
    ("GET", "/api/health", "Liveness check"),
];

pub struct DocsGenerator;

impl DocsGenerator {
    /// Render the document for a configuration.
    pub fn render(config: &Configuration) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {} API\n", config.project_name);
        let _ = writeln!(out, "Generated by LaravelBoot.\n");
        let _ = writeln!(out, "## Stack\n");
        let _ = writeln!(out, "- Architecture: {}", config.architecture);
        let _ = writeln!(out, "- Database: {}", config.database);
        let _ = writeln!(
            out,
            "- Auth: {}",
            config.auth.map_or("none", |a| a.as_str())
        );

        for tier in Tier::ALL {
            let features = config.features(tier);
            let _ = writeln!(out, "\n## {} features\n", capitalize(tier.as_str()));
            if features.is_empty() {
                let _ = writeln!(out, "_None_");
            }
            for name in features {
                let _ = writeln!(out, "- {name}");
            }
        }

        let _ = writeln!(out, "\n## Endpoints\n");
        let _ = writeln!(out, "| Method | Path | Description |");
        let _ = writeln!(out, "|--------|------|-------------|");
        for (method, path, what) in ENDPOINTS {
            let _ = writeln!(out, "| {method} | `{path}` | {what} |");
        }
        out
    }

    /// A step writing the document to the project root.
    pub fn step(config: &Configuration) -> SetupStep {
        SetupStep::new("api-docs").action(Action::WriteFile {
            path: PathBuf::from(DOCS_FILE),
            content: Cow::Owned(Self::render(config)),
        })
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
