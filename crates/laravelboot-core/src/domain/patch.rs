//! Idempotent text patches for files a previous step (or the framework
//! installer) already generated.
//!
//! A [`TextPatch`] carries a *marker*: a string whose presence means the
//! patch has been applied before. Applying a patch to text that already
//! contains the marker is a no-op, so re-running a feature never duplicates
//! routes, imports, or provider registrations.

use crate::domain::error::DomainError;

/// One edit inside a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchEdit {
    /// Append text at the end of the file.
    Append(String),
    /// Insert text immediately after the first occurrence of `anchor`.
    InsertAfter { anchor: String, text: String },
    /// Replace the first occurrence of `find`.
    ReplaceFirst { find: String, replace: String },
}

impl PatchEdit {
    fn apply(&self, source: &str) -> Result<String, DomainError> {
        match self {
            Self::Append(text) => Ok(format!("{source}{text}")),
            Self::InsertAfter { anchor, text } => {
                let at = source
                    .find(anchor.as_str())
                    .ok_or_else(|| DomainError::AnchorMissing {
                        anchor: anchor.clone(),
                    })?
                    + anchor.len();
                let mut out = String::with_capacity(source.len() + text.len());
                out.push_str(&source[..at]);
                out.push_str(text);
                out.push_str(&source[at..]);
                Ok(out)
            }
            Self::ReplaceFirst { find, replace } => {
                if !source.contains(find.as_str()) {
                    return Err(DomainError::AnchorMissing {
                        anchor: find.clone(),
                    });
                }
                Ok(source.replacen(find.as_str(), replace, 1))
            }
        }
    }
}

/// Result of applying a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The patch changed the text; the new content is returned.
    Applied(String),
    /// The marker was already present; nothing changed.
    AlreadyApplied,
}

/// A marker-guarded sequence of edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPatch {
    marker: String,
    edits: Vec<PatchEdit>,
}

impl TextPatch {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            edits: Vec::new(),
        }
    }

    pub fn append(mut self, text: impl Into<String>) -> Self {
        self.edits.push(PatchEdit::Append(text.into()));
        self
    }

    pub fn insert_after(mut self, anchor: impl Into<String>, text: impl Into<String>) -> Self {
        self.edits.push(PatchEdit::InsertAfter {
            anchor: anchor.into(),
            text: text.into(),
        });
        self
    }

    pub fn replace_first(mut self, find: impl Into<String>, replace: impl Into<String>) -> Self {
        self.edits.push(PatchEdit::ReplaceFirst {
            find: find.into(),
            replace: replace.into(),
        });
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn edits(&self) -> &[PatchEdit] {
        &self.edits
    }

    /// Whether `source` already carries this patch.
    pub fn is_applied(&self, source: &str) -> bool {
        source.contains(self.marker.as_str())
    }

    /// Apply every edit in order. All-or-nothing: a missing anchor aborts
    /// without returning a partially edited text.
    pub fn apply(&self, source: &str) -> Result<PatchOutcome, DomainError> {
        if self.is_applied(source) {
            return Ok(PatchOutcome::AlreadyApplied);
        }
        let mut text = source.to_string();
        for edit in &self.edits {
            text = edit.apply(&text)?;
        }
        Ok(PatchOutcome::Applied(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_MODEL: &str = r#"<?php

namespace App\Models;

use Illuminate\Database\Eloquent\Factories\HasFactory;
use Illuminate\Foundation\Auth\User as Authenticatable;
use Illuminate\Notifications\Notifiable;

class User extends Authenticatable
{
    /** @use HasFactory<\Database\Factories\UserFactory> */
    use HasFactory, Notifiable;
}
"#;

    fn api_tokens() -> TextPatch {
        TextPatch::new("Laravel\\Sanctum\\HasApiTokens")
            .insert_after(
                "use Illuminate\\Foundation\\Auth\\User as Authenticatable;",
                "\nuse Laravel\\Sanctum\\HasApiTokens;",
            )
            .replace_first("    use HasFactory", "    use HasApiTokens, HasFactory")
    }

    #[test]
    fn applies_edits_in_order() {
        let PatchOutcome::Applied(out) = api_tokens().apply(USER_MODEL).unwrap() else {
            panic!("expected patch to apply");
        };
        assert!(out.contains("Authenticatable;\nuse Laravel\\Sanctum\\HasApiTokens;\n"));
        assert!(out.contains("    use HasApiTokens, HasFactory, Notifiable;"));
    }

    #[test]
    fn indented_anchor_skips_the_doc_comment() {
        let PatchOutcome::Applied(out) = api_tokens().apply(USER_MODEL).unwrap() else {
            panic!("expected patch to apply");
        };
        assert!(out.contains("/** @use HasFactory<\\Database\\Factories\\UserFactory> */\n"));
        assert_eq!(out.matches("HasApiTokens, HasFactory").count(), 1);
    }

    #[test]
    fn second_application_is_a_no_op() {
        let patch = api_tokens();
        let PatchOutcome::Applied(once) = patch.apply(USER_MODEL).unwrap() else {
            panic!("expected patch to apply");
        };
        assert_eq!(patch.apply(&once).unwrap(), PatchOutcome::AlreadyApplied);
    }

    #[test]
    fn missing_anchor_reports_the_anchor() {
        let patch = TextPatch::new("HasRoles").replace_first("use Nothing;", "x");
        assert_eq!(
            patch.apply(USER_MODEL),
            Err(DomainError::AnchorMissing {
                anchor: "use Nothing;".into()
            })
        );
    }

    #[test]
    fn append_is_guarded_by_marker() {
        let patch = TextPatch::new("/health").append("\nRoute::get('/health', fn () => 'ok');\n");
        let PatchOutcome::Applied(out) = patch.apply("<?php\n").unwrap() else {
            panic!("expected patch to apply");
        };
        assert_eq!(out.matches("/health").count(), 1);
        assert_eq!(patch.apply(&out).unwrap(), PatchOutcome::AlreadyApplied);
    }

    #[test]
    fn replace_first_only_touches_first_match() {
        let patch = TextPatch::new("Provider::class").replace_first("];", "    Provider::class,\n];");
        let PatchOutcome::Applied(out) = patch.apply("return [\n];\n$x = [];").unwrap() else {
            panic!("expected patch to apply");
        };
        assert_eq!(out, "return [\n    Provider::class,\n];\n$x = [];");
    }
}
