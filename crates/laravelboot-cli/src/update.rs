//! Release checks and self-update.
//!
//! `new` and `add` start [`spawn_check`] on a detached thread. It reads a
//! small cache first and only asks GitHub when the cache is older than a
//! day. Nothing waits for it: if the process exits first, the hint is lost.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use console::Term;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{AppConfig, UpdateConfig};
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

/// The running version, as release tags spell it.
pub const CURRENT_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

const CACHE_FILE: &str = "update_check.json";
const CHECK_INTERVAL_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CheckCache {
    latest: String,
    checked_at: DateTime<Utc>,
}

impl CheckCache {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.checked_at) < TimeDelta::hours(CHECK_INTERVAL_HOURS)
    }
}

// ── background check ─────────────────────────────────────────────────────────

/// Start the background release check. Returns `None` when disabled.
pub fn spawn_check(settings: &UpdateConfig) -> Option<JoinHandle<()>> {
    if !settings.check {
        debug!("Update check disabled");
        return None;
    }
    let url = settings.releases_url.clone();
    let cache = cache_path();

    thread::Builder::new()
        .name("update-check".into())
        .spawn(move || {
            let Some(latest) = latest_version(&url, cache.as_deref()) else {
                return;
            };
            if is_newer(&latest, CURRENT_VERSION) {
                let _ = Term::stderr().write_line(&format!(
                    "\u{2728} A new version is available: {latest} (current: {CURRENT_VERSION})\n\
                     \u{1f449} Run 'laravelboot update' to upgrade now!"
                ));
            }
        })
        .ok()
}

/// Latest release tag, from the cache when fresh, otherwise from the
/// network. Any failure yields `None`.
fn latest_version(url: &str, cache: Option<&Path>) -> Option<String> {
    let now = Utc::now();
    if let Some(cached) = cache.and_then(read_cache).filter(|c| c.is_fresh(now)) {
        debug!(latest = %cached.latest, "Using cached release check");
        return Some(cached.latest);
    }

    let latest = match fetch_latest(url) {
        Ok(tag) => tag,
        Err(e) => {
            debug!(error = %e, "Release check failed");
            return None;
        }
    };
    if let Some(path) = cache {
        write_cache(
            path,
            &CheckCache {
                latest: latest.clone(),
                checked_at: now,
            },
        );
    }
    Some(latest)
}

fn fetch_latest(url: &str) -> reqwest::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("laravelboot/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(10))
        .build()?;
    let release: Release = client.get(url).send()?.error_for_status()?.json()?;
    Ok(release.tag_name)
}

fn read_cache(path: &Path) -> Option<CheckCache> {
    let text = fs::read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

fn write_cache(path: &Path, cache: &CheckCache) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(text) = serde_json::to_string_pretty(cache) {
        let _ = fs::write(path, text);
    }
}

/// Compare `vMAJOR.MINOR.PATCH` tags; anything unparsable is not newer.
fn is_newer(latest: &str, current: &str) -> bool {
    let parse = |v: &str| -> Option<(u32, u32, u32)> {
        let mut parts = v.trim().trim_start_matches('v').splitn(3, '.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts
            .next()?
            .split(|c: char| !c.is_ascii_digit())
            .next()?
            .parse()
            .ok()?;
        Some((major, minor, patch))
    };
    matches!((parse(latest), parse(current)), (Some(l), Some(c)) if l > c)
}

// ── self-update ──────────────────────────────────────────────────────────────

/// Re-install the tool with the published install script.
pub fn self_update(settings: &UpdateConfig, dry_run: bool, output: &OutputManager) -> CliResult<()> {
    let script = install_command(&settings.install_script_url);

    if dry_run {
        output.planned(&format!("Would run: bash -c \"{script}\""))?;
        return Ok(());
    }
    if cfg!(windows) {
        return Err(CliError::UpdateFailed {
            reason: "self-update is not supported on Windows, download the latest release manually"
                .into(),
        });
    }

    output.info("Starting self-update...")?;
    info!(script = %settings.install_script_url, "Running install script");
    let status = Command::new("bash")
        .args(["-c", &script])
        .status()
        .map_err(|e| CliError::UpdateFailed {
            reason: format!("could not start bash: {e}"),
        })?;
    if !status.success() {
        return Err(CliError::UpdateFailed {
            reason: format!("install script exited with {status}"),
        });
    }

    output.success("LaravelBoot has been updated successfully!")?;
    Ok(())
}

fn install_command(url: &str) -> String {
    format!("curl -sL {url} | bash")
}

/// Location of the release-check cache, if the platform has a cache dir.
fn cache_path() -> Option<PathBuf> {
    AppConfig::cache_dir().map(|dir| dir.join(CACHE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_versions_are_detected() {
        assert!(is_newer("v1.0.1", "v1.0.0"));
        assert!(is_newer("v2.0.0", "v1.9.9"));
        assert!(is_newer("1.1.0", "v1.0.0"));
        assert!(!is_newer("v1.0.0", "v1.0.0"));
        assert!(!is_newer("v0.9.0", "v1.0.0"));
        assert!(!is_newer("nightly", "v1.0.0"));
    }

    #[test]
    fn prerelease_suffix_is_ignored() {
        assert!(is_newer("v1.2.0-beta.1", "v1.1.0"));
    }

    #[test]
    fn cache_is_fresh_for_a_day() {
        let now = Utc::now();
        let cache = |hours| CheckCache {
            latest: "v1.0.1".into(),
            checked_at: now - TimeDelta::hours(hours),
        };
        assert!(cache(1).is_fresh(now));
        assert!(!cache(CHECK_INTERVAL_HOURS + 1).is_fresh(now));
    }

    #[test]
    fn fresh_cache_skips_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CACHE_FILE);
        write_cache(
            &path,
            &CheckCache {
                latest: "v9.9.9".into(),
                checked_at: Utc::now(),
            },
        );

        // The URL is never contacted when the cache is fresh.
        let latest = latest_version("http://127.0.0.1:9/unreachable", Some(&path));
        assert_eq!(latest.as_deref(), Some("v9.9.9"));
    }

    #[test]
    fn disabled_check_spawns_nothing() {
        let settings = UpdateConfig {
            check: false,
            ..UpdateConfig::default()
        };
        assert!(spawn_check(&settings).is_none());
    }

    #[test]
    fn install_command_pipes_script_into_bash() {
        assert_eq!(
            install_command("https://example.com/install.sh"),
            "curl -sL https://example.com/install.sh | bash"
        );
    }
}
