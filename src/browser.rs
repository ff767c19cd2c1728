//! External browser integration.
//!
//! Opens check-in pages in the user's default browser.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Candidate opener commands for this platform, in order of preference.
fn opener_commands() -> Vec<(&'static str, Vec<&'static str>)> {
    if cfg!(target_os = "macos") {
        vec![("open", vec![])]
    } else if cfg!(target_os = "windows") {
        vec![("cmd", vec!["/C", "start", ""])]
    } else {
        vec![("xdg-open", vec![]), ("gio", vec!["open"]), ("sensible-browser", vec![])]
    }
}

/// Open a URL in the default browser.
///
/// # Arguments
/// * `url` - Page to open (e.g., https://checkin.example.com/LH)
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Tries each opener in turn. Output is discarded so it cannot draw over the TUI.
pub fn open_url(url: &str) -> Result<()> {
    if !is_openable(url) {
        return Err(anyhow::anyhow!("Refusing to open non-http URL: {}", url));
    }

    let mut last_error = None;
    for (program, args) in opener_commands() {
        let spawned = Command::new(program)
            .args(&args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(_) => {
                tracing::info!(url, opener = program, "opened url");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(opener = program, error = %e, "opener unavailable");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.map_or_else(
        || anyhow::anyhow!("No browser opener available"),
        anyhow::Error::from,
    ))
    .with_context(|| format!("Failed to open {} in a browser", url))
}

/// Only http(s) links are handed to the system opener.
fn is_openable(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_openable() {
        assert!(is_openable("https://checkin.example.com/LH"));
        assert!(is_openable("http://localhost:8080"));
        assert!(!is_openable("file:///etc/passwd"));
        assert!(!is_openable("javascript:alert(1)"));
    }

    #[test]
    fn test_open_url_rejects_non_http() {
        assert!(open_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_opener_commands_not_empty() {
        assert!(!opener_commands().is_empty());
    }
}
