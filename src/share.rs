//! Share links for a persisted report.
//!
//! The canonical URL is built from an explicitly passed origin, never from
//! ambient environment state. Deep links are plain pass-through URL builders;
//! the optional native share hands the URL to a user-configured command and
//! degrades to a no-op when none is available.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::process::Command;

pub const SHARE_TITLE: &str = "Pricing Analysis Report";

const SHARE_COMMAND_ENV: &str = "PRAN_SHARE_COMMAND";

/// Canonical shareable URL for a record: `<origin>/success/<project_id>`.
pub fn canonical_url(origin: &str, project_id: &str) -> String {
    format!("{}/success/{}", origin.trim_end_matches('/'), project_id)
}

pub fn email_link(url: &str) -> String {
    let body = format!("Check out this pricing analysis report: {url}");
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(SHARE_TITLE),
        urlencoding::encode(&body)
    )
}

pub fn linkedin_link(url: &str) -> String {
    format!(
        "https://www.linkedin.com/sharing/share-offsite/?url={}",
        urlencoding::encode(url)
    )
}

pub fn whatsapp_link(url: &str) -> String {
    format!(
        "https://wa.me/?text={}",
        urlencoding::encode(&format!("{SHARE_TITLE} {url}"))
    )
}

/// Hand the canonical URL to the configured native share command. Returns
/// whether a share was attempted; a missing command is not an error.
pub fn native_share(url: &str) -> Result<bool> {
    let Ok(raw) = env::var(SHARE_COMMAND_ENV) else {
        return Ok(false);
    };
    let mut argv = shell_words::split(&raw)
        .with_context(|| format!("parse share command: {raw}"))?;
    if argv.is_empty() {
        return Err(anyhow!("share command is empty"));
    }
    let mut has_placeholder = false;
    for arg in &mut argv {
        if arg == "{url}" {
            *arg = url.to_string();
            has_placeholder = true;
        }
    }
    if !has_placeholder {
        argv.push(url.to_string());
    }
    let program = argv.remove(0);
    match Command::new(&program).args(&argv).status() {
        Ok(status) if status.success() => Ok(true),
        Ok(status) => {
            tracing::warn!(%status, "share command failed");
            Ok(false)
        }
        Err(err) => {
            tracing::warn!(error = %err, "share command unavailable");
            Ok(false)
        }
    }
}
