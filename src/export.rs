//! Document export through a user-configured HTML-to-PDF converter.
//!
//! The converter is an external command (flag or `PRAN_PDF_COMMAND`), parsed
//! with shell-words, given the rendered HTML on stdin and an `{out}`
//! placeholder for the target path. Conversion problems degrade to the HTML
//! artifact instead of failing the export.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const PDF_COMMAND_ENV: &str = "PRAN_PDF_COMMAND";

#[derive(Debug, Clone)]
pub struct ConverterCommand {
    argv: Vec<String>,
}

/// Resolve the converter command: explicit flag first, then the environment.
/// `None` means no converter is configured.
pub fn load_converter_command(flag: Option<&str>) -> Result<Option<ConverterCommand>> {
    let raw = match flag {
        Some(raw) => Some(raw.to_string()),
        None => env::var(PDF_COMMAND_ENV).ok(),
    };
    let Some(raw) = raw else {
        return Ok(None);
    };
    let argv = shell_words::split(&raw)
        .with_context(|| format!("parse converter command: {raw}"))?;
    if argv.is_empty() {
        return Err(anyhow!("converter command is empty"));
    }
    Ok(Some(ConverterCommand { argv }))
}

/// Write the export artifacts for one report. Returns the path of the best
/// artifact produced: the PDF when conversion succeeds, the HTML otherwise.
pub fn export_document(
    html: &str,
    project_id: &str,
    out_dir: &Path,
    converter: Option<&ConverterCommand>,
) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create {}", out_dir.display()))?;
    let html_path = out_dir.join(format!("pricing_analysis_{project_id}.html"));
    std::fs::write(&html_path, html)
        .with_context(|| format!("write {}", html_path.display()))?;

    let Some(converter) = converter else {
        tracing::info!("no converter configured, keeping HTML artifact");
        return Ok(html_path);
    };

    let pdf_path = out_dir.join(format!("pricing_analysis_{project_id}.pdf"));
    match run_converter(converter, html, &pdf_path) {
        Ok(()) if pdf_path.is_file() => Ok(pdf_path),
        Ok(()) => {
            tracing::warn!(
                path = %pdf_path.display(),
                "converter exited cleanly but produced no file"
            );
            Ok(html_path)
        }
        Err(err) => {
            tracing::warn!(error = %err, "converter failed, keeping HTML artifact");
            Ok(html_path)
        }
    }
}

fn run_converter(converter: &ConverterCommand, html: &str, pdf_path: &Path) -> Result<()> {
    let mut argv = converter.argv.clone();
    for arg in &mut argv {
        if arg == "{out}" {
            *arg = pdf_path.display().to_string();
        }
    }
    let program = argv.remove(0);
    let mut child = Command::new(&program)
        .args(&argv)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawn converter: {program}"))?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(html.as_bytes())
            .context("write HTML to converter stdin")?;
    }
    let output = child.wait_with_output().context("wait for converter")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "converter exited with {}: {}",
            output.status,
            stderr.trim()
        ));
    }
    Ok(())
}
