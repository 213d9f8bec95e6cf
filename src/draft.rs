//! Draft session files: the on-disk form state between invocations.
//!
//! A draft holds one form session. Loading normalizes against the active
//! definition: missing fields fall back to their defaults, unknown keys are
//! rejected, and every loaded value re-enters through the typed update
//! operations so a hand-edited draft cannot bypass the state contract.

use anyhow::{anyhow, Context, Result};
use std::path::Path;

use crate::schema::FormDefinition;
use crate::state::{FormState, Value};

pub fn create(path: &Path, definition: &FormDefinition, force: bool) -> Result<FormState> {
    if path.exists() && !force {
        return Err(anyhow!(
            "draft already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }
    let state = FormState::init(definition);
    save(path, &state)?;
    Ok(state)
}

pub fn load(path: &Path, definition: &FormDefinition) -> Result<FormState> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read draft {}", path.display()))?;
    let loaded: FormState = serde_json::from_str(&raw)
        .with_context(|| format!("parse draft {}", path.display()))?;
    loaded
        .check_against(definition)
        .with_context(|| format!("draft {} does not match the form definition", path.display()))?;

    let mut state = FormState::init(definition);
    for (section, fields) in loaded.iter_sections() {
        for (field, value) in fields {
            match value {
                Value::Text(text) => {
                    state.set_field(definition, section, field, text.clone())?
                }
                Value::List(items) => {
                    state.set_multi(definition, section, field, items.clone())?
                }
                Value::Flag(_) => {
                    return Err(anyhow!(
                        "draft field `{section}.{field}` holds a boolean; drafts carry text and selections only"
                    ))
                }
            }
        }
    }
    Ok(state)
}

pub fn save(path: &Path, state: &FormState) -> Result<()> {
    let json = serde_json::to_string_pretty(state).context("serialize draft")?;
    std::fs::write(path, json).with_context(|| format!("write draft {}", path.display()))?;
    Ok(())
}

/// Remove a submitted draft; the session ends with the submission.
pub fn discard(path: &Path) -> Result<()> {
    std::fs::remove_file(path).with_context(|| format!("remove draft {}", path.display()))
}
