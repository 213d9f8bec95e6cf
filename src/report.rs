//! Report assembly: flatten a fetched record into display-ready strings.
//!
//! The view is derived on every render and never persisted. Sentinel rules:
//! absent or blank scalars become `N/A`, empty selection lists become `None`,
//! non-empty lists join with `", "`, booleans map to `Yes`/`No`.

use crate::api::{FetchError, Record, RecordApi};
use crate::schema::FormDefinition;
use crate::state::Value;

pub const MISSING: &str = "N/A";
pub const EMPTY_LIST: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub title: String,
    pub rows: Vec<ReportRow>,
}

/// Flattened, human-readable projection of a record, ordered by the
/// definition's section and field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    pub project_id: String,
    pub sections: Vec<ReportSection>,
}

pub fn assemble(record: &Record, definition: &FormDefinition) -> ReportView {
    let sections = definition
        .sections
        .iter()
        .map(|section| ReportSection {
            title: section.title.clone(),
            rows: section
                .fields
                .iter()
                .map(|field| ReportRow {
                    label: field.label.clone(),
                    value: display_value(record.state.get(&section.name, &field.id)),
                })
                .collect(),
        })
        .collect();
    ReportView {
        project_id: record.project_id.clone(),
        sections,
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None => MISSING.to_string(),
        Some(Value::Text(text)) if text.trim().is_empty() => MISSING.to_string(),
        Some(Value::Text(text)) => text.clone(),
        Some(Value::Flag(true)) => "Yes".to_string(),
        Some(Value::Flag(false)) => "No".to_string(),
        Some(Value::List(items)) if items.is_empty() => EMPTY_LIST.to_string(),
        Some(Value::List(items)) => items.join(", "),
    }
}

/// Fetch a record and assemble its view. No caching; every call re-fetches.
pub fn fetch_report(
    api: &dyn RecordApi,
    project_id: &str,
    definition: &FormDefinition,
) -> Result<ReportView, FetchError> {
    let record = api.fetch(project_id)?;
    Ok(assemble(&record, definition))
}
