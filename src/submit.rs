//! Submission pipeline: required-field validation, then exactly one create
//! call with the full nested state.

use thiserror::Error;

use crate::api::{RecordApi, TransportError};
use crate::schema::FormDefinition;
use crate::state::{FormState, Value};

#[derive(Debug, Error)]
pub enum SubmitError {
    /// A required field is empty. Nothing was sent; the user corrects the
    /// input and resubmits.
    #[error("required field `{section}.{field}` is empty")]
    Validation { section: String, field: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Validate required fields in presentation order and submit. The first
/// violation short-circuits; no partial submission is ever sent.
pub fn submit(
    state: &FormState,
    definition: &FormDefinition,
    api: &dyn RecordApi,
) -> Result<String, SubmitError> {
    for section in &definition.sections {
        for field in &section.fields {
            if !field.required {
                continue;
            }
            let empty = state
                .get(&section.name, &field.id)
                .is_none_or(Value::is_empty);
            if empty {
                return Err(SubmitError::Validation {
                    section: section.name.clone(),
                    field: field.id.clone(),
                });
            }
        }
    }
    let project_id = api.create(state)?;
    Ok(project_id)
}
