//! Nested form state keyed by section name and field id.
//!
//! All mutation goes through `set_field` / `set_multi`, which reject keys the
//! active definition does not declare instead of creating them implicitly.
//! Updates never touch sibling sections or fields and are idempotent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::schema::{FieldKind, FieldSchema, FormDefinition};

/// One stored field value. Drafts only ever hold text and selection lists;
/// fetched records may additionally carry booleans for fields the backend
/// stores as boolean columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl Value {
    /// Empty for required-field purposes: blank text, empty list, or `false`.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Flag(flag) => !flag,
            Value::Text(text) => text.trim().is_empty(),
            Value::List(items) => items.is_empty(),
        }
    }

    fn default_for(kind: FieldKind) -> Value {
        match kind {
            FieldKind::Multiselect => Value::List(Vec::new()),
            _ => Value::Text(String::new()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("unknown field `{section}.{field}`")]
    InvalidKey { section: String, field: String },
    #[error("field `{section}.{field}` does not hold a selection list")]
    NotMultiValue { section: String, field: String },
}

/// Section name -> field id -> value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(flatten)]
    sections: BTreeMap<String, BTreeMap<String, Value>>,
}

impl FormState {
    /// Build a state with every declared field present at its kind's default,
    /// so every (section, field) pair in the definition resolves.
    pub fn init(definition: &FormDefinition) -> FormState {
        let mut sections = BTreeMap::new();
        for section in &definition.sections {
            let fields = section
                .fields
                .iter()
                .map(|field| (field.id.clone(), Value::default_for(field.kind)))
                .collect();
            sections.insert(section.name.clone(), fields);
        }
        FormState { sections }
    }

    pub fn get(&self, section: &str, field: &str) -> Option<&Value> {
        self.sections.get(section)?.get(field)
    }

    /// Replace a single scalar field value.
    pub fn set_field(
        &mut self,
        definition: &FormDefinition,
        section: &str,
        field: &str,
        value: String,
    ) -> Result<(), StateError> {
        self.resolve(definition, section, field)?;
        self.entry(section, field, Value::Text(value));
        Ok(())
    }

    /// Replace a multiselect field's selection wholesale. The caller supplies
    /// the full resulting sequence; this is not an add/remove primitive.
    pub fn set_multi(
        &mut self,
        definition: &FormDefinition,
        section: &str,
        field: &str,
        selected: Vec<String>,
    ) -> Result<(), StateError> {
        let schema = self.resolve(definition, section, field)?;
        if schema.kind != FieldKind::Multiselect {
            return Err(StateError::NotMultiValue {
                section: section.to_string(),
                field: field.to_string(),
            });
        }
        self.entry(section, field, Value::List(selected));
        Ok(())
    }

    /// Current multiselect selection, empty when unset.
    pub fn selection(&self, section: &str, field: &str) -> Vec<String> {
        match self.get(section, field) {
            Some(Value::List(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    /// Verify that every key in this state is declared by the definition.
    /// Used when loading a draft from disk.
    pub fn check_against(&self, definition: &FormDefinition) -> Result<(), StateError> {
        for (section, fields) in &self.sections {
            for field in fields.keys() {
                if definition.field(section, field).is_none() {
                    return Err(StateError::InvalidKey {
                        section: section.clone(),
                        field: field.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn iter_sections(
        &self,
    ) -> impl Iterator<Item = (&String, &BTreeMap<String, Value>)> + '_ {
        self.sections.iter()
    }

    fn resolve<'a>(
        &self,
        definition: &'a FormDefinition,
        section: &str,
        field: &str,
    ) -> Result<&'a FieldSchema, StateError> {
        definition
            .field(section, field)
            .ok_or_else(|| StateError::InvalidKey {
                section: section.to_string(),
                field: field.to_string(),
            })
    }

    fn entry(&mut self, section: &str, field: &str, value: Value) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(field.to_string(), value);
    }
}
