//! Form definition types: sections, fields, and the built-in pricing form.
//!
//! A `FormDefinition` is pure data fixed at construction time. Consumers
//! treat `FieldKind` as a closed set; a definition that pairs options with a
//! kind that does not take them (or omits them where required) is rejected
//! by `FormDefinition::validate` before any state exists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    Select,
    Multiselect,
    Textarea,
}

impl FieldKind {
    /// Whether the kind carries an option set.
    pub fn takes_options(self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::Multiselect)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchema {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub required: bool,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSchema {
    pub name: String,
    pub title: String,
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDefinition {
    pub sections: Vec<SectionSchema>,
}

/// Malformed definitions are fatal at load, never at render or submit time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("section `{0}` declared more than once")]
    DuplicateSection(String),
    #[error("field `{field}` declared more than once in section `{section}`")]
    DuplicateField { section: String, field: String },
    #[error("field `{section}.{field}` requires a non-empty option set")]
    MissingOptions { section: String, field: String },
    #[error("field `{section}.{field}` declares options but its kind takes none")]
    UnexpectedOptions { section: String, field: String },
}

impl FormDefinition {
    /// Check the structural invariants: unique section names, unique field
    /// ids per section, option sets present exactly where the kind needs them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut section_names = Vec::new();
        for section in &self.sections {
            if section_names.contains(&section.name.as_str()) {
                return Err(ConfigError::DuplicateSection(section.name.clone()));
            }
            section_names.push(section.name.as_str());

            let mut field_ids = Vec::new();
            for field in &section.fields {
                if field_ids.contains(&field.id.as_str()) {
                    return Err(ConfigError::DuplicateField {
                        section: section.name.clone(),
                        field: field.id.clone(),
                    });
                }
                field_ids.push(field.id.as_str());

                if field.kind.takes_options() && field.options.is_empty() {
                    return Err(ConfigError::MissingOptions {
                        section: section.name.clone(),
                        field: field.id.clone(),
                    });
                }
                if !field.kind.takes_options() && !field.options.is_empty() {
                    return Err(ConfigError::UnexpectedOptions {
                        section: section.name.clone(),
                        field: field.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn section(&self, name: &str) -> Option<&SectionSchema> {
        self.sections.iter().find(|section| section.name == name)
    }

    pub fn field(&self, section: &str, field: &str) -> Option<&FieldSchema> {
        self.section(section)?.fields.iter().find(|f| f.id == field)
    }
}

fn field(id: &str, label: &str, kind: FieldKind, required: bool) -> FieldSchema {
    FieldSchema {
        id: id.to_string(),
        label: label.to_string(),
        kind,
        required,
        options: Vec::new(),
    }
}

fn choice(id: &str, label: &str, kind: FieldKind, required: bool, options: &[&str]) -> FieldSchema {
    FieldSchema {
        id: id.to_string(),
        label: label.to_string(),
        kind,
        required,
        options: options.iter().map(|option| option.to_string()).collect(),
    }
}

fn section(name: &str, title: &str, fields: Vec<FieldSchema>) -> SectionSchema {
    SectionSchema {
        name: name.to_string(),
        title: title.to_string(),
        fields,
    }
}

/// The built-in seven-section pricing-analysis form, validated before use.
pub fn load_definition() -> Result<FormDefinition, ConfigError> {
    let definition = pricing_definition();
    definition.validate()?;
    Ok(definition)
}

fn pricing_definition() -> FormDefinition {
    use FieldKind::{Date, Email, Multiselect, Select, Tel, Text, Textarea};
    FormDefinition {
        sections: vec![
            section(
                "client",
                "1. Client Information",
                vec![
                    field("client_name", "Client Name", Text, true),
                    choice("client_type", "Client Type", Select, true, &["B2B", "B2B2B"]),
                    field("industry_sector", "Industry Sector", Text, false),
                    choice(
                        "company_size",
                        "Company Size",
                        Select,
                        false,
                        &["1-50", "51-200", "201-1000", "1000+"],
                    ),
                    choice(
                        "annual_revenue",
                        "Annual Revenue",
                        Select,
                        false,
                        &["<$1M", "$1M-$10M", "$10M-$100M", ">$100M"],
                    ),
                    field("primary_contact", "Primary Contact", Text, false),
                    field("email", "Email", Email, true),
                    field("phone", "Phone Number", Tel, false),
                ],
            ),
            section(
                "project",
                "2. Project Overview",
                vec![
                    field("title", "Project Title", Text, true),
                    field("description", "Project Description", Textarea, false),
                    field("business_objective", "Business Objective", Textarea, false),
                    choice(
                        "expected_deliverables",
                        "Expected Deliverables",
                        Multiselect,
                        false,
                        &[
                            "Dashboards",
                            "KPI Reporting",
                            "Infographics",
                            "Interactive Charts",
                            "Data Storytelling",
                            "Embedded Analytics",
                        ],
                    ),
                    choice(
                        "target_audience",
                        "Target Audience",
                        Multiselect,
                        false,
                        &[
                            "Executives",
                            "Analysts",
                            "Operations",
                            "Sales",
                            "Marketing",
                            "External Clients",
                        ],
                    ),
                ],
            ),
            section(
                "technical",
                "3. Technical Scope",
                vec![
                    choice(
                        "data_sources",
                        "Data Sources",
                        Multiselect,
                        false,
                        &[
                            "SQL Database",
                            "Spreadsheets",
                            "Cloud Storage",
                            "REST APIs",
                            "CRM",
                            "ERP",
                        ],
                    ),
                    choice(
                        "data_volume",
                        "Volume of Data",
                        Select,
                        false,
                        &["<1GB", "1-10GB", "10-100GB", ">100GB"],
                    ),
                    choice(
                        "required_integrations",
                        "Required Integrations",
                        Multiselect,
                        false,
                        &[
                            "Salesforce",
                            "HubSpot",
                            "Google Analytics",
                            "Slack",
                            "Custom API",
                        ],
                    ),
                ],
            ),
            section(
                "features",
                "4. Features & Functionalities",
                vec![
                    choice(
                        "interactivity_needed",
                        "Interactivity Needed",
                        Multiselect,
                        false,
                        &[
                            "Drill-down",
                            "Filtering",
                            "Real-time Refresh",
                            "Annotations",
                            "Export",
                        ],
                    ),
                    choice(
                        "user_access_levels",
                        "User Access Levels",
                        Multiselect,
                        false,
                        &["Viewer", "Editor", "Admin"],
                    ),
                    choice(
                        "customization_needs",
                        "Customization Needs",
                        Multiselect,
                        false,
                        &["White-labeling", "Custom Themes", "Custom Calculations"],
                    ),
                ],
            ),
            section(
                "pricing",
                "5. Pricing Factors",
                vec![
                    choice(
                        "engagement_type",
                        "Engagement Type",
                        Select,
                        false,
                        &["One-time Project", "Retainer", "Subscription"],
                    ),
                    field("start_date", "Estimated Start Date", Date, false),
                    field("end_date", "Estimated End Date", Date, false),
                    choice(
                        "delivery_model",
                        "Delivery Model",
                        Select,
                        false,
                        &["Fully Managed", "Co-managed", "Advisory"],
                    ),
                    choice(
                        "support_plan",
                        "Support Plan Required",
                        Select,
                        false,
                        &["None", "Basic", "Priority", "Dedicated"],
                    ),
                ],
            ),
            section(
                "competitive",
                "6. Competitive/Value-based Inputs",
                vec![
                    choice(
                        "budget_range",
                        "Budget Range",
                        Select,
                        false,
                        &["<$5K", "$5K-$25K", "$25K-$100K", ">$100K"],
                    ),
                    field(
                        "competitor_comparison",
                        "Competitor Comparison",
                        Textarea,
                        false,
                    ),
                    field("roi_expectations", "ROI Expectations", Textarea, false),
                    choice(
                        "tiered_pricing_needed",
                        "Tiered Pricing Model Needed",
                        Select,
                        false,
                        &["Yes", "No"],
                    ),
                    field(
                        "tiered_pricing_details",
                        "Tiered Pricing Details",
                        Textarea,
                        false,
                    ),
                ],
            ),
            section(
                "analyst",
                "7. Analyst Notes & Recommendations",
                vec![
                    field("internal_notes", "Internal Analyst Notes", Textarea, false),
                    field(
                        "suggested_pricing_model",
                        "Suggested Pricing Model",
                        Textarea,
                        false,
                    ),
                    field(
                        "risk_factors",
                        "Risk Factors / Considerations",
                        Textarea,
                        false,
                    ),
                    field("next_steps", "Suggested Next Steps", Textarea, false),
                ],
            ),
        ],
    }
}
