//! CLI argument parsing for the pricing-analysis workflow.
//!
//! The CLI is intentionally thin: each subcommand maps to one workflow
//! handler, so the same core logic can be reused elsewhere.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default base URL of the pricing-analysis API.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default origin for the canonical report URL.
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Root CLI entrypoint for the pricing-analysis workflow.
#[derive(Parser, Debug)]
#[command(
    name = "pran",
    version,
    about = "Collect, submit, and report data-visualization pricing analyses",
    after_help = "Commands:\n  new --draft <file>                    Start a draft with schema defaults\n  edit --draft <file>                   Walk every section interactively\n  set --draft <file> ...                Set one field value\n  toggle --draft <file> ...             Toggle one multiselect option\n  show --draft <file>                   Print the draft with required cues\n  submit --draft <file>                 Validate and create the remote record\n  report <project_id>                   Fetch and print the assembled report\n  export <project_id>                   Write the report document (PDF/HTML)\n  share <project_id>                    Print share links for the record\n\nExamples:\n  pran new --draft analysis.json\n  pran set --draft analysis.json --section client --field client_name --value Acme\n  pran toggle --draft analysis.json --section project --field expected_deliverables --option Dashboards\n  pran submit --draft analysis.json\n  pran report pa-001\n  pran export pa-001 --out-dir reports",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level workflow commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    New(NewArgs),
    Edit(EditArgs),
    Set(SetArgs),
    Toggle(ToggleArgs),
    Show(ShowArgs),
    Submit(SubmitArgs),
    Report(ReportArgs),
    Export(ExportArgs),
    Share(ShareArgs),
}

/// Start a new draft pre-populated with schema defaults.
#[derive(Parser, Debug)]
#[command(about = "Start a new draft with schema defaults")]
pub struct NewArgs {
    /// Path of the draft session file
    #[arg(long, value_name = "FILE")]
    pub draft: PathBuf,

    /// Overwrite an existing draft
    #[arg(long)]
    pub force: bool,
}

/// Walk every section and field interactively.
#[derive(Parser, Debug)]
#[command(about = "Edit a draft interactively, section by section")]
pub struct EditArgs {
    /// Path of the draft session file
    #[arg(long, value_name = "FILE")]
    pub draft: PathBuf,
}

/// Set a single field value.
#[derive(Parser, Debug)]
#[command(about = "Set one field value in a draft")]
pub struct SetArgs {
    /// Path of the draft session file
    #[arg(long, value_name = "FILE")]
    pub draft: PathBuf,

    /// Section name (e.g. client, project)
    #[arg(long)]
    pub section: String,

    /// Field id within the section
    #[arg(long)]
    pub field: String,

    /// New value; an empty string clears the field
    #[arg(long)]
    pub value: String,
}

/// Toggle one multiselect option.
#[derive(Parser, Debug)]
#[command(about = "Toggle one multiselect option in a draft")]
pub struct ToggleArgs {
    /// Path of the draft session file
    #[arg(long, value_name = "FILE")]
    pub draft: PathBuf,

    /// Section name (e.g. project, technical)
    #[arg(long)]
    pub section: String,

    /// Field id within the section
    #[arg(long)]
    pub field: String,

    /// Option to toggle; must be declared by the field
    #[arg(long)]
    pub option: String,
}

/// Print a draft with required-field cues.
#[derive(Parser, Debug)]
#[command(about = "Print a draft with required-field cues")]
pub struct ShowArgs {
    /// Path of the draft session file
    #[arg(long, value_name = "FILE")]
    pub draft: PathBuf,
}

/// Validate and submit a draft.
#[derive(Parser, Debug)]
#[command(about = "Validate a draft and create the remote record")]
pub struct SubmitArgs {
    /// Path of the draft session file
    #[arg(long, value_name = "FILE")]
    pub draft: PathBuf,

    /// Base URL of the pricing-analysis API (or PRAN_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Keep the draft file after a successful submission
    #[arg(long)]
    pub keep_draft: bool,
}

/// Fetch a record and print the assembled report.
#[derive(Parser, Debug)]
#[command(about = "Fetch a record and print the assembled report")]
pub struct ReportArgs {
    /// Server-assigned record identifier
    pub project_id: String,

    /// Base URL of the pricing-analysis API (or PRAN_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,
}

/// Export the report document.
#[derive(Parser, Debug)]
#[command(about = "Write the report document as PDF (or HTML fallback)")]
pub struct ExportArgs {
    /// Server-assigned record identifier
    pub project_id: String,

    /// Base URL of the pricing-analysis API (or PRAN_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory for the exported document
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// HTML-to-PDF converter command with an {out} placeholder
    /// (or PRAN_PDF_COMMAND)
    #[arg(long, value_name = "CMD")]
    pub pdf_command: Option<String>,
}

/// Print share links for a record.
#[derive(Parser, Debug)]
#[command(about = "Print share links for a record")]
pub struct ShareArgs {
    /// Server-assigned record identifier
    pub project_id: String,

    /// Origin for the canonical report URL (or PRAN_SHARE_ORIGIN)
    #[arg(long, value_name = "URL")]
    pub origin: Option<String>,

    /// Also invoke the native share command (PRAN_SHARE_COMMAND)
    #[arg(long)]
    pub native: bool,
}
