//! Command handlers wiring the form, submission, and report flows together.

use anyhow::{anyhow, Result};
use std::env;

use crate::api::HttpApi;
use crate::cli::{
    EditArgs, ExportArgs, NewArgs, ReportArgs, SetArgs, ShareArgs, ShowArgs, SubmitArgs,
    ToggleArgs, DEFAULT_API_URL, DEFAULT_ORIGIN,
};
use crate::draft;
use crate::engine::{run_form, toggle_selection, StdinPrompter};
use crate::export::{export_document, load_converter_command};
use crate::render::{render_document, render_text};
use crate::report::fetch_report;
use crate::schema::{load_definition, FieldKind};
use crate::share;
use crate::state::Value;
use crate::submit::submit;

fn resolve_api_url(flag: Option<String>) -> String {
    flag.or_else(|| env::var("PRAN_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

fn resolve_origin(flag: Option<String>) -> String {
    flag.or_else(|| env::var("PRAN_SHARE_ORIGIN").ok())
        .unwrap_or_else(|| DEFAULT_ORIGIN.to_string())
}

pub fn run_new(args: NewArgs) -> Result<()> {
    let definition = load_definition()?;
    draft::create(&args.draft, &definition, args.force)?;
    println!("wrote {}", args.draft.display());
    Ok(())
}

pub fn run_edit(args: EditArgs) -> Result<()> {
    let definition = load_definition()?;
    let mut state = draft::load(&args.draft, &definition)?;
    let mut prompter = StdinPrompter;
    run_form(&definition, &mut state, &mut prompter)?;
    draft::save(&args.draft, &state)?;
    println!("saved {}", args.draft.display());
    Ok(())
}

pub fn run_set(args: SetArgs) -> Result<()> {
    let definition = load_definition()?;
    let mut state = draft::load(&args.draft, &definition)?;
    let field = definition
        .field(&args.section, &args.field)
        .ok_or_else(|| anyhow!("unknown field `{}.{}`", args.section, args.field))?;
    if field.kind == FieldKind::Multiselect {
        return Err(anyhow!(
            "`{}.{}` is a multiselect; use `pran toggle`",
            args.section,
            args.field
        ));
    }
    state.set_field(&definition, &args.section, &args.field, args.value.clone())?;
    draft::save(&args.draft, &state)?;
    println!("{}.{} = {}", args.section, args.field, args.value);
    Ok(())
}

pub fn run_toggle(args: ToggleArgs) -> Result<()> {
    let definition = load_definition()?;
    let mut state = draft::load(&args.draft, &definition)?;
    let field = definition
        .field(&args.section, &args.field)
        .ok_or_else(|| anyhow!("unknown field `{}.{}`", args.section, args.field))?;
    if field.kind != FieldKind::Multiselect {
        return Err(anyhow!(
            "`{}.{}` is not a multiselect; use `pran set`",
            args.section,
            args.field
        ));
    }
    if !field.options.contains(&args.option) {
        return Err(anyhow!(
            "`{}` is not an option of `{}.{}` (options: {})",
            args.option,
            args.section,
            args.field,
            field.options.join(", ")
        ));
    }
    let current = state.selection(&args.section, &args.field);
    let next = toggle_selection(&current, &args.option);
    state.set_multi(&definition, &args.section, &args.field, next.clone())?;
    draft::save(&args.draft, &state)?;
    let summary = if next.is_empty() {
        "(none)".to_string()
    } else {
        next.join(", ")
    };
    println!("{}.{} = {}", args.section, args.field, summary);
    Ok(())
}

pub fn run_show(args: ShowArgs) -> Result<()> {
    let definition = load_definition()?;
    let state = draft::load(&args.draft, &definition)?;
    for section in &definition.sections {
        println!();
        println!("== {} ==", section.title);
        for field in &section.fields {
            let marker = if field.required { " *" } else { "" };
            println!(
                "  {}{}: {}",
                field.label,
                marker,
                show_value(state.get(&section.name, &field.id))
            );
        }
    }
    Ok(())
}

fn show_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::Text(text)) if !text.trim().is_empty() => text.clone(),
        Some(Value::List(items)) if !items.is_empty() => items.join(", "),
        Some(Value::Flag(flag)) => if *flag { "yes" } else { "no" }.to_string(),
        _ => "(empty)".to_string(),
    }
}

pub fn run_submit(args: SubmitArgs) -> Result<()> {
    let definition = load_definition()?;
    let state = draft::load(&args.draft, &definition)?;
    let api = HttpApi::new(&resolve_api_url(args.api_url));
    let project_id = submit(&state, &definition, &api)?;
    println!("created record {project_id}");
    println!("view it with: pran report {project_id}");
    if args.keep_draft {
        return Ok(());
    }
    // The form session ends with a successful submission.
    draft::discard(&args.draft)?;
    Ok(())
}

pub fn run_report(args: ReportArgs) -> Result<()> {
    let definition = load_definition()?;
    let api = HttpApi::new(&resolve_api_url(args.api_url));
    let view = fetch_report(&api, &args.project_id, &definition)?;
    print!("{}", render_text(&view));
    Ok(())
}

pub fn run_export(args: ExportArgs) -> Result<()> {
    let definition = load_definition()?;
    let api = HttpApi::new(&resolve_api_url(args.api_url));
    let view = fetch_report(&api, &args.project_id, &definition)?;
    let html = render_document(&view);
    let converter = load_converter_command(args.pdf_command.as_deref())?;
    let path = export_document(&html, &args.project_id, &args.out_dir, converter.as_ref())?;
    println!("wrote {}", path.display());
    Ok(())
}

pub fn run_share(args: ShareArgs) -> Result<()> {
    let origin = resolve_origin(args.origin);
    let url = share::canonical_url(&origin, &args.project_id);
    println!("report:   {url}");
    println!("email:    {}", share::email_link(&url));
    println!("linkedin: {}", share::linkedin_link(&url));
    println!("whatsapp: {}", share::whatsapp_link(&url));
    if args.native && !share::native_share(&url)? {
        println!("native share unavailable");
    }
    Ok(())
}
