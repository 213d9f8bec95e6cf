//! Interactive form walk with per-kind control dispatch.
//!
//! The engine consumes the definition in presentation order and dispatches on
//! `FieldKind` exhaustively, so an unhandled kind is a compile error rather
//! than a silent fall-through. Input flows through the `Prompter` trait; the
//! production implementation wraps stdin/stdout and tests drive the walk with
//! a scripted prompter.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::schema::{FieldKind, FieldSchema, FormDefinition, SectionSchema};
use crate::state::FormState;

/// Input/output seam for the form walk.
pub trait Prompter {
    fn say(&mut self, text: &str);

    /// Read one input line. `None` means input is exhausted; editors treat
    /// it as the end of the session, never as a blank line.
    fn line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Stdin-backed prompter used by `pran edit`.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn say(&mut self, text: &str) {
        println!("{text}");
    }

    fn line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush().context("flush prompt")?;
        let mut input = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut input)
            .context("read input line")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Compute the selection that results from toggling one option: present
/// options are removed, absent ones appended. Order reflects first selection,
/// not the schema's option order.
pub fn toggle_selection(current: &[String], option: &str) -> Vec<String> {
    if current.iter().any(|item| item.as_str() == option) {
        current
            .iter()
            .filter(|item| item.as_str() != option)
            .cloned()
            .collect()
    } else {
        let mut next = current.to_vec();
        next.push(option.to_string());
        next
    }
}

/// Walk every section and field of the definition, feeding edits back into
/// the state through its typed update operations.
pub fn run_form(
    definition: &FormDefinition,
    state: &mut FormState,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    for section in &definition.sections {
        prompter.say("");
        prompter.say(&format!("== {} ==", section.title));
        for field in &section.fields {
            edit_field(definition, section, field, state, prompter)?;
        }
    }
    Ok(())
}

fn edit_field(
    definition: &FormDefinition,
    section: &SectionSchema,
    field: &FieldSchema,
    state: &mut FormState,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    match field.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Tel | FieldKind::Date => {
            edit_line(definition, section, field, state, prompter)
        }
        FieldKind::Textarea => edit_textarea(definition, section, field, state, prompter),
        FieldKind::Select => edit_select(definition, section, field, state, prompter),
        FieldKind::Multiselect => edit_multiselect(definition, section, field, state, prompter),
    }
}

fn label_for(field: &FieldSchema) -> String {
    // The required marker is advisory at edit time; enforcement happens at
    // submission.
    if field.required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    }
}

fn current_text(state: &FormState, section: &str, field: &str) -> String {
    match state.get(section, field) {
        Some(crate::state::Value::Text(text)) => text.clone(),
        _ => String::new(),
    }
}

fn edit_line(
    definition: &FormDefinition,
    section: &SectionSchema,
    field: &FieldSchema,
    state: &mut FormState,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let current = current_text(state, &section.name, &field.id);
    let Some(input) = prompter.line(&format!("{} [{}]: ", label_for(field), current))? else {
        return Ok(());
    };
    if input.is_empty() {
        return Ok(());
    }
    if let Some(warning) = format_cue(field.kind, &input) {
        prompter.say(&warning);
    }
    state.set_field(definition, &section.name, &field.id, input)?;
    Ok(())
}

/// Advisory format cues for email and date inputs. Never blocks the edit.
fn format_cue(kind: FieldKind, input: &str) -> Option<String> {
    let pattern = match kind {
        FieldKind::Email => r"^[^@\s]+@[^@\s]+\.[^@\s]+$",
        FieldKind::Date => r"^\d{4}-\d{2}-\d{2}$",
        _ => return None,
    };
    let re = regex::Regex::new(pattern).expect("regex for format cue");
    if re.is_match(input) {
        None
    } else {
        match kind {
            FieldKind::Email => Some(format!("  note: `{input}` does not look like an email")),
            _ => Some(format!("  note: `{input}` is not in YYYY-MM-DD form")),
        }
    }
}

fn edit_textarea(
    definition: &FormDefinition,
    section: &SectionSchema,
    field: &FieldSchema,
    state: &mut FormState,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let current = current_text(state, &section.name, &field.id);
    let summary = if current.is_empty() {
        "empty".to_string()
    } else {
        format!("{} chars", current.len())
    };
    prompter.say(&format!(
        "{} [{}] (end with `.` on its own line, blank to keep):",
        label_for(field),
        summary
    ));
    let mut lines = Vec::new();
    loop {
        let Some(input) = prompter.line("> ")? else {
            // Input ended without the terminator: keep the current value if
            // nothing was typed, otherwise commit what was collected.
            if lines.is_empty() {
                return Ok(());
            }
            break;
        };
        if lines.is_empty() && input.is_empty() {
            return Ok(());
        }
        if input == "." {
            break;
        }
        lines.push(input);
    }
    state.set_field(definition, &section.name, &field.id, lines.join("\n"))?;
    Ok(())
}

fn edit_select(
    definition: &FormDefinition,
    section: &SectionSchema,
    field: &FieldSchema,
    state: &mut FormState,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let current = current_text(state, &section.name, &field.id);
    prompter.say(&format!("{} [{}]:", label_for(field), current));
    prompter.say("  0) leave unselected");
    for (idx, option) in field.options.iter().enumerate() {
        prompter.say(&format!("  {}) {}", idx + 1, option));
    }
    let Some(input) = prompter.line("choice (blank to keep): ")? else {
        return Ok(());
    };
    if input.is_empty() {
        return Ok(());
    }
    match input.parse::<usize>() {
        Ok(0) => state.set_field(definition, &section.name, &field.id, String::new())?,
        Ok(n) if n <= field.options.len() => {
            let value = field.options[n - 1].clone();
            state.set_field(definition, &section.name, &field.id, value)?;
        }
        _ => prompter.say(&format!("  `{input}` is not a listed choice, keeping current")),
    }
    Ok(())
}

fn edit_multiselect(
    definition: &FormDefinition,
    section: &SectionSchema,
    field: &FieldSchema,
    state: &mut FormState,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    // Disclosure state is local to this control instance; it starts closed
    // and is discarded when the walk moves on.
    let mut open = false;
    loop {
        let selected = state.selection(&section.name, &field.id);
        let summary = if selected.is_empty() {
            "Select options...".to_string()
        } else {
            selected.join(", ")
        };
        if !open {
            let Some(input) = prompter.line(&format!(
                "{} [{}] (any key to edit, blank to continue): ",
                label_for(field),
                summary
            ))?
            else {
                return Ok(());
            };
            if input.is_empty() {
                return Ok(());
            }
            open = true;
            continue;
        }
        for (idx, option) in field.options.iter().enumerate() {
            let mark = if selected.iter().any(|item| item == option) {
                "[x]"
            } else {
                "[ ]"
            };
            prompter.say(&format!("  {mark} {}) {}", idx + 1, option));
        }
        let Some(input) = prompter.line("toggle # (blank to close): ")? else {
            return Ok(());
        };
        if input.is_empty() {
            open = false;
            continue;
        }
        match input.parse::<usize>() {
            Ok(n) if (1..=field.options.len()).contains(&n) => {
                let next = toggle_selection(&selected, &field.options[n - 1]);
                state.set_multi(definition, &section.name, &field.id, next)?;
            }
            _ => prompter.say(&format!("  `{input}` is not a listed option")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::load_definition;
    use crate::state::Value;

    struct Scripted {
        inputs: Vec<String>,
        next: usize,
        transcript: Vec<String>,
    }

    impl Scripted {
        fn new(inputs: &[&str]) -> Scripted {
            Scripted {
                inputs: inputs.iter().map(|input| input.to_string()).collect(),
                next: 0,
                transcript: Vec::new(),
            }
        }
    }

    impl Prompter for Scripted {
        fn say(&mut self, text: &str) {
            self.transcript.push(text.to_string());
        }

        fn line(&mut self, prompt: &str) -> Result<Option<String>> {
            self.transcript.push(prompt.to_string());
            let input = self.inputs.get(self.next).cloned();
            self.next += 1;
            Ok(input)
        }
    }

    #[test]
    fn toggling_twice_is_its_own_inverse() {
        let original = vec!["Dashboards".to_string()];
        let toggled = toggle_selection(&original, "KPI Reporting");
        assert_eq!(toggled, vec!["Dashboards", "KPI Reporting"]);
        let back = toggle_selection(&toggled, "KPI Reporting");
        assert_eq!(back, original);
    }

    #[test]
    fn selection_order_reflects_first_selection_not_schema_order() {
        let mut selected = Vec::new();
        selected = toggle_selection(&selected, "Infographics");
        selected = toggle_selection(&selected, "Dashboards");
        assert_eq!(selected, vec!["Infographics", "Dashboards"]);

        // Removing and re-adding moves the option to the end.
        selected = toggle_selection(&selected, "Infographics");
        selected = toggle_selection(&selected, "Infographics");
        assert_eq!(selected, vec!["Dashboards", "Infographics"]);
    }

    #[test]
    fn line_edit_feeds_set_field() {
        let definition = load_definition().expect("definition");
        let mut state = FormState::init(&definition);
        let section = definition.section("client").expect("client section");
        let field = definition.field("client", "client_name").expect("field");

        let mut prompter = Scripted::new(&["Acme"]);
        edit_field(&definition, section, field, &mut state, &mut prompter).expect("edit");
        assert_eq!(
            state.get("client", "client_name"),
            Some(&Value::Text("Acme".to_string()))
        );
    }

    #[test]
    fn blank_line_keeps_the_current_value() {
        let definition = load_definition().expect("definition");
        let mut state = FormState::init(&definition);
        state
            .set_field(&definition, "client", "client_name", "Kept".to_string())
            .expect("seed value");
        let section = definition.section("client").expect("client section");
        let field = definition.field("client", "client_name").expect("field");

        let mut prompter = Scripted::new(&[""]);
        edit_field(&definition, section, field, &mut state, &mut prompter).expect("edit");
        assert_eq!(
            state.get("client", "client_name"),
            Some(&Value::Text("Kept".to_string()))
        );
    }

    #[test]
    fn select_zero_sets_the_unselected_sentinel() {
        let definition = load_definition().expect("definition");
        let mut state = FormState::init(&definition);
        state
            .set_field(&definition, "client", "client_type", "B2B".to_string())
            .expect("seed value");
        let section = definition.section("client").expect("client section");
        let field = definition.field("client", "client_type").expect("field");

        let mut prompter = Scripted::new(&["0"]);
        edit_field(&definition, section, field, &mut state, &mut prompter).expect("edit");
        assert_eq!(
            state.get("client", "client_type"),
            Some(&Value::Text(String::new()))
        );
    }

    #[test]
    fn select_number_picks_the_option() {
        let definition = load_definition().expect("definition");
        let mut state = FormState::init(&definition);
        let section = definition.section("client").expect("client section");
        let field = definition.field("client", "client_type").expect("field");

        let mut prompter = Scripted::new(&["2"]);
        edit_field(&definition, section, field, &mut state, &mut prompter).expect("edit");
        assert_eq!(
            state.get("client", "client_type"),
            Some(&Value::Text("B2B2B".to_string()))
        );
    }

    #[test]
    fn multiselect_toggles_through_the_open_list() {
        let definition = load_definition().expect("definition");
        let mut state = FormState::init(&definition);
        let section = definition.section("project").expect("project section");
        let field = definition
            .field("project", "expected_deliverables")
            .expect("field");

        // Open, toggle option 2 then 1, toggle 2 again to remove it, close.
        let mut prompter = Scripted::new(&["e", "2", "1", "2", ""]);
        edit_field(&definition, section, field, &mut state, &mut prompter).expect("edit");
        assert_eq!(
            state.selection("project", "expected_deliverables"),
            vec!["Dashboards".to_string()]
        );
    }

    #[test]
    fn textarea_collects_until_terminator() {
        let definition = load_definition().expect("definition");
        let mut state = FormState::init(&definition);
        let section = definition.section("analyst").expect("analyst section");
        let field = definition.field("analyst", "internal_notes").expect("field");

        let mut prompter = Scripted::new(&["first line", "second line", "."]);
        edit_field(&definition, section, field, &mut state, &mut prompter).expect("edit");
        assert_eq!(
            state.get("analyst", "internal_notes"),
            Some(&Value::Text("first line\nsecond line".to_string()))
        );
    }

    #[test]
    fn textarea_commits_collected_lines_when_input_ends() {
        let definition = load_definition().expect("definition");
        let mut state = FormState::init(&definition);
        let section = definition.section("analyst").expect("analyst section");
        let field = definition.field("analyst", "internal_notes").expect("field");

        // Input runs out after one body line, before any terminator.
        let mut prompter = Scripted::new(&["only line"]);
        edit_field(&definition, section, field, &mut state, &mut prompter).expect("edit");
        assert_eq!(
            state.get("analyst", "internal_notes"),
            Some(&Value::Text("only line".to_string()))
        );
        // One body read plus the read that saw the end of input.
        assert_eq!(prompter.next, 2);
    }

    #[test]
    fn textarea_keeps_the_current_value_when_input_ends_immediately() {
        let definition = load_definition().expect("definition");
        let mut state = FormState::init(&definition);
        state
            .set_field(&definition, "analyst", "internal_notes", "Kept".to_string())
            .expect("seed value");
        let section = definition.section("analyst").expect("analyst section");
        let field = definition.field("analyst", "internal_notes").expect("field");

        let mut prompter = Scripted::new(&[]);
        edit_field(&definition, section, field, &mut state, &mut prompter).expect("edit");
        assert_eq!(
            state.get("analyst", "internal_notes"),
            Some(&Value::Text("Kept".to_string()))
        );
    }

    #[test]
    fn exhausted_input_ends_the_whole_form_walk() {
        let definition = load_definition().expect("definition");
        let mut state = FormState::init(&definition);

        // One value, then nothing: the walk must finish on its own.
        let mut prompter = Scripted::new(&["Acme"]);
        run_form(&definition, &mut state, &mut prompter).expect("walk");
        assert_eq!(
            state.get("client", "client_name"),
            Some(&Value::Text("Acme".to_string()))
        );
        let field_count: usize = definition
            .sections
            .iter()
            .map(|section| section.fields.len())
            .sum();
        // Every remaining field sees the end of input exactly once.
        assert!(prompter.next <= field_count + 1);
    }

    #[test]
    fn email_cue_warns_but_does_not_block() {
        let definition = load_definition().expect("definition");
        let mut state = FormState::init(&definition);
        let section = definition.section("client").expect("client section");
        let field = definition.field("client", "email").expect("field");

        let mut prompter = Scripted::new(&["not-an-email"]);
        edit_field(&definition, section, field, &mut state, &mut prompter).expect("edit");
        assert_eq!(
            state.get("client", "email"),
            Some(&Value::Text("not-an-email".to_string()))
        );
        assert!(prompter
            .transcript
            .iter()
            .any(|line| line.contains("does not look like an email")));
    }
}
