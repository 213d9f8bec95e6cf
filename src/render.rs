//! Deterministic report document renderers.
//!
//! `render_document` produces the fixed multi-section HTML layout handed to
//! the external PDF converter; `render_text` is the terminal rendering used
//! by `pran report`. Both walk the assembled view in order and carry no
//! state of their own.

use crate::report::ReportView;

const DOCUMENT_TITLE: &str = "Data Visualization Pricing Analysis";

/// Render the paginated HTML document for a report view.
pub fn render_document(view: &ReportView) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(DOCUMENT_TITLE)));
    out.push_str("<style>\n");
    out.push_str(DOCUMENT_STYLE);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(DOCUMENT_TITLE)));

    for section in &view.sections {
        out.push_str("<div class=\"section\">\n");
        out.push_str(&format!("<h2>{}</h2>\n", escape_html(&section.title)));
        out.push_str("<table>\n");
        for row in &section.rows {
            out.push_str(&format!(
                "<tr><th>{}</th><td>{}</td></tr>\n",
                escape_html(&row.label),
                escape_html(&row.value)
            ));
        }
        out.push_str("</table>\n</div>\n");
    }

    out.push_str(&format!(
        "<div class=\"footer\"><p>Pricing analysis {}</p></div>\n",
        escape_html(&view.project_id)
    ));
    out.push_str("</body>\n</html>\n");
    out
}

/// Render the report for the terminal.
pub fn render_text(view: &ReportView) -> String {
    let mut out = String::new();
    out.push_str(&format!("{DOCUMENT_TITLE}\n"));
    out.push_str(&format!("Record: {}\n", view.project_id));
    for section in &view.sections {
        out.push_str(&format!("\n{}\n", section.title));
        let width = section
            .rows
            .iter()
            .map(|row| row.label.len())
            .max()
            .unwrap_or(0);
        for row in &section.rows {
            out.push_str(&format!("  {:width$}  {}\n", row.label, row.value));
        }
    }
    out
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// Print styling mirrors the report layout: one block per section, page
// breaks avoided inside a section.
const DOCUMENT_STYLE: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; padding: 20px; }
h1 { color: #2c3e50; font-size: 24px; border-bottom: 2px solid #3498db; padding-bottom: 10px; }
h2 { color: #2c3e50; font-size: 20px; border-bottom: 1px solid #bdc3c7; padding-bottom: 5px; }
.section { margin-bottom: 30px; page-break-inside: avoid; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 12px 15px; border-bottom: 1px solid #ddd; text-align: left; }
th { background-color: #f5f5f5; width: 220px; }
.footer { margin-top: 30px; text-align: center; color: #7f8c8d; font-size: 12px; }
";
