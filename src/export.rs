//! Printable plan documents.
//!
//! A class plan is rendered into a standalone HTML page: title, entry-count
//! summary and one table row per entry in the class's display order. The
//! host hands the page to its print surface.

use crate::plan::{ClassPlan, PlanStore};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const TITLE_CAPTION: &str = "진도 계획표";
pub const EMPTY_DETAILS: &str = "-";
pub const COLUMN_HEADERS: [&str; 4] = ["주차", "과목", "단원", "세부 내용"];

pub const STYLE_CLASSIC: &str = "classic";
pub const STYLE_MODERN: &str = "modern";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportStyle {
    Classic,
    #[default]
    Modern,
}

impl ExportStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportStyle::Classic => STYLE_CLASSIC,
            ExportStyle::Modern => STYLE_MODERN,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            STYLE_CLASSIC => Some(ExportStyle::Classic),
            STYLE_MODERN => Some(ExportStyle::Modern),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub style: ExportStyle,
    /// Embed a load-time `window.print()` call.
    pub auto_print: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            style: ExportStyle::Modern,
            auto_print: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintRow {
    pub period: String,
    pub subject: String,
    pub chapter: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintDocument {
    pub title: String,
    pub summary: String,
    pub rows: Vec<PrintRow>,
    pub html: String,
}

pub fn document_title(class_name: &str) -> String {
    format!("{} {}", class_name, TITLE_CAPTION)
}

pub fn summary_line(entry_count: usize) -> String {
    format!("총 {}주차 계획", entry_count)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CLASSIC_CSS: &str = "
    body { font-family: 'Malgun Gothic', sans-serif; margin: 20px; }
    h1 { text-align: center; color: #333; }
    .summary { text-align: center; color: #666; }
    table { width: 100%; border-collapse: collapse; margin-top: 20px; }
    th, td { border: 1px solid #ddd; padding: 12px; text-align: left; }
    th { background-color: #f5f5f5; font-weight: bold; }
    .subject { font-weight: bold; color: #2563eb; }
    .chapter { color: #dc2626; }
";

const MODERN_CSS: &str = "
    body { font-family: 'Noto Sans KR', 'Malgun Gothic', sans-serif; margin: 0; padding: 40px; background-color: #f8fafc; color: #1e293b; }
    .container { max-width: 900px; margin: 0 auto; background: white; padding: 48px; border-radius: 24px; box-shadow: 0 20px 25px -5px rgb(0 0 0 / 0.1); }
    .header { text-align: center; margin-bottom: 48px; padding-bottom: 24px; border-bottom: 3px solid #e2e8f0; }
    h1 { font-size: 36px; font-weight: 700; color: #1e40af; margin: 0 0 16px 0; }
    .summary { font-size: 18px; color: #64748b; margin: 0; font-weight: 500; }
    table { width: 100%; border-collapse: separate; border-spacing: 0; margin-top: 32px; border-radius: 16px; overflow: hidden; background: white; }
    th { background: #f1f5f9; padding: 20px; text-align: left; font-weight: 600; color: #334155; border-bottom: 2px solid #e2e8f0; font-size: 15px; }
    td { padding: 20px; border-bottom: 1px solid #e2e8f0; vertical-align: middle; font-size: 15px; }
    tr:last-child td { border-bottom: none; }
    .week { font-weight: 600; color: #1e40af; font-size: 16px; }
    .subject { font-weight: 600; color: #2563eb; background: #eff6ff; padding: 8px 16px; border-radius: 8px; display: inline-block; }
    .chapter { font-weight: 600; color: #dc2626; background: #fef2f2; padding: 8px 16px; border-radius: 8px; display: inline-block; }
    .details { color: #475569; line-height: 1.6; }
    @media print {
      body { background: white; padding: 0; }
      .container { box-shadow: none; padding: 24px; max-width: 100%; }
      .header { margin-bottom: 24px; }
    }
";

const AUTO_PRINT_SCRIPT: &str =
    "<script>window.addEventListener('load', function () { window.print(); });</script>";

fn rows_for(plan: &ClassPlan) -> Vec<PrintRow> {
    plan.entries()
        .iter()
        .map(|e| PrintRow {
            period: e.period.label(),
            subject: e.subject.clone(),
            chapter: e.chapter.clone(),
            details: if e.details.trim().is_empty() {
                EMPTY_DETAILS.to_string()
            } else {
                e.details.clone()
            },
        })
        .collect()
}

fn write_table(out: &mut String, rows: &[PrintRow], style: ExportStyle) {
    out.push_str("<table>\n<thead>\n<tr>");
    for h in COLUMN_HEADERS {
        let _ = write!(out, "<th>{}</th>", h);
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for r in rows {
        let period = escape_html(&r.period);
        let subject = escape_html(&r.subject);
        let chapter = escape_html(&r.chapter);
        let details = escape_html(&r.details);
        let _ = match style {
            ExportStyle::Classic => writeln!(
                out,
                "<tr><td>{}</td><td class=\"subject\">{}</td><td class=\"chapter\">{}</td><td>{}</td></tr>",
                period, subject, chapter, details
            ),
            ExportStyle::Modern => writeln!(
                out,
                "<tr><td class=\"week\">{}</td><td><span class=\"subject\">{}</span></td><td><span class=\"chapter\">{}</span></td><td class=\"details\">{}</td></tr>",
                period, subject, chapter, details
            ),
        };
    }
    out.push_str("</tbody>\n</table>\n");
}

/// Renders one class. Rows follow `plan.entries()` exactly; nothing is
/// added, dropped or reordered.
pub fn render(plan: &ClassPlan, options: &ExportOptions) -> PrintDocument {
    let title = document_title(plan.name());
    let summary = summary_line(plan.entries().len());
    let rows = rows_for(plan);

    let title_html = escape_html(&title);
    let summary_html = escape_html(&summary);
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", title_html);
    let css = match options.style {
        ExportStyle::Classic => CLASSIC_CSS,
        ExportStyle::Modern => MODERN_CSS,
    };
    let _ = writeln!(html, "<style>{}</style>", css);
    html.push_str("</head>\n<body>\n");
    match options.style {
        ExportStyle::Classic => {
            let _ = writeln!(html, "<h1>{}</h1>", title_html);
            let _ = writeln!(html, "<p class=\"summary\">{}</p>", summary_html);
            write_table(&mut html, &rows, options.style);
        }
        ExportStyle::Modern => {
            html.push_str("<div class=\"container\">\n<div class=\"header\">\n");
            let _ = writeln!(html, "<h1>{}</h1>", title_html);
            let _ = writeln!(html, "<p class=\"summary\">{}</p>", summary_html);
            html.push_str("</div>\n");
            write_table(&mut html, &rows, options.style);
            html.push_str("</div>\n");
        }
    }
    if options.auto_print {
        html.push_str(AUTO_PRINT_SCRIPT);
        html.push('\n');
    }
    html.push_str("</body>\n</html>\n");

    PrintDocument {
        title,
        summary,
        rows,
        html,
    }
}

/// Renders the selected class, or `None` when the selection is empty or
/// points at a class that no longer exists.
pub fn export_selected(store: &PlanStore, options: &ExportOptions) -> Option<PrintDocument> {
    let plan = store.selected_class()?;
    Some(render(plan, options))
}
