// ============================================================
// DOCX -> HTML
// ============================================================
// Render Word paragraphs, runs and tables as simple HTML.
// Paragraph styles: Title -> h1, Heading1/Heading2 -> h2, Heading3/4 -> h3/h4, others -> p.
// Runs: bold -> strong, italic -> em, "Code" character style -> code.
// Numbered paragraphs become <ul><li> items. Empty paragraphs are dropped.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use docx_rs::{
    read_docx, DocumentChild, Docx, InsertChild, Paragraph, ParagraphChild, Run, RunChild, Table,
    TableCellContent, TableChild, TableRowChild,
};
use serde::Serialize;
use serde_json::Value;

use crate::domain::error::{AppError, Result};

const CODE_STYLE: &str = "Code";

/// Read a .docx file and render it as HTML.
pub fn read_from_doc(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(AppError::NotFound(format!("File {} not found", path.display())));
    }
    let bytes = fs::read(path)?;
    let docx = read_docx(&bytes).map_err(|e| {
        AppError::ParseError(format!("Failed to parse DOCX file {}: {}", path.display(), e))
    })?;
    Ok(render_html(&docx))
}

/// Render an in-memory document.
pub fn render_html(docx: &Docx) -> String {
    let mut html = String::new();
    let mut in_list = false;

    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => {
                let Some(inner) = render_runs(paragraph) else {
                    continue;
                };
                if paragraph.property.numbering_property.is_some() {
                    if !in_list {
                        html.push_str("<ul>");
                        in_list = true;
                    }
                    let _ = write!(html, "<li>{}</li>", inner);
                } else {
                    close_list(&mut html, &mut in_list);
                    let tag = block_tag(paragraph_style(paragraph));
                    let _ = write!(html, "<{tag}>{inner}</{tag}>");
                }
            }
            DocumentChild::Table(table) => {
                close_list(&mut html, &mut in_list);
                render_table(table, &mut html);
            }
            _ => {}
        }
    }

    close_list(&mut html, &mut in_list);
    html
}

fn close_list(html: &mut String, in_list: &mut bool) {
    if *in_list {
        html.push_str("</ul>");
        *in_list = false;
    }
}

fn paragraph_style(paragraph: &Paragraph) -> Option<&str> {
    paragraph.property.style.as_ref().map(|s| s.val.as_str())
}

/// HTML element for a paragraph style id.
pub fn block_tag(style: Option<&str>) -> &'static str {
    let normalized = style
        .map(|s| s.replace(' ', "").to_ascii_lowercase())
        .unwrap_or_default();
    match normalized.as_str() {
        "title" => "h1",
        "heading1" | "heading2" => "h2",
        "heading3" => "h3",
        "heading4" => "h4",
        _ => "p",
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RunFormat {
    bold: bool,
    italic: bool,
    code: bool,
}

impl RunFormat {
    fn of(run: &Run) -> Self {
        let props = &run.run_property;
        Self {
            bold: flag_is_on(&props.bold),
            italic: flag_is_on(&props.italic),
            code: props.style.as_ref().is_some_and(|s| s.val == CODE_STYLE),
        }
    }

    fn open(&self, html: &mut String) {
        if self.bold {
            html.push_str("<strong>");
        }
        if self.italic {
            html.push_str("<em>");
        }
        if self.code {
            html.push_str("<code>");
        }
    }

    fn close(&self, html: &mut String) {
        if self.code {
            html.push_str("</code>");
        }
        if self.italic {
            html.push_str("</em>");
        }
        if self.bold {
            html.push_str("</strong>");
        }
    }
}

// Toggle properties keep their value private; read it through serde.
fn flag_is_on<T: Serialize>(flag: &Option<T>) -> bool {
    match flag {
        None => false,
        Some(flag) => match serde_json::to_value(flag) {
            Ok(Value::Bool(on)) => on,
            Ok(Value::Object(map)) => map.get("val").and_then(Value::as_bool).unwrap_or(true),
            _ => true,
        },
    }
}

/// Inner HTML of a paragraph, `None` when it has no visible text.
fn render_runs(paragraph: &Paragraph) -> Option<String> {
    let mut segments: Vec<(RunFormat, String)> = Vec::new();
    for child in &paragraph.children {
        collect_paragraph_child(child, &mut segments);
    }

    if segments.iter().all(|(_, text)| text.trim().is_empty()) {
        return None;
    }

    let mut html = String::new();
    for (format, text) in &segments {
        format.open(&mut html);
        html.push_str(&escape_html(text));
        format.close(&mut html);
    }
    Some(html)
}

fn collect_paragraph_child(child: &ParagraphChild, segments: &mut Vec<(RunFormat, String)>) {
    match child {
        ParagraphChild::Run(run) => collect_run(run, segments),
        ParagraphChild::Hyperlink(link) => {
            for link_child in &link.children {
                collect_paragraph_child(link_child, segments);
            }
        }
        ParagraphChild::Insert(insert) => {
            for insert_child in &insert.children {
                if let InsertChild::Run(run) = insert_child {
                    collect_run(run, segments);
                }
            }
        }
        _ => {}
    }
}

fn collect_run(run: &Run, segments: &mut Vec<(RunFormat, String)>) {
    let mut text = String::new();
    for child in &run.children {
        match child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) | RunChild::PTab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
    if text.is_empty() {
        return;
    }

    // Word often splits one formatted phrase into several runs.
    let format = RunFormat::of(run);
    match segments.last_mut() {
        Some((last, buffer)) if *last == format => buffer.push_str(&text),
        _ => segments.push((format, text)),
    }
}

fn render_table(table: &Table, html: &mut String) {
    html.push_str("<table>");
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        html.push_str("<tr>");
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            html.push_str("<td>");
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(paragraph) => {
                        if let Some(inner) = render_runs(paragraph) {
                            let tag = block_tag(paragraph_style(paragraph));
                            let _ = write!(html, "<{tag}>{inner}</{tag}>");
                        }
                    }
                    TableCellContent::Table(nested) => render_table(nested, html),
                    _ => {}
                }
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
}

/// Escape text for use inside HTML elements and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{IndentLevel, NumberingId};
    use std::fs::File;
    use tempfile::tempdir;

    fn styled(style: &str, text: &str) -> Paragraph {
        Paragraph::new().add_run(Run::new().add_text(text)).style(style)
    }

    fn sample_doc() -> Docx {
        Docx::new()
            .add_paragraph(styled("Title", "This is the document title"))
            .add_paragraph(styled("Heading1", "Heading level 1"))
            .add_paragraph(styled("Heading2", "Heading level 2"))
            .add_paragraph(styled("Heading3", "Heading level 3"))
            .add_paragraph(styled("Heading4", "Heading level 4"))
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Plain, "))
                    .add_run(Run::new().add_text("bold text").bold())
                    .add_run(Run::new().add_text(", "))
                    .add_run(Run::new().add_text("italic text").italic())
                    .add_run(Run::new().add_text(" and "))
                    .add_run(Run::new().add_text("bold italic text").bold().italic()),
            )
            .add_paragraph(Paragraph::new())
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("first"))
                    .numbering(NumberingId::new(1), IndentLevel::new(0)),
            )
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("second"))
                    .numbering(NumberingId::new(1), IndentLevel::new(0)),
            )
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("x < y & "))
                    .add_run(Run::new().add_text("let x = 1;").style(CODE_STYLE)),
            )
    }

    #[test]
    fn test_block_tag() {
        assert_eq!(block_tag(Some("Title")), "h1");
        assert_eq!(block_tag(Some("Heading1")), "h2");
        assert_eq!(block_tag(Some("Heading2")), "h2");
        assert_eq!(block_tag(Some("heading 3")), "h3");
        assert_eq!(block_tag(Some("Normal")), "p");
        assert_eq!(block_tag(None), "p");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\" > d"), "a &lt; b &amp; &quot;c&quot; &gt; d");
    }

    #[test]
    fn test_render_styles_and_runs() {
        let html = render_html(&sample_doc());

        assert!(html.starts_with("<h1>This is the document title</h1><h2>Heading level 1</h2>"));
        assert!(html.contains("<h2>Heading level 2</h2>"));
        assert!(html.contains("<h3>Heading level 3</h3>"));
        assert!(html.contains("<h4>Heading level 4</h4>"));
        assert!(html.contains("<p>Plain, <strong>bold text</strong>, <em>italic text</em>"));
        assert!(html.contains("<strong><em>bold italic text</em></strong>"));
        assert!(html.contains("<ul><li>first</li><li>second</li></ul>"));
        assert!(html.contains("<p>x &lt; y &amp; <code>let x = 1;</code></p>"));
        assert!(!html.contains("<p></p>"));
    }

    #[test]
    fn test_adjacent_runs_with_same_format_merge() {
        let doc = Docx::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("bold ").bold())
                .add_run(Run::new().add_text("text").bold()),
        );
        assert_eq!(render_html(&doc), "<p><strong>bold text</strong></p>");
    }

    #[test]
    fn test_read_from_doc_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("default_style.docx");
        let file = File::create(&path).unwrap();
        sample_doc().build().pack(file).unwrap();

        let html = read_from_doc(&path).unwrap();
        assert!(html.contains("<h1>This is the document title</h1>"));
        assert!(html.contains("<h2>Heading level 2</h2>"));
        assert!(html.contains("<strong>bold text</strong>"));
        assert!(html.contains("<em>italic text</em>"));
    }

    #[test]
    fn test_read_from_doc_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.docx");
        assert!(matches!(read_from_doc(&missing), Err(AppError::NotFound(_))));

        let broken = dir.path().join("broken.docx");
        fs::write(&broken, b"not a docx").unwrap();
        assert!(matches!(read_from_doc(&broken), Err(AppError::ParseError(_))));
    }
}
