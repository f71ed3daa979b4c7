//! Convert preview strategy: DOCX bytes → HTML-safe markup.
//!
//! ## Why spawn_blocking?
//!
//! `docx-rs` unzips and XML-parses the whole document in one synchronous
//! call. On multi-megabyte resumes that is CPU-bound work; running it under
//! `tokio::task::spawn_blocking` keeps the async caller responsive, which is
//! what lets a later file selection overtake a slow conversion.
//!
//! The produced markup is deliberately minimal (paragraphs, hyperlink runs,
//! and tables) with every text node HTML-escaped before insertion. The goal
//! is a readable inline preview, not a faithful Word rendering.

use crate::error::IntakeError;
use tracing::debug;

/// Convert a DOCX document into displayable HTML markup.
///
/// Returns [`IntakeError::ConversionFailed`] when the bytes are not a
/// readable DOCX archive.
pub async fn convert_docx(bytes: Vec<u8>) -> Result<String, IntakeError> {
    tokio::task::spawn_blocking(move || convert_blocking(&bytes))
        .await
        .map_err(|e| IntakeError::Internal(format!("Conversion task panicked: {e}")))?
}

/// Blocking implementation of the conversion.
fn convert_blocking(bytes: &[u8]) -> Result<String, IntakeError> {
    let doc = docx_rs::read_docx(bytes).map_err(|e| IntakeError::ConversionFailed {
        detail: format!("not a readable DOCX document: {e}"),
    })?;

    let mut html = String::new();
    for child in &doc.document.children {
        write_document_child(child, &mut html);
    }

    debug!("DOCX converted: {} bytes of markup", html.len());
    Ok(html)
}

fn write_document_child(element: &docx_rs::DocumentChild, html: &mut String) {
    match element {
        docx_rs::DocumentChild::Paragraph(para) => {
            let text = paragraph_text(para);
            if !text.is_empty() {
                html.push_str("<p>");
                html.push_str(&escape_html(&text));
                html.push_str("</p>\n");
            }
        }
        docx_rs::DocumentChild::Table(table) => {
            html.push_str("<table>\n");
            for row in &table.rows {
                let docx_rs::TableChild::TableRow(tr) = row;
                html.push_str("<tr>");
                for cell in &tr.cells {
                    let docx_rs::TableRowChild::TableCell(tc) = cell;
                    html.push_str("<td>");
                    html.push_str(&escape_html(&cell_text(tc)));
                    html.push_str("</td>");
                }
                html.push_str("</tr>\n");
            }
            html.push_str("</table>\n");
        }
        _ => {}
    }
}

/// Collect the visible text of a paragraph, including hyperlink runs.
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(run, &mut text),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = inner {
                        push_run_text(run, &mut text);
                    }
                }
            }
            _ => {}
        }
    }
    text.trim().to_string()
}

fn push_run_text(run: &docx_rs::Run, out: &mut String) {
    for child in &run.children {
        if let docx_rs::RunChild::Text(t) = child {
            out.push_str(&t.text);
        }
    }
}

fn cell_text(tc: &docx_rs::TableCell) -> String {
    let mut parts = Vec::new();
    for child in &tc.children {
        if let docx_rs::TableCellContent::Paragraph(para) = child {
            let text = paragraph_text(para);
            if !text.is_empty() {
                parts.push(text);
            }
        }
    }
    parts.join(" ")
}

/// Escape text for insertion into HTML element content and attributes.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
    use std::io::Cursor;

    fn docx_bytes(docx: Docx) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).expect("pack docx");
        cursor.into_inner()
    }

    #[tokio::test]
    async fn paragraphs_become_escaped_markup() {
        let bytes = docx_bytes(
            Docx::new()
                .add_paragraph(
                    Paragraph::new().add_run(Run::new().add_text("Jane <Doe> & Co.")),
                )
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Engineer"))),
        );

        let html = convert_docx(bytes).await.unwrap();
        assert!(html.contains("<p>Jane &lt;Doe&gt; &amp; Co.</p>"));
        assert!(html.contains("<p>Engineer</p>"));
    }

    #[tokio::test]
    async fn tables_become_rows_and_cells() {
        let table = Table::new(vec![TableRow::new(vec![
            TableCell::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Acme"))),
            TableCell::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("2021"))),
        ])]);
        let bytes = docx_bytes(Docx::new().add_table(table));

        let html = convert_docx(bytes).await.unwrap();
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>Acme</td>"));
        assert!(html.contains("<td>2021</td>"));
    }

    #[tokio::test]
    async fn garbage_bytes_fail_as_conversion_error() {
        let err = convert_docx(b"definitely not a zip archive".to_vec())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "CONVERSION_ERROR");
    }

    #[test]
    fn escape_covers_html_significant_chars() {
        assert_eq!(
            escape_html(r#"<b a="1">&'x'</b>"#),
            "&lt;b a=&quot;1&quot;&gt;&amp;&#39;x&#39;&lt;/b&gt;"
        );
    }
}
