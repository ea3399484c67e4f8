// src/applications/extract.rs
//! Best-effort resume text extraction, dispatched by file extension.
//!
//! Extraction never blocks a submission: any failure is logged and the
//! resume text ends up empty.

use tracing::warn;

/// Returned verbatim for legacy .doc uploads, which we cannot parse.
pub const DOC_EXTRACTION_PLACEHOLDER: &str =
    "Legacy .doc format detected. Automated extraction limited.";

pub fn extract_resume_text(filename: &str, data: &[u8]) -> String {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => pdf_extract::extract_text_from_mem(data).unwrap_or_else(|e| {
            warn!(error = %e, "PDF text extraction failed");
            String::new()
        }),
        Some("docx") => extract_docx_text(data).unwrap_or_else(|e| {
            warn!(error = %e, "DOCX text extraction failed");
            String::new()
        }),
        Some("doc") => DOC_EXTRACTION_PLACEHOLDER.to_string(),
        Some("txt") => String::from_utf8(data.to_vec()).unwrap_or_default(),
        _ => String::new(),
    }
}

fn extract_docx_text(data: &[u8]) -> Result<String, docx_rs::ReaderError> {
    let docx = docx_rs::read_docx(data)?;

    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }

    Ok(text)
}
