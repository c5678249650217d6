use core_types::MediaType;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};

use crate::{ExtractContext, ExtractError, ExtractedContent, Extractor, finish};

/// Body-paragraph text from Word documents via `docx-rs`.
///
/// Top-level paragraphs are joined with a single space, empty ones included.
/// Tables, headers and embedded objects are skipped.
#[derive(Debug, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub const fn new() -> Self {
        Self
    }
}

impl Extractor for DocxExtractor {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn supports(&self, ctx: &ExtractContext) -> bool {
        matches!(ctx.media_type, MediaType::Docx)
    }

    fn extract(
        &self,
        ctx: &ExtractContext,
        bytes: &[u8],
    ) -> Result<ExtractedContent, ExtractError> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
                _ => None,
            })
            .collect();

        Ok(finish(
            ctx,
            self.name(),
            paragraphs.join(" "),
            bytes.len(),
            None,
        ))
    }
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&mut text, &para.children);
    text
}

fn push_children(out: &mut String, children: &[ParagraphChild]) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    match rc {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_children(out, &link.children),
            _ => {}
        }
    }
}
