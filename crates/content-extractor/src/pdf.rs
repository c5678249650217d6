use core_types::MediaType;
use lopdf::Document;
use tracing::debug;

use crate::{ExtractContext, ExtractError, ExtractedContent, Extractor, finish};

/// Per-page text extraction with `lopdf`.
///
/// Pages are joined with a single space. A page whose text cannot be decoded
/// (scanned images, exotic font encodings) contributes an empty segment; there
/// is no OCR fallback. Only a document that fails to parse is an error.
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub const fn new() -> Self {
        Self
    }
}

impl Extractor for PdfExtractor {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn supports(&self, ctx: &ExtractContext) -> bool {
        matches!(ctx.media_type, MediaType::Pdf)
    }

    fn extract(
        &self,
        ctx: &ExtractContext,
        bytes: &[u8],
    ) -> Result<ExtractedContent, ExtractError> {
        let document = Document::load_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;
        let pages = document.get_pages();

        let mut segments = Vec::with_capacity(pages.len());
        for &number in pages.keys() {
            match document.extract_text(&[number]) {
                Ok(text) => segments.push(text),
                Err(err) => {
                    debug!(file = ctx.name, page = number, error = %err, "page has no extractable text");
                    segments.push(String::new());
                }
            }
        }

        Ok(finish(
            ctx,
            self.name(),
            segments.join(" "),
            bytes.len(),
            Some(pages.len()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ctx;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    /// Build a minimal PDF with one Courier text run per page.
    fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn extracts_every_page_in_order() {
        let bytes = pdf_with_pages(&["Alpha", "Bravo"]);
        let mt = MediaType::Pdf;
        let out = PdfExtractor.extract(&ctx(&mt), &bytes).unwrap();

        assert_eq!(out.pages, Some(2));
        let alpha = out.text.find("Alpha").expect("first page text");
        let bravo = out.text.find("Bravo").expect("second page text");
        assert!(alpha < bravo);
    }

    #[test]
    fn page_without_text_contributes_empty_segment() {
        let bytes = pdf_with_pages(&["", "Only"]);
        let mt = MediaType::Pdf;
        let out = PdfExtractor.extract(&ctx(&mt), &bytes).unwrap();
        assert_eq!(out.pages, Some(2));
        assert_eq!(out.text.split_whitespace().collect::<Vec<_>>(), vec!["Only"]);
    }

    #[test]
    fn garbage_is_unreadable() {
        let mt = MediaType::Pdf;
        let err = PdfExtractor
            .extract(&ctx(&mt), b"definitely not a pdf")
            .unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }
}
