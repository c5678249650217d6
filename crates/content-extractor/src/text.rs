use core_types::MediaType;

use crate::{ExtractContext, ExtractError, ExtractedContent, Extractor, finish};

/// Decodes `text/plain` uploads as UTF-8, verbatim.
#[derive(Debug, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub const fn new() -> Self {
        Self
    }
}

impl Extractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "text"
    }

    fn supports(&self, ctx: &ExtractContext) -> bool {
        matches!(ctx.media_type, MediaType::PlainText)
    }

    fn extract(
        &self,
        ctx: &ExtractContext,
        bytes: &[u8],
    ) -> Result<ExtractedContent, ExtractError> {
        let text = std::str::from_utf8(bytes).map_err(|e| ExtractError::Decode(e.to_string()))?;
        Ok(finish(ctx, self.name(), text.to_owned(), bytes.len(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ctx;
    use proptest::prelude::*;

    #[test]
    fn keeps_whitespace_and_bom() {
        let mt = MediaType::PlainText;
        let raw = "\u{feff}line one\r\n\tline two  ";
        let out = PlainTextExtractor
            .extract(&ctx(&mt), raw.as_bytes())
            .unwrap();
        assert_eq!(out.text, raw);
        assert!(!out.truncated);
        assert_eq!(out.bytes_processed, raw.len());
    }

    #[test]
    fn invalid_utf8_is_unreadable() {
        let mt = MediaType::PlainText;
        let err = PlainTextExtractor
            .extract(&ctx(&mt), &[0x66, 0x6f, 0xff, 0x6f])
            .unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
    }

    #[test]
    fn empty_file_yields_empty_text() {
        let mt = MediaType::PlainText;
        let out = PlainTextExtractor.extract(&ctx(&mt), b"").unwrap();
        assert!(out.text.is_empty());
    }

    #[test]
    fn only_claims_plain_text() {
        let pdf = MediaType::Pdf;
        assert!(!PlainTextExtractor.supports(&ctx(&pdf)));
        let txt = MediaType::PlainText;
        assert!(PlainTextExtractor.supports(&ctx(&txt)));
    }

    proptest! {
        #[test]
        fn utf8_round_trips(s in any::<String>()) {
            let mt = MediaType::PlainText;
            let out = PlainTextExtractor.extract(&ctx(&mt), s.as_bytes()).unwrap();
            prop_assert_eq!(out.text, s);
        }
    }
}
