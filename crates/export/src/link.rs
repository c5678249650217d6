use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::escape_markup;

/// Anchor that downloads `data` as `filename` from an inline base64 data URI.
pub fn download_link(data: &[u8], filename: &str, label: &str) -> String {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or("bin");
    let payload = STANDARD.encode(data);
    format!(
        r#"<a href="data:file/{};base64,{payload}" download="{}">{}</a>"#,
        escape_markup(ext),
        escape_markup(filename),
        escape_markup(label),
    )
}
