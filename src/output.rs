use html_escape::encode_double_quoted_attribute;

use crate::preview::{Preview, RenderMode};

const VIDEO_ONERROR: &str =
    "alert('⚠️ Failed to load video. Check that it was uploaded and served correctly.')";

const IFRAME_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Render preview as a single human-readable line
pub fn render_text(preview: &Preview) -> String {
    let kind = match preview.mode {
        RenderMode::NativePlayer => "video",
        RenderMode::EmbeddedFrame => "embed",
    };
    format!("{kind}: {}", preview.target)
}

/// Render preview as pretty-printed JSON
pub fn render_json(preview: &Preview) -> String {
    serde_json::to_string_pretty(preview).unwrap_or_default()
}

/// Render preview as the markup the upload page shows under the form
pub fn render_html(preview: &Preview) -> String {
    let src = encode_double_quoted_attribute(&preview.target);
    match preview.mode {
        RenderMode::EmbeddedFrame => format!(
            "<div class=\"video-preview\">\n  <iframe width=\"100%\" height=\"315\" src=\"{src}\" \
             title=\"YouTube video player\" frameborder=\"0\" allow=\"{IFRAME_ALLOW}\" allowfullscreen></iframe>\n</div>"
        ),
        RenderMode::NativePlayer => format!(
            "<div class=\"video-preview\">\n  <video controls width=\"100%\" src=\"{src}\" \
             onerror=\"{VIDEO_ONERROR}\"></video>\n</div>"
        ),
    }
}
