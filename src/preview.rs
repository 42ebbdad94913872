use log::{debug, warn};
use serde::Serialize;

use crate::{Lesson, VideoSource, embed_url, extract_youtube_id};

/// How a preview is played back. Decided once, when the lesson is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Served by the backend, played by a `<video>` element
    NativePlayer,
    /// Third-party player in an iframe
    EmbeddedFrame,
}

/// A playable preview of an uploaded lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub target: String,
    pub mode: RenderMode,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid YouTube URL provided by the server.")]
pub struct ExtractionError {
    pub content_url: String,
}

/// Classify a returned lesson and work out what to play
pub fn compute_preview(lesson: &Lesson, base_url: &str) -> Result<Preview, ExtractionError> {
    let preview = match lesson.video_type {
        VideoSource::Local => Preview {
            target: media_url(base_url, &lesson.content_url),
            mode: RenderMode::NativePlayer,
        },
        VideoSource::Remote => {
            let Some(video_id) = extract_youtube_id(&lesson.content_url) else {
                warn!("No YouTube id in {:?}", lesson.content_url);
                return Err(ExtractionError {
                    content_url: lesson.content_url.clone(),
                });
            };
            Preview {
                target: embed_url(&video_id),
                mode: RenderMode::EmbeddedFrame,
            }
        }
    };

    debug!("Preview {:?} -> {}", preview.mode, preview.target);
    Ok(preview)
}

fn media_url(base_url: &str, content_url: &str) -> String {
    if content_url.starts_with("http://") || content_url.starts_with("https://") {
        return content_url.to_string();
    }

    let base = base_url.trim_end_matches('/');
    if content_url.starts_with('/') {
        format!("{base}{content_url}")
    } else {
        format!("{base}/{content_url}")
    }
}
