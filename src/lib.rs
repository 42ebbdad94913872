pub mod config;
pub mod draft;
pub mod output;
pub mod page;
pub mod preview;
pub mod routes;
pub mod upload;

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Default backend the page talks to
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Fixed upload endpoint, relative to the backend base URL
pub const DEFAULT_UPLOAD_PATH: &str = "/api/lessons/upload_video";

/// Placeholder owner until real accounts exist
pub const DEFAULT_TUTOR_ID: &str = "tutor123";

const EMBED_PREFIX: &str = "https://www.youtube.com/embed/";

/// Known YouTube URL shapes; the id must be followed by a separator or the end of input.
static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([A-Za-z0-9_-]{11})(?:["&?/\s]|$)"#,
    )
    .expect("youtube id pattern is valid")
});

/// Where the lesson video comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum VideoSource {
    #[default]
    Local,
    Remote,
}

impl VideoSource {
    /// Value sent in the `video_type` form field
    pub fn wire_name(&self) -> &'static str {
        match self {
            VideoSource::Local => "local",
            VideoSource::Remote => "youtube",
        }
    }
}

impl std::fmt::Display for VideoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Backend `video_type` values: anything other than `local` is a remote link
impl From<String> for VideoSource {
    fn from(video_type: String) -> Self {
        if video_type.trim().eq_ignore_ascii_case("local") {
            VideoSource::Local
        } else {
            VideoSource::Remote
        }
    }
}

/// Lesson record returned by the backend after an upload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Lesson {
    pub video_type: VideoSource,
    pub content_url: String,
}

/// Extract the 11-character video id from a YouTube watch, embed, short or legacy URL
pub fn extract_youtube_id(url: &str) -> Option<String> {
    YOUTUBE_ID_RE
        .captures(url.trim())
        .map(|caps| caps[1].to_string())
}

/// Canonical iframe-embeddable URL for a video id
pub fn embed_url(video_id: &str) -> String {
    format!("{EMBED_PREFIX}{video_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some(ID.to_string())
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=120"),
            Some(ID.to_string())
        );
    }

    #[test]
    fn test_short_url_with_timestamp() {
        assert_eq!(
            extract_youtube_id("https://youtu.be/dQw4w9WgXcQ?t=30"),
            Some(ID.to_string())
        );
    }

    #[test]
    fn test_embed_and_v_urls() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some(ID.to_string())
        );
        assert_eq!(
            extract_youtube_id("http://youtube.com/v/dQw4w9WgXcQ?version=3"),
            Some(ID.to_string())
        );
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/e/dQw4w9WgXcQ"),
            Some(ID.to_string())
        );
    }

    #[test]
    fn test_legacy_channel_url() {
        assert_eq!(
            extract_youtube_id("http://www.youtube.com/user/someone#p/u/1/dQw4w9WgXcQ"),
            Some(ID.to_string())
        );
    }

    #[test]
    fn test_every_shape_yields_same_id() {
        let shapes = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/channel/x/dQw4w9WgXcQ",
        ];
        for url in shapes {
            assert_eq!(extract_youtube_id(url).as_deref(), Some(ID), "{url}");
        }
    }

    #[test]
    fn test_case_insensitive_host() {
        assert_eq!(
            extract_youtube_id("HTTPS://WWW.YOUTUBE.COM/watch?v=dQw4w9WgXcQ"),
            Some(ID.to_string())
        );
    }

    #[test]
    fn test_quote_terminated() {
        assert_eq!(
            extract_youtube_id(r#"<a href="https://youtu.be/dQw4w9WgXcQ">"#),
            Some(ID.to_string())
        );
    }

    #[test]
    fn test_id_too_long() {
        assert_eq!(extract_youtube_id("https://youtu.be/dQw4w9WgXcQxyz"), None);
    }

    #[test]
    fn test_bare_id_rejected() {
        assert_eq!(extract_youtube_id("dQw4w9WgXcQ"), None);
    }

    #[test]
    fn test_invalid_url() {
        assert_eq!(extract_youtube_id("not a url"), None);
        assert_eq!(extract_youtube_id("https://vimeo.com/123456789"), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_youtube_id(""), None);
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(embed_url(ID), "https://www.youtube.com/embed/dQw4w9WgXcQ");
    }

    #[test]
    fn test_video_source_from_backend_value() {
        assert_eq!(VideoSource::from("local".to_string()), VideoSource::Local);
        assert_eq!(VideoSource::from(" Local ".to_string()), VideoSource::Local);
        assert_eq!(VideoSource::from("youtube".to_string()), VideoSource::Remote);
        assert_eq!(VideoSource::from("vimeo".to_string()), VideoSource::Remote);
    }

    #[test]
    fn test_lesson_deserialize() {
        let lesson: Lesson = serde_json::from_str(
            r#"{"id": 7, "title": "x", "video_type": "youtube", "content_url": "https://youtu.be/dQw4w9WgXcQ"}"#,
        )
        .unwrap();
        assert_eq!(lesson.video_type, VideoSource::Remote);
        assert_eq!(lesson.content_url, "https://youtu.be/dQw4w9WgXcQ");
    }
}
