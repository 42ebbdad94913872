use std::future::Future;

use log::{debug, info};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::Lesson;
use crate::draft::UploadPayload;

/// Transport-level failures: the request never completed, or the backend said no
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Request failed with status code {}", .status.as_u16())]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error(transparent)]
    Network(#[from] reqwest::Error),

    #[error("unexpected response from server: {0}")]
    Malformed(String),
}

impl UploadError {
    /// Text shown to the user: the server's own explanation when it gave one
    pub fn user_detail(&self) -> String {
        match self {
            UploadError::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// Anything that can carry a lesson upload to the backend
pub trait Uploader {
    fn upload(&self, payload: UploadPayload) -> impl Future<Output = Result<Lesson, UploadError>> + Send;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    lesson: Lesson,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: Option<serde_json::Value>,
}

/// Posts lesson uploads as multipart/form-data to a fixed endpoint
#[derive(Debug, Clone)]
pub struct HttpUploader {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpUploader {
    pub fn new(base_url: &str, upload_path: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, upload_path)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, upload_path: &str) -> Self {
        let endpoint = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            upload_path.trim_start_matches('/')
        );
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Uploader for HttpUploader {
    async fn upload(&self, payload: UploadPayload) -> Result<Lesson, UploadError> {
        info!(
            "Uploading lesson {:?} ({}) to {}",
            payload.title,
            payload.video_source(),
            self.endpoint
        );

        let form = payload.into_form()?;
        let resp = self.client.post(&self.endpoint).multipart(form).send().await?;

        let status = resp.status();
        let body = resp.text().await?;
        debug!("Upload response {status}: {body}");

        if !status.is_success() {
            return Err(UploadError::Rejected {
                status,
                detail: parse_error_detail(&body),
            });
        }

        parse_lesson(&body)
    }
}

fn parse_lesson(body: &str) -> Result<Lesson, UploadError> {
    let resp: UploadResponse =
        serde_json::from_str(body).map_err(|e| UploadError::Malformed(e.to_string()))?;
    Ok(resp.lesson)
}

fn parse_error_detail(body: &str) -> Option<String> {
    let resp: ErrorResponse = serde_json::from_str(body).ok()?;
    match resp.detail? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VideoSource;

    #[test]
    fn test_endpoint_join() {
        let up = HttpUploader::new("http://localhost:8000/", "/api/lessons/upload_video");
        assert_eq!(up.endpoint(), "http://localhost:8000/api/lessons/upload_video");

        let up = HttpUploader::new("http://backend", "upload");
        assert_eq!(up.endpoint(), "http://backend/upload");
    }

    #[test]
    fn test_parse_lesson() {
        let body = r#"{"lesson": {"id": 3, "video_type": "local", "content_url": "/media/abc.mp4"}}"#;
        let lesson = parse_lesson(body).unwrap();
        assert_eq!(lesson.video_type, VideoSource::Local);
        assert_eq!(lesson.content_url, "/media/abc.mp4");
    }

    #[test]
    fn test_parse_lesson_missing() {
        let err = parse_lesson(r#"{"ok": true}"#).unwrap_err();
        assert!(matches!(err, UploadError::Malformed(_)));
    }

    #[test]
    fn test_parse_lesson_non_canonical_remote() {
        for video_type in ["Remote", "YouTube", "remote", "vimeo"] {
            let body = format!(r#"{{"lesson": {{"video_type": "{video_type}", "content_url": "x"}}}}"#);
            let lesson = parse_lesson(&body).unwrap();
            assert_eq!(lesson.video_type, VideoSource::Remote, "{video_type}");
        }
    }

    #[test]
    fn test_parse_lesson_local_any_case() {
        let body = r#"{"lesson": {"video_type": "LOCAL", "content_url": "/media/a.mp4"}}"#;
        assert_eq!(parse_lesson(body).unwrap().video_type, VideoSource::Local);
    }

    #[test]
    fn test_parse_lesson_missing_video_type() {
        let body = r#"{"lesson": {"content_url": "x"}}"#;
        assert!(matches!(parse_lesson(body), Err(UploadError::Malformed(_))));
    }

    #[test]
    fn test_parse_error_detail_string() {
        assert_eq!(
            parse_error_detail(r#"{"detail": "Invalid YouTube URL"}"#).as_deref(),
            Some("Invalid YouTube URL")
        );
    }

    #[test]
    fn test_parse_error_detail_structured() {
        let detail = parse_error_detail(r#"{"detail": [{"loc": ["body", "title"]}]}"#).unwrap();
        assert_eq!(detail, r#"[{"loc":["body","title"]}]"#);
    }

    #[test]
    fn test_parse_error_detail_absent() {
        assert_eq!(parse_error_detail("<html>502 Bad Gateway</html>"), None);
        assert_eq!(parse_error_detail(r#"{"error": "nope"}"#), None);
        assert_eq!(parse_error_detail(r#"{"detail": null}"#), None);
    }

    #[test]
    fn test_user_detail() {
        let with_detail = UploadError::Rejected {
            status: StatusCode::BAD_REQUEST,
            detail: Some("Title already exists".to_string()),
        };
        assert_eq!(with_detail.user_detail(), "Title already exists");

        let without = UploadError::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        };
        assert_eq!(without.user_detail(), "Request failed with status code 500");
    }
}
