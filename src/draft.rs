use std::path::Path;

use log::debug;
use reqwest::multipart;

use crate::{DEFAULT_TUTOR_ID, VideoSource};

/// Editable attributes of an upload draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    About,
    Category,
    RemoteUrl,
    OwnerId,
}

impl Field {
    fn label(&self) -> &'static str {
        match self {
            Field::Title => "Lesson Title",
            Field::About => "About",
            Field::Category => "Category",
            Field::RemoteUrl => "YouTube URL",
            Field::OwnerId => "Tutor",
        }
    }
}

/// Reasons a draft is refused before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a video file to upload.")]
    MissingFile,

    #[error("Please fill in the {} field.", .0.label())]
    MissingField(Field),
}

/// A picked video file, held in memory until submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(&file_name).to_string();
        Self { file_name, mime, bytes }
    }

    /// Read a video file from disk
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        debug!("Read {} ({} bytes)", path.display(), bytes.len());
        Ok(Self::new(file_name, bytes))
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "ogv" | "ogg" => "video/ogg",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mpeg" | "mpg" => "video/mpeg",
        _ => "application/octet-stream",
    }
}

/// In-progress lesson upload. Both sources are retained; only the selected one is sent.
#[derive(Debug, Clone)]
pub struct UploadDraft {
    pub title: String,
    pub about: String,
    pub category: String,
    pub video_source: VideoSource,
    pub local_file: Option<LocalFile>,
    pub remote_url: String,
    pub owner_id: String,
}

impl Default for UploadDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            about: String::new(),
            category: String::new(),
            video_source: VideoSource::Local,
            local_file: None,
            remote_url: String::new(),
            owner_id: DEFAULT_TUTOR_ID.to_string(),
        }
    }
}

impl UploadDraft {
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.title = value,
            Field::About => self.about = value,
            Field::Category => self.category = value,
            Field::RemoteUrl => self.remote_url = value,
            Field::OwnerId => self.owner_id = value,
        }
    }

    pub fn select_video_source(&mut self, source: VideoSource) {
        self.video_source = source;
    }

    pub fn set_local_file(&mut self, file: LocalFile) {
        self.local_file = Some(file);
    }

    pub fn clear_local_file(&mut self) {
        self.local_file = None;
    }

    /// Validate and snapshot the draft into what goes over the wire.
    /// The remote URL is passed through untouched; the backend judges it.
    pub fn to_payload(&self) -> Result<UploadPayload, ValidationError> {
        if self.video_source == VideoSource::Local && self.local_file.is_none() {
            return Err(ValidationError::MissingFile);
        }

        for (field, value) in [
            (Field::Title, &self.title),
            (Field::About, &self.about),
            (Field::Category, &self.category),
        ] {
            if value.is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }

        let media = match (self.video_source, &self.local_file) {
            (VideoSource::Local, Some(file)) => Media::File(file.clone()),
            (VideoSource::Local, None) => return Err(ValidationError::MissingFile),
            (VideoSource::Remote, _) => Media::YoutubeUrl(self.remote_url.clone()),
        };

        Ok(UploadPayload {
            title: self.title.clone(),
            description: self.about.clone(),
            category: self.category.clone(),
            tutor_id: self.owner_id.clone(),
            media,
        })
    }
}

/// The selected video, as sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    File(LocalFile),
    YoutubeUrl(String),
}

/// A validated upload request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tutor_id: String,
    pub media: Media,
}

impl UploadPayload {
    pub fn video_source(&self) -> VideoSource {
        match self.media {
            Media::File(_) => VideoSource::Local,
            Media::YoutubeUrl(_) => VideoSource::Remote,
        }
    }

    /// Text parts of the multipart body, in send order
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("category", self.category.clone()),
            ("video_type", self.video_source().wire_name().to_string()),
            ("tutor_id", self.tutor_id.clone()),
        ];
        if let Media::YoutubeUrl(url) = &self.media {
            fields.push(("youtube_url", url.clone()));
        }
        fields
    }

    pub fn into_form(self) -> reqwest::Result<multipart::Form> {
        let mut form = multipart::Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }

        if let Media::File(file) = self.media {
            let part = multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime)?;
            form = form.part("video_file", part);
        }

        Ok(form)
    }
}
