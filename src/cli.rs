use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Source {
    Local,
    Youtube,
}

#[derive(Parser)]
#[command(
    name = "lessonup",
    about = "Upload lesson videos and preview the result",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Backend base URL (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Preview output format: text (default), json, html
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Write the preview to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Show request details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload a lesson video file or YouTube link
    Upload(UploadArgs),

    /// Compute the preview for a lesson record returned by the backend
    Preview {
        /// Video type reported by the backend: local or youtube
        #[arg(long, value_enum)]
        video_type: Source,

        /// Content URL reported by the backend
        content_url: String,
    },

    /// Print the YouTube video id found in a URL
    Id {
        /// YouTube URL (reads from stdin if omitted)
        url: Option<String>,
    },

    /// Show which page serves a path
    Route {
        /// Path such as /upload
        path: String,
    },
}

#[derive(Args)]
pub struct UploadArgs {
    /// Lesson title
    #[arg(short, long)]
    pub title: String,

    /// Brief description of the lesson
    #[arg(short, long)]
    pub about: String,

    /// Category, e.g. Programming, Math, Science
    #[arg(short, long)]
    pub category: String,

    /// Which video source to send
    #[arg(short, long, value_enum, default_value_t = Source::Local)]
    pub source: Source,

    /// Video file to upload (with --source local)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// YouTube link to attach (with --source youtube)
    #[arg(long)]
    pub youtube_url: Option<String>,

    /// Tutor id (overrides config)
    #[arg(long)]
    pub tutor_id: Option<String>,
}
