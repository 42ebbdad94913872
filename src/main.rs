use std::io::{self, BufRead};
use std::path::PathBuf;

use eyre::{Result, bail};
use log::{debug, info};

use lessonup::VideoSource;
use lessonup::config::Config;
use lessonup::draft::{Field, LocalFile};
use lessonup::page::UploadPage;
use lessonup::preview::{Preview, compute_preview};
use lessonup::routes::Route;
use lessonup::upload::HttpUploader;

mod cli;

use cli::{Cli, Command, OutputFormat, Source, UploadArgs};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("lessonup.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lessonup")
        .join("logs")
}

fn build_after_help() -> String {
    let config_path = lessonup::config::config_path();
    let config_line = if config_path.exists() {
        format!("  \x1b[32m✅\x1b[0m {}", config_path.display())
    } else {
        format!("  \x1b[33m–\x1b[0m {} (not found, using defaults)", config_path.display())
    };

    let log_path = log_dir().join("lessonup.log");

    format!(
        "\nCONFIG:\n{config_line}\n\nLogs are written to: {}",
        log_path.display()
    )
}

impl From<Source> for VideoSource {
    fn from(source: Source) -> Self {
        match source {
            Source::Local => VideoSource::Local,
            Source::Youtube => VideoSource::Remote,
        }
    }
}

fn emit(cli: &Cli, preview: &Preview) -> Result<()> {
    let rendered = match cli.format {
        OutputFormat::Text => lessonup::output::render_text(preview),
        OutputFormat::Json => lessonup::output::render_json(preview),
        OutputFormat::Html => lessonup::output::render_html(preview),
    };

    if let Some(ref path) = cli.output {
        std::fs::write(path, &rendered)?;
        if cli.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        println!("{rendered}");
    }
    Ok(())
}

async fn upload(cli: &Cli, config: &Config, args: &UploadArgs) -> Result<()> {
    let base_url = cli.base_url.as_deref().unwrap_or(config.base_url());
    let uploader = HttpUploader::new(base_url, config.upload_path());

    if cli.verbose {
        eprintln!("Endpoint: {}", uploader.endpoint());
    }

    let mut page = UploadPage::new(base_url);
    page.draft.set_field(Field::Title, args.title.as_str());
    page.draft.set_field(Field::About, args.about.as_str());
    page.draft.set_field(Field::Category, args.category.as_str());
    page.draft.set_field(
        Field::OwnerId,
        args.tutor_id.as_deref().unwrap_or(config.tutor_id()),
    );
    page.draft.select_video_source(args.source.into());

    if let Some(ref path) = args.file {
        let file = LocalFile::open(path).map_err(|e| eyre::eyre!("could not read {}: {e}", path.display()))?;
        page.draft.set_local_file(file);
    }
    if let Some(ref url) = args.youtube_url {
        page.draft.set_field(Field::RemoteUrl, url.as_str());
    }

    match page.submit(&uploader).await {
        Ok(preview) => {
            if let Some(message) = page.message() {
                eprintln!("{message}");
            }
            emit(cli, &preview)
        }
        Err(e) => {
            debug!("Upload error: {e:?}");
            bail!("{}", e.user_message())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_default();

    if cli.verbose {
        let config_path = lessonup::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
    }

    match &cli.command {
        Command::Upload(args) => upload(&cli, &config, args).await?,

        Command::Preview {
            video_type,
            content_url,
        } => {
            let base_url = cli.base_url.as_deref().unwrap_or(config.base_url());
            let lesson = lessonup::Lesson {
                video_type: (*video_type).into(),
                content_url: content_url.clone(),
            };
            let preview = compute_preview(&lesson, base_url)
                .map_err(|e| eyre::eyre!("{e} ({})", e.content_url))?;
            emit(&cli, &preview)?;
        }

        Command::Id { url } => {
            let urls = if let Some(url) = url {
                vec![url.clone()]
            } else {
                let stdin = io::stdin();
                stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
            };

            if urls.is_empty() {
                bail!("no URL provided\n\nUsage: lessonup id <URL>\n       echo <URL> | lessonup id");
            }

            for url in urls.iter().map(|u| u.trim()).filter(|u| !u.is_empty()) {
                let video_id = lessonup::extract_youtube_id(url)
                    .ok_or_else(|| eyre::eyre!("could not extract video ID from: {url}\n\nSupported formats:\n  https://www.youtube.com/watch?v=ID\n  https://www.youtube.com/embed/ID\n  https://www.youtube.com/v/ID\n  https://youtu.be/ID"))?;
                println!("{video_id}");
            }
        }

        Command::Route { path } => match Route::from_path(path) {
            Some(route) => println!("{route}"),
            None => bail!("no page serves {path}"),
        },
    }

    Ok(())
}
