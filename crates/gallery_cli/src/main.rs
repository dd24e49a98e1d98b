//! Command-line front end for the gallery.
//!
//! # Responsibility
//! - Parse `upload` / `list` / `delete` commands and drive the core workflows.
//! - Ask for the owner handle interactively when deletion is not pre-confirmed.
//!
//! # Invariants
//! - Deletion always passes through the handle confirmation gate.
//! - Exit status is non-zero whenever a workflow reports an error.

use clap::{Parser, Subcommand};
use dialoguer::Input;
use gallery_core::{
    init_logging, ArtworkId, BackendOpenError, ConfigError, FileSystemObjectStore, GalleryConfig,
    GalleryPage, GalleryService, LoggingError, RepoError, SelectedFile, SqliteArtworkRepository,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

type Service<'conn> = GalleryService<SqliteArtworkRepository<'conn>, FileSystemObjectStore>;

#[derive(Parser, Debug)]
#[command(name = "gallery")]
#[command(about = "Upload, list and delete gallery artworks")]
#[command(version)]
struct Args {
    /// Data directory holding the database and stored images
    #[arg(long, env = "GALLERY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload one image under an X handle
    Upload {
        /// Owner handle, with or without the leading `@`
        #[arg(long)]
        handle: String,
        /// Image file to upload
        file: PathBuf,
    },
    /// List artworks, newest first
    List {
        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an artwork after confirming its owner handle
    Delete {
        id: ArtworkId,
        /// Owner handle; prompted for when omitted
        #[arg(long)]
        confirm: Option<String>,
    },
}

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Logging(LoggingError),
    Backend(BackendOpenError),
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    Prompt(dialoguer::Error),
    Json(serde_json::Error),
    List(RepoError),
    UnknownArtwork(ArtworkId),
    /// A workflow failure, already phrased for the user.
    Workflow(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Logging(err) => write!(f, "logging setup failed: {err}"),
            Self::Backend(err) => write!(f, "{err}"),
            Self::ReadFile { path, source } => {
                write!(f, "cannot read `{}`: {source}", path.display())
            }
            Self::Prompt(err) => write!(f, "prompt failed: {err}"),
            Self::Json(err) => write!(f, "cannot encode listing: {err}"),
            Self::List(err) => write!(f, "could not load artworks: {err}"),
            Self::UnknownArtwork(id) => write!(f, "artwork {id} not found"),
            Self::Workflow(message) => write!(f, "{message}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Backend(err) => Some(err),
            Self::ReadFile { source, .. } => Some(source),
            Self::Prompt(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::List(err) => Some(err),
            Self::UnknownArtwork(_) | Self::Workflow(_) => None,
        }
    }
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let mut config = GalleryConfig::from_env().map_err(CliError::Config)?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).map_err(CliError::Logging)?;
    }

    let (conn, objects) = config.open_backend().map_err(CliError::Backend)?;
    let service = GalleryService::new(SqliteArtworkRepository::new(&conn), objects);

    match args.command {
        Command::Upload { handle, file } => upload(&service, handle, file),
        Command::List { json } => list(&service, json),
        Command::Delete { id, confirm } => delete(&service, id, confirm),
    }
}

fn upload(service: &Service<'_>, handle: String, path: PathBuf) -> Result<(), CliError> {
    let file = SelectedFile::from_path(&path).map_err(|source| CliError::ReadFile {
        path: path.clone(),
        source,
    })?;

    let mut page = GalleryPage::new();
    page.upload.set_handle(handle);
    page.upload.select_file(Some(file));
    let created = page
        .submit_upload(service)
        .map_err(|err| CliError::Workflow(err.user_message()))?;

    info!("event=cli_upload module=cli status=ok id={}", created.id);
    println!("uploaded artwork {}: {}", created.id, created.image_reference);
    Ok(())
}

fn list(service: &Service<'_>, json: bool) -> Result<(), CliError> {
    let artworks = service.list_artworks().map_err(CliError::List)?;

    if json {
        let encoded = serde_json::to_string_pretty(&artworks).map_err(CliError::Json)?;
        println!("{encoded}");
        return Ok(());
    }

    if artworks.is_empty() {
        println!("no artworks yet");
    }
    for artwork in &artworks {
        println!(
            "{}\t{}\t{}",
            artwork.id, artwork.owner_handle, artwork.image_reference
        );
    }
    Ok(())
}

fn delete(service: &Service<'_>, id: ArtworkId, confirm: Option<String>) -> Result<(), CliError> {
    let mut page = GalleryPage::new();
    if !page.activate(service) {
        return Err(CliError::Workflow(
            "Could not load artworks. Please try again.".to_string(),
        ));
    }
    if !page.gallery.request_delete(id) {
        return Err(CliError::UnknownArtwork(id));
    }

    let confirmation = match confirm {
        Some(confirmation) => confirmation,
        None => Input::<String>::new()
            .with_prompt(format!("Type the owner's username to delete artwork {id}"))
            .allow_empty(true)
            .interact_text()
            .map_err(CliError::Prompt)?,
    };
    page.gallery.set_confirmation(confirmation);

    let now = Instant::now();
    let report = page
        .gallery
        .confirm_delete(service, now)
        .map_err(|err| CliError::Workflow(err.user_message()))?;

    if let Some(warning) = &report.warning {
        eprintln!("warning: {warning}");
    }
    if let Some(notice) = page.gallery.notice(now) {
        println!("{notice}");
    }
    Ok(())
}
