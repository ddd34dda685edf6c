// SPDX-License-Identifier: MPL-2.0
use mockup_gallery::application::gallery::GalleryManager;
use mockup_gallery::application::port::ObjectStore;
use mockup_gallery::config;
use mockup_gallery::domain::mockup::{CandidateFile, ImageMime, MaxImages, MockupId, ProjectId};
use mockup_gallery::error::Error;
use mockup_gallery::infrastructure::{connect, HttpMetadataStore, HttpObjectStore};
use mockup_gallery::logging;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

const HELP: &str = "\
mockup-gallery - manage project mockup images

USAGE:
  mockup-gallery [OPTIONS] <COMMAND> [ARGS...]

COMMANDS:
  list <PROJECT>                 List the project's mockups in upload order
  upload <PROJECT> <FILE>...     Upload PNG or JPEG files to the project
  remove <PROJECT> <MOCKUP_ID>   Delete a mockup and its image
  url <FILE_PATH>                Print the display URL of a storage key

OPTIONS:
  --config <DIR>        Read settings.toml from DIR
  --max-images <N>      Capacity ceiling for uploads (clamped to 1-50)
  -v, --verbose         Log debug output to stderr
  -h, --help            Print this help
";

type Gallery = GalleryManager<HttpObjectStore, HttpMetadataStore>;

#[derive(Debug)]
enum Command {
    List(ProjectId),
    Upload(ProjectId, Vec<PathBuf>),
    Remove(ProjectId, MockupId),
    Url(String),
}

#[derive(Debug)]
struct Flags {
    config_dir: Option<PathBuf>,
    max_images: Option<usize>,
    verbose: bool,
    command: Command,
}

#[derive(Debug)]
enum CliError {
    Usage(String),
    App(Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}\n\n{HELP}"),
            CliError::App(err) => write!(f, "{err}"),
        }
    }
}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        CliError::App(err)
    }
}

impl From<pico_args::Error> for CliError {
    fn from(err: pico_args::Error) -> Self {
        CliError::Usage(err.to_string())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };
    logging::init(flags.verbose);

    match run(flags).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, CliError> {
    let verbose = args.contains(["-v", "--verbose"]);
    let config_dir: Option<PathBuf> = args.opt_value_from_str("--config")?;
    let max_images: Option<usize> = args.opt_value_from_str("--max-images")?;

    let name = args
        .subcommand()?
        .ok_or_else(|| CliError::Usage("missing command".to_string()))?;
    let command = match name.as_str() {
        "list" => {
            let project = project_arg(&mut args)?;
            expect_no_args(&args.finish())?;
            Command::List(project)
        }
        "upload" => {
            let project = project_arg(&mut args)?;
            let rest = args.finish();
            if rest.is_empty() {
                return Err(CliError::Usage("upload needs at least one file".to_string()));
            }
            Command::Upload(project, rest.into_iter().map(PathBuf::from).collect())
        }
        "remove" => {
            let project = project_arg(&mut args)?;
            let id = single_arg(args.finish(), "mockup id")?;
            Command::Remove(project, MockupId::new(id))
        }
        "url" => Command::Url(single_arg(args.finish(), "file path")?),
        other => return Err(CliError::Usage(format!("unknown command: {other}"))),
    };

    Ok(Flags {
        config_dir,
        max_images,
        verbose,
        command,
    })
}

fn project_arg(args: &mut pico_args::Arguments) -> Result<ProjectId, CliError> {
    let project: String = args
        .opt_free_from_str()?
        .ok_or_else(|| CliError::Usage("missing project id".to_string()))?;
    ProjectId::new(project).ok_or(CliError::App(Error::InvalidProject))
}

fn expect_no_args(rest: &[OsString]) -> Result<(), CliError> {
    match rest.first() {
        Some(extra) => Err(CliError::Usage(format!(
            "unexpected argument: {}",
            extra.to_string_lossy()
        ))),
        None => Ok(()),
    }
}

fn single_arg(rest: Vec<OsString>, what: &str) -> Result<String, CliError> {
    let mut rest = rest.into_iter();
    let value = rest
        .next()
        .ok_or_else(|| CliError::Usage(format!("missing {what}")))?;
    expect_no_args(rest.as_slice())?;
    value
        .into_string()
        .map_err(|_| CliError::Usage(format!("{what} is not valid UTF-8")))
}

async fn run(flags: Flags) -> Result<(), CliError> {
    let settings = config::load_with_override(flags.config_dir)?;
    let max_images = flags
        .max_images
        .map_or_else(|| settings.gallery.max_images(), MaxImages::bounded);

    let (objects, metadata) = connect(&settings.backend)?;
    let open = |project: ProjectId| -> Gallery {
        GalleryManager::new(project, Arc::new(objects.clone()), Arc::new(metadata.clone()))
    };

    match flags.command {
        Command::List(project) => {
            let gallery = open(project);
            gallery.load().await?;
            print_gallery(&gallery, max_images);
        }
        Command::Upload(project, paths) => {
            let gallery = open(project);
            gallery.load().await?;
            let files = read_candidates(&paths).await?;
            let offered = files.len();
            let created = gallery.upload(files, max_images).await?;
            println!("Uploaded {} of {} files", created.len(), offered);
            for mockup in &created {
                println!("{}\t{}", mockup.id, mockup.file_name);
            }
            print_gallery(&gallery, max_images);
        }
        Command::Remove(project, id) => {
            let gallery = open(project);
            gallery.load().await?;
            let removed = gallery.remove(&id).await?;
            println!("Removed {} ({})", removed.file_name, removed.id);
        }
        Command::Url(file_path) => {
            println!("{}", objects.public_url(&file_path));
        }
    }
    Ok(())
}

fn print_gallery(gallery: &Gallery, max_images: MaxImages) {
    let view = gallery.view(max_images);
    println!("{} ({})", view.capacity_label(), view.position_label());
    for thumbnail in &view.thumbnails {
        let marker = if thumbnail.selected { '*' } else { ' ' };
        println!("{marker} {}\t{}\t{}", thumbnail.index + 1, thumbnail.id, thumbnail.url);
    }
}

/// Reads files from disk, declaring their type from the extension.
async fn read_candidates(paths: &[PathBuf]) -> Result<Vec<CandidateFile>, Error> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path).await?;
        files.push(CandidateFile::new(file_name(path), declared_type(path), bytes));
    }
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn declared_type(path: &Path) -> &'static str {
    ImageMime::from_extension(path).map_or("application/octet-stream", ImageMime::as_str)
}
