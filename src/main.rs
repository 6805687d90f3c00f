use clap::{CommandFactory, Parser, error::ErrorKind};
use directories::ProjectDirs;
use std::{
    env,
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tmuxdeck::{
    CommandSource, Config, ConfigLoadError, FontRegistry, ParserOptions, PresentationError, Presenter,
    PresenterOptions, RenderOptions, Resources, SlideParser, SlidePreviewer, TerminalDrawerOptions, TmuxDispatcher,
    WindowSize, load_slides,
};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "tmuxdeck.log";

/// The screen size used when the terminal's can't be found, e.g. when piping the output.
const FALLBACK_DIMENSIONS: WindowSize = WindowSize { rows: 24, columns: 80 };

/// Run slideshows with live tmux demos from your terminal.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// The path to the file that contains the presentation.
    #[clap(default_value = "slides.md")]
    path: PathBuf,

    /// The path to the configuration file.
    #[clap(short, long)]
    config_file: Option<PathBuf>,

    /// Write logs to this file.
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Print the given slide, starting at 1, instead of presenting.
    #[clap(long, conflicts_with = "analyze")]
    preview: Option<usize>,

    /// Report how many rows every slide takes and whether it fits in the terminal.
    #[clap(long)]
    analyze: bool,
}

/// Where log events are written to.
#[derive(Debug, PartialEq)]
enum LogDestination {
    /// An explicitly requested log file.
    File(PathBuf),

    /// The log file used while presenting. Logs are dropped if it can't be created.
    DefaultFile(PathBuf),

    Stderr,
    Discard,
}

impl LogDestination {
    /// Pick where logs go.
    ///
    /// Nothing can be written to the terminal while presenting as it would be drawn on top of the slide.
    fn new(log_file: Option<PathBuf>, presenting: bool, project_dirs: Option<&ProjectDirs>) -> Self {
        match (log_file, presenting) {
            (Some(path), _) => Self::File(path),
            (None, false) => Self::Stderr,
            (None, true) => match project_dirs {
                Some(dirs) => Self::DefaultFile(dirs.data_local_dir().join(LOG_FILE_NAME)),
                None => Self::Discard,
            },
        }
    }
}

fn init_logging(destination: LogDestination) -> Result<(), Box<dyn std::error::Error>> {
    let (level, file) = match &destination {
        LogDestination::File(path) => {
            (Level::INFO, Some(File::create(path).map_err(|e| format!("creating log file: {e}"))?))
        }
        LogDestination::DefaultFile(path) => {
            let file = path.parent().map(fs::create_dir_all).transpose().and_then(|_| File::create(path));
            (Level::ERROR, file.ok())
        }
        LogDestination::Stderr | LogDestination::Discard => (Level::ERROR, None),
    };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match (file, destination) {
        (Some(file), _) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        (None, LogDestination::Stderr) => builder.with_writer(std::io::stderr).init(),
        (None, _) => builder.with_writer(std::io::sink).init(),
    };
    Ok(())
}

fn load_config(config_file_path: Option<PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_file_path = match config_file_path {
        Some(path) => path,
        None => {
            let configs_path: PathBuf = match env::var("XDG_CONFIG_HOME") {
                Ok(path) => Path::new(&path).join("tmuxdeck"),
                Err(_) => {
                    let Some(project_dirs) = ProjectDirs::from("", "", "tmuxdeck") else {
                        return Ok(Default::default());
                    };
                    project_dirs.config_dir().into()
                }
            };
            configs_path.join("config.yaml")
        }
    };
    match Config::load(&config_file_path) {
        Ok(config) => {
            info!("loaded config from {}", config_file_path.display());
            Ok(config)
        }
        Err(ConfigLoadError::NotFound) => Ok(Default::default()),
        Err(e) => Err(e.into()),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let presenting = cli.preview.is_none() && !cli.analyze;
    let project_dirs = ProjectDirs::from("", "", "tmuxdeck");
    init_logging(LogDestination::new(cli.log_file.clone(), presenting, project_dirs.as_ref()))?;
    let config = load_config(cli.config_file.clone())?;

    let assets_path = cli.path.parent().unwrap_or(Path::new(".")).join(&config.defaults.assets_path);
    let fonts = FontRegistry::new(assets_path.join("fonts"));
    let resources = Resources::new(&assets_path);
    let parser_options = ParserOptions { implicit_slide_ends: config.options.implicit_slide_ends };
    let render_options = RenderOptions { default_font: config.defaults.font.clone(), margin: config.defaults.margin };

    if !presenting {
        let slides = load_slides(&cli.path, &SlideParser::new(parser_options))?;
        let dimensions = WindowSize::current().unwrap_or(FALLBACK_DIMENSIONS);
        let mut previewer = SlidePreviewer::new(render_options, fonts, resources, dimensions);
        if let Some(number) = cli.preview {
            let Some(slide) = number.checked_sub(1).and_then(|index| slides.get(index)) else {
                let error_message = format!("slide number must be between 1 and {}", slides.len());
                Cli::command().error(ErrorKind::InvalidValue, error_message).exit();
            };
            for line in previewer.preview(slide)? {
                println!("{line}");
            }
        } else {
            for report in previewer.analyze(&slides) {
                println!("{report}");
            }
        }
        return Ok(());
    }

    let options = PresenterOptions {
        parser: parser_options,
        render: render_options,
        drawer: TerminalDrawerOptions {
            clear_delay: Duration::from_millis(config.defaults.clear_delay_ms),
            colors: config.colors,
        },
    };
    let commands = CommandSource::new(&cli.path);
    let dispatcher = TmuxDispatcher::new(config.tmux.session);
    let presenter = Presenter::new(commands, dispatcher, fonts, resources, options);
    match presenter.present(&cli.path) {
        Err(PresentationError::Reading(e)) => Err(format!("reading {}: {e}", cli.path.display()).into()),
        other => Ok(other?),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
