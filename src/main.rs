use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use sampled_thumbs::imaging::{
    RequestedBounds, RustBackend, SaveMode, ThumbnailRequest, create_thumbnail, plan_thumbnail,
    supported_input_extensions,
};
use sampled_thumbs::{config, output};
use std::path::PathBuf;

/// Bounding-box flags shared by commands that size a thumbnail.
#[derive(clap::Args, Clone)]
struct BoundsArgs {
    /// Maximum thumbnail width (defaults to [thumbnail] max_width)
    #[arg(long)]
    max_width: Option<u32>,

    /// Maximum thumbnail height (defaults to [thumbnail] max_height)
    #[arg(long)]
    max_height: Option<u32>,
}

impl BoundsArgs {
    fn resolve(&self, config: &config::AppConfig) -> RequestedBounds {
        let defaults = config.requested_bounds();
        RequestedBounds::new(
            self.max_width.unwrap_or(defaults.max_width),
            self.max_height.unwrap_or(defaults.max_height),
        )
    }
}

#[derive(Parser)]
#[command(name = "sampled-thumbs")]
#[command(about = "Bounded-memory thumbnails with EXIF rotation")]
#[command(long_about = "\
Bounded-memory thumbnails with EXIF rotation

The source is probed for its size without decoding pixels, then decoded at
the largest power-of-two reduction that still covers the requested box.
The EXIF orientation (90/180/270) is applied and the result is written as
PNG.

Run 'sampled-thumbs gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./sampled-thumbs.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (repeat for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a PNG thumbnail of SOURCE to DEST
    Thumbnail {
        source: PathBuf,
        dest: PathBuf,
        #[command(flatten)]
        bounds: BoundsArgs,
        /// Log write failures instead of failing
        #[arg(long)]
        lenient: bool,
    },
    /// Show the sizing decisions for SOURCE without decoding it
    Probe {
        source: PathBuf,
        #[command(flatten)]
        bounds: BoundsArgs,
    },
    /// List input file extensions with a compiled-in decoder
    Formats,
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config_path = match &cli.config {
        Some(path) if !path.exists() => {
            return Err(format!("config file not found: {}", path.display()).into());
        }
        Some(path) => path.clone(),
        None => PathBuf::from(config::DEFAULT_CONFIG_FILE),
    };
    let app_config = config::load_config(&config_path)?;
    init_logging(effective_level(app_config.log_level(), cli.verbose, cli.quiet));

    let backend = RustBackend::new();
    match cli.command {
        Command::Thumbnail {
            source,
            dest,
            bounds,
            lenient,
        } => {
            let save_mode = if lenient {
                SaveMode::Lenient
            } else {
                app_config.output.save_mode
            };
            let request = ThumbnailRequest {
                source,
                bounds: bounds.resolve(&app_config),
                destination: dest,
                quality: app_config.quality(),
                save_mode,
            };
            let outcome = create_thumbnail(&backend, &request)?;
            output::print_thumbnail_output(&request.source, &request.destination, &outcome);
        }
        Command::Probe { source, bounds } => {
            let plan = plan_thumbnail(&backend, &source, bounds.resolve(&app_config))?;
            output::print_probe_output(&source, &plan);
        }
        Command::Formats => {
            for ext in supported_input_extensions() {
                println!("{}", ext);
            }
        }
        Command::GenConfig => unreachable!("handled before config loading"),
    }

    Ok(())
}

/// Configured level, raised one step per `-v`, or pinned to errors by `-q`.
fn effective_level(configured: LevelFilter, verbose: u8, quiet: bool) -> LevelFilter {
    const LEVELS: [LevelFilter; 6] = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];
    if quiet {
        return LevelFilter::Error;
    }
    let base = LEVELS.iter().position(|l| *l == configured).unwrap_or(2);
    LEVELS[(base + verbose as usize).min(LEVELS.len() - 1)]
}

/// Initialize env_logger. `RUST_LOG` wins over the computed default.
fn init_logging(level: LevelFilter) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .format_timestamp(None)
        .init();
}
