use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

/// Create a GNOME Mahjongg tileset from a directory of 41 images.
///
/// Parameters can be embedded in file names, separated by double underscores,
/// e.g. `31-childlike_empress__resample_NEAREST.png`.
#[derive(Parser, Debug)]
#[command(name = "makemahjongg", version)]
struct Cli {
    /// Directory containing exactly 41 images.
    source_dir: PathBuf,

    /// Output PNG path.
    output_file: PathBuf,

    /// Directory with blank.png, blank_selected.png and tileset_blank.png
    /// (defaults to the built-in template).
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Grid geometry JSON overriding the built-in layout.
    #[arg(long)]
    geometry: Option<PathBuf>,

    /// Prepare tiles in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Log per-tile details.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    if !cli.source_dir.is_dir() {
        anyhow::bail!("{} is not a directory", cli.source_dir.display());
    }

    let geometry = match &cli.geometry {
        Some(path) => makemahjongg::GridGeometry::from_json_file(path)?,
        None => makemahjongg::GridGeometry::default(),
    };
    let ctx = match &cli.template_dir {
        Some(dir) => {
            let template = makemahjongg::Template::load_dir(dir, &geometry)?;
            makemahjongg::TilesetContext::new(geometry, template)?
        }
        None => makemahjongg::TilesetContext::builtin(geometry)?,
    };

    let threading = makemahjongg::TileThreading {
        parallel: cli.parallel,
        threads: cli.threads,
    };

    makemahjongg::make_tileset(&cli.source_dir, &cli.output_file, &ctx, &threading)
        .with_context(|| {
            format!(
                "create tileset '{}' from '{}'",
                cli.output_file.display(),
                cli.source_dir.display()
            )
        })?;

    eprintln!("wrote {}", cli.output_file.display());
    Ok(())
}
