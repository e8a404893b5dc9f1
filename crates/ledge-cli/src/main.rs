use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use ledge_core::body::{StaticBody, layout_bodies};
use ledge_core::config::LevelConfig;
use ledge_core::level_gen::{DEFAULT_CHUNKS, generate_level};
use ledge_core::levels::{BUILTIN_LEVELS, builtin_level};
use ledge_core::tiles::{Level, TileKind};
use ledge_core::{Rect, compute_hitboxes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Summary,
}

#[derive(Parser, Debug)]
#[command(
    name = "ledge",
    about = "Merge platform tiles of an ASCII level into collision hitboxes",
    version,
    group(
        ArgGroup::new("source")
            .required(true)
            .args(["builtin", "file", "generate"])
    )
)]
struct Cli {
    /// Index of a shipped level
    #[arg(short = 'b', long = "builtin")]
    builtin: Option<usize>,

    /// Level text file, one row per line
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Seed for a generated level
    #[arg(short = 'g', long = "generate")]
    generate: Option<u64>,

    /// Chunk count for generated levels
    #[arg(long = "chunks", default_value_t = DEFAULT_CHUNKS)]
    chunks: u32,

    /// Symbol to merge (overrides the config file)
    #[arg(short = 'd', long = "designator")]
    designator: Option<char>,

    #[arg(long = "format", value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Emit pixel-space static bodies instead of grid rectangles
    #[arg(long = "bodies")]
    bodies: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    width: u32,
    height: u32,
    designator: char,
    cells: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    hitboxes: Option<&'a [Rect]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bodies: Option<&'a [StaticBody]>,
}

fn read_level_file(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    Ok(text
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect())
}

fn load_level(cli: &Cli) -> Result<Level, Box<dyn Error>> {
    if let Some(index) = cli.builtin {
        return builtin_level(index).ok_or_else(|| {
            format!(
                "No built-in level {index} (have {})",
                BUILTIN_LEVELS.len()
            )
            .into()
        });
    }

    let rows = match (&cli.file, cli.generate) {
        (Some(path), _) => read_level_file(path)?,
        (None, Some(seed)) => generate_level(seed, cli.chunks),
        (None, None) => return Err("No level source given".into()),
    };
    Ok(Level::parse(&rows)?)
}

/// Symbol to merge: the command line wins over the config file.
fn resolve_designator(cli: &Cli, config: &LevelConfig) -> char {
    cli.designator.unwrap_or(config.designator)
}

fn print_summary(
    level: &Level,
    designator: char,
    hitboxes: &[Rect],
    bodies: Option<&[StaticBody]>,
) {
    let cells = level.grid.count(designator);
    println!(
        "{}x{} level, {cells} {designator:?} cells -> {} hitboxes",
        level.grid.width(),
        level.grid.height(),
        hitboxes.len()
    );
    for kind in [TileKind::Coin, TileKind::Hazard, TileKind::Enemy, TileKind::Portal] {
        let n = level.spawns_of(kind).count();
        if n > 0 {
            println!("  {kind:?}: {n}");
        }
    }
    match bodies {
        Some(bodies) => {
            for b in bodies {
                println!(
                    "  body at ({:.1}, {:.1}) size {:.1}x{:.1}",
                    b.x, b.y, b.width, b.height
                );
            }
        },
        None => {
            for r in hitboxes {
                println!("  rect at ({}, {}) size {}x{}", r.x, r.y, r.width, r.height);
            }
        },
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = LevelConfig::load();
    let designator = resolve_designator(&cli, &config);

    let level = load_level(&cli)?;
    let hitboxes = compute_hitboxes(&level.grid, designator);
    let bodies = cli
        .bodies
        .then(|| layout_bodies(&hitboxes, &config.scale(), config.anchor));

    tracing::info!(
        width = level.grid.width(),
        height = level.grid.height(),
        hitboxes = hitboxes.len(),
        "level merged"
    );

    match cli.format {
        Format::Json => {
            let report = Report {
                width: level.grid.width(),
                height: level.grid.height(),
                designator,
                cells: level.grid.count(designator),
                hitboxes: bodies.is_none().then_some(hitboxes.as_slice()),
                bodies: bodies.as_deref(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        },
        Format::Summary => print_summary(&level, designator, &hitboxes, bodies.as_deref()),
    }

    Ok(())
}
