use crate::config::{Algorithm, PlacementConfig, Preset, SortMethod, load_config, merge_config_value};
use crate::layout::layout_scenario;
use crate::layout_dump::{print_layout_dump, write_layout_dump};
use crate::parser::parse_scenario;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "fplan", version, about = "Place rooms inside a region-based floorplan")]
pub struct Args {
    /// Scenario file (.fplan) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Write the JSON layout dump here
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output printed to stdout when no output file is given
    #[arg(short = 'f', long = "format", value_enum, default_value = "summary")]
    pub format: OutputFormat,

    /// Config JSON file (camelCase placement keys)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Start from a named parameter preset
    #[arg(short = 'p', long = "preset")]
    pub preset: Option<Preset>,

    /// Room ordering: area, adjacency, hybrid, degree_area
    #[arg(short = 's', long = "sort")]
    pub sort: Option<SortMethod>,

    /// greedy_only or backtracking_then_greedy
    #[arg(short = 'a', long = "algorithm")]
    pub algorithm: Option<Algorithm>,

    /// Grid step for candidate positions
    #[arg(long = "step")]
    pub step: Option<f32>,

    /// Backtracking budget in seconds
    #[arg(short = 't', long = "timeout")]
    pub timeout: Option<f32>,

    /// Keep every room in its given orientation
    #[arg(long = "no-rotation")]
    pub no_rotation: bool,

    #[arg(long = "adjacency-weight")]
    pub adjacency_weight: Option<f32>,

    #[arg(long = "area-weight")]
    pub area_weight: Option<f32>,

    /// More log output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let input = read_input(args.input.as_deref())?;
    let parsed = parse_scenario(&input)?;

    let mut config = load_config(args.config.as_deref())?;
    if let Some(init_cfg) = parsed.init_config {
        config = merge_config_value(config, init_cfg)?;
    }
    let config = apply_overrides(config, &args);
    log::debug!("effective config: {config:?}");

    let scenario = parsed.scenario;
    let result = layout_scenario(&scenario, &config)?;

    if let Some(path) = args.output.as_deref() {
        write_layout_dump(path, &result, &scenario.regions, &config)?;
    }
    match args.format {
        OutputFormat::Summary => {
            println!("{}", result.summary());
            for room in &result.rooms {
                match room.rect() {
                    Some(rect) => println!(
                        "  {:>3} {:<20} ({}, {}) {}x{}",
                        room.id,
                        room.name,
                        rect.x1,
                        rect.y1,
                        rect.width(),
                        rect.height()
                    ),
                    None => println!("  {:>3} {:<20} unplaced", room.id, room.name),
                }
            }
        }
        OutputFormat::Json => {
            if args.output.is_none() {
                let stdout = io::stdout();
                print_layout_dump(stdout.lock(), &result, &scenario.regions, &config)?;
                println!();
            }
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = env_logger::Env::default().default_filter_or(level);
    // a second init (tests, embedding) is harmless
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Command-line flags win over the file and the scenario's init directive.
fn apply_overrides(mut config: PlacementConfig, args: &Args) -> PlacementConfig {
    if let Some(preset) = args.preset {
        config = preset.config();
    }
    if let Some(sort) = args.sort {
        config.sort_method = sort;
    }
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(step) = args.step {
        config.step = step;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_seconds = timeout;
    }
    if args.no_rotation {
        config.allow_rotation = false;
    }
    if let Some(weight) = args.adjacency_weight {
        config.adjacency_weight = weight;
    }
    if let Some(weight) = args.area_weight {
        config.area_weight = weight;
    }
    config
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let mut buf = String::new();
    match path {
        Some(path) if path != Path::new("-") => {
            buf = std::fs::read_to_string(path)?;
        }
        _ => {
            io::stdin().read_to_string(&mut buf)?;
        }
    }
    Ok(buf)
}
