mod carve;
mod config;
mod datapack;
mod error;
mod logging;
mod reload;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use expanse_carvers::CarverSet;
use expanse_chunk::ChunkPos;
use expanse_heights::HeightAnchor;
use log::LevelFilter;

use crate::carve::RegionOptions;
use crate::config::ExpanseConfig;
use crate::error::{AppError, ConfigError};
use crate::reload::ReloadOptions;

#[derive(Parser)]
#[command(name = "expanse", about = "Stretch worldgen height data to a taller world and carve deep terrain")]
struct Cli {
    /// Config file; `expanse.toml` in the working directory is used when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print where heights land in the new range, e.g. `above_bottom:16 below_top:64 32`
    Scale {
        #[arg(required = true, allow_hyphen_values = true, value_parser = parse_anchor)]
        anchors: Vec<HeightAnchor>,
    },
    /// Rescale the tagged placed features of a datapack
    Rescale {
        #[arg(long)]
        pack: PathBuf,
        /// Where rescaled definitions are written; nothing is written when omitted
        #[arg(long)]
        out: Option<PathBuf>,
        /// Overrides `heights.tag`
        #[arg(long)]
        tag: Option<String>,
        /// Keep running and rescale again whenever the pack changes
        #[arg(long)]
        watch: bool,
    },
    /// Carve a square of flat test chunks and report what each carver did
    Carve {
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        cx: i32,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        cz: i32,
        #[arg(long, default_value_t = 2)]
        radius: i32,
        /// Overrides `generation.seed`
        #[arg(long, allow_hyphen_values = true)]
        seed: Option<i64>,
        #[arg(long)]
        workers: Option<usize>,
    },
}

fn parse_anchor(s: &str) -> Result<HeightAnchor, String> {
    let (kind, value) = match s.split_once(':') {
        Some((kind, value)) => (kind, value),
        None => ("absolute", s),
    };
    let y: i32 = value.trim().parse().map_err(|e| format!("{value}: {e}"))?;
    match kind {
        "absolute" | "abs" => Ok(HeightAnchor::Absolute(y)),
        "above_bottom" | "bottom" => Ok(HeightAnchor::AboveBottom(y)),
        "below_top" | "top" => Ok(HeightAnchor::BelowTop(y)),
        other => Err(format!("unknown anchor kind {other}")),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.log_level) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let cfg = ExpanseConfig::resolve(cli.config.as_deref())?;
    match cli.command {
        Command::Scale { anchors } => {
            let range = cfg.heights.range().map_err(ConfigError::from)?;
            println!(
                "old [{}, {}] -> new [{}, {}]",
                range.old_min(),
                range.old_max(),
                range.new_min(),
                range.new_max()
            );
            for anchor in anchors {
                let y = anchor.normalize(&range);
                println!("{anchor:?}: y {y} -> {}", range.scale(y));
            }
        }
        Command::Rescale { pack, out, tag, watch } => {
            let opts = ReloadOptions {
                pack,
                out,
                tag: tag.unwrap_or_else(|| cfg.heights.tag.clone()),
                range: cfg.heights.range().map_err(ConfigError::from)?,
            };
            if watch {
                reload::watch(&opts)?;
            } else {
                reload::run_once(&opts)?;
            }
        }
        Command::Carve { cx, cz, radius, seed, workers } => {
            let registry = cfg.block_registry()?;
            let set = CarverSet::from_config(&cfg.carvers).map_err(ConfigError::from)?;
            let mut generation = cfg.generation.clone();
            if let Some(seed) = seed {
                generation.seed = seed;
            }
            let opts = RegionOptions { center: ChunkPos::new(cx, cz), radius, workers };
            carve::carve_region(&set, &generation, &registry, &opts)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_parse_with_and_without_kind() {
        assert_eq!(parse_anchor("-12"), Ok(HeightAnchor::Absolute(-12)));
        assert_eq!(parse_anchor("above_bottom:16"), Ok(HeightAnchor::AboveBottom(16)));
        assert_eq!(parse_anchor("top:64"), Ok(HeightAnchor::BelowTop(64)));
        assert!(parse_anchor("sideways:3").is_err());
        assert!(parse_anchor("abs:x").is_err());
    }

    #[test]
    fn cli_accepts_negative_values() {
        let cli = Cli::try_parse_from(["expanse", "carve", "--cx", "-3", "--seed", "-9"]).unwrap();
        match cli.command {
            Command::Carve { cx, seed, radius, .. } => {
                assert_eq!(cx, -3);
                assert_eq!(seed, Some(-9));
                assert_eq!(radius, 2);
            }
            _ => panic!("expected carve"),
        }
    }
}
