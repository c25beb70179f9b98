use anyhow::{Context, Result};
use clap::Parser;
use ldtk_tilemap_import::{sink::fs::FsAssets, ImportConfig, Importer, NoPrompt};
use std::path::PathBuf;

/// Import an LDtk / LEd project into stacked tile grids.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project JSON file to import.
    #[arg(value_name = "PROJECT")]
    project: PathBuf,

    /// TOML file with import settings; flags below override it.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Source pixels per engine unit. Required unless a config file sets it.
    #[arg(long, value_name = "PIXELS", required_unless_present = "config")]
    ppu: Option<u32>,

    /// Root directory for imported assets.
    #[arg(short, long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Maximum stacked grids per layer instance.
    #[arg(long, value_name = "COUNT")]
    max_layers: Option<usize>,

    /// Replace existing assets without asking.
    #[arg(short = 'y', long = "yes", alias = "delete-without-prompt")]
    delete_without_prompt: bool,
}

impl Args {
    fn import_config(&self) -> Result<ImportConfig> {
        let mut config = match &self.config {
            Some(path) => ImportConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ImportConfig::new(
                self.ppu
                    .context("--ppu is required when no config file is given")?,
            ),
        };
        if let Some(ppu) = self.ppu {
            config.pixels_per_unit = ppu;
        }
        if let Some(out) = &self.out {
            config.import_dir = out.clone();
        }
        if let Some(max_layers) = self.max_layers {
            config.max_layers = max_layers;
        }
        config.delete_without_prompt |= self.delete_without_prompt;
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.import_config()?;

    let mut assets = FsAssets::new(config.project_dir(&args.project), &config);
    let mut prompt = NoPrompt;
    let report = Importer::new(&config, &mut assets, &mut prompt)
        .import_file(&args.project)
        .with_context(|| format!("Failed to import {}", args.project.display()))?;

    log::info!(
        "Imported {} tilesets and {} levels into {}",
        report.tilesets.len(),
        report.levels.len(),
        assets.root().display()
    );
    for level in &report.levels {
        println!(
            "{}: {} layers, {} skipped, {} tiles, {} dropped",
            level.scene,
            level.imported_layers,
            level.skipped_layers,
            level.placed_tiles,
            level.dropped_tiles
        );
    }
    Ok(())
}
