//! `roomsdf` command-line entry point.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use roomsdf::{run_pipeline, Args, ExternalSdfGen, PipelineConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PipelineConfig::from(Args::parse());
    let generator = ExternalSdfGen::new(&config.sdf_gen);

    info!("mesh root: {}", config.mesh_dir.display());
    info!("field generator: {}", generator.program().display());

    let summary = run_pipeline(&config, &generator)
        .with_context(|| format!("Failed to process rooms under {}", config.mesh_dir.display()))?;

    info!(
        "done: {} of {} room(s) chunked, {} skipped, {} chunk(s) written",
        summary.rooms_processed, summary.rooms_found, summary.rooms_skipped, summary.chunks_written
    );
    Ok(())
}
