//! Command-line arguments for the `roomsdf` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use roomsdf_core::ResolutionConfig;

use crate::generator::ExternalSdfGen;
use crate::pipeline::{FailurePolicy, PipelineConfig};

/// Reaction to a failed `sdf_gen` run.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureArg {
    /// Warn and continue with the next room.
    Skip,
    /// Stop with an error.
    Abort,
}

impl From<FailureArg> for FailurePolicy {
    fn from(arg: FailureArg) -> Self {
        match arg {
            FailureArg::Skip => FailurePolicy::Skip,
            FailureArg::Abort => FailurePolicy::Abort,
        }
    }
}

/// Prepare chunked low/high resolution distance fields from room meshes.
#[derive(Parser, Debug)]
#[command(name = "roomsdf", version)]
#[command(about = "Exports distance fields for room meshes and cuts them into aligned training chunks")]
pub struct Args {
    /// Root directory holding `<scene>/<room>/mesh.obj`.
    #[arg(long = "mesh_dir", default_value = "outputs")]
    pub mesh_dir: PathBuf,

    /// Output directory for exported low-res fields.
    #[arg(long = "df_lowres_dir", default_value = "df_lowres")]
    pub df_lowres_dir: PathBuf,

    /// Output directory for exported high-res fields.
    #[arg(long = "df_highres_dir", default_value = "df_highres")]
    pub df_highres_dir: PathBuf,

    /// Output directory for low-res chunks.
    #[arg(long = "chunk_lowres_dir", default_value = "chunk_lowres")]
    pub chunk_lowres_dir: PathBuf,

    /// Output directory for high-res chunks.
    #[arg(long = "chunk_highres_dir", default_value = "chunk_highres")]
    pub chunk_highres_dir: PathBuf,

    /// Path to the sdf_gen executable.
    #[arg(long = "sdf_gen", default_value = ExternalSdfGen::DEFAULT_PROGRAM)]
    pub sdf_gen: PathBuf,

    /// Process at most this many rooms (default: all).
    #[arg(long = "max_rooms")]
    pub max_rooms: Option<usize>,

    /// Chunk previously exported fields without running sdf_gen.
    #[arg(long = "skip_export")]
    pub skip_export: bool,

    /// Write `_vis.obj` previews for fields and chunks.
    #[arg(long)]
    pub visualize: bool,

    /// What to do when sdf_gen fails for a room.
    #[arg(long = "on_generator_failure", value_enum, default_value_t = FailureArg::Skip)]
    pub on_generator_failure: FailureArg,
}

impl From<Args> for PipelineConfig {
    fn from(args: Args) -> Self {
        Self {
            mesh_dir: args.mesh_dir,
            df_lowres_dir: args.df_lowres_dir,
            df_highres_dir: args.df_highres_dir,
            chunk_lowres_dir: args.chunk_lowres_dir,
            chunk_highres_dir: args.chunk_highres_dir,
            sdf_gen: args.sdf_gen,
            max_rooms: args.max_rooms,
            skip_export: args.skip_export,
            visualize: args.visualize,
            on_generator_failure: args.on_generator_failure.into(),
            resolution: ResolutionConfig::default(),
        }
    }
}
