//! End-to-end driver: discover rooms, export their fields, chunk them.

use std::fs;
use std::path::PathBuf;

use log::{info, warn};
use roomsdf_core::ResolutionConfig;

use crate::chunking::{chunk_scene, ChunkReport};
use crate::discovery::{find_valid_rooms, Room};
use crate::error::{PipelineError, Result};
use crate::export::export_distance_field;
use crate::generator::{ExternalSdfGen, FieldGenerator, Resolution};

/// What to do when the field generator reports failure for a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log a warning and move on to the next room.
    #[default]
    Skip,
    /// Stop the run with [`PipelineError::GeneratorFailed`].
    Abort,
}

/// Configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root holding `<scene>/<room>/mesh.obj`.
    pub mesh_dir: PathBuf,
    /// Exported low-res fields.
    pub df_lowres_dir: PathBuf,
    /// Exported high-res fields and index fields.
    pub df_highres_dir: PathBuf,
    /// Low-res chunks.
    pub chunk_lowres_dir: PathBuf,
    /// High-res chunks and index chunks.
    pub chunk_highres_dir: PathBuf,
    /// `sdf_gen` executable.
    pub sdf_gen: PathBuf,
    /// Process at most this many rooms.
    pub max_rooms: Option<usize>,
    /// Reuse previously exported fields instead of running the generator.
    pub skip_export: bool,
    /// Write OBJ previews of fields and chunks.
    pub visualize: bool,
    /// Reaction to generator failures.
    pub on_generator_failure: FailurePolicy,
    /// Grid resolutions.
    pub resolution: ResolutionConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mesh_dir: PathBuf::from("outputs"),
            df_lowres_dir: PathBuf::from("df_lowres"),
            df_highres_dir: PathBuf::from("df_highres"),
            chunk_lowres_dir: PathBuf::from("chunk_lowres"),
            chunk_highres_dir: PathBuf::from("chunk_highres"),
            sdf_gen: PathBuf::from(ExternalSdfGen::DEFAULT_PROGRAM),
            max_rooms: None,
            skip_export: false,
            visualize: false,
            on_generator_failure: FailurePolicy::Skip,
            resolution: ResolutionConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Output prefixes `(lowres, highres)` for a room's exported fields.
    pub fn field_prefixes(&self, room: &Room) -> (PathBuf, PathBuf) {
        let id = room.id();
        (self.df_lowres_dir.join(&id), self.df_highres_dir.join(&id))
    }
}

/// Result of processing one room.
#[derive(Debug, Clone)]
pub enum RoomOutcome {
    /// Fields were chunked.
    Chunked(ChunkReport),
    /// The generator failed and the room was skipped.
    Skipped {
        /// Field that failed.
        resolution: Resolution,
        /// Generator exit code.
        exit_code: Option<i32>,
    },
}

/// Totals for a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Valid rooms selected for processing.
    pub rooms_found: usize,
    /// Rooms that were chunked.
    pub rooms_processed: usize,
    /// Rooms skipped after a generator failure.
    pub rooms_skipped: usize,
    /// Chunk pairs written.
    pub chunks_written: usize,
}

/// Export (unless `skip_export`) and chunk a single room.
///
/// # Errors
/// Generator failures become `GeneratorFailed` under [`FailurePolicy::Abort`].
/// I/O and grid errors always propagate.
pub fn process_room(
    config: &PipelineConfig,
    generator: &dyn FieldGenerator,
    room: &Room,
) -> Result<RoomOutcome> {
    let (lowres_prefix, highres_prefix) = config.field_prefixes(room);

    if !config.skip_export {
        let report = export_distance_field(
            generator,
            &room.mesh_path(),
            &lowres_prefix,
            &highres_prefix,
            &config.resolution,
            config.visualize,
        )?;

        if let Some((resolution, exit_code)) = report.first_failure() {
            return match config.on_generator_failure {
                FailurePolicy::Skip => Ok(RoomOutcome::Skipped {
                    resolution,
                    exit_code,
                }),
                FailurePolicy::Abort => Err(PipelineError::GeneratorFailed {
                    room: room.id(),
                    resolution,
                    exit_code,
                }),
            };
        }
    }

    let report = chunk_scene(
        &lowres_prefix,
        &highres_prefix,
        &config.chunk_lowres_dir,
        &config.chunk_highres_dir,
        &config.resolution,
        config.visualize,
    )?;
    Ok(RoomOutcome::Chunked(report))
}

/// Run the whole pipeline over every discovered room.
///
/// # Errors
/// Invalid resolution config, unreadable mesh root, chunking failures, and
/// generator failures under [`FailurePolicy::Abort`].
pub fn run_pipeline(
    config: &PipelineConfig,
    generator: &dyn FieldGenerator,
) -> Result<PipelineSummary> {
    config.resolution.validate()?;

    for dir in [&config.chunk_lowres_dir, &config.chunk_highres_dir] {
        fs::create_dir_all(dir).map_err(PipelineError::io(dir))?;
    }

    let rooms = find_valid_rooms(&config.mesh_dir, config.max_rooms)?;
    info!(
        "found {} room(s) under {}",
        rooms.len(),
        config.mesh_dir.display()
    );

    let mut summary = PipelineSummary {
        rooms_found: rooms.len(),
        ..PipelineSummary::default()
    };

    for room in &rooms {
        info!("processing {}", room.id());
        match process_room(config, generator, room)? {
            RoomOutcome::Chunked(report) => {
                summary.rooms_processed += 1;
                summary.chunks_written += report.chunks.len();
            }
            RoomOutcome::Skipped {
                resolution,
                exit_code,
            } => {
                warn!(
                    "skipping {}: {} resolution field generation failed ({})",
                    room.id(),
                    resolution,
                    exit_code.map_or_else(|| "no exit code".to_string(), |c| format!("exit code {}", c))
                );
                summary.rooms_skipped += 1;
            }
        }
    }

    Ok(summary)
}
