//! roomsdf - chunked distance-field training data from room meshes.
//!
//! For every room under a mesh root (`<mesh_dir>/<scene>/<room>/mesh.obj`)
//! the pipeline:
//!
//! 1. runs a [`FieldGenerator`] twice to export a low-res distance field and a
//!    high-res distance field with its index field,
//! 2. pads the fields to whole chunks and cuts aligned low-res/high-res chunk
//!    pairs along the horizontal axes,
//! 3. optionally writes OBJ previews of fields and chunks.
//!
//! # Example
//!
//! ```ignore
//! use roomsdf::{run_pipeline, ExternalSdfGen, PipelineConfig};
//!
//! let config = PipelineConfig::default();
//! let summary = run_pipeline(&config, &ExternalSdfGen::new(&config.sdf_gen))?;
//! println!("{} chunks", summary.chunks_written);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunking;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod export;
pub mod generator;
pub mod pipeline;
pub mod visualize;

pub use chunking::{chunk_scene, Chunk, ChunkReport, PaddedFields};
pub use cli::{Args, FailureArg};
pub use discovery::{find_valid_rooms, Room, MESH_FILE_NAME};
pub use error::{PipelineError, Result};
pub use export::{export_distance_field, ExportReport};
pub use generator::{
    with_suffix, ExternalSdfGen, FieldArtifacts, FieldGenerator, FieldParams, GenerationStatus,
    Resolution,
};
pub use pipeline::{
    process_room, run_pipeline, FailurePolicy, PipelineConfig, PipelineSummary, RoomOutcome,
};
pub use visualize::{
    highres_preview, lowres_preview, visualize_highres, visualize_lowres, write_preview,
};

pub use roomsdf_core::ResolutionConfig;
