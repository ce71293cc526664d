//! Distance-field generation capability.
//!
//! Generation is delegated to a [`FieldGenerator`]. The production
//! implementation, [`ExternalSdfGen`], shells out to the `sdf_gen` executable:
//!
//! ```text
//! sdf_gen <input_mesh> <output_prefix> <voxel_size> <padding>
//! ```
//!
//! which writes `<output_prefix>.npy` (distance field) and
//! `<output_prefix>_if.npy` (index field).

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;
use roomsdf_core::ResolutionConfig;

use crate::error::{PipelineError, Result};

/// Append `suffix` to the final component of `prefix` without touching dots
/// already in the name.
pub fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = prefix.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Which of the two fields is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Coarse field (`lowres_dim`).
    Low,
    /// Fine field (`highres_dim`), with an index field.
    High,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Low => write!(f, "low"),
            Resolution::High => write!(f, "high"),
        }
    }
}

/// Generator parameters for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Voxel pitch.
    pub voxel_size: f64,
    /// Voxels of padding around the mesh bounds.
    pub padding: usize,
}

impl FieldParams {
    /// Parameters for one resolution under `config`.
    pub fn for_resolution(config: &ResolutionConfig, resolution: Resolution) -> Self {
        match resolution {
            Resolution::Low => Self {
                voxel_size: config.voxel_size_lowres(),
                padding: config.padding_lowres(),
            },
            Resolution::High => Self {
                voxel_size: config.voxel_size_highres(),
                padding: config.padding_highres(),
            },
        }
    }
}

/// The two array files a generator leaves behind for an output prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldArtifacts {
    /// `<prefix>.npy`
    pub distance: PathBuf,
    /// `<prefix>_if.npy`
    pub index: PathBuf,
}

impl FieldArtifacts {
    /// Artifact paths for an output prefix.
    pub fn for_prefix(prefix: &Path) -> Self {
        Self {
            distance: with_suffix(prefix, ".npy"),
            index: with_suffix(prefix, "_if.npy"),
        }
    }
}

/// Outcome of one generator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationStatus {
    /// The generator reported success and its outputs are on disk.
    Succeeded(FieldArtifacts),
    /// The generator reported failure.
    Failed {
        /// Exit code, `None` if the process was killed by a signal.
        exit_code: Option<i32>,
    },
}

impl GenerationStatus {
    /// True for `Succeeded`.
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationStatus::Succeeded(_))
    }

    /// Artifacts of a successful run.
    pub fn artifacts(&self) -> Option<&FieldArtifacts> {
        match self {
            GenerationStatus::Succeeded(artifacts) => Some(artifacts),
            GenerationStatus::Failed { .. } => None,
        }
    }
}

/// Something that turns a mesh into a distance field and an index field.
pub trait FieldGenerator {
    /// Generate the fields for `mesh`, writing them next to `output_prefix`.
    ///
    /// # Errors
    /// Only when the generator cannot be run at all. A generator that runs and
    /// fails returns `Ok(GenerationStatus::Failed { .. })`.
    fn generate(
        &self,
        mesh: &Path,
        params: &FieldParams,
        output_prefix: &Path,
    ) -> Result<GenerationStatus>;
}

/// Runs the external `sdf_gen` executable and waits for it.
#[derive(Debug, Clone)]
pub struct ExternalSdfGen {
    program: PathBuf,
}

impl ExternalSdfGen {
    /// Default executable location, relative to the working directory.
    pub const DEFAULT_PROGRAM: &'static str = "bin/sdf_gen";

    /// Use the executable at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Executable path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The command line for one invocation.
    pub fn command(&self, mesh: &Path, params: &FieldParams, output_prefix: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(mesh)
            .arg(output_prefix)
            .arg(params.voxel_size.to_string())
            .arg(params.padding.to_string());
        command
    }
}

impl Default for ExternalSdfGen {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl FieldGenerator for ExternalSdfGen {
    fn generate(
        &self,
        mesh: &Path,
        params: &FieldParams,
        output_prefix: &Path,
    ) -> Result<GenerationStatus> {
        let mut command = self.command(mesh, params, output_prefix);
        debug!("running {:?}", command);

        let status = command
            .status()
            .map_err(|source| PipelineError::GeneratorSpawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(GenerationStatus::Succeeded(FieldArtifacts::for_prefix(
                output_prefix,
            )))
        } else {
            Ok(GenerationStatus::Failed {
                exit_code: status.code(),
            })
        }
    }
}
