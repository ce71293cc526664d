//! Per-room field export: one low-res and one high-res generator run.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, warn};
use roomsdf_core::ResolutionConfig;

use crate::error::{PipelineError, Result};
use crate::generator::{FieldArtifacts, FieldGenerator, FieldParams, GenerationStatus, Resolution};
use crate::visualize::{visualize_highres, visualize_lowres};

/// Generator outcomes for both resolutions of one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Low-res run.
    pub lowres: GenerationStatus,
    /// High-res run.
    pub highres: GenerationStatus,
}

impl ExportReport {
    /// True when both runs succeeded.
    pub fn is_success(&self) -> bool {
        self.lowres.is_success() && self.highres.is_success()
    }

    /// First failed run, low-res checked first.
    pub fn first_failure(&self) -> Option<(Resolution, Option<i32>)> {
        [(Resolution::Low, &self.lowres), (Resolution::High, &self.highres)]
            .into_iter()
            .find_map(|(resolution, status)| match status {
                GenerationStatus::Failed { exit_code } => Some((resolution, *exit_code)),
                GenerationStatus::Succeeded(_) => None,
            })
    }
}

fn create_parent(prefix: &Path) -> Result<()> {
    match prefix.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(PipelineError::io(parent))
        }
        _ => Ok(()),
    }
}

/// Generate the low- and high-res fields for `mesh`.
///
/// The low-res index field is deleted as soon as it is written; only the
/// high-res one is used downstream. Generator failures are reported in the
/// returned [`ExportReport`], not as errors. With `visualize`, every field that
/// was generated successfully also gets a `<prefix>_vis.obj` preview.
pub fn export_distance_field(
    generator: &dyn FieldGenerator,
    mesh: &Path,
    lowres_prefix: &Path,
    highres_prefix: &Path,
    config: &ResolutionConfig,
    visualize: bool,
) -> Result<ExportReport> {
    create_parent(lowres_prefix)?;
    create_parent(highres_prefix)?;

    let lowres = generator.generate(
        mesh,
        &FieldParams::for_resolution(config, Resolution::Low),
        lowres_prefix,
    )?;

    let lowres_index = FieldArtifacts::for_prefix(lowres_prefix).index;
    match fs::remove_file(&lowres_index) {
        Ok(()) => debug!("removed {}", lowres_index.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("low-res index field {} was not produced", lowres_index.display())
        }
        Err(e) => return Err(PipelineError::io(&lowres_index)(e)),
    }

    let highres = generator.generate(
        mesh,
        &FieldParams::for_resolution(config, Resolution::High),
        highres_prefix,
    )?;

    if visualize {
        if highres.is_success() {
            visualize_highres(highres_prefix, config)?;
        }
        if lowres.is_success() {
            visualize_lowres(lowres_prefix, config)?;
        }
    }

    Ok(ExportReport { lowres, highres })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_failure_order() {
        let ok = GenerationStatus::Succeeded(FieldArtifacts::for_prefix(Path::new("a")));
        let report = ExportReport {
            lowres: GenerationStatus::Failed { exit_code: Some(1) },
            highres: GenerationStatus::Failed { exit_code: None },
        };
        assert_eq!(report.first_failure(), Some((Resolution::Low, Some(1))));
        assert!(!report.is_success());

        let report = ExportReport {
            lowres: ok.clone(),
            highres: GenerationStatus::Failed { exit_code: None },
        };
        assert_eq!(report.first_failure(), Some((Resolution::High, None)));

        let report = ExportReport {
            lowres: ok.clone(),
            highres: ok,
        };
        assert!(report.is_success());
        assert_eq!(report.first_failure(), None);
    }
}
