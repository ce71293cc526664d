//! Chunking of a room's low/high resolution fields into aligned training blocks.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use roomsdf_core::{chunk_name, ChunkLayout, DenseGrid, ResolutionConfig};
use roomsdf_io::{load_from_file, save_to_file, NpyElement};

use crate::error::{PipelineError, Result};
use crate::generator::{with_suffix, FieldArtifacts};
use crate::visualize::{highres_preview, lowres_preview, write_preview};

/// Unsigned, padded fields of one room, ready to be sliced.
#[derive(Debug, Clone)]
pub struct PaddedFields {
    /// Padded low-res distance field.
    pub lowres: DenseGrid<f32>,
    /// Padded high-res distance field.
    pub highres: DenseGrid<f32>,
    /// Padded high-res index field.
    pub index: DenseGrid<i32>,
    /// Shapes and strides of the padded grids.
    pub layout: ChunkLayout,
}

/// One chunk pair cut from [`PaddedFields`].
#[derive(Debug, Clone)]
pub struct Chunk {
    /// File stem shared by all three chunk files.
    pub name: String,
    /// Low-res distance block.
    pub lowres: DenseGrid<f32>,
    /// High-res distance block.
    pub highres: DenseGrid<f32>,
    /// High-res index block.
    pub index: DenseGrid<i32>,
}

impl PaddedFields {
    /// Take absolute values and pad all three fields to the chunk layout.
    ///
    /// Distance fields are padded with their own maximum, the index field
    /// with zero.
    ///
    /// # Errors
    /// Returns a grid error if a field is larger than its padded shape (for
    /// example a low-res field that does not match the high-res one).
    pub fn new(
        lowres: &DenseGrid<f32>,
        highres: &DenseGrid<f32>,
        index: &DenseGrid<i32>,
        config: &ResolutionConfig,
    ) -> Result<Self> {
        let layout = ChunkLayout::new(highres.shape(), config)?;

        let highres = highres.abs();
        let lowres = lowres.abs();
        let index = index.abs();

        let highres_fill = highres.max_value().unwrap_or(0.0);
        let lowres_fill = lowres.max_value().unwrap_or(0.0);

        Ok(Self {
            highres: highres.padded(layout.highres_shape, highres_fill)?,
            index: index.padded(layout.highres_shape, 0)?,
            lowres: lowres.padded(layout.lowres_shape, lowres_fill)?,
            layout,
        })
    }

    /// Cut every tile of the layout, naming chunks after `source`.
    pub fn chunks<'a>(&'a self, source: &'a str) -> impl Iterator<Item = Result<Chunk>> + 'a {
        self.layout.tiles().map(move |tile| {
            Ok(Chunk {
                name: chunk_name(source, self.layout.highres_stride, tile.highres_origin),
                lowres: self.lowres.slice(tile.lowres_origin, tile.lowres_extent)?,
                highres: self.highres.slice(tile.highres_origin, tile.highres_extent)?,
                index: self.index.slice(tile.highres_origin, tile.highres_extent)?,
            })
        })
    }
}

/// Chunks written for one room.
#[derive(Debug, Clone)]
pub struct ChunkReport {
    /// Source identifier used in chunk names.
    pub source: String,
    /// Layout the chunks were cut from.
    pub layout: ChunkLayout,
    /// Chunk file stems, in tile order.
    pub chunks: Vec<String>,
}

fn load<T: NpyElement>(path: &Path) -> Result<DenseGrid<T>> {
    load_from_file(path).map_err(PipelineError::array(path))
}

fn save<T: NpyElement>(grid: &DenseGrid<T>, path: PathBuf) -> Result<()> {
    save_to_file(grid, &path).map_err(PipelineError::array(path))
}

/// Pad a room's fields and write every chunk pair.
///
/// Reads `<lowres_prefix>.npy`, `<highres_prefix>.npy` and
/// `<highres_prefix>_if.npy`, then writes for each tile
/// `<lowres_dir>/<name>.npy`, `<highres_dir>/<name>.npy` and
/// `<highres_dir>/<name>_if.npy`, where `<name>` starts with the file name of
/// `highres_prefix`. Output directories are created if missing.
///
/// # Errors
/// Any missing or malformed input aborts chunking for the room.
pub fn chunk_scene(
    lowres_prefix: &Path,
    highres_prefix: &Path,
    lowres_dir: &Path,
    highres_dir: &Path,
    config: &ResolutionConfig,
    visualize: bool,
) -> Result<ChunkReport> {
    let highres_files = FieldArtifacts::for_prefix(highres_prefix);
    let highres: DenseGrid<f32> = load(&highres_files.distance)?;
    let index: DenseGrid<i32> = load(&highres_files.index)?;
    let lowres: DenseGrid<f32> = load(&with_suffix(lowres_prefix, ".npy"))?;

    let fields = PaddedFields::new(&lowres, &highres, &index, config)?;
    let source = highres_prefix
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    fs::create_dir_all(lowres_dir).map_err(PipelineError::io(lowres_dir))?;
    fs::create_dir_all(highres_dir).map_err(PipelineError::io(highres_dir))?;

    let mut names = Vec::with_capacity(fields.layout.tile_count());
    for chunk in fields.chunks(&source) {
        let chunk = chunk?;
        let lowres_stem = lowres_dir.join(&chunk.name);
        let highres_stem = highres_dir.join(&chunk.name);

        save(&chunk.lowres, with_suffix(&lowres_stem, ".npy"))?;
        save(&chunk.highres, with_suffix(&highres_stem, ".npy"))?;
        save(&chunk.index, with_suffix(&highres_stem, "_if.npy"))?;
        debug!("wrote chunk {}", chunk.name);

        if visualize {
            write_preview(
                &highres_preview(&chunk.highres, Some(&chunk.index), config),
                &highres_stem,
            )?;
            write_preview(&lowres_preview(&chunk.lowres, config), &lowres_stem)?;
        }

        names.push(chunk.name);
    }

    info!(
        "{}: padded {:?} -> {:?}, wrote {} chunks",
        source,
        highres.shape(),
        fields.layout.highres_shape,
        names.len()
    );

    Ok(ChunkReport {
        source,
        layout: fields.layout,
        chunks: names,
    })
}
