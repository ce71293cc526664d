//! Chunking of exported fields on disk.

use std::path::Path;

use roomsdf::{chunk_scene, with_suffix, PipelineError, ResolutionConfig};
use roomsdf_io::{load_from_file, save_to_file, DenseGrid};
use tempfile::TempDir;

fn highres_value([x, y, z]: [usize; 3]) -> f32 {
    (x as f32 - 35.0) * 0.01 + (y as f32) * 0.002 - (z as f32) * 0.003
}

fn write_fields(lowres_prefix: &Path, highres_prefix: &Path) {
    std::fs::create_dir_all(lowres_prefix.parent().unwrap()).unwrap();
    std::fs::create_dir_all(highres_prefix.parent().unwrap()).unwrap();

    let highres = DenseGrid::from_fn([70, 40, 70], highres_value);
    let index = DenseGrid::from_fn([70, 40, 70], |[x, y, z]| -((x + y + z) as i32));
    let lowres = DenseGrid::from_fn([18, 10, 18], |[x, y, z]| (x + y + z) as f32 * -0.1);

    save_to_file(&highres, with_suffix(highres_prefix, ".npy")).unwrap();
    save_to_file(&index, with_suffix(highres_prefix, "_if.npy")).unwrap();
    save_to_file(&lowres, with_suffix(lowres_prefix, ".npy")).unwrap();
}

#[test]
fn reference_room_yields_four_aligned_chunks() {
    let dir = TempDir::new().unwrap();
    let lowres_prefix = dir.path().join("df_lowres/s__r");
    let highres_prefix = dir.path().join("df_highres/s__r");
    let chunk_low = dir.path().join("chunk_lowres");
    let chunk_high = dir.path().join("chunk_highres");
    write_fields(&lowres_prefix, &highres_prefix);

    let config = ResolutionConfig::default();
    let report = chunk_scene(
        &lowres_prefix,
        &highres_prefix,
        &chunk_low,
        &chunk_high,
        &config,
        false,
    )
    .unwrap();

    assert_eq!(report.source, "s__r");
    assert_eq!(report.layout.highres_shape, [128, 64, 128]);
    assert_eq!(report.layout.lowres_shape, [32, 16, 32]);
    assert_eq!(
        report.chunks,
        [
            "s__r__64__000_000_000",
            "s__r__64__000_000_064",
            "s__r__64__064_000_000",
            "s__r__64__064_000_064",
        ]
    );

    let highres_max = DenseGrid::from_fn([70, 40, 70], highres_value)
        .abs()
        .max_value()
        .unwrap();

    for name in &report.chunks {
        let low: DenseGrid<f32> = load_from_file(chunk_low.join(format!("{name}.npy"))).unwrap();
        let high: DenseGrid<f32> = load_from_file(chunk_high.join(format!("{name}.npy"))).unwrap();
        let index: DenseGrid<i32> =
            load_from_file(chunk_high.join(format!("{name}_if.npy"))).unwrap();

        assert_eq!(low.shape(), [16, 16, 16]);
        assert_eq!(high.shape(), [64, 64, 64]);
        assert_eq!(index.shape(), [64, 64, 64]);
        assert!(high.as_slice().iter().all(|v| *v >= 0.0));
        assert!(index.as_slice().iter().all(|v| *v >= 0));
        // above the source height everything is padding
        assert_eq!(high.get([0, 63, 0]), Some(highres_max));
        assert_eq!(index.get([0, 63, 0]), Some(0));
    }

    // first chunk carries the source corner unchanged (up to sign)
    let first: DenseGrid<f32> =
        load_from_file(chunk_high.join("s__r__64__000_000_000.npy")).unwrap();
    assert_eq!(first.get([1, 2, 3]), Some(highres_value([1, 2, 3]).abs()));
    let last: DenseGrid<f32> =
        load_from_file(chunk_high.join("s__r__64__064_000_064.npy")).unwrap();
    assert_eq!(last.get([5, 0, 5]), Some(highres_value([69, 0, 69]).abs()));
    assert_eq!(last.get([6, 0, 6]), Some(highres_max));

    let low_last: DenseGrid<f32> =
        load_from_file(chunk_low.join("s__r__64__064_000_064.npy")).unwrap();
    assert_eq!(low_last.get([1, 9, 1]), Some((17 + 9 + 17) as f32 * 0.1));
}

#[test]
fn previews_are_written_next_to_chunks() {
    let dir = TempDir::new().unwrap();
    let lowres_prefix = dir.path().join("df_lowres/s__r");
    let highres_prefix = dir.path().join("df_highres/s__r");
    let chunk_low = dir.path().join("chunk_lowres");
    let chunk_high = dir.path().join("chunk_highres");
    write_fields(&lowres_prefix, &highres_prefix);

    let report = chunk_scene(
        &lowres_prefix,
        &highres_prefix,
        &chunk_low,
        &chunk_high,
        &ResolutionConfig::default(),
        true,
    )
    .unwrap();

    let first = &report.chunks[0];
    assert!(chunk_high.join(format!("{first}_vis.obj")).exists());
    assert!(chunk_low.join(format!("{first}_vis.obj")).exists());
}

#[test]
fn missing_index_field_is_an_error() {
    let dir = TempDir::new().unwrap();
    let lowres_prefix = dir.path().join("df_lowres/s__r");
    let highres_prefix = dir.path().join("df_highres/s__r");
    write_fields(&lowres_prefix, &highres_prefix);
    std::fs::remove_file(with_suffix(&highres_prefix, "_if.npy")).unwrap();

    let err = chunk_scene(
        &lowres_prefix,
        &highres_prefix,
        &dir.path().join("chunk_lowres"),
        &dir.path().join("chunk_highres"),
        &ResolutionConfig::default(),
        false,
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::Array { ref path, .. } if path.ends_with("s__r_if.npy")));
    assert!(!dir.path().join("chunk_highres").exists());
}
