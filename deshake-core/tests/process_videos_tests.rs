// deshake-core/tests/process_videos_tests.rs
//
// Batch runner behavior with scripted subprocess seams: size ordering,
// derived output paths, directory lifecycle, and the shared frames
// directory.
//
// Requires the "test-mocks" feature, which the dev-dependency on this
// crate enables for all test builds.

use deshake_core::external::StdFsMetadataProvider;
use deshake_core::external::mocks::{MockFfmpegSpawner, MockStabilizerRunner};
use deshake_core::frames::count_frames;
use deshake_core::{CoreConfig, process_videos};
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn batch_config(root: &Path) -> CoreConfig {
    CoreConfig::new(root.join("in"), root.join("out"), root.join("work"))
}

#[test]
fn test_processes_smallest_file_first_with_derived_outputs()
-> Result<(), Box<dyn std::error::Error>> {
    // --- Setup ---
    let root = tempdir()?;
    let config = batch_config(root.path());
    fs::create_dir_all(&config.input_dir)?;
    fs::write(config.input_dir.join("a.mp4"), vec![0u8; 500 * 1024])?;
    fs::write(config.input_dir.join("b.mp4"), vec![0u8; 200 * 1024])?;
    let files = vec![
        config.input_dir.join("a.mp4"),
        config.input_dir.join("b.mp4"),
    ];

    let stabilizer = MockStabilizerRunner::new();
    stabilizer.emit_frames(3);

    let spawner = MockFfmpegSpawner::new();
    spawner.add_success_expectation(
        "b-real-stab.avi",
        vec![FfmpegEvent::Log(LogLevel::Info, "frame= 3".to_string())],
        true,
    );
    spawner.add_success_expectation("a-real-stab.avi", vec![], true);

    assert!(!config.output_dir.exists());

    // --- Execute ---
    let results = process_videos(&stabilizer, &spawner, &StdFsMetadataProvider, &config, &files)?;

    // --- Assert: order and summary ---
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].filename, "b.mp4");
    assert_eq!(results[1].filename, "a.mp4");
    assert_eq!(results[0].input_size, 200 * 1024);
    assert_eq!(results[1].input_size, 500 * 1024);
    assert!(results[0].output_size > 0);
    assert!(results[1].output_size > 0);

    // --- Assert: stabilizer saw inputs smallest-first ---
    assert_eq!(
        stabilizer.get_received_inputs(),
        vec![
            config.input_dir.join("b.mp4"),
            config.input_dir.join("a.mp4"),
        ]
    );

    // --- Assert: encoder calls and derived outputs ---
    let calls = spawner.get_received_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].iter().any(|arg| arg.contains("b-real-stab.avi")));
    assert!(calls[1].iter().any(|arg| arg.contains("a-real-stab.avi")));
    assert!(calls[0].iter().any(|arg| arg.contains("%08d.jpg")));

    // The output directory was created by the run.
    assert!(config.output_dir.is_dir());
    assert!(config.output_dir.join("b-real-stab.avi").is_file());
    assert!(config.output_dir.join("a-real-stab.avi").is_file());
    Ok(())
}

#[test]
fn test_frames_directory_empty_after_processing() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let config = batch_config(root.path());
    fs::create_dir_all(&config.input_dir)?;
    fs::write(config.input_dir.join("clip.mp4"), vec![0u8; 1024])?;
    let files = vec![config.input_dir.join("clip.mp4")];

    let stabilizer = MockStabilizerRunner::new();
    stabilizer.emit_frames(5);
    let spawner = MockFfmpegSpawner::new();
    spawner.add_success_expectation("clip-real-stab.avi", vec![], true);

    process_videos(&stabilizer, &spawner, &StdFsMetadataProvider, &config, &files)?;

    // The directory itself survives; its contents do not.
    let frames_dir = config.frames_dir();
    assert!(frames_dir.is_dir());
    assert_eq!(count_frames(&frames_dir)?, 0);
    assert_eq!(fs::read_dir(&frames_dir)?.count(), 0);
    Ok(())
}

#[test]
fn test_encoder_invoked_even_when_no_frames_produced() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let config = batch_config(root.path());
    fs::create_dir_all(&config.input_dir)?;
    fs::write(config.input_dir.join("clip.mp4"), vec![0u8; 1024])?;
    let files = vec![config.input_dir.join("clip.mp4")];

    // The stabilizer exits cleanly but emits nothing.
    let stabilizer = MockStabilizerRunner::new();
    let spawner = MockFfmpegSpawner::new();
    spawner.add_success_expectation("clip-real-stab.avi", vec![], false);

    let results = process_videos(&stabilizer, &spawner, &StdFsMetadataProvider, &config, &files)?;

    assert_eq!(spawner.get_received_calls().len(), 1);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].output_size, 0);
    Ok(())
}

#[test]
fn test_frames_dir_not_cleared_before_stabilizer_runs() -> Result<(), Box<dyn std::error::Error>> {
    // Leftovers from an interrupted earlier run must still be present
    // when the stabilizer starts; cleanup only happens after encoding.
    let root = tempdir()?;
    let config = batch_config(root.path());
    fs::create_dir_all(&config.input_dir)?;
    fs::write(config.input_dir.join("clip.mp4"), vec![0u8; 1024])?;
    let files = vec![config.input_dir.join("clip.mp4")];

    fs::create_dir_all(config.frames_dir())?;
    fs::write(config.frames_dir().join("00000099.jpg"), b"stale")?;

    let stabilizer = MockStabilizerRunner::new();
    let spawner = MockFfmpegSpawner::new();
    spawner.add_success_expectation("clip-real-stab.avi", vec![], false);

    process_videos(&stabilizer, &spawner, &StdFsMetadataProvider, &config, &files)?;

    assert_eq!(stabilizer.get_observed_frame_counts(), vec![1]);
    assert_eq!(fs::read_dir(config.frames_dir())?.count(), 0);
    Ok(())
}
