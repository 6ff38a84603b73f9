// deshake-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// This module is only compiled when the "test-mocks" feature is enabled.
#![cfg(feature = "test-mocks")]

use super::*;
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult, command_start_error};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::os::unix::process::ExitStatusExt; // For ExitStatus::from_raw
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Mock implementation of `FfmpegProcess`.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when `handle_events` is called.
    pub events_to_emit: Rc<RefCell<Vec<FfmpegEvent>>>,
    /// Exit status to return when `wait` is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let events = self.events_to_emit.borrow().clone();
        for event in events {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// An expected ffmpeg invocation and its scripted outcome.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
    pub create_dummy_output: bool,
}

/// Mock implementation of `FfmpegSpawner` supporting multiple expectations.
///
/// Expectations are matched by substring against the spawned command's
/// arguments and consumed in match order; an unmatched spawn panics.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<MockFfmpegExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockFfmpegProcess>,
        create_dummy_output: bool,
    ) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            create_dummy_output,
        });
    }

    /// Expects a spawn whose args contain `arg_pattern`; the process emits
    /// `events`, exits 0, and optionally touches the output file so the
    /// caller can stat it afterwards.
    pub fn add_success_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        create_dummy_output: bool,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: ExitStatus::from_raw(0),
        };
        self.add_expectation(arg_pattern, Ok(process), create_dummy_output);
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), false);
    }

    /// Expects a spawn whose process exits with the given raw wait status
    /// (non-zero means failure).
    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        raw_status: i32,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: ExitStatus::from_raw(raw_status),
        };
        self.add_expectation(arg_pattern, Ok(process), false);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .as_inner()
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let mut expectations = self.expectations.borrow_mut();

        let found_index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        let Some(index) = found_index else {
            panic!("MockFfmpegSpawner: No expectation found for command args: {args:?}");
        };
        let expectation = expectations.remove(index);

        match expectation.result {
            Ok(process) => {
                if expectation.create_dummy_output {
                    // The output path is the final argument of the
                    // assembly command.
                    if let Some(output_path_str) = args.last() {
                        let output_path = PathBuf::from(output_path_str);
                        if let Some(parent) = output_path.parent() {
                            if let Err(e) = std::fs::create_dir_all(parent) {
                                log::error!(
                                    "MockFfmpegSpawner failed to create parent dir {parent:?}: {e}"
                                );
                            }
                        }
                        if let Err(e) = std::fs::write(&output_path, b"mock output") {
                            log::error!(
                                "MockFfmpegSpawner failed to create dummy output {output_path:?}: {e}"
                            );
                        }
                    } else {
                        log::warn!(
                            "MockFfmpegSpawner couldn't find output path in args to create dummy file."
                        );
                    }
                }
                Ok(process)
            }
            Err(err) => {
                log::warn!(
                    "MockFfmpegSpawner simulating spawn error for pattern '{}': {err:?}",
                    expectation.arg_pattern
                );
                Err(err)
            }
        }
    }
}

/// Mock implementation of `StabilizerRunner`.
///
/// Records every input it is asked to stabilize. Optionally writes a
/// synthetic frame sequence into the configured frames directory, honoring
/// the contract the real stabilizer is assumed to follow.
#[derive(Clone, Default)]
pub struct MockStabilizerRunner {
    raw_exit_status: Rc<RefCell<i32>>,
    fail_spawn: Rc<RefCell<bool>>,
    frames_to_emit: Rc<RefCell<usize>>,
    received_inputs: Rc<RefCell<Vec<PathBuf>>>,
    observed_frame_counts: Rc<RefCell<Vec<usize>>>,
}

impl MockStabilizerRunner {
    pub fn new() -> Self {
        Default::default()
    }

    /// Makes subsequent runs report the given raw wait status
    /// (non-zero means failure).
    pub fn set_raw_exit_status(&self, raw_status: i32) {
        *self.raw_exit_status.borrow_mut() = raw_status;
    }

    /// Makes subsequent runs fail as if the binary could not be spawned.
    pub fn fail_spawn(&self) {
        *self.fail_spawn.borrow_mut() = true;
    }

    /// Makes each run write `count` dummy frames into the frames directory.
    pub fn emit_frames(&self, count: usize) {
        *self.frames_to_emit.borrow_mut() = count;
    }

    pub fn get_received_inputs(&self) -> Vec<PathBuf> {
        self.received_inputs.borrow().clone()
    }

    /// How many entries were already in the frames directory each time
    /// the stabilizer ran (spawn failures record nothing).
    pub fn get_observed_frame_counts(&self) -> Vec<usize> {
        self.observed_frame_counts.borrow().clone()
    }
}

impl StabilizerRunner for MockStabilizerRunner {
    fn run(&self, config: &CoreConfig, input_path: &Path) -> CoreResult<ExitStatus> {
        self.received_inputs
            .borrow_mut()
            .push(input_path.to_path_buf());

        if *self.fail_spawn.borrow() {
            return Err(command_start_error(
                config.stabilizer_bin.as_str(),
                std::io::Error::new(ErrorKind::NotFound, "mock stabilizer spawn failure"),
            ));
        }

        let frames_dir = config.frames_dir();
        let preexisting = std::fs::read_dir(&frames_dir)
            .map(|entries| entries.count())
            .unwrap_or(0);
        self.observed_frame_counts.borrow_mut().push(preexisting);

        let count = *self.frames_to_emit.borrow();
        for n in 1..=count {
            let frame_path = frames_dir.join(format!("{n:08}.jpg"));
            if let Err(e) = std::fs::write(&frame_path, b"frame") {
                log::error!("MockStabilizerRunner failed to write frame {frame_path:?}: {e}");
            }
        }

        Ok(ExitStatus::from_raw(*self.raw_exit_status.borrow()))
    }
}

/// Mock implementation of `FileMetadataProvider` with scripted sizes.
///
/// Paths without a scripted size fall back to the real filesystem, so
/// outputs created by `MockFfmpegSpawner` can still be measured.
#[derive(Clone, Default)]
pub struct MockMetadataProvider {
    sizes: Rc<RefCell<HashMap<PathBuf, u64>>>,
}

impl MockMetadataProvider {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn expect_size(&self, path: &Path, size: u64) {
        self.sizes.borrow_mut().insert(path.to_path_buf(), size);
    }
}

impl FileMetadataProvider for MockMetadataProvider {
    fn get_size(&self, path: &Path) -> CoreResult<u64> {
        if let Some(size) = self.sizes.borrow().get(path) {
            return Ok(*size);
        }
        Ok(std::fs::metadata(path)?.len())
    }
}
