// ============================================================================
// deshake-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Pipeline Settings
//
// Everything the batch runner needs is carried in one explicit `CoreConfig`
// value built by the caller. Defaults reproduce the stabilizer setup this
// tool was built around: a `videostab` binary on PATH writing frames into
// `images/`, reassembled at 30 fps into `<name>-real-stab.avi`.

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};

/// Default stabilizer binary name, resolved via PATH.
pub const DEFAULT_STABILIZER_BIN: &str = "videostab";

/// Default suffix appended to the input file stem for output names.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "-real-stab";

/// Default output container extension (no leading dot).
pub const DEFAULT_OUTPUT_EXT: &str = "avi";

/// Default frame rate for reassembled output videos.
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Default thread count passed to the encoder.
pub const DEFAULT_ENCODER_THREADS: u32 = 8;

/// Subdirectory of the work directory where the stabilizer writes frames.
pub const FRAMES_SUBDIR: &str = "images";

/// Frame filename pattern the stabilizer emits and the encoder reads:
/// 8-digit zero-padded JPEG sequence starting at 00000001.jpg.
pub const FRAME_PATTERN: &str = "%08d.jpg";

/// Configuration for a batch stabilization run.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory the input files were discovered in.
    pub input_dir: PathBuf,

    /// Directory output videos are written to (created if missing).
    pub output_dir: PathBuf,

    /// Working directory for the stabilizer; frames land in its
    /// `images/` subdirectory.
    pub work_dir: PathBuf,

    /// Stabilizer executable (name on PATH or explicit path).
    pub stabilizer_bin: String,

    /// Extra arguments placed before the input path on the stabilizer
    /// command line.
    pub stabilizer_args: Vec<String>,

    /// Suffix appended to the input file stem for the output name.
    pub output_suffix: String,

    /// Output container extension, without a leading dot.
    pub output_ext: String,

    /// Frame rate of the reassembled output video.
    pub frame_rate: u32,

    /// Thread count hint passed to the encoder.
    pub encoder_threads: u32,
}

impl CoreConfig {
    /// Creates a configuration with the given directories and default
    /// values for everything else.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, work_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            work_dir,
            stabilizer_bin: DEFAULT_STABILIZER_BIN.to_string(),
            stabilizer_args: Vec::new(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            output_ext: DEFAULT_OUTPUT_EXT.to_string(),
            frame_rate: DEFAULT_FRAME_RATE,
            encoder_threads: DEFAULT_ENCODER_THREADS,
        }
    }

    /// The shared frames directory: `<work_dir>/images`.
    #[must_use]
    pub fn frames_dir(&self) -> PathBuf {
        self.work_dir.join(FRAMES_SUBDIR)
    }

    /// The frame sequence pattern the encoder reads:
    /// `<work_dir>/images/%08d.jpg`.
    #[must_use]
    pub fn frame_pattern_path(&self) -> PathBuf {
        self.frames_dir().join(FRAME_PATTERN)
    }

    /// Checks the configuration for values the pipeline cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.stabilizer_bin.is_empty() {
            return Err(CoreError::Config(
                "stabilizer binary name cannot be empty".to_string(),
            ));
        }

        if self.output_ext.is_empty() {
            return Err(CoreError::Config(
                "output extension cannot be empty".to_string(),
            ));
        }

        if self.output_ext.starts_with('.') {
            return Err(CoreError::Config(format!(
                "output extension must not include a leading dot: '{}'",
                self.output_ext
            )));
        }

        if self.frame_rate == 0 {
            return Err(CoreError::Config(
                "frame rate must be at least 1".to_string(),
            ));
        }

        if self.encoder_threads == 0 {
            return Err(CoreError::Config(
                "encoder thread count must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn test_config() -> CoreConfig {
        CoreConfig::new(
            PathBuf::from("/in"),
            PathBuf::from("/out"),
            PathBuf::from("/work"),
        )
    }

    #[test]
    fn test_new_applies_defaults() {
        let config = test_config();
        assert_eq!(config.stabilizer_bin, DEFAULT_STABILIZER_BIN);
        assert_eq!(config.output_suffix, DEFAULT_OUTPUT_SUFFIX);
        assert_eq!(config.output_ext, DEFAULT_OUTPUT_EXT);
        assert_eq!(config.frame_rate, DEFAULT_FRAME_RATE);
        assert_eq!(config.encoder_threads, DEFAULT_ENCODER_THREADS);
        assert!(config.stabilizer_args.is_empty());
    }

    #[test]
    fn test_frames_dir_is_under_work_dir() {
        let config = test_config();
        assert_eq!(config.frames_dir(), Path::new("/work/images"));
        assert_eq!(
            config.frame_pattern_path(),
            Path::new("/work/images/%08d.jpg")
        );
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_stabilizer() {
        let mut config = test_config();
        config.stabilizer_bin = String::new();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let mut config = test_config();
        config.output_ext = ".avi".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("leading dot"));
    }

    #[test]
    fn test_validate_rejects_zero_frame_rate() {
        let mut config = test_config();
        config.frame_rate = 0;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        let mut config = test_config();
        config.encoder_threads = 0;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }
}
