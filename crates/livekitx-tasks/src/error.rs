// ABOUTME: Error types for livekitx tasks using thiserror.
// ABOUTME: Covers tool resolution, output directory setup and child process failures.

use std::path::PathBuf;
use thiserror::Error;

use crate::generate::Phase;

/// Errors that can occur while running a task.
#[derive(Error, Debug)]
pub enum TaskError {
    /// The tool was found neither on the search path nor in the fallback directory.
    #[error("tool {name} not found on PATH or in {fallback_dir}")]
    ToolNotFound { name: String, fallback_dir: PathBuf },

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A child process could not be started at all.
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// protoc exited non-zero during a generation phase.
    #[error("{phase} generation failed with exit code {exit_code}")]
    GenerationFailed { phase: Phase, exit_code: i32 },

    /// The test command exited non-zero.
    #[error("tests failed with exit code {exit_code}")]
    TestsFailed { exit_code: i32 },
}

impl TaskError {
    /// Process exit code to report for this error.
    ///
    /// Child failures mirror the child's code; everything else is 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            TaskError::GenerationFailed { exit_code, .. } | TaskError::TestsFailed { exit_code } => {
                u8::try_from(*exit_code)
                    .ok()
                    .filter(|code| *code != 0)
                    .unwrap_or(1)
            }
            _ => 1,
        }
    }
}

/// Result type alias using TaskError.
pub type Result<T> = std::result::Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_tool_not_found_display() {
        let err = TaskError::ToolNotFound {
            name: "protoc-gen-twirp".to_string(),
            fallback_dir: PathBuf::from("/home/go/go/bin"),
        };
        let display = err.to_string();
        assert!(display.contains("protoc-gen-twirp"));
        assert!(display.contains("/home/go/go/bin"));
    }

    #[test]
    fn test_generation_failed_display() {
        let err = TaskError::GenerationFailed {
            phase: Phase::Twirp,
            exit_code: 1,
        };
        assert_eq!(err.to_string(), "twirp generation failed with exit code 1");
    }

    #[test]
    fn test_tests_failed_display() {
        let err = TaskError::TestsFailed { exit_code: 2 };
        assert_eq!(err.to_string(), "tests failed with exit code 2");
    }

    #[test]
    fn test_exit_code_mirrors_child() {
        let err = TaskError::GenerationFailed {
            phase: Phase::Grpc,
            exit_code: 3,
        };
        assert_eq!(err.exit_code(), 3);
        assert_eq!(TaskError::TestsFailed { exit_code: 2 }.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_out_of_range_is_generic() {
        assert_eq!(TaskError::TestsFailed { exit_code: -1 }.exit_code(), 1);
        assert_eq!(TaskError::TestsFailed { exit_code: 256 }.exit_code(), 1);
        assert_eq!(TaskError::TestsFailed { exit_code: 0 }.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_generic_for_setup_errors() {
        let err = TaskError::ToolNotFound {
            name: "protoc".to_string(),
            fallback_dir: PathBuf::from("/tmp/bin"),
        };
        assert_eq!(err.exit_code(), 1);

        let err = TaskError::DirectoryCreateFailed {
            path: PathBuf::from("livekitx"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_error_source_create_directory() {
        use std::error::Error;

        let err = TaskError::DirectoryCreateFailed {
            path: PathBuf::from("livekitx"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_no_source_tests_failed() {
        use std::error::Error;

        let err = TaskError::TestsFailed { exit_code: 1 };
        assert!(err.source().is_none());
    }
}
