// ABOUTME: Library for the livekitx build tasks.
// ABOUTME: Tool resolution, protoc invocation and the Go test task.

//! # livekitx-tasks
//!
//! Build tasks for the `livekitx` protobuf bindings. All code generation is
//! done by `protoc` and its Go plugins; this crate finds those tools, builds
//! their command lines and runs them.
//!
//! ```text
//! livekitx-tasks
//! ├── generate (default)   # protoc with twirp, then protoc with go-grpc
//! ├── test                 # go test ./...
//! └── list                 # show the tasks above
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Regenerate bindings into ./livekitx
//! livekitx-tasks
//!
//! # Use tools installed under a different root
//! GOPATH=/opt/go livekitx-tasks generate
//!
//! # Run the Go tests
//! livekitx-tasks test
//! ```

pub mod config;
pub mod error;
pub mod generate;
pub mod resolve;
pub mod runner;
pub mod tasks;
pub mod test_runner;

pub use config::Config;
pub use error::{Result, TaskError};
pub use generate::{generate, Phase, Toolchain};
pub use resolve::{resolve, ToolResolver};
pub use runner::{CommandRunner, Invocation, ProcessRunner};
pub use tasks::Task;
pub use test_runner::run_tests;

/// Version of the livekitx tasks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
