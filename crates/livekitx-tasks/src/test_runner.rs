// ABOUTME: Runs the Go test suite over the whole module.
// ABOUTME: A non-zero exit from the test command becomes TestsFailed.

use tracing::info;

use crate::error::{Result, TaskError};
use crate::runner::{CommandRunner, Invocation};

/// `go test ./...`
pub fn go_test() -> Invocation {
    Invocation::new("go").args(["test", "./..."])
}

pub fn run_tests<R: CommandRunner>(runner: &mut R) -> Result<()> {
    run_test_command(runner, &go_test())
}

/// Run an arbitrary test command with the same failure mapping as `run_tests`.
pub fn run_test_command<R: CommandRunner>(runner: &mut R, invocation: &Invocation) -> Result<()> {
    info!("running tests");

    let exit_code = runner.run(invocation)?;
    if exit_code != 0 {
        return Err(TaskError::TestsFailed { exit_code });
    }
    Ok(())
}
