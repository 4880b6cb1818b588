// ABOUTME: Catalogue of named tasks and the default one.
// ABOUTME: Backs the `list` command and dispatch from the CLI.

use std::fmt::Write;

use crate::config::Config;
use crate::error::Result;
use crate::resolve::ToolResolver;
use crate::runner::CommandRunner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Task {
    #[default]
    Generate,
    Test,
}

impl Task {
    pub const ALL: [Task; 2] = [Task::Generate, Task::Test];

    pub fn name(self) -> &'static str {
        match self {
            Task::Generate => "generate",
            Task::Test => "test",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Task::Generate => "regenerate protobuf bindings",
            Task::Test => "run the Go test suite",
        }
    }

    pub fn is_default(self) -> bool {
        self == Task::default()
    }

    pub fn run<R: CommandRunner>(
        self,
        config: &Config,
        resolver: &ToolResolver,
        runner: &mut R,
    ) -> Result<()> {
        match self {
            Task::Generate => crate::generate::generate(config, resolver, runner),
            Task::Test => crate::test_runner::run_tests(runner),
        }
    }
}

/// Task listing with the default marked by `*`.
pub fn render_list() -> String {
    let width = Task::ALL.iter().map(|t| t.name().len()).max().unwrap_or(0) + 1;

    let mut out = String::from("Targets:\n");
    for task in Task::ALL {
        let label = if task.is_default() {
            format!("{}*", task.name())
        } else {
            task.name().to_string()
        };
        let _ = writeln!(out, "  {label:width$}    {}", task.description());
    }
    out.push_str("\n* default target\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_default() {
        assert_eq!(Task::default(), Task::Generate);
        assert!(Task::Generate.is_default());
        assert!(!Task::Test.is_default());
    }

    #[test]
    fn test_render_list() {
        let listing = render_list();
        assert_eq!(
            listing,
            "Targets:\n\
             \x20 generate*    regenerate protobuf bindings\n\
             \x20 test         run the Go test suite\n\
             \n\
             * default target\n"
        );
    }
}
