// ABOUTME: Regenerates the livekitx Go bindings by running protoc twice.
// ABOUTME: The twirp phase runs first; the grpc phase only runs if it succeeds.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, TaskError};
use crate::resolve::ToolResolver;
use crate::runner::{flag_with_path, CommandRunner, Invocation};

pub const PROTOC: &str = "protoc";
pub const PROTOC_GEN_GO: &str = "protoc-gen-go";
pub const PROTOC_GEN_TWIRP: &str = "protoc-gen-twirp";
pub const PROTOC_GEN_GO_GRPC: &str = "protoc-gen-go-grpc";

/// Schemas compiled with the twirp stub generator.
pub const TWIRP_SCHEMAS: &[&str] = &["livekitx_recording.proto", "livekitx_room.proto"];

/// Schemas compiled with the go-grpc stub generator.
pub const GRPC_SCHEMAS: &[&str] = &[
    "livekitx_internal.proto",
    "livekitx_model.proto",
    "livekitx_rtc.proto",
    "livekitx_webhook.proto",
];

/// One protoc run, named after the RPC stub generator it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Twirp,
    Grpc,
}

impl Phase {
    /// Phases in the order they run.
    pub const ALL: [Phase; 2] = [Phase::Twirp, Phase::Grpc];

    pub fn name(self) -> &'static str {
        match self {
            Phase::Twirp => "twirp",
            Phase::Grpc => "grpc",
        }
    }

    /// Plugin name as it appears in `--<plugin>_out` and `--plugin=<plugin>=`.
    pub fn plugin(self) -> &'static str {
        match self {
            Phase::Twirp => "twirp",
            Phase::Grpc => "go-grpc",
        }
    }

    /// Tool that implements the stub generator.
    pub fn plugin_tool(self) -> &'static str {
        match self {
            Phase::Twirp => PROTOC_GEN_TWIRP,
            Phase::Grpc => PROTOC_GEN_GO_GRPC,
        }
    }

    pub fn schemas(self) -> &'static [&'static str] {
        match self {
            Phase::Twirp => TWIRP_SCHEMAS,
            Phase::Grpc => GRPC_SCHEMAS,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved paths of every tool generation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub protoc: PathBuf,
    pub protoc_gen_go: PathBuf,
    pub protoc_gen_twirp: PathBuf,
    pub protoc_gen_go_grpc: PathBuf,
}

impl Toolchain {
    /// Resolve all four tools, failing on the first one missing.
    pub fn resolve(resolver: &ToolResolver) -> Result<Self> {
        Ok(Self {
            protoc: resolver.resolve(PROTOC)?,
            protoc_gen_go: resolver.resolve(PROTOC_GEN_GO)?,
            protoc_gen_twirp: resolver.resolve(PROTOC_GEN_TWIRP)?,
            protoc_gen_go_grpc: resolver.resolve(PROTOC_GEN_GO_GRPC)?,
        })
    }

    pub fn plugin_path(&self, phase: Phase) -> &Path {
        match phase {
            Phase::Twirp => &self.protoc_gen_twirp,
            Phase::Grpc => &self.protoc_gen_go_grpc,
        }
    }
}

/// protoc arguments for one phase.
pub fn phase_args(phase: Phase, tools: &Toolchain, config: &Config) -> Vec<OsString> {
    let plugin = phase.plugin();
    let out = config.output_dir.as_os_str().to_owned();

    let mut args: Vec<OsString> = vec![
        "--go_out".into(),
        out.clone(),
        format!("--{plugin}_out").into(),
        out,
        "--go_opt=paths=source_relative".into(),
        format!("--{plugin}_opt=paths=source_relative").into(),
        flag_with_path("--plugin=go=", &tools.protoc_gen_go),
        flag_with_path(&format!("--plugin={plugin}="), tools.plugin_path(phase)),
    ];
    args.extend(
        config
            .include_paths
            .iter()
            .map(|include| flag_with_path("-I=", include)),
    );
    args.extend(phase.schemas().iter().map(OsString::from));
    args
}

pub fn phase_invocation(phase: Phase, tools: &Toolchain, config: &Config) -> Invocation {
    Invocation::new(&tools.protoc).args(phase_args(phase, tools, config))
}

/// Create the output directory; an existing directory is fine.
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder
        .create(path)
        .map_err(|source| TaskError::DirectoryCreateFailed {
            path: path.to_path_buf(),
            source,
        })
}

/// Regenerate all bindings: output dir, tool resolution, then each phase in order.
pub fn generate<R: CommandRunner>(
    config: &Config,
    resolver: &ToolResolver,
    runner: &mut R,
) -> Result<()> {
    info!("generating protobuf");
    ensure_output_dir(&config.output_dir)?;

    let tools = Toolchain::resolve(resolver)?;
    debug!(?tools, "resolved toolchain");

    for phase in Phase::ALL {
        run_phase(phase, &tools, config, runner)?;
    }

    Ok(())
}

fn run_phase<R: CommandRunner>(
    phase: Phase,
    tools: &Toolchain,
    config: &Config,
    runner: &mut R,
) -> Result<()> {
    info!("generating {phase} protobuf");
    let invocation = phase_invocation(phase, tools, config);
    debug!(command = %invocation, "running protoc");

    let exit_code = runner.run(&invocation)?;
    if exit_code != 0 {
        return Err(TaskError::GenerationFailed { phase, exit_code });
    }
    Ok(())
}
