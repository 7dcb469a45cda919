//! Command plan for a reconfigure run.
//!
//! The whole run is computed up front as plain data so it can be inspected
//! (and tested) without spawning anything.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use crate::reconf::config::Config;
use crate::reconf::toolchain::Compiler;
use crate::reconf::{env, Cli};

/// One external command invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub program: String,
    pub args: Vec<String>,
}

impl Step {
    fn new(program: &str, args: &[&str]) -> Self {
        Step {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn command(&self, env_overrides: &BTreeMap<String, String>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        env::apply(&mut cmd, env_overrides);
        cmd
    }

    /// One-line rendering for progress output.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Which generator produces the build scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generator {
    Autotools,
    CMake,
}

impl Generator {
    pub fn from_flags(demo: bool) -> Self {
        if demo {
            Generator::CMake
        } else {
            Generator::Autotools
        }
    }
}

/// A fully computed reconfigure run.
pub struct Plan {
    pub env: BTreeMap<String, String>,
    pub clean: Option<Step>,
    pub configure: Vec<Step>,
    pub build: Step,
}

impl Plan {
    pub fn new(cli: &Cli, config: &Config, prefix: &Path) -> Self {
        let compiler = Compiler::from_flags(cli.gcc);
        let generator = Generator::from_flags(cli.demo);

        Plan {
            env: env::build_env(config, compiler, cli.optimization, cli.extra_warnings),
            clean: cli.clean.then(clean_step),
            configure: configure_steps(generator, prefix, config, cli.logging),
            build: build_step(cli.jobs.unwrap_or(config.build.jobs)),
        }
    }
}

/// Forced removal of untracked build artifacts.
pub fn clean_step() -> Step {
    Step::new("git", &["clean", "-dxf"])
}

/// The configure invocation(s) for the selected generator.
///
/// Autotools is a two-step chain; a nonzero `autoreconf` skips the
/// `./configure`. The network-logging flag always lands after the
/// profile/Vulkan flags.
pub fn configure_steps(
    generator: Generator,
    prefix: &Path,
    config: &Config,
    network_logging: bool,
) -> Vec<Step> {
    match generator {
        Generator::CMake => vec![Step {
            program: "cmake".to_string(),
            args: vec![
                format!("-DCMAKE_INSTALL_PREFIX={}", prefix.display()),
                "-DCMAKE_BUILD_TYPE=Debug".to_string(),
                ".".to_string(),
            ],
        }],
        Generator::Autotools => {
            let mut args = vec![
                format!("--prefix={}", prefix.display()),
                "--enable-debug".to_string(),
                format!("--enable-profile={}", config.configure.profile),
                format!("--enable-vulkan={}", config.configure.vulkan),
            ];
            if network_logging {
                args.push("--enable-networklogging".to_string());
            }

            vec![
                Step::new("autoreconf", &["--install"]),
                Step {
                    program: "./configure".to_string(),
                    args,
                },
            ]
        }
    }
}

/// Parallel build-and-install of the configured tree.
pub fn build_step(jobs: u32) -> Step {
    Step {
        program: "make".to_string(),
        args: vec![format!("-j{jobs}"), "install".to_string()],
    }
}
