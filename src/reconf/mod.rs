//! Reconfigure pipeline.
//!
//! Control flow is strictly linear: precondition check, optional clean,
//! environment computation, configure, build. Every subprocess exit status
//! is captured; the first failure becomes this process's exit code and the
//! remaining steps are skipped.

pub mod config;
pub mod doctor;
pub mod env;
pub mod plan;
pub mod toolchain;

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use config::Config;
use plan::{Generator, Plan, Step};
use toolchain::Compiler;

/// Environment variable naming the install prefix for the toolkit tree.
///
/// Set by the desktop environment setup script; never defaulted here.
pub const PREFIX_VAR: &str = "DESKTOP_PREFIX";

/// Exit code for a missing install prefix (`exit -1` in shell terms).
const PRECONDITION_EXIT: u8 = 255;

#[derive(Parser)]
#[command(name = "reconf")]
#[command(about = "Reconfigure the UI toolkit source tree in the current directory")]
pub struct Cli {
    /// Remove untracked build artifacts (git clean) before configuring.
    #[arg(short = 'c', long)]
    pub clean: bool,

    /// Configure the demo tree with cmake instead of autotools.
    #[arg(short = 'd', long)]
    pub demo: bool,

    /// Enable stricter compiler warnings.
    #[arg(short = 'e', long)]
    pub extra_warnings: bool,

    /// Compile with the gcc toolchain instead of clang.
    #[arg(short = 'g', long)]
    pub gcc: bool,

    /// Optimization level passed to the compiler.
    #[arg(short = 'o', long, value_name = "LEVEL", default_value_t = 3)]
    pub optimization: u32,

    /// Enable network logging support in the configure step.
    #[arg(short = 'l', long)]
    pub logging: bool,

    /// Parallel make jobs (defaults to the configured value).
    #[arg(long, value_name = "N")]
    pub jobs: Option<u32>,

    /// Alternate config file (default: ./reconf.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the computed environment exports and exit.
    ///
    /// Usage:
    ///   eval "$(reconf --print-env)"
    #[arg(long)]
    pub print_env: bool,

    /// Check that the required host tools are in PATH and exit.
    #[arg(long)]
    pub doctor: bool,
}

pub fn run(cli: &Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;

    if cli.doctor {
        // Host diagnostics run before the prefix check.
        return doctor::run(
            &config,
            Compiler::from_flags(cli.gcc),
            Generator::from_flags(cli.demo),
        );
    }

    let Some(prefix) = std::env::var_os(PREFIX_VAR).map(PathBuf::from) else {
        eprintln!(
            "{PREFIX_VAR} is not set. Source the desktop environment setup script before reconfiguring."
        );
        return Ok(ExitCode::from(PRECONDITION_EXIT));
    };

    let plan = Plan::new(cli, &config, &prefix);

    if cli.print_env {
        for line in env::export_lines(&plan.env) {
            println!("{line}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let code = execute_with(&plan, run_step)?;
    Ok(exit_code(code))
}

/// Run the plan's steps in order, returning the first nonzero exit code.
///
/// The clean step runs without the compiler overrides; the configure and
/// build steps see them. A nonzero clean or configure status skips
/// everything after it.
fn execute_with(
    plan: &Plan,
    mut run: impl FnMut(&Step, &BTreeMap<String, String>) -> Result<i32>,
) -> Result<i32> {
    let no_env = BTreeMap::new();

    if let Some(clean) = &plan.clean {
        println!("=== Cleaning work tree ===");
        let code = run(clean, &no_env)?;
        if code != 0 {
            return Ok(code);
        }
    }

    println!("=== Configuring ===");
    for step in &plan.configure {
        println!("  {}", step.display());
        let code = run(step, &plan.env)?;
        if code != 0 {
            return Ok(code);
        }
    }

    println!("=== Building ===");
    println!("  {}", plan.build.display());
    run(&plan.build, &plan.env)
}

fn run_step(step: &Step, env_overrides: &BTreeMap<String, String>) -> Result<i32> {
    let status = step
        .command(env_overrides)
        .status()
        .with_context(|| format!("Failed to run {}", step.program))?;

    // code() is None for signal deaths
    Ok(status.code().unwrap_or(1))
}

fn exit_code(raw: i32) -> ExitCode {
    ExitCode::from(u8::try_from(raw).unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn plan_for(args: &[&str]) -> Plan {
        let cli = Cli::try_parse_from(args).unwrap();
        Plan::new(&cli, &Config::default(), Path::new("/opt/desktop"))
    }

    #[test]
    fn test_clean_failure_stops_pipeline() {
        let plan = plan_for(&["reconf", "-c"]);
        let mut ran = Vec::new();

        let code = execute_with(&plan, |step, _| {
            ran.push(step.program.clone());
            Ok(128)
        })
        .unwrap();

        assert_eq!(code, 128);
        assert_eq!(ran, vec!["git".to_string()]);
    }

    #[test]
    fn test_configure_failure_skips_build() {
        let plan = plan_for(&["reconf"]);
        let mut ran = Vec::new();

        let code = execute_with(&plan, |step, _| {
            ran.push(step.program.clone());
            if step.program == "./configure" {
                Ok(2)
            } else {
                Ok(0)
            }
        })
        .unwrap();

        assert_eq!(code, 2);
        assert_eq!(ran, vec!["autoreconf".to_string(), "./configure".to_string()]);
    }

    #[test]
    fn test_success_runs_build_once() {
        let plan = plan_for(&["reconf"]);
        let mut make_runs = 0;

        let code = execute_with(&plan, |step, _| {
            if step.program == "make" {
                make_runs += 1;
            }
            Ok(0)
        })
        .unwrap();

        assert_eq!(code, 0);
        assert_eq!(make_runs, 1);
    }

    #[test]
    fn test_build_failure_code_is_returned() {
        let plan = plan_for(&["reconf"]);

        let code = execute_with(&plan, |step, _| {
            if step.program == "make" {
                Ok(2)
            } else {
                Ok(0)
            }
        })
        .unwrap();

        assert_eq!(code, 2);
    }

    #[test]
    fn test_clean_step_runs_without_overrides() {
        let plan = plan_for(&["reconf", "-c"]);

        execute_with(&plan, |step, env_overrides| {
            if step.program == "git" {
                assert!(env_overrides.is_empty());
            } else {
                assert!(env_overrides.contains_key("CXXFLAGS"));
            }
            Ok(0)
        })
        .unwrap();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["reconf"]).unwrap();
        assert!(!cli.clean);
        assert!(!cli.demo);
        assert!(!cli.extra_warnings);
        assert!(!cli.gcc);
        assert!(!cli.logging);
        assert_eq!(cli.optimization, 3);
        assert_eq!(cli.jobs, None);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::try_parse_from(["reconf", "-c", "-d", "-e", "-g", "-o", "1", "-l"]).unwrap();
        assert!(cli.clean);
        assert!(cli.demo);
        assert!(cli.extra_warnings);
        assert!(cli.gcc);
        assert!(cli.logging);
        assert_eq!(cli.optimization, 1);
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["reconf", "--frobnicate"]).is_err());
    }
}
