//! Host tool preflight checks.

use anyhow::{bail, Result};
use std::process::ExitCode;

use crate::reconf::config::Config;
use crate::reconf::plan::Generator;
use crate::reconf::toolchain::Compiler;

/// Tools a reconfigure run will invoke with the given selections.
pub fn required_tools(config: &Config, compiler: Compiler, generator: Generator) -> Vec<String> {
    vec![
        "git".to_string(),
        "make".to_string(),
        config.toolchain.cache.clone(),
        compiler.binary(config).to_string(),
        match generator {
            Generator::Autotools => "autoreconf".to_string(),
            Generator::CMake => "cmake".to_string(),
        },
    ]
}

/// Check that every required tool resolves in PATH.
pub fn run(config: &Config, compiler: Compiler, generator: Generator) -> Result<ExitCode> {
    let mut ok = true;

    for tool in required_tools(config, compiler, generator) {
        if which::which(&tool).is_ok() {
            eprintln!("[OK] {tool}");
        } else {
            eprintln!("[FAIL] missing `{tool}` in PATH");
            ok = false;
        }
    }

    if !ok {
        bail!("doctor checks failed");
    }
    Ok(ExitCode::SUCCESS)
}
