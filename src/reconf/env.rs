//! Build environment overrides.
//!
//! The overrides are computed as plain data and applied per command, never
//! written into the process-wide environment.

use std::collections::BTreeMap;
use std::process::Command;

use crate::reconf::config::Config;
use crate::reconf::toolchain::{self, Compiler};

/// Install helper exported as `INSTALL` (preserves timestamps).
pub const INSTALL_HELPER: &str = "install -p";

/// Compute the `INSTALL`/`CXX`/`CXXFLAGS` overrides for the configure and
/// build steps.
pub fn build_env(
    config: &Config,
    compiler: Compiler,
    optimization: u32,
    extra_warnings: bool,
) -> BTreeMap<String, String> {
    let mut env_overrides = BTreeMap::new();
    env_overrides.insert("INSTALL".to_string(), INSTALL_HELPER.to_string());
    env_overrides.insert("CXX".to_string(), toolchain::cxx(config, compiler));
    env_overrides.insert(
        "CXXFLAGS".to_string(),
        toolchain::cxxflags(optimization, extra_warnings),
    );
    env_overrides
}

pub fn apply(cmd: &mut Command, env_overrides: &BTreeMap<String, String>) {
    for (key, value) in env_overrides {
        cmd.env(key, value);
    }
}

/// Render the overrides as shell exports.
///
/// Kept as pure string exports so users can `eval "$(reconf --print-env)"`.
pub fn export_lines(env_overrides: &BTreeMap<String, String>) -> Vec<String> {
    env_overrides
        .iter()
        .map(|(key, value)| format!("export {key}=\"{value}\""))
        .collect()
}
