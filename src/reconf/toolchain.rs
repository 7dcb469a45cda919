//! Compiler selection and flag computation.

use crate::reconf::config::Config;

/// Compiler family driving the configure step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compiler {
    Clang,
    Gcc,
}

impl Compiler {
    pub fn from_flags(gcc: bool) -> Self {
        if gcc {
            Compiler::Gcc
        } else {
            Compiler::Clang
        }
    }

    /// The pinned compiler binary for this family.
    pub fn binary(self, config: &Config) -> &str {
        match self {
            Compiler::Clang => &config.toolchain.clang,
            Compiler::Gcc => &config.toolchain.gcc,
        }
    }
}

/// Cache-wrapped compiler invocation for `CXX`.
pub fn cxx(config: &Config, compiler: Compiler) -> String {
    format!("{} {}", config.toolchain.cache, compiler.binary(config))
}

/// Warning flags added with --extra-warnings.
const EXTRA_WARNING_FLAGS: &[&str] = &["-Wextra", "-Wfloat-equal"];

/// Compiler flags for `CXXFLAGS`.
///
/// Held as a list and joined with single spaces so optional flags never
/// merge into their neighbors.
pub fn cxxflags(optimization: u32, extra_warnings: bool) -> String {
    let mut flags = vec![
        format!("-O{optimization}"),
        "-Wall".to_string(),
        "-Wno-unused-parameter".to_string(),
        "-std=c++14".to_string(),
        "-g".to_string(),
    ];

    if extra_warnings {
        flags.extend(EXTRA_WARNING_FLAGS.iter().map(ToString::to_string));
    }

    flags.join(" ")
}
