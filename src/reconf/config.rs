//! Configuration file support (`reconf.toml`).
//!
//! The pinned toolchain versions and the build parallelism live here so they
//! can be overridden without editing the tool. Defaults reproduce the
//! versions the toolkit tree builds against.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "reconf.toml";

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    #[serde(default)]
    pub configure: ConfigureConfig,

    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Debug, Deserialize)]
pub struct ToolchainConfig {
    /// clang-family C++ compiler used by default.
    #[serde(default = "default_clang")]
    pub clang: String,

    /// gcc-family C++ compiler selected with --gcc.
    #[serde(default = "default_gcc")]
    pub gcc: String,

    /// Compilation cache wrapper prefixed to the compiler invocation.
    #[serde(default = "default_cache")]
    pub cache: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        ToolchainConfig {
            clang: default_clang(),
            gcc: default_gcc(),
            cache: default_cache(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConfigureConfig {
    /// Graphics profile passed to the configure step.
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Vulkan API version required by the configure step.
    #[serde(default = "default_vulkan")]
    pub vulkan: String,
}

impl Default for ConfigureConfig {
    fn default() -> Self {
        ConfigureConfig {
            profile: default_profile(),
            vulkan: default_vulkan(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BuildConfig {
    /// Parallel make jobs.
    #[serde(default = "default_jobs")]
    pub jobs: u32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig { jobs: default_jobs() }
    }
}

fn default_clang() -> String {
    "clang++-3.9".to_string()
}
fn default_gcc() -> String {
    "g++-6".to_string()
}
fn default_cache() -> String {
    "ccache".to_string()
}
fn default_profile() -> String {
    "VULKAN".to_string()
}
fn default_vulkan() -> String {
    "1.0".to_string()
}
fn default_jobs() -> u32 {
    21
}

impl Config {
    /// Load config from `reconf.toml`, or use defaults if the file doesn't
    /// exist. An explicitly requested file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.exists() {
                    Self::read(default)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}
