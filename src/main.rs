//! # reconf
//!
//! Reconfigure the UI toolkit source tree in the current directory.
//!
//! Computes the compiler environment, runs the configure step (autotools, or
//! cmake for the demo tree), and on success builds and installs into
//! `$DESKTOP_PREFIX`.
//!
//! ## Usage
//!
//! ```bash
//! reconf                 # autoreconf + ./configure + make install
//! reconf -c              # git clean the tree first
//! reconf -d              # demo tree (cmake)
//! reconf -g -o 0         # gcc toolchain at -O0
//! reconf --print-env     # show the computed exports without building
//! reconf --doctor        # check the host tools are installed
//! ```

use clap::Parser;
use std::process::ExitCode;

mod reconf;

fn main() -> ExitCode {
    let cli = reconf::Cli::parse();

    match reconf::run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
