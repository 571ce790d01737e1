// Crux - A teaching compiler translating Crux programs into MIPS assembly
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! SPIM detection and execution.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::RunnerError;

/// SPIM binary names to search for, in order of preference.
pub const SPIM_BINARIES: &[&str] = &["spim", "xspim"];

/// Find SPIM on the system.
///
/// Searches the system PATH and returns the first binary found.
///
/// # Example
///
/// ```no_run
/// use cruxc::runner::find_spim;
///
/// if let Some(spim) = find_spim() {
///     println!("Found SPIM: {}", spim.display());
/// }
/// ```
pub fn find_spim() -> Option<PathBuf> {
    SPIM_BINARIES
        .iter()
        .find_map(|binary| which::which(binary).ok())
}

/// Runs assembly files with SPIM.
#[derive(Debug, Clone)]
pub struct SpimRunner {
    spim_path: PathBuf,
}

impl SpimRunner {
    /// Create a runner for a SPIM binary.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::InvalidSpimPath` if the path does not exist.
    pub fn new(spim_path: PathBuf) -> Result<Self, RunnerError> {
        if !spim_path.exists() {
            return Err(RunnerError::InvalidSpimPath(spim_path));
        }
        Ok(Self { spim_path })
    }

    /// Create a runner from an explicit path or the first SPIM on the PATH.
    pub fn locate(explicit: Option<PathBuf>) -> Result<Self, RunnerError> {
        match explicit {
            Some(path) => Self::new(path),
            None => find_spim()
                .ok_or(RunnerError::SpimNotFound)
                .and_then(Self::new),
        }
    }

    /// Get the SPIM binary path.
    pub fn spim_path(&self) -> &Path {
        &self.spim_path
    }

    fn command(&self, assembly: &Path) -> Command {
        let mut command = Command::new(&self.spim_path);
        command.arg("-quiet").arg("-file").arg(assembly);
        command
    }

    /// Run a program attached to the terminal.
    pub fn run(&self, assembly: &Path) -> Result<(), RunnerError> {
        tracing::debug!(spim = %self.spim_path.display(), file = %assembly.display(), "running");
        let status = self.command(assembly).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(RunnerError::SpimFailed {
                status: status.code().unwrap_or(-1),
                stderr: String::new(),
            })
        }
    }

    /// Run a program with the given standard input and return what it
    /// printed, without SPIM's own banner lines.
    pub fn run_captured(&self, assembly: &Path, input: &str) -> Result<String, RunnerError> {
        let mut child = self
            .command(assembly)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes())?;
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(RunnerError::SpimFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(strip_banner(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Remove the lines SPIM prints about loading its exception handler.
fn strip_banner(output: &str) -> String {
    output
        .split_inclusive('\n')
        .filter(|line| !line.starts_with("Loaded:"))
        .collect()
}
