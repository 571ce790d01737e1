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

//! Runner module for SPIM integration.
//!
//! This module provides functionality to:
//! - Detect the SPIM simulator
//! - Run generated assembly, interactively or with captured output

mod spim;

pub use spim::{find_spim, SpimRunner, SPIM_BINARIES};

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during runner operations.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// SPIM was not found on the system.
    #[error("SPIM not found. Install spim or specify path with --spim-path")]
    SpimNotFound,

    /// The specified SPIM path does not exist.
    #[error("SPIM path does not exist: {0}")]
    InvalidSpimPath(PathBuf),

    /// SPIM could not be started.
    #[error("Failed to start SPIM: {0}")]
    SpimStartFailed(#[from] io::Error),

    /// SPIM ran but reported a failure.
    #[error("SPIM exited with status {status}: {stderr}")]
    SpimFailed { status: i32, stderr: String },
}
