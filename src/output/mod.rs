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

//! Output module for the Crux compiler.
//!
//! Writes generated assembly to disk. SPIM expects the `.s` extension.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::codegen::Program;

/// Extension of assembly files.
pub const ASSEMBLY_EXTENSION: &str = "s";

/// Errors that can occur while writing output.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The output file could not be created.
    #[error("Cannot create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the program failed.
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The assembly file name for a source file: same stem, `.s` extension.
pub fn assembly_path(source: &Path) -> PathBuf {
    source.with_extension(ASSEMBLY_EXTENSION)
}

/// Write a program to a file.
pub fn write_assembly(program: &Program, path: &Path) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    program
        .write_to(&mut writer)
        .and_then(|_| writer.flush())
        .map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), "assembly written");
    Ok(())
}
