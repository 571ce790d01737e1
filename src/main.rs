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

//! Crux Compiler CLI
//!
//! Compiles a Crux source file into MIPS assembly for SPIM.

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use cruxc::error::{format_error, Diagnostic};
use cruxc::output::{assembly_path, write_assembly};
use cruxc::runner::{RunnerError, SpimRunner};

/// Exit code for a program with diagnostics.
const EXIT_DIAGNOSTICS: u8 = 1;
/// Exit code for an unreadable source file.
const EXIT_READ: u8 = 3;
/// Exit code when SPIM cannot be found.
const EXIT_SPIM_MISSING: u8 = 4;
/// Exit code when SPIM fails.
const EXIT_SPIM_FAILED: u8 = 5;

/// cruxc - A teaching compiler for the Crux language
#[derive(Parser, Debug)]
#[command(name = "cruxc")]
#[command(author = "Marcel Joachim Kloubert")]
#[command(version)]
#[command(about = "A teaching compiler translating Crux programs into MIPS assembly")]
#[command(long_about = r#"
cruxc compiles a Crux source file into MIPS assembly for the SPIM
simulator. Diagnostics are printed one per line as Kind(line,col)[message].

Example usage:
  cruxc fib.crx -o fib.s
  cruxc fib.crx --check
  cruxc fib.crx --tokens

Run in SPIM:
  cruxc fib.crx --run
  cruxc fib.crx --run --spim-path /opt/spim/bin/spim
"#)]
struct Cli {
    /// Source file to compile (.crx)
    source_file: PathBuf,

    /// Output file for the assembly. Defaults to standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print the token stream and stop
    #[arg(long, conflicts_with_all = ["check", "run"])]
    tokens: bool,

    /// Stop after type checking
    #[arg(long, conflicts_with = "run")]
    check: bool,

    /// Render diagnostics with source excerpts and colors
    #[arg(long)]
    pretty: bool,

    /// Run the compiled program in SPIM
    #[arg(short, long)]
    run: bool,

    /// Path to the SPIM binary (auto-detected if not specified)
    #[arg(long)]
    spim_path: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .from_env_lossy(),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = match std::fs::read_to_string(&cli.source_file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Cannot read {}: {}", cli.source_file.display(), e);
            return ExitCode::from(EXIT_READ);
        }
    };
    let filename = cli
        .source_file
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("<input>");

    if cli.tokens {
        print!("{}", cruxc::lexer::dump_tokens(&source));
        return ExitCode::SUCCESS;
    }

    if cli.check {
        let diagnostics = cruxc::check(&source);
        if !diagnostics.is_empty() {
            print_diagnostics(&diagnostics, &source, filename, cli.pretty);
            return ExitCode::from(EXIT_DIAGNOSTICS);
        }
        if cli.verbose {
            eprintln!("{}: no errors", filename);
        }
        return ExitCode::SUCCESS;
    }

    let compilation = match cruxc::compile(&source) {
        Ok(compilation) => compilation,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_DIAGNOSTICS);
        }
    };
    let Some(program) = compilation.program else {
        print_diagnostics(&compilation.diagnostics, &source, filename, cli.pretty);
        return ExitCode::from(EXIT_DIAGNOSTICS);
    };
    if !program.defines_label("main") {
        tracing::warn!(file = filename, "program has no main function");
    }

    if cli.run {
        let output_path = cli.output.clone().unwrap_or_else(|| {
            std::env::temp_dir().join(assembly_path(Path::new(filename)))
        });
        if let Err(e) = write_assembly(&program, &output_path) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_DIAGNOSTICS);
        }
        return run_in_spim(&cli, &output_path);
    }

    match &cli.output {
        Some(path) => {
            if let Err(e) = write_assembly(&program, path) {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_DIAGNOSTICS);
            }
            if cli.verbose {
                eprintln!("Compiled {} -> {}", filename, path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if let Err(e) = program.write_to(&mut out).and_then(|_| out.flush()) {
                eprintln!("Error: Cannot write assembly: {}", e);
                return ExitCode::from(EXIT_DIAGNOSTICS);
            }
        }
    }

    ExitCode::SUCCESS
}

/// Run an assembly file in SPIM attached to the terminal.
fn run_in_spim(cli: &Cli, assembly: &Path) -> ExitCode {
    let runner = match SpimRunner::locate(cli.spim_path.clone()) {
        Ok(runner) => runner,
        Err(e @ (RunnerError::SpimNotFound | RunnerError::InvalidSpimPath(_))) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Install SPIM or specify the path with --spim-path:");
            eprintln!("  macOS:   brew install spim");
            eprintln!("  Ubuntu:  sudo apt install spim");
            return ExitCode::from(EXIT_SPIM_MISSING);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_SPIM_FAILED);
        }
    };

    if cli.verbose {
        eprintln!("SPIM path: {}", runner.spim_path().display());
    }

    match runner.run(assembly) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_SPIM_FAILED)
        }
    }
}

fn print_diagnostics(diagnostics: &[Diagnostic], source: &str, filename: &str, pretty: bool) {
    for diagnostic in diagnostics {
        if pretty {
            if print_report(diagnostic, source, filename).is_err() {
                eprint!("{}", format_error(diagnostic, source, Some(filename)));
            }
        } else {
            println!("{}", diagnostic);
        }
    }
}

/// Render one diagnostic with ariadne.
fn print_report(diagnostic: &Diagnostic, source: &str, filename: &str) -> io::Result<()> {
    // ariadne spans count characters
    let byte_offset = diagnostic.position.offset_in(source);
    let offset = source[..byte_offset].chars().count();
    let end = (offset + 1).min(source.chars().count()).max(offset);

    Report::build(ReportKind::Error, filename, offset)
        .with_code(diagnostic.kind.name())
        .with_message(&diagnostic.message)
        .with_label(
            Label::new((filename, offset..end))
                .with_message(diagnostic.kind.name())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)))
}
