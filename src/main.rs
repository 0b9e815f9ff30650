//! Trinity -- a rules engine driven over stdin/stdout.
//!
//! This binary reads one command per line from stdin and writes one
//! response per command to stdout. Logs go to stderr, filtered by
//! `RUST_LOG` (default `warn`). An optional first argument names a JSON config file.

use std::io::{self, BufRead};
use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use trinity::config::{load_config, GameConfig};
use trinity::engine::Engine;
use trinity::protocol::parser::{parse_command, Command};

/// Runs the main command loop, reading commands from stdin and writing
/// responses to stdout.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(Path::new(&path)) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "failed to load config");
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::with_config(config);

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let result = match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(cmd) => engine.execute(cmd, &mut out),
            None if line.trim().is_empty() => continue,
            None => writeln_flush(&mut out, &format!("error unrecognized command: {}", line.trim())),
        };
        if let Err(e) = result {
            tracing::error!(error = %e, "failed to write response");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn writeln_flush<W: io::Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "{text}")?;
    out.flush()
}
