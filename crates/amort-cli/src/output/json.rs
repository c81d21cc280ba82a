use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print the full analysis envelope to stdout. Decimal amounts stay
/// strings so no precision is lost on the way to other tools.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = serde_json::to_writer_pretty(&mut out, value)
        .map_err(io::Error::from)
        .and_then(|()| writeln!(out));
    if let Err(e) = written {
        tracing::debug!(error = %e, "stdout closed while writing JSON");
        eprintln!("JSON output error: {}", e);
    }
}
