use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::num::ParseIntError;
use std::path::PathBuf;

use median_queue::{Decision, MedianError, MedianWindow};
use serde::Deserialize;
use thiserror::Error;

/// Runtime configuration, read from `TRADER_`-prefixed environment
/// variables. Both paths are optional; the defaults are stdin and stdout.
#[derive(Debug, Default, Deserialize)]
struct Config {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum TraderError {
    #[error("Unable to read from the input stream")]
    Io(#[from] io::Error),
    #[error("Unable to parse an integer from the input")]
    Parse(#[from] ParseIntError),
    #[error("Invalid stream header `{0}`, expected `<n> <m>` with 0 < m <= n")]
    BadHeader(String),
    #[error("The input ended before the full stream was read")]
    TruncatedStream,
    #[error(transparent)]
    Median(#[from] MedianError),
}

fn next_line<R: BufRead>(lines: &mut io::Lines<R>) -> Result<String, TraderError> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(TraderError::TruncatedStream),
    }
}

fn emit<W: Write>(window: &mut MedianWindow<i64>, output: &mut W) -> Result<(), TraderError> {
    let median = window.median()?;
    let last = *window.back()?;
    let decision = Decision::classify(&median, &last);
    tracing::debug!(median, last, %decision, "classified the observation");
    writeln!(output, "{decision}")?;
    Ok(())
}

/// Read the header and the value stream, pre-fill the window with the first
/// `m` values and slide it across the remaining `n - m`, emitting one
/// decision per window state.
fn process<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<(), TraderError> {
    let mut lines = input.lines();

    let header = next_line(&mut lines)?;
    let mut parts = header.split_whitespace();
    let (n, m) = match (parts.next(), parts.next()) {
        (Some(n), Some(m)) => (n.parse::<usize>()?, m.parse::<usize>()?),
        _ => return Err(TraderError::BadHeader(header.clone())),
    };
    if m == 0 || m > n {
        return Err(TraderError::BadHeader(header));
    }
    tracing::info!(n, m, "read the stream header");

    let mut window = MedianWindow::new();
    for _ in 0..m {
        let value: i64 = next_line(&mut lines)?.trim().parse()?;
        window.enqueue(value)?;
    }
    emit(&mut window, output)?;

    for _ in m..n {
        let value: i64 = next_line(&mut lines)?.trim().parse()?;
        window.replace(value)?;
        emit(&mut window, output)?;
    }
    output.flush()?;
    tracing::info!(decisions = n - m + 1, "finished the observation stream");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let subscriber = tracing_subscriber::FmtSubscriber::new();
    tracing::subscriber::set_global_default(subscriber)?;

    let config: Config = envy::prefixed("TRADER_").from_env()?;
    tracing::info!(?config, "starting the decision stream");

    let stdin = io::stdin();
    let reader: Box<dyn BufRead> = match &config.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(stdin.lock()),
    };
    let writer: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut writer = BufWriter::new(writer);

    process(reader, &mut writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> Result<String, TraderError> {
        let mut out = Vec::new();
        process(Cursor::new(input), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_rising_stream_keeps_buying() {
        assert_eq!(run("5 3\n1\n2\n3\n4\n5\n").unwrap(), "buy\nbuy\nbuy\n");
    }

    #[test]
    fn test_falling_window_sells() {
        assert_eq!(run("3 3\n5\n4\n3\n").unwrap(), "sell\n");
    }

    #[test]
    fn test_flat_window_holds() {
        assert_eq!(run("3 3\n2\n2\n2\n").unwrap(), "hold\n");
    }

    #[test]
    fn test_mixed_stream() {
        assert_eq!(run("4 2\n10\n20\n5\n30\n").unwrap(), "buy\nhold\nbuy\n");
    }

    #[test]
    fn test_header_rejects_zero_window() {
        assert!(matches!(run("3 0\n1\n2\n3\n"), Err(TraderError::BadHeader(_))));
    }

    #[test]
    fn test_header_rejects_window_larger_than_stream() {
        assert!(matches!(run("2 5\n1\n2\n"), Err(TraderError::BadHeader(_))));
    }

    #[test]
    fn test_header_needs_two_fields() {
        assert!(matches!(run("7\n"), Err(TraderError::BadHeader(_))));
    }

    #[test]
    fn test_non_numeric_value() {
        assert!(matches!(run("2 2\n1\nnope\n"), Err(TraderError::Parse(_))));
    }

    #[test]
    fn test_truncated_stream() {
        assert!(matches!(run("5 3\n1\n2\n"), Err(TraderError::TruncatedStream)));
        assert!(matches!(run(""), Err(TraderError::TruncatedStream)));
    }
}
