//! Log output targets.
//!
//! Two sinks, fixed once at startup: an out sink for access and
//! lifecycle lines (stdout or an append file) and an err sink for errors
//! and warnings (stderr or an append file). Lines written before `init`
//! fall back to the console.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

static SINKS: OnceLock<Sinks> = OnceLock::new();

enum Sink {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl Sink {
    /// Open `path` for appending, creating parent directories as needed
    fn file(path: &str) -> io::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::File(Mutex::new(file)))
    }

    fn write_line(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Stderr => eprintln!("{line}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{line}");
                }
            }
        }
    }
}

struct Sinks {
    out: Sink,
    err: Sink,
}

/// Open the configured targets. Fails if a log file cannot be opened or
/// if called twice.
pub fn init(access_file: Option<&str>, error_file: Option<&str>) -> io::Result<()> {
    let sinks = Sinks {
        out: access_file.map_or(Ok(Sink::Stdout), Sink::file)?,
        err: error_file.map_or(Ok(Sink::Stderr), Sink::file)?,
    };
    SINKS
        .set(sinks)
        .map_err(|_| io::Error::new(io::ErrorKind::AlreadyExists, "log sinks already initialized"))
}

/// Write one line to the out sink
pub fn out_line(line: &str) {
    match SINKS.get() {
        Some(sinks) => sinks.out.write_line(line),
        None => println!("{line}"),
    }
}

/// Write one line to the err sink
pub fn err_line(line: &str) {
    match SINKS.get() {
        Some(sinks) => sinks.err.write_line(line),
        None => eprintln!("{line}"),
    }
}
