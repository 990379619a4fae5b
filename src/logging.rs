use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming a log file.
pub const LOG_FILE_ENV: &str = "ACCLAUNCH_LOG";
/// Env var that turns on debug output to stderr.
pub const DEBUG_ENV: &str = "AS_DEBUG";

/// Where log lines go and how verbose they are by default.
struct LogSink {
    writer: BoxMakeWriter,
    default_level: &'static str,
    ansi: bool,
}

/// Initialize tracing.
///
/// Stdout carries the generated command line, so logs never go there.
/// Set `ACCLAUNCH_LOG` to a file path to log to a file, or `AS_DEBUG` to log
/// to stderr. With neither set, logging stays off. `RUST_LOG` overrides the
/// default level either way.
pub fn init_tracing() {
    let Some(sink) = select_sink() else {
        return;
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(sink.default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(sink.writer)
                .with_ansi(sink.ansi)
                .with_target(false),
        )
        .init();
}

fn select_sink() -> Option<LogSink> {
    if let Some(base) = std::env::var_os(LOG_FILE_ENV) {
        let path = unique_log_path(&base);
        return match File::create(&path) {
            Ok(file) => Some(LogSink {
                writer: BoxMakeWriter::new(Mutex::new(file)),
                default_level: "info",
                ansi: false,
            }),
            Err(e) => {
                eprintln!("Warning: cannot create log file {}: {}", path.display(), e);
                None
            }
        };
    }

    std::env::var_os(DEBUG_ENV).map(|_| LogSink {
        writer: BoxMakeWriter::new(std::io::stderr),
        default_level: "debug",
        ansi: true,
    })
}

/// `{base}.{unix seconds}.{pid}`, so concurrent launches never share a file.
fn unique_log_path(base: &OsStr) -> PathBuf {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut name = OsString::from(base);
    name.push(format!(".{}.{}", timestamp, std::process::id()));
    PathBuf::from(name)
}
