//! Tracing setup shared by every subcommand.

use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Env var naming a log file. Unset means logs go to stderr.
pub const LOG_PATH_ENV: &str = "FURRYFRIENDS_LOG";

/// How chatty the default filter is. `RUST_LOG` overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    pub fn level(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    fn default_filter(&self) -> String {
        format!("furryfriends={}", self.level())
    }
}

/// Initialize tracing.
///
/// When `FURRYFRIENDS_LOG` is set, logs go to a file named
/// `{path}.{timestamp}.{pid}` so concurrent sessions don't clobber each
/// other. Otherwise logs go to stderr, keeping stdout for the session.
pub fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));
    let registry = tracing_subscriber::registry().with(filter);

    // An already installed subscriber keeps priority.
    let _ = match std::env::var_os(LOG_PATH_ENV) {
        Some(base) => match open_log_file(&base) {
            Ok(file) => registry.with(output_layer(file, false)).try_init(),
            Err(e) => {
                eprintln!("furryfriends: cannot open log file, logging to stderr: {e}");
                registry.with(output_layer(std::io::stderr, true)).try_init()
            }
        },
        None => registry.with(output_layer(std::io::stderr, true)).try_init(),
    };
}

fn output_layer<S, W>(writer: W, ansi: bool) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
}

fn log_file_path(base: &OsStr) -> PathBuf {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut name = base.to_os_string();
    name.push(format!(".{}.{}", timestamp, std::process::id()));
    PathBuf::from(name)
}

fn open_log_file(base: &OsStr) -> io::Result<File> {
    File::create(log_file_path(base))
}
