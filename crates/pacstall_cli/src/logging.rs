//! Console and file logging.
//!
//! Console records are rendered with the same tags as [`crate::message`]:
//! records up to INFO go to stdout and WARN and above go to stderr. When
//! Pacstall runs as root, every record at DEBUG and above is also written to
//! `/var/log/pacstall/<date>/<time>.log`.

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local, NaiveDate};
use tracing::{debug, warn, Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{filter::LevelFilter, fmt as subscriber_fmt, prelude::*, EnvFilter};

use crate::message::MessageKind;

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

/// Environment variable holding the console log filter.
pub const LOG_ENV: &str = "PACSTALL_LOG";

/// Directory holding the per-day log directories.
pub const LOG_DIR: &str = "/var/log/pacstall";

/// Age after which a per-day log directory is removed.
pub const LOG_LIFETIME: Duration = Duration::from_secs(7 * 24 * 60 * 60);

const LOG_DIR_DATE_FORMAT: &str = "%Y-%m-%d";
const LOG_FILE_TIME_FORMAT: &str = "%H-%M-%S%.6f";

/// Renders events with the Pacstall message tags.
pub struct FancyFormatter;

impl<S, N> FormatEvent<S, N> for FancyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let kind = MessageKind::from(*event.metadata().level());
        write!(writer, "{} ", kind.prefix())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Returns the console filter: `PACSTALL_LOG` when set, otherwise `info`, or
/// `debug` when `debug` is requested.
pub fn console_filter(debug: bool) -> EnvFilter {
    let default = if debug { "debug" } else { "info" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber.
///
/// A failure to set up the log file is reported as a warning and leaves the
/// console logging in place.
pub fn init(debug: bool, is_root: bool) {
    let console = subscriber_fmt::layer()
        .event_format(FancyFormatter)
        .with_writer(io::stderr.with_max_level(Level::WARN).or_else(io::stdout))
        .with_filter(console_filter(debug));

    let mut file_error = None;
    let file = if is_root {
        match prepare_log_file(Path::new(LOG_DIR), Local::now(), LOG_LIFETIME) {
            Ok(path) => match File::create(&path) {
                Ok(file) => Some(
                    subscriber_fmt::layer()
                        .with_ansi(false)
                        .with_target(false)
                        .with_writer(Mutex::new(file))
                        .with_filter(LevelFilter::DEBUG),
                ),
                Err(e) => {
                    file_error = Some(format!("{}: {}", path.display(), e));
                    None
                }
            },
            Err(e) => {
                file_error = Some(e.to_string());
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry().with(console).with(file).init();

    if let Some(reason) = file_error {
        warn!("Could not set up the log file: {}", reason);
    }
}

/// Creates today's log directory under `root` and returns the path of a new
/// log file in it.
///
/// Per-day directories under `root` whose modification time is older than
/// `lifetime` are removed first. Entries that are not named after a date, such
/// as the package metadata directory, are left alone.
pub fn prepare_log_file(
    root: &Path,
    now: DateTime<Local>,
    lifetime: Duration,
) -> io::Result<PathBuf> {
    fs::create_dir_all(root)?;
    purge_old_logs(root, SystemTime::from(now), lifetime)?;

    let day_dir = root.join(now.format(LOG_DIR_DATE_FORMAT).to_string());
    fs::create_dir_all(&day_dir)?;
    Ok(day_dir.join(format!("{}.log", now.format(LOG_FILE_TIME_FORMAT))))
}

fn purge_old_logs(root: &Path, now: SystemTime, lifetime: Duration) -> io::Result<()> {
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let name = entry.file_name();
        let is_day_dir = name
            .to_str()
            .is_some_and(|n| NaiveDate::parse_from_str(n, LOG_DIR_DATE_FORMAT).is_ok());
        if !is_day_dir || !entry.file_type()?.is_dir() {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        let expired = now
            .duration_since(modified)
            .is_ok_and(|age| age > lifetime);
        if expired {
            debug!(message = "Removing old log directory", path = ?entry.path());
            fs::remove_dir_all(entry.path())?;
        }
    }
    Ok(())
}
