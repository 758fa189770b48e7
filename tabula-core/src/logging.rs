//! File-backed log recorder for the invoking editor plugin.
//!
//! Every record is one line, `[LEVEL] [yyyy/MM/dd HH:mm:ss] message`,
//! appended to the log file. The file is opened for each record and closed
//! again before the call returns, so a process that aborts right after
//! logging still leaves the record on disk, and no handle outlives a call.
//!
//! The same recorder backs the process-wide `tracing` subscriber, so
//! `tracing::debug!`/`tracing::error!` events land in the file in the same
//! layout and with the same open/append/close cycle.

use crate::{Result, error::TabulaError};
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter, format},
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Timestamp layout of every record.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Environment variable overriding the log filter (`tracing` directive syntax).
pub const LOG_FILTER_ENV: &str = "TABULA_LOG";

/// Appends records to a single log file.
///
/// Holds only the path. Cloning is cheap and every clone writes to the same
/// file.
#[derive(Debug, Clone)]
pub struct LogRecorder {
    path: PathBuf,
}

impl LogRecorder {
    /// Prepares the log file at `path`.
    ///
    /// Creates missing parent directories and opens the file once in append
    /// mode (creating it) to prove it is writable. The handle is closed again
    /// before returning.
    ///
    /// # Errors
    /// Returns `LogInit` when the directories or the file cannot be created.
    pub fn initialize(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let init_error = |source| TabulaError::LogInit {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(init_error)?;
        }
        open_append(&path).map_err(init_error)?;

        Ok(Self { path })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a `DEBUG` record.
    pub fn debug(&self, message: &str) -> io::Result<()> {
        self.record(&Level::DEBUG, message)
    }

    /// Appends an `ERROR` record.
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.record(&Level::ERROR, message)
    }

    /// Appends a `DEBUG` record built from a `{}` template.
    ///
    /// See [`render_template`] for the mismatch fallback.
    pub fn debugf(&self, template: &str, args: &[&dyn fmt::Display]) -> io::Result<()> {
        self.debug(&render_template(template, args))
    }

    /// Appends an `ERROR` record built from a `{}` template.
    pub fn errorf(&self, template: &str, args: &[&dyn fmt::Display]) -> io::Result<()> {
        self.error(&render_template(template, args))
    }

    /// Appends one record at `level`: open, write the whole line, flush, close.
    pub fn record(&self, level: &Level, message: &str) -> io::Result<()> {
        let line = format_record(level, &Local::now(), message);
        let mut writer = self.make_writer();
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}

impl<'a> MakeWriter<'a> for LogRecorder {
    type Writer = RecordWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RecordWriter::new(self.path.clone())
    }
}

/// Scoped append handle for one record.
///
/// The file is opened lazily on the first write and closed when the writer
/// is dropped.
#[derive(Debug)]
pub struct RecordWriter {
    path: PathBuf,
    file: Option<File>,
}

impl RecordWriter {
    fn new(path: PathBuf) -> Self {
        Self { path, file: None }
    }
}

impl Write for RecordWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let file = match self.file.take() {
            Some(file) => file,
            None => open_append(&self.path)?,
        };
        self.file.insert(file).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Formats one record line, including the trailing newline.
///
/// Line breaks inside `message` are escaped as `\\n` and `\\r` so the
/// record stays on one line.
pub fn format_record(level: &Level, timestamp: &DateTime<Local>, message: &str) -> String {
    format!(
        "[{}] [{}] {}\n",
        level,
        timestamp.format(TIMESTAMP_FORMAT),
        single_line(message)
    )
}

fn single_line(message: &str) -> Cow<'_, str> {
    if message.contains(['\n', '\r']) {
        Cow::Owned(message.replace('\n', "\\n").replace('\r', "\\r"))
    } else {
        Cow::Borrowed(message)
    }
}

/// Substitutes `{}` placeholders in `template` with `args`, in order.
///
/// `{{` and `}}` produce literal braces. When the number of placeholders
/// differs from the number of arguments the template is returned unchanged,
/// so a bad call site still produces a readable record.
pub fn render_template(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('{', Some('{')) => {
                chars.next();
                rendered.push('{');
            }
            ('{', Some('}')) => {
                chars.next();
                match remaining.next() {
                    Some(arg) => rendered.push_str(&arg.to_string()),
                    None => return template.to_string(),
                }
            }
            ('}', Some('}')) => {
                chars.next();
                rendered.push('}');
            }
            (other, _) => rendered.push(other),
        }
    }

    if remaining.next().is_some() {
        return template.to_string();
    }
    rendered
}

/// Event formatter producing the record layout for `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFormat;

impl<S, N> FormatEvent<S, N> for RecordFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.field_format()
            .format_fields(format::Writer::new(&mut message), event)?;

        write!(
            writer,
            "{}",
            format_record(event.metadata().level(), &Local::now(), &message)
        )
    }
}

fn log_filter(default_level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()))
}

/// Builds a subscriber that writes every event through `recorder`.
///
/// Events below `INFO` are dropped unless `debug_enabled` is set.
/// `TABULA_LOG` overrides the filter.
pub fn file_subscriber(
    recorder: LogRecorder,
    debug_enabled: bool,
) -> impl Subscriber + Send + Sync + 'static {
    let level = if debug_enabled {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(level))
        .with_ansi(false)
        .with_writer(recorder)
        .event_format(RecordFormat)
        .finish()
}

/// Binds `recorder` as the process-wide `tracing` subscriber.
///
/// # Errors
/// Returns a configuration error if a global subscriber is already set.
pub fn init_file_logging(recorder: LogRecorder, debug_enabled: bool) -> Result<()> {
    file_subscriber(recorder, debug_enabled)
        .try_init()
        .map_err(|e| TabulaError::configuration(format!("Failed to initialize logging: {}", e)))
}

/// Installs a stderr subscriber for runs without a log file.
///
/// Stdout is reserved for plugin output, so only warnings and errors (or
/// debug events with `debug_enabled`) are shown, on stderr.
///
/// # Errors
/// Returns a configuration error if a global subscriber is already set.
pub fn init_stderr_logging(debug_enabled: bool) -> Result<()> {
    let level = if debug_enabled {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(level))
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| TabulaError::configuration(format!("Failed to initialize logging: {}", e)))
}
