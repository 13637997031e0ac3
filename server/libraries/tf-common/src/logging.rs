//
// Copyright 2025 Tabs Data Inc.
//

use crate::env::to_absolute;
use once_cell::sync::OnceCell;
use std::env;
use std::fs::{OpenOptions, create_dir_all};
use std::io::{stderr, stdout};
use std::path::PathBuf;
use tracing::field::Field;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

pub const SENSITIVE_MARKER: &str = "@@SENSITIVE@@";

pub const LOG_LOCATION: &str = "log";
pub const LOG_FILE: &str = "tf.log";

pub const WORK_ENV: &str = "TF_WORK";

// Set once the global subscriber has been installed.
static LOGGER: OnceCell<()> = OnceCell::new();

/// Where log events are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    StdOut,
    StdErr,
    /// Absolute paths are used as the work folder, relative ones are resolved against `TF_WORK`.
    File(PathBuf),
}

// Layer dropping events whose fields carry the sensitive marker.
pub struct SensitiveFilterLayer;

impl<S> Layer<S> for SensitiveFilterLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn event_enabled(&self, event: &Event<'_>, _context: Context<'_, S>) -> bool {
        let mut forward = true;
        event.record(&mut |_field: &Field, value: &dyn std::fmt::Debug| {
            forward = forward && !format!("{value:?}").contains(SENSITIVE_MARKER);
        });
        forward
    }
}

fn subscriber<W>(max_level: Level, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let tabfetch_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_filter(tracing_subscriber::filter::LevelFilter::from_level(
            max_level,
        ));
    tracing_subscriber::registry()
        .with(SensitiveFilterLayer)
        .with(tabfetch_layer)
}

/// Starts logging with the specified max level and output. Only the first call has effect.
///
/// With no output, logs go to the work folder given by `TF_WORK`, or to stderr if it is not set.
pub fn start(max_level: Level, output: Option<LogOutput>) {
    LOGGER.get_or_init(|| {
        let target = log_target(output, env::var(WORK_ENV).ok());
        // a subscriber installed by someone else (tests, embedding apps) is left alone
        let _ = subscriber(max_level, writer(target)).try_init();
    });
}

// Resolved destination of log events, files are the actual log file.
#[derive(Debug, PartialEq, Eq)]
enum LogTarget {
    StdOut,
    StdErr,
    File(PathBuf),
}

fn log_target(output: Option<LogOutput>, work: Option<String>) -> LogTarget {
    match output.unwrap_or(LogOutput::File(PathBuf::from("."))) {
        LogOutput::StdOut => LogTarget::StdOut,
        LogOutput::StdErr => LogTarget::StdErr,
        LogOutput::File(path) => obtain_path_location(path, work)
            .map(LogTarget::File)
            .unwrap_or(LogTarget::StdErr),
    }
}

fn writer(target: LogTarget) -> BoxMakeWriter {
    match target {
        LogTarget::StdOut => BoxMakeWriter::new(stdout),
        LogTarget::StdErr => BoxMakeWriter::new(stderr),
        LogTarget::File(location) => {
            if let Some(parent) = location.parent() {
                if let Err(e) = create_dir_all(parent) {
                    eprintln!("Failed to create log directory {parent:?}: {e}, logging to stderr");
                    return BoxMakeWriter::new(stderr);
                }
            }
            match OpenOptions::new().append(true).create(true).open(&location) {
                Ok(file) => BoxMakeWriter::new(file),
                Err(e) => {
                    eprintln!("Failed to open log file {location:?}: {e}, logging to stderr");
                    BoxMakeWriter::new(stderr)
                }
            }
        }
    }
}

fn obtain_path_location(path: PathBuf, work: Option<String>) -> Option<PathBuf> {
    let path = if path.is_absolute() {
        Some(path)
    } else {
        work.map(|work| PathBuf::from(work).join(path))
    };
    path.and_then(|path| {
        to_absolute(&path)
            .ok()
            .map(|abs_path| abs_path.join(LOG_LOCATION).join(LOG_FILE))
    })
}

/// Runs `f` with a subscriber capturing everything logged up to `max_level`, returning it.
#[cfg(test)]
pub(crate) fn capture(max_level: Level, f: impl FnOnce()) -> String {
    let writer = tests::BufferWriter::default();
    tracing::subscriber::with_default(subscriber(max_level, writer.clone()), f);
    writer.contents()
}
