//! Reporting of ingestion outcomes.
//!
//! [`crate::ingestion::populate`] and friends hand every finished call to an optional
//! [`IngestionObserver`]: the merged counters on success, the error and its severity on failure.
//!
//! A [`FileObserver`] log looks like:
//!
//! ```text
//! 1760000000 loaded areas.csv as authority-code-csv: 2 of 2 records admitted, 2 areas held
//! 1760000001 rejected <stream> as stats-json [error]: malformed input: input is empty
//! 1760000001 ALERT <stream> as stats-json [error]: malformed input: input is empty
//! ```

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{error, info, warn};

use crate::error::StatsError;

use super::columns::SourceFormat;

/// How bad a failed ingestion call is; alerts fire at or above a configured level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    Info,
    Warning,
    /// The call failed on its input (shape, mapping, unparsable reading).
    Error,
    /// The source could not be read at all.
    Critical,
}

impl IngestionSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for IngestionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which source a report is about.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// A path, or `<stream>` for readers.
    pub source: String,
    pub format: SourceFormat,
}

/// Counters reported by every ingestion routine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionStats {
    /// Data records read (header rows excluded).
    pub records: usize,
    /// Records that passed the area filter and were merged.
    pub admitted: usize,
    /// Areas in the collection once the call finished.
    pub areas: usize,
}

/// Receives the outcome of each ingestion call. Every method has a no-op default.
pub trait IngestionObserver: Send + Sync {
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &StatsError) {}

    /// A failure at or above the alert threshold. Called after [`Self::on_failure`]; unless
    /// overridden it reports the failure a second time.
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards every report to each of its observers, in insertion order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }

    pub fn push(&mut self, observer: Arc<dyn IngestionObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    fn each(&self, report: impl Fn(&dyn IngestionObserver)) {
        self.observers.iter().for_each(|o| report(o.as_ref()));
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        self.each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        self.each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Emits ingestion events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        info!(
            format = %ctx.format,
            source = %ctx.source,
            records = stats.records,
            admitted = stats.admitted,
            areas = stats.areas,
            "ingestion ok"
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        warn!(
            %severity,
            format = %ctx.format,
            source = %ctx.source,
            %error,
            "ingestion failed"
        );
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        error!(
            %severity,
            format = %ctx.format,
            source = %ctx.source,
            %error,
            "ingestion alert"
        );
    }
}

/// Appends one line per report to a log file, prefixed with the unix time in seconds.
///
/// Logging never fails an ingestion call: a log file that cannot be opened or written is
/// skipped silently.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn log(&self, verb: &str, ctx: &IngestionContext, detail: fmt::Arguments<'_>) {
        let line = format!("{} {verb} {} as {}: {detail}", unix_ts(), ctx.source, ctx.format);
        let _guard = self.lock.lock().ok();
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(file, "{line}");
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.log(
            "loaded",
            ctx,
            format_args!(
                "{} of {} records admitted, {} areas held",
                stats.admitted, stats.records, stats.areas
            ),
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        self.log("rejected", ctx, format_args!("[{severity}] {error}"));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &StatsError) {
        self.log("ALERT", ctx, format_args!("[{severity}] {error}"));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
    use crate::error::StatsError;
    use crate::ingestion::columns::SourceFormat;

    fn ctx() -> IngestionContext {
        IngestionContext {
            source: "popu1009.json".to_string(),
            format: SourceFormat::StatsJson,
        }
    }

    #[test]
    fn severities_order_and_print_lowercase() {
        assert!(IngestionSeverity::Critical > IngestionSeverity::Error);
        assert!(IngestionSeverity::Warning > IngestionSeverity::Info);
        assert_eq!(IngestionSeverity::Critical.to_string(), "critical");
    }

    #[test]
    fn file_observer_lines_describe_the_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let obs = FileObserver::new(dir.path().join("ingest.log"));

        obs.on_success(
            &ctx(),
            IngestionStats {
                records: 9,
                admitted: 6,
                areas: 2,
            },
        );
        obs.on_failure(
            &ctx(),
            IngestionSeverity::Error,
            &StatsError::Malformed {
                message: "input is empty".to_string(),
            },
        );

        let log = std::fs::read_to_string(obs.path()).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(
            " loaded popu1009.json as stats-json: 6 of 9 records admitted, 2 areas held"
        ));
        assert!(lines[1].ends_with(
            " rejected popu1009.json as stats-json: [error] malformed input: input is empty"
        ));
    }

    #[test]
    fn unwritable_log_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let obs = FileObserver::new(dir.path());
        obs.on_success(&ctx(), IngestionStats::default());
    }
}
