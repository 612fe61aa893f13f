//! Scan worker pool.
//!
//! Each worker receives scan tasks from a shared bounded channel, reads
//! and replays the file with its own replayer state, and sends the outcome
//! back on an unbounded result channel tagged with the submission index.
//! The caller feeds tasks, then drains results until every worker has
//! exited, so a slow file never blocks the feeder for longer than it takes
//! a worker to free a queue slot.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, CorpusConfig};
use crate::error::CorpusError;
use crate::report::{CorpusReport, FileOutcome};
use crate::summary::scan_file;

/// Tasks queued per worker before the feeder blocks.
const QUEUE_DEPTH_PER_WORKER: usize = 4;

struct ScanTask {
    index: usize,
    path: PathBuf,
}

struct ScanResult {
    index: usize,
    outcome: FileOutcome,
}

/// Decode every file in `paths` on a worker pool.
///
/// Duplicate paths are scanned once. The report lists outcomes in the
/// order the paths were first given. A file that fails to read or parse
/// is recorded as a [`CorpusError`] and never stops the batch.
///
/// Only an invalid `config` or a failure to start the pool is returned as
/// `Err`.
pub fn scan_corpus(
    paths: impl IntoIterator<Item = PathBuf>,
    config: &CorpusConfig,
) -> Result<CorpusReport, ConfigError> {
    config.validate()?;
    let paths: Vec<PathBuf> = paths.into_iter().collect::<IndexSet<_>>().into_iter().collect();
    if paths.is_empty() {
        return Ok(CorpusReport::default());
    }

    let worker_count = config.resolved_worker_count().min(paths.len());
    let (task_tx, task_rx) = crossbeam_channel::bounded(worker_count * QUEUE_DEPTH_PER_WORKER);
    let (result_tx, result_rx) = crossbeam_channel::unbounded();
    let workers = spawn_workers(worker_count, &task_rx, &result_tx, Arc::new(config.clone()))?;
    drop(task_rx);
    drop(result_tx);

    debug!(files = paths.len(), workers = worker_count, "scanning LF2 corpus");

    for (index, path) in paths.iter().enumerate() {
        let task = ScanTask {
            index,
            path: path.clone(),
        };
        // Fails only once every worker has gone.
        if task_tx.send(task).is_err() {
            break;
        }
    }
    drop(task_tx);

    let mut outcomes: Vec<Option<FileOutcome>> = paths.iter().map(|_| None).collect();
    for result in result_rx.iter() {
        outcomes[result.index] = Some(result.outcome);
    }

    for (i, handle) in workers.into_iter().enumerate() {
        if handle.join().is_err() {
            warn!(worker = i, "scan worker panicked");
        }
    }

    let report = CorpusReport::from_ordered(paths.into_iter().zip(outcomes).map(
        |(path, outcome)| {
            let outcome = outcome.unwrap_or_else(|| {
                warn!(path = %path.display(), "no result from scan worker");
                Err(CorpusError::WorkerLost { path: path.clone() })
            });
            (path, outcome)
        },
    ));

    info!(
        files = report.len(),
        complete = report.complete_count(),
        truncated = report.truncated_count(),
        failed = report.failed_count(),
        decisions = report.total_decisions(),
        "LF2 corpus scan finished"
    );
    Ok(report)
}

fn spawn_workers(
    worker_count: usize,
    task_rx: &Receiver<ScanTask>,
    result_tx: &Sender<ScanResult>,
    config: Arc<CorpusConfig>,
) -> Result<Vec<JoinHandle<()>>, ConfigError> {
    let mut workers = Vec::with_capacity(worker_count);
    for i in 0..worker_count {
        let task_rx = task_rx.clone();
        let result_tx = result_tx.clone();
        let config = Arc::clone(&config);
        let name = format!("lf2-scan-{i}");
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || worker_loop(task_rx, result_tx, config))
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                name,
                reason: e.to_string(),
            })?;
        workers.push(handle);
    }
    Ok(workers)
}

/// Runs until the task channel is closed or the result channel is gone.
fn worker_loop(task_rx: Receiver<ScanTask>, result_tx: Sender<ScanResult>, config: Arc<CorpusConfig>) {
    while let Ok(task) = task_rx.recv() {
        let outcome = scan_file(&task.path, &config);
        match &outcome {
            Ok(summary) => match &summary.truncation {
                Some(t) => warn!(
                    path = %task.path.display(),
                    decisions = summary.decisions(),
                    emitted = summary.emitted,
                    error = %t,
                    "LF2 stream truncated"
                ),
                None => debug!(
                    path = %task.path.display(),
                    decisions = summary.decisions(),
                    hash = summary.trace_hash,
                    "LF2 file replayed"
                ),
            },
            Err(e) => warn!(error = %e, "skipping LF2 file"),
        }
        let result = ScanResult {
            index: task.index,
            outcome,
        };
        if result_tx.send(result).is_err() {
            break;
        }
    }
}
