//! The watch trigger.
//!
//! Subscribes to filesystem change events over the bundle's input set and
//! reruns a task on every change. Invocations are serialized: the loop is
//! single-threaded, so events arriving during a build sit in the channel
//! and trigger the next invocation only after the current one reaches
//! `Done` or `Failed`. There is no cancellation; an in-progress build runs
//! to completion.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use baler_core::{log_info, log_warn, BuildError, BuildResult};

use crate::task::Orchestrator;

/// Watches the bundle's input paths for changes.
pub struct WatchTrigger {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    debounce: Duration,
}

impl WatchTrigger {
    /// Start watching `paths`. Directories are watched recursively; paths
    /// that do not exist yet are skipped.
    pub fn new(paths: &[PathBuf], debounce: Duration) -> BuildResult<Self> {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |result| {
                let _ = tx.send(result);
            },
            notify::Config::default(),
        )
        .map_err(|e| watch_error(Path::new("."), e))?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(|e| watch_error(path, e))?;
            }
        }

        Ok(Self {
            _watcher: watcher,
            rx,
            debounce,
        })
    }

    /// Block until at least one relevant change arrives, then keep draining
    /// events for the debounce window so one save does not trigger several
    /// rebuilds. Returns the changed paths.
    pub fn wait(&self) -> BuildResult<Vec<PathBuf>> {
        let mut changed = Vec::new();
        loop {
            let event = self.rx.recv().map_err(|_| {
                BuildError::io(
                    PathBuf::from("."),
                    std::io::Error::other("watch channel closed"),
                )
            })?;
            if collect(event, &mut changed) {
                break;
            }
        }
        while let Ok(event) = self.rx.recv_timeout(self.debounce) {
            collect(event, &mut changed);
        }
        Ok(changed)
    }
}

fn collect(event: notify::Result<Event>, changed: &mut Vec<PathBuf>) -> bool {
    match event {
        Ok(event) => match event.kind {
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {
                for path in event.paths {
                    if !changed.contains(&path) {
                        changed.push(path);
                    }
                }
                true
            }
            _ => false,
        },
        Err(e) => {
            log_warn!("watch", "watch error: {}", e);
            false
        }
    }
}

fn watch_error(path: &Path, error: notify::Error) -> BuildError {
    BuildError::io(path, std::io::Error::other(error.to_string()))
}

/// Whether an event is the bundler writing its own output: the artifact
/// itself, or the temp file it is staged through. Without this filter a
/// destination inside the watched tree would retrigger its own build.
fn is_output_event(path: &Path, dest: &Path) -> bool {
    if path == dest {
        return true;
    }
    path.parent() == dest.parent()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with(".tmp"))
            .unwrap_or(false)
}

/// Build once, then rebuild on every change until the process is stopped.
/// A failed invocation is reported and the loop keeps going; the next
/// change event gets a fresh attempt.
pub fn watch_loop(orchestrator: &Orchestrator, task: &str, debug: bool) -> BuildResult<()> {
    let paths = orchestrator.bundler().watch_paths();
    let dest = orchestrator.bundler().dest();
    let debounce = Duration::from_millis(orchestrator.bundler().config().watch.debounce_ms);
    let trigger = WatchTrigger::new(&paths, debounce)?;

    orchestrator.run(task, debug)?;
    loop {
        let changed = trigger.wait()?;
        let relevant = changed
            .iter()
            .filter(|path| !is_output_event(path, &dest))
            .count();
        if relevant == 0 {
            continue;
        }
        log_info!("watch", "{} path(s) changed, rerunning '{}'", relevant, task);
        orchestrator.run(task, debug)?;
    }
}
