use std::fs;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

#[derive(Serialize)]
struct Progress<'a> {
    current: usize,
    total: usize,
    phase: &'a str,
    status: &'a str,
}

/// Best-effort progress file for front-ends that poll it.
///
/// The snapshot is written beside `path` and renamed over it, so readers only
/// ever see a complete document.
pub fn write_progress(path: &Path, current: usize, total: usize, phase: &str, status: &str) {
    let progress = Progress {
        current,
        total,
        phase,
        status,
    };
    let json = match serde_json::to_string(&progress) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Failed to serialise progress: {}", e);
            return;
        }
    };

    let temp_path = path.with_extension("json.tmp");
    if let Err(e) = fs::write(&temp_path, json).and_then(|()| fs::rename(&temp_path, path)) {
        log::warn!("Failed to write progress to {}: {}", path.display(), e);
        let _ = fs::remove_file(&temp_path);
    }
}

/// Progress counter shared between worker threads.
///
/// Each step bumps the count and rewrites the file under one lock, so snapshots
/// land in order and never interleave.
pub struct ProgressReporter<'a> {
    path: &'a Path,
    phase: &'a str,
    total: usize,
    done: Mutex<usize>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(path: &'a Path, phase: &'a str, total: usize) -> Self {
        Self {
            path,
            phase,
            total,
            done: Mutex::new(0),
        }
    }

    pub fn advance(&self) {
        let mut done = self.done.lock().unwrap_or_else(PoisonError::into_inner);
        *done += 1;
        write_progress(self.path, *done, self.total, self.phase, "running");
    }

    pub fn finish(&self) {
        let _guard = self.done.lock().unwrap_or_else(PoisonError::into_inner);
        write_progress(self.path, self.total, self.total, self.phase, "done");
    }
}
