//! Locating the newest Gatling run on disk.
//!
//! Gatling writes each run to `<results>/<simulation-id>-<timestamp>/`. The
//! run directory names sort chronologically, so the newest run is the
//! lexicographically greatest directory name carrying the simulation prefix.

use crate::{defaults, error::DiscoveryError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Newest run directory under `results_dir` whose name starts with `prefix`.
pub fn latest_simulation_dir(results_dir: &Path, prefix: &str) -> Result<PathBuf, DiscoveryError> {
    if !results_dir.is_dir() {
        return Err(DiscoveryError::ResultsDirMissing(results_dir.to_path_buf()));
    }

    let scan_error = |source| DiscoveryError::Scan {
        dir: results_dir.to_path_buf(),
        source,
    };

    let mut latest: Option<String> = None;
    for entry in fs::read_dir(results_dir).map_err(scan_error)? {
        let entry = entry.map_err(scan_error)?;
        if !entry.path().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            debug!("Skipping non-UTF-8 entry {:?}", entry.path());
            continue;
        };
        if name.starts_with(prefix) && latest.as_deref().map_or(true, |best| name.as_str() > best) {
            latest = Some(name);
        }
    }

    latest
        .map(|name| results_dir.join(name))
        .ok_or_else(|| DiscoveryError::NoSimulationRuns {
            dir: results_dir.to_path_buf(),
            prefix: prefix.to_string(),
        })
}

/// Path of `simulation.log` inside the newest matching run directory.
pub fn find_latest_log(results_dir: &Path, prefix: &str) -> Result<PathBuf, DiscoveryError> {
    let run_dir = latest_simulation_dir(results_dir, prefix)?;
    debug!("Latest simulation directory: {:?}", run_dir);
    existing_log(run_dir.join(defaults::LOG_FILE_NAME))
}

/// Check that an explicitly chosen log file exists.
pub fn existing_log(path: PathBuf) -> Result<PathBuf, DiscoveryError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(DiscoveryError::LogFileMissing(path))
    }
}
