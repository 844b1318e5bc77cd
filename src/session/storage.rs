use super::snapshot::ExportSnapshot;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const LOCK_FILE_NAME: &str = ".neuroart.lock";

/// `neuroart-YYYY-MM-DD.json` for the snapshot's date (UTC).
pub fn export_file_name(timestamp: DateTime<Utc>) -> String {
    format!("neuroart-{}.json", timestamp.format("%Y-%m-%d"))
}

/// Writes `snapshot` into `directory`, replacing an export from the same
/// day. Returns the path of the written file.
pub fn save_export(directory: &Path, snapshot: &ExportSnapshot) -> Result<PathBuf> {
    fs::create_dir_all(directory).with_context(|| {
        format!(
            "failed to create export directory {}",
            directory.display()
        )
    })?;

    let lock_path = directory.join(LOCK_FILE_NAME);
    let lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("failed to open export lock file {}", lock_path.display()))?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("failed to lock export file {}", lock_path.display()))?;

    let target = directory.join(export_file_name(snapshot.timestamp));
    let result = write_export(&target, snapshot);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock export file {}: {}",
            lock_path.display(),
            err
        )
    });

    result.map(|()| target)
}

fn write_export(target: &Path, snapshot: &ExportSnapshot) -> Result<()> {
    let json_bytes =
        serde_json::to_vec_pretty(snapshot).context("failed to serialise drawing export")?;

    let tmp_path = temp_path(target);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .with_context(|| {
                format!(
                    "failed to open temporary export file {}",
                    tmp_path.display()
                )
            })?;
        tmp_file
            .write_all(&json_bytes)
            .context("failed to write drawing export")?;
        tmp_file
            .sync_all()
            .context("failed to sync temporary export file")?;
    }

    if target.exists() {
        debug!("Replacing earlier export {}", target.display());
    }
    fs::rename(&tmp_path, target).with_context(|| {
        format!(
            "failed to move temporary export file {} -> {}",
            tmp_path.display(),
            target.display()
        )
    })?;

    info!(
        "Drawing exported to {} ({} bytes)",
        target.display(),
        json_bytes.len()
    );
    Ok(())
}

/// Reads an export written by [`save_export`].
pub fn load_export(path: &Path) -> Result<ExportSnapshot> {
    let file = File::open(path)
        .with_context(|| format!("failed to open export file {}", path.display()))?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("failed to parse export file {}", path.display()))
}

fn temp_path(target: &Path) -> PathBuf {
    let mut candidate = target.with_extension("json.tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_extension(format!("json.tmp{}", counter));
    }
    candidate
}
