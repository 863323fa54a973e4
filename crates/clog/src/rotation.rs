//! Size-triggered rotation and timestamped file naming

use crate::{Error, Result};
use chrono::NaiveDateTime;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to the base name of every physical log file
pub const FILE_SUFFIX_FORMAT: &str = "_%Y-%m-%d_%H-%M-%S.log";

/// Derive the physical file name for a rotation happening at `at`.
///
/// Always derived from the original base name, never from the previous
/// file, so two rotations within the same second share a name.
#[must_use]
pub fn rotated_file_name(base_name: &Path, at: NaiveDateTime) -> PathBuf {
    let mut name = base_name.as_os_str().to_os_string();
    name.push(at.format(FILE_SUFFIX_FORMAT).to_string());
    PathBuf::from(name)
}

fn open_log_file(path: &Path) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BufWriter::new(file))
}

/// The mutable part of a logger, only touched with the instance lock held.
#[derive(Debug)]
pub(crate) struct FileState {
    pub(crate) file: Option<BufWriter<File>>,
    pub(crate) current_path: Option<PathBuf>,
    pub(crate) rotation_threshold: u64,
    pub(crate) bytes_since_rotation: u64,
    pub(crate) rotations: u64,
    pub(crate) closed: bool,
}

impl FileState {
    pub(crate) const fn new(rotation_threshold: u64) -> Self {
        Self {
            file: None,
            current_path: None,
            rotation_threshold,
            bytes_since_rotation: 0,
            rotations: 0,
            closed: false,
        }
    }

    pub(crate) const fn threshold_reached(&self) -> bool {
        self.bytes_since_rotation >= self.rotation_threshold
    }

    /// Flush and drop the current handle. Closing twice is a no-op.
    pub(crate) fn close_file(&mut self) -> io::Result<()> {
        match self.file.take() {
            Some(mut file) => file.flush(),
            None => Ok(()),
        }
    }

    /// Close the current file and start a new one named after `at`.
    ///
    /// The counter is reset even when the new file cannot be opened; the
    /// instance then holds no handle until a later rotation succeeds.
    pub(crate) fn rotate(&mut self, base_name: &Path, at: NaiveDateTime) -> Result<PathBuf> {
        if let Err(e) = self.close_file() {
            tracing::warn!("Failed to flush log file before rotation: {}", e);
        }
        self.current_path = None;
        self.bytes_since_rotation = 0;

        let path = rotated_file_name(base_name, at);
        let file = open_log_file(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;

        self.file = Some(file);
        self.current_path = Some(path.clone());
        self.rotations += 1;
        Ok(path)
    }
}
