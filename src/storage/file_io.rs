//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't leave a half-written page or
//! data file behind on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::WheelboardError;

/// Read a whole text file
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String, WheelboardError> {
    let path = path.as_ref();
    fs::read_to_string(path)
        .map_err(|e| WheelboardError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

/// Read JSON from a file, returning an error if file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, WheelboardError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(WheelboardError::Io(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| WheelboardError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| WheelboardError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<(), WheelboardError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            WheelboardError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp = TempFile::new(temp_path_for(path));

    let file = File::create(temp.path())
        .map_err(|e| WheelboardError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .map_err(|e| WheelboardError::Io(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| WheelboardError::Io(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| WheelboardError::Io(format!("Failed to sync data: {}", e)))?;
    drop(writer);

    fs::rename(temp.path(), path)
        .map_err(|e| WheelboardError::Io(format!("Failed to rename temp file: {}", e)))?;
    temp.persisted();

    Ok(())
}

/// Temp file removed on drop unless it was renamed into place
///
/// Outputs can hold decrypted data, so no early return may leave one behind.
struct TempFile {
    path: PathBuf,
    persisted: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            persisted: false,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn persisted(mut self) {
        self.persisted = true;
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Serialize to JSON and write atomically
pub fn write_json_atomic<T, P>(path: P, data: &T, pretty: bool) -> Result<(), WheelboardError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let mut contents = if pretty {
        serde_json::to_vec_pretty(data)
    } else {
        serde_json::to_vec(data)
    }
    .map_err(|e| WheelboardError::Json(format!("Failed to serialize data: {}", e)))?;
    contents.push(b'\n');

    write_atomic(path, &contents)
}
