//! Named text records on disk or in memory

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

/// Flat key → text store
pub trait Storage {
    /// Contents of `key`, or `None` if it is missing or unreadable
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, text: &str) -> io::Result<()>;
}

/// Records stored as files under one directory
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl Storage for DirStorage {
    fn read(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Some(text),
            Err(err) => {
                debug!("read {key}: {err}");
                None
            }
        }
    }

    fn write(&mut self, key: &str, text: &str) -> io::Result<()> {
        write_text_atomic(&self.path_for(key), text)
    }
}

/// Write to a sibling temp file, then swap it into place
fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, text)?;
    if let Err(error) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("record");
    path.with_file_name(format!("{file_name}.tmp"))
}

/// In-memory store (tests, scripted sessions)
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    pub files: BTreeMap<String, String>,
    /// Fail every write (exercises save error paths)
    pub read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, text: &str) -> Self {
        self.files.insert(key.to_string(), text.to_string());
        self
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.files.get(key).cloned()
    }

    fn write(&mut self, key: &str, text: &str) -> io::Result<()> {
        if self.read_only {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "storage is read-only",
            ));
        }
        self.files.insert(key.to_string(), text.to_string());
        Ok(())
    }
}
