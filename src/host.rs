use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Failed to read field file {}: {}", .path.display(), .source)]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write field file {}: {}", .path.display(), .source)]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The host-owned string value a tag widget is seeded from and writes back to
pub trait HostBinding {
    /// Current stored value, `None` when the host has nothing stored
    fn initial_value(&self) -> Result<Option<String>, HostError>;

    /// Replace the stored value
    fn write_value(&mut self, value: &str) -> Result<(), HostError>;
}

/// Host field backed by a plain text file
#[derive(Debug, Clone)]
pub struct FieldFile {
    path: PathBuf,
}

impl FieldFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for titles and messages
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }
}

impl HostBinding for FieldFile {
    fn initial_value(&self) -> Result<Option<String>, HostError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                // Editors like to append a newline; it is never part of the value
                let value = contents
                    .strip_suffix("\r\n")
                    .or_else(|| contents.strip_suffix('\n'))
                    .unwrap_or(&contents);
                Ok(Some(value.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(HostError::ReadError {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_value(&mut self, value: &str) -> Result<(), HostError> {
        let write_error = |source| HostError::WriteError {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&self.path, value).map_err(write_error)?;
        tracing::debug!(path = %self.path.display(), value, "field file written");
        Ok(())
    }
}

/// In-memory host field, records every write
#[derive(Debug, Clone, Default)]
pub struct MemoryField {
    pub value: Option<String>,
    pub writes: Vec<String>,
    /// Fail the next write once, leaving the value untouched
    pub fail_next_write: bool,
}

impl MemoryField {
    pub fn new(value: Option<&str>) -> Self {
        Self {
            value: value.map(str::to_string),
            writes: Vec::new(),
            fail_next_write: false,
        }
    }
}

impl HostBinding for MemoryField {
    fn initial_value(&self) -> Result<Option<String>, HostError> {
        Ok(self.value.clone())
    }

    fn write_value(&mut self, value: &str) -> Result<(), HostError> {
        if std::mem::take(&mut self.fail_next_write) {
            return Err(HostError::WriteError {
                path: PathBuf::from("<memory>"),
                source: io::Error::other("write refused"),
            });
        }
        self.value = Some(value.to_string());
        self.writes.push(value.to_string());
        Ok(())
    }
}
