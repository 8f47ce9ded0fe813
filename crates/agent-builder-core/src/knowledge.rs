//! Knowledge sources attached to the agent: files, websites and raw text

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{BuilderError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeFile {
    pub name: String,
    pub size_bytes: u64,
}

impl KnowledgeFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Read name and size from a file on disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(BuilderError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            )));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, metadata.len()))
    }

    pub fn display_size(&self) -> String {
        format_bytes(self.size_bytes)
    }
}

/// Human-readable size with base-1024 units, e.g. "1.5 KB"
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Parse-check a website address. The input is kept as typed on success.
pub fn validate_website(input: &str) -> Result<()> {
    Url::parse(input)
        .map(|_| ())
        .map_err(|source| BuilderError::InvalidUrl {
            input: input.to_string(),
            source,
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    files: Vec<KnowledgeFile>,
    websites: Vec<String>,
    texts: Vec<String>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[KnowledgeFile] {
        &self.files
    }

    pub fn websites(&self) -> &[String] {
        &self.websites
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn source_count(&self) -> usize {
        self.files.len() + self.websites.len() + self.texts.len()
    }

    /// Returns how many files were added
    pub fn add_files(&mut self, files: Vec<KnowledgeFile>) -> usize {
        let count = files.len();
        self.files.extend(files);
        count
    }

    /// Append a website after validating it.
    ///
    /// Empty input is ignored and returns `Ok(false)`.
    pub fn add_website(&mut self, input: &str) -> Result<bool> {
        if input.is_empty() {
            return Ok(false);
        }
        validate_website(input)?;
        self.websites.push(input.to_string());
        Ok(true)
    }

    pub fn add_text(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.texts.push(text.to_string());
        true
    }

    pub fn remove_file(&mut self, index: usize) -> Option<KnowledgeFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn remove_website(&mut self, index: usize) -> Option<String> {
        (index < self.websites.len()).then(|| self.websites.remove(index))
    }

    pub fn remove_text(&mut self, index: usize) -> Option<String> {
        (index < self.texts.len()).then(|| self.texts.remove(index))
    }
}
