//! JSON manifest holding the project version.
//!
//! Only the `version` field is interpreted. Every other field is carried
//! through untouched and in its original order when the file is rewritten.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

const VERSION_KEY: &str = "version";

#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            ReleaseError::manifest(format!("cannot read '{}': {}", path.display(), e))
        })?;

        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(document) => Ok(Manifest {
                path: path.to_path_buf(),
                document,
            }),
            _ => Err(ReleaseError::manifest(format!(
                "'{}' is not a JSON object",
                path.display()
            ))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the raw `version` string.
    pub fn version(&self) -> Result<&str> {
        match self.document.get(VERSION_KEY) {
            Some(Value::String(v)) => Ok(v),
            Some(_) => Err(ReleaseError::manifest(format!(
                "'{}' field in '{}' is not a string",
                VERSION_KEY,
                self.path.display()
            ))),
            None => Err(ReleaseError::manifest(format!(
                "'{}' has no '{}' field",
                self.path.display(),
                VERSION_KEY
            ))),
        }
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.document
            .insert(VERSION_KEY.to_string(), Value::String(version.into()));
    }

    /// Renders the manifest pretty-printed with a trailing newline.
    pub fn render(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.document)?;
        out.push('\n');
        Ok(out)
    }

    /// Writes the manifest back to where it was loaded from.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, self.render()?)?;
        Ok(())
    }
}
